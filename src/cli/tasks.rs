//! Task commands: add, list, set-priority, delete

use super::helpers::{open_service, GlobalArgs};
use triage_core::{error::Result, types::priority_name, Priority, Task, TaskId, TaskSortOrder};

fn format_task(task: &Task) -> String {
    let mark = if task.is_labeled() { ' ' } else { '*' };
    format!(
        "{}  {:<6}{} (suggested {:<6})  {}",
        task.id,
        priority_name(task.user_priority.map(Priority::as_i64)),
        mark,
        task.suggested_priority.name(),
        task.content
    )
}

/// Handle task add command
pub async fn add(content: String, args: &GlobalArgs) -> Result<()> {
    let service = open_service(args).await?;
    let added = service.add_task(&content).await?;

    println!("{}", added.message);
    println!("  ID: {}", added.data.id);
    Ok(())
}

/// Handle task list command
pub async fn list(recent: bool, args: &GlobalArgs) -> Result<()> {
    let order = if recent {
        TaskSortOrder::Recent
    } else {
        TaskSortOrder::Priority
    };

    let service = open_service(args).await?;
    let tasks = service.list_tasks_by(order).await?;

    if tasks.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }

    for task in &tasks {
        println!("{}", format_task(task));
    }
    if tasks.iter().any(|t| !t.is_labeled()) {
        println!();
        println!("* not yet prioritized by you");
    }
    Ok(())
}

/// Handle set-priority command
pub async fn set_priority(id: String, priority: String, args: &GlobalArgs) -> Result<()> {
    let id = TaskId::from_string(&id)?;
    let priority: Priority = priority.parse()?;

    let service = open_service(args).await?;
    let updated = service.set_priority(id, priority).await?;

    println!("{}", updated.message);
    Ok(())
}

/// Handle task delete command
pub async fn delete(id: String, args: &GlobalArgs) -> Result<()> {
    let id = TaskId::from_string(&id)?;

    let service = open_service(args).await?;
    let deleted = service.delete_task(id).await?;

    println!("{}", deleted.message);
    Ok(())
}
