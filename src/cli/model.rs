//! Model commands: retrain, evaluate, predict

use super::helpers::{open_service, GlobalArgs};
use triage_core::{error::Result, MetricsReport, Priority};

/// Handle retrain command
pub async fn retrain(args: &GlobalArgs) -> Result<()> {
    let service = open_service(args).await?;
    let outcome = service.retrain().await?;

    println!("{}", outcome.message());
    Ok(())
}

/// Handle evaluate command
pub async fn evaluate(json: bool, args: &GlobalArgs) -> Result<()> {
    let service = open_service(args).await?;
    let report = service.metrics().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// Handle predict command
pub async fn predict(text: String, args: &GlobalArgs) -> Result<()> {
    let service = open_service(args).await?;
    let priority = service.suggest(&text)?;

    println!("{}", priority);
    Ok(())
}

fn render_report(report: &MetricsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Labeled tasks: {} of {}\n",
        report.labeled_count, report.total_tasks
    ));

    let (Some(accuracy), Some(matrix), Some(counts)) = (
        report.metrics.accuracy,
        report.metrics.confusion_matrix.as_ref(),
        report.metrics.priority_counts.as_ref(),
    ) else {
        out.push_str("No metrics yet: train a model on at least 10 prioritized tasks.\n");
        return out;
    };

    out.push_str(&format!("Accuracy (in-sample): {:.1}%\n\n", accuracy * 100.0));
    out.push_str("Confusion matrix (rows = yours, columns = predicted)\n");
    out.push_str(&format!("{:>8}", ""));
    for priority in Priority::ALL {
        out.push_str(&format!("{:>8}", priority.name()));
    }
    out.push('\n');
    for (row, truth) in matrix.iter().zip(Priority::ALL) {
        out.push_str(&format!("{:>8}", truth.name()));
        for cell in row {
            out.push_str(&format!("{:>8}", cell));
        }
        out.push('\n');
    }

    out.push_str("\nLabeled tasks per priority\n");
    for priority in Priority::ALL {
        let count = counts.get(priority.name()).copied().unwrap_or(0);
        out.push_str(&format!("  {:<8}{}\n", priority.name(), count));
    }
    out
}
