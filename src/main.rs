//! Triage - to-do list with learned priority suggestions
//!
//! Entry point for the `triage` binary: task commands, model commands, and
//! the HTTP API server.

mod cli;

use clap::{Parser, Subcommand};
use cli::helpers::GlobalArgs;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};
use triage_core::error::Result;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "To-do list that learns how you prioritize", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Configuration file (defaults to ~/.config/triage/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database path (overrides TRIAGE_DATABASE_PATH and config file)
    #[arg(long, global = true)]
    db_path: Option<String>,

    /// Model artifact path (overrides TRIAGE_MODEL_PATH and config file)
    #[arg(long, global = true)]
    model_path: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Listen address (defaults to listen_addr from config)
        #[arg(long)]
        addr: Option<String>,
    },

    /// Add a task with a suggested priority
    Add {
        /// Task description
        content: String,
    },

    /// List tasks, highest priority first
    List {
        /// Newest first instead
        #[arg(long)]
        recent: bool,
    },

    /// Set your own priority for a task (1/low, 2/medium, 3/high)
    SetPriority {
        /// Task ID
        id: String,

        /// Priority
        priority: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Retrain the model on all prioritized tasks
    Retrain,

    /// Show model performance on prioritized tasks
    Evaluate {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest a priority for some text without saving it
    Predict {
        /// Task description
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Build filter: use specified level for triage, keep libsql and hyper quiet
    let level = level.as_str().to_lowercase();
    let filter = EnvFilter::new(format!(
        "triage={level},triage_core={level},libsql=warn,hyper=warn"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Triage v{} starting...", env!("CARGO_PKG_VERSION"));

    let args = GlobalArgs {
        config: cli.config,
        db_path: cli.db_path,
        model_path: cli.model_path,
    };

    match cli.command {
        Commands::Serve { addr } => cli::serve::handle(addr, &args).await,
        Commands::Add { content } => cli::tasks::add(content, &args).await,
        Commands::List { recent } => cli::tasks::list(recent, &args).await,
        Commands::SetPriority { id, priority } => {
            cli::tasks::set_priority(id, priority, &args).await
        }
        Commands::Delete { id } => cli::tasks::delete(id, &args).await,
        Commands::Retrain => cli::model::retrain(&args).await,
        Commands::Evaluate { json } => cli::model::evaluate(json, &args).await,
        Commands::Predict { text } => cli::model::predict(text, &args).await,
    }
}
