// Bowerbird - AI development agent
// Main entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use bowerbird::config::load_config;
use bowerbird::llm::{AnthropicClient, LanguageModel};
use bowerbird::pipeline::{Architect, CoderWorker, Orchestrator, Planner};
use bowerbird::tools::Workspace;

#[derive(Parser)]
#[command(
    name = "bowerbird",
    version,
    about = "AI development agent - plans a project from one prompt and builds it file by file"
)]
struct Cli {
    /// Natural-language description of the project to generate
    prompt: String,

    /// Directory the generated project is written into
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Model identifier for every generation call
    #[arg(long)]
    model: Option<String>,

    /// Upper bound on pipeline transitions before the run is aborted
    #[arg(long)]
    max_transitions: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = load_config()?;
    if let Some(workspace) = cli.workspace {
        config.workspace_dir = workspace;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(cap) = cli.max_transitions {
        config.transition_cap = cap;
    }

    println!("Executing with prompt: {}", cli.prompt);

    let client: Arc<dyn LanguageModel> = Arc::new(AnthropicClient::new(
        config.api_key.clone(),
        config.model.clone(),
    )?);
    let workspace = Arc::new(Workspace::new(&config.workspace_dir)?);

    let orchestrator = Orchestrator::new(
        Planner::new(client.clone()),
        Architect::new(client.clone()),
        CoderWorker::new(client, workspace, config.worker_turn_cap),
        config.transition_cap,
    );

    let report = orchestrator.run(&cli.prompt).await;

    println!("\n--- Agent Run Finished ---");
    println!("Final state:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    std::process::exit(report.exit_code());
}
