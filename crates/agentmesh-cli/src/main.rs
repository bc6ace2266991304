//! AgentMesh command-line interface: runs the cooperative multi-agent
//! development pipeline for a single task or interactively.

use agentmesh_agent::{AgentRole, LlmProvider, ModelConfig};
use agentmesh_core::{Message, Stage};
use agentmesh_pipeline::{
    extract_fenced_blocks, Pipeline, ProgressSink, ResultBundle, RunStatus, SavedRun,
};
use clap::Parser;
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agentmesh",
    about = "AgentMesh — Cooperative Multi-Agent Development Pipeline"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "agentmesh.toml")]
    config: PathBuf,

    /// Single task to execute
    #[arg(short, long)]
    task: Option<String>,

    /// Output file for results (JSON format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run in interactive mode (default when no task is given)
    #[arg(short, long)]
    interactive: bool,

    /// Model identifier override
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct MeshConfig {
    model: ModelConfig,
}

fn load_model_config(cli: &Cli) -> anyhow::Result<ModelConfig> {
    let mut model = if cli.config.exists() {
        let raw = std::fs::read_to_string(&cli.config)?;
        let config: MeshConfig = toml::from_str(&raw)?;
        config.model
    } else {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            anyhow::anyhow!(
                "no config file at {} and OPENAI_API_KEY is not set",
                cli.config.display()
            )
        })?;
        ModelConfig {
            provider: LlmProvider::OpenAi,
            model_id: "gpt-4".to_string(),
            api_key,
            api_base_url: None,
            temperature: 0.2,
            max_tokens: 4096,
        }
    };

    if let Some(model_id) = &cli.model {
        model.model_id = model_id.clone();
    }
    Ok(model)
}

/// Prints stage banners and agent replies to stdout as the run progresses.
struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn stage_started(&self, stage: Stage) {
        println!("\n=== {stage} ===");
    }

    fn agent_replied(&self, role: AgentRole, message: &Message) {
        println!("\n[{}]\n{}", role.name(), message.content);
    }
}

fn print_summary(bundle: &ResultBundle) {
    match &bundle.status {
        RunStatus::Completed => {
            let blocks = bundle
                .final_code
                .as_deref()
                .map(extract_fenced_blocks)
                .unwrap_or_default();
            println!("\nPipeline complete.");
            println!(
                "  subtasks: {}, code blocks: {}",
                bundle.subtask_results.len(),
                blocks.len()
            );
        }
        RunStatus::Failed(failure) => {
            println!("\nPipeline failed during {}.", failure.stage);
            if let Some(subtask) = &failure.subtask {
                println!("  subtask: {subtask}");
            }
            println!("  reason: {}", failure.reason);
            println!(
                "  completed subtasks preserved: {}",
                bundle.subtask_results.len()
            );
        }
    }
}

async fn run_task(pipeline: &Pipeline, task: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let bundle = pipeline.run(task).await;
    print_summary(&bundle);

    if let Some(path) = output {
        let saved = SavedRun::from(&bundle);
        std::fs::write(path, serde_json::to_string_pretty(&saved)?)?;
        println!("Results saved to {}", path.display());
    }
    Ok(())
}

async fn interactive(pipeline: &Pipeline) -> anyhow::Result<()> {
    println!("AgentMesh interactive mode. Enter a task, or 'quit' to exit.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let task = line.trim();
        if task.is_empty() {
            continue;
        }
        if matches!(task, "quit" | "exit" | "q") {
            break;
        }

        run_task(pipeline, task, None).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let model = load_model_config(&cli)?;
    let pipeline = Pipeline::new(&model).with_sink(Arc::new(ConsoleSink));

    match (&cli.task, cli.interactive) {
        (Some(task), false) => run_task(&pipeline, task, cli.output.as_deref()).await,
        _ => interactive(&pipeline).await,
    }
}
