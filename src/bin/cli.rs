//! CLI binary for mindmate.

use clap::{Parser, Subcommand};
use mindmate::{MindmateConfig, SupportPipeline};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Mindmate: emotion-aware conversational support assistant.
#[derive(Parser)]
#[command(name = "mindmate", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Chat interactively over stdin. `/mood`, `/reset`, and `/quit` are recognised.
    Chat {
        /// Print each turn as a JSON line instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Classify one message and print the result as JSON.
    Classify {
        /// Message text.
        text: String,
    },

    /// Write the default configuration to the config path.
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries the conversation.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mindmate=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(Command::InitConfig) = cli.command {
        let path = cli
            .config
            .unwrap_or_else(MindmateConfig::default_config_path);
        MindmateConfig::default().save_to_file(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let config = match cli.config {
        Some(ref path) => MindmateConfig::from_file(path)?,
        None => {
            let path = MindmateConfig::default_config_path();
            if path.exists() {
                MindmateConfig::from_file(&path)?
            } else {
                MindmateConfig::default()
            }
        }
    };
    let pipeline = SupportPipeline::from_config(config)?;

    match cli.command.unwrap_or(Command::Chat { json: false }) {
        Command::Chat { json } => run_chat(&pipeline, json).await,
        Command::Classify { text } => run_classify(&pipeline, &text).await,
        Command::InitConfig => Ok(()),
    }
}

async fn run_chat(pipeline: &SupportPipeline, json: bool) -> anyhow::Result<()> {
    let registry = pipeline.session_registry();
    let session_id = registry.create();
    info!(session = %session_id, "chat started");

    if !json {
        println!("Mindmate v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "This is a supportive companion, not a substitute for professional care."
        );
        println!(
            "Type /mood to see recent moods, /reset to start over, /quit to leave.\n"
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        match message {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                registry.reset(&session_id).await;
                println!("(session reset)\n");
                continue;
            }
            "/mood" => {
                let moods = registry.mood_history(&session_id).await;
                let names: Vec<&str> = moods.iter().map(|m| m.as_str()).collect();
                println!("mood history: [{}]\n", names.join(", "));
                continue;
            }
            _ => {}
        }

        let outcome = pipeline.respond(&registry, &session_id, message).await;
        if json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            println!("{}\n", outcome.reply);
            println!(
                "  [{} · confidence {:.2} · risk {}/{}]\n",
                outcome.emotion,
                outcome.confidence,
                outcome.risk_score,
                pipeline.config().risk.max_score
            );
        }
    }

    registry.remove(&session_id);
    Ok(())
}

async fn run_classify(pipeline: &SupportPipeline, text: &str) -> anyhow::Result<()> {
    let result = pipeline.classifier().classify(text).await;
    let increment = pipeline.scorer().score(text, result.category);
    let report = serde_json::json!({
        "emotion": result.category,
        "confidence": result.confidence,
        "method": result.method,
        "risk_increment": increment,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
