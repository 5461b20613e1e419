// Chatloop - Tool-calling chat service
// Main entry point

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;

use chatloop::config::{load_config, Config};
use chatloop::orchestrator::{ChatLimits, Orchestrator};
use chatloop::providers::OpenAIProvider;
use chatloop::server::ChatServer;
use chatloop::tools::{StandardTools, ToolDispatcher};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "chatloop")]
#[command(about = "Tool-calling chat service", version)]
struct Args {
    /// Run mode (defaults to serve)
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Answer a single message from the terminal
    Ask {
        /// Message text
        message: String,
        /// Model to use (overrides config)
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut config = load_config().context("Failed to load configuration")?;

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            ChatServer::new(config)?.serve().await
        }
        Command::Ask { message, model } => run_ask(config, &message, model.as_deref()).await,
    }
}

/// Run one chat request and print the answer
async fn run_ask(config: Config, message: &str, model: Option<&str>) -> Result<()> {
    let Some(api_key) = config.api_key.clone() else {
        bail!("API_KEY not configured");
    };

    let provider = Arc::new(OpenAIProvider::new(api_key, config.completion_url.clone())?);
    let tools = StandardTools::from_config(&config)?;
    let dispatcher = Arc::new(ToolDispatcher::new(tools.registry()));
    let orchestrator = Orchestrator::new(provider, dispatcher, ChatLimits::from_config(&config));

    let model = config.resolve_model(model);
    let answer = orchestrator.chat(message, &model).await?;

    println!("{}", answer.content);
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}
