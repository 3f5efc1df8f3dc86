mod config;
mod error;

use std::path::{Path, PathBuf};

use clap::Parser;
use futures_util::StreamExt;
use runtime::{AgentEvent, Environment, Options, QueryClient, stream_agent_with};

use config::Config;
use error::Result;

const CONFIG_FILE: &str = "recipefinder.toml";

#[derive(Parser)]
#[command(name = "recipefinder")]
#[command(about = "Search AllRecipes with a browser-automation agent", long_about = None)]
#[command(version)]
struct Cli {
    /// What to search for, e.g. "chicken parmesan"
    prompt: String,

    /// Model requested from the query service
    #[arg(long)]
    model: Option<String>,

    /// Turn cap for the agent session
    #[arg(long)]
    max_turns: Option<u32>,

    /// Query-service command override
    #[arg(long, value_name = "COMMAND")]
    agent_cmd: Option<String>,

    /// Assume a host-provided tool server instead of launching one
    #[arg(long)]
    no_server: bool,

    /// Emit events as JSON lines instead of human-readable output
    #[arg(long)]
    json: bool,

    /// Config file path (default: recipefinder.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    // Precedence: flag > config file > built-in default.
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.agent.model = model;
    }
    if let Some(max_turns) = cli.max_turns {
        config.agent.max_turns = max_turns;
    }
    if let Some(command) = cli.agent_cmd {
        config.agent.command = command;
    }
    if cli.no_server {
        config.agent.standalone = false;
    }

    let environment = Environment::capture();
    let mut options = Options::build(&environment, config.agent.standalone);
    options.model = config.agent.model.clone();
    options.max_turns = config.agent.max_turns;

    let client = QueryClient::with_command(&config.agent.command);
    let mut events = stream_agent_with(&cli.prompt, &client, &options)?;

    while let Some(event) = events.next().await {
        let event = event?;
        if cli.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            render(&event);
        }
        if matches!(event, AgentEvent::Done) {
            break;
        }
    }

    Ok(())
}

fn render(event: &AgentEvent) {
    match event {
        AgentEvent::Text { text } => println!("{text}"),
        AgentEvent::Tool { name } => println!("[tool] {name}"),
        AgentEvent::Usage { input, output } => {
            println!("[usage] input={input} output={output}");
        }
        AgentEvent::Result { text } => println!("\n{text}"),
        AgentEvent::Done => {}
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            let default = Path::new(CONFIG_FILE);
            if default.exists() {
                Ok(Config::load(default)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}
