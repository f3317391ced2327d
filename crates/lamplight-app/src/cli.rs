use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lamplight: chat with a local Ollama model that can switch your lights.
#[derive(Parser, Debug)]
#[command(name = "lamplight", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model id override (e.g. `llama3.2:latest`).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Ollama host override (e.g. `http://localhost:11434/`).
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Log filter directive override (e.g. `debug`, `lamplight_ai=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat (the default).
    Chat {
        /// Do not give the model the lights tools.
        #[arg(long)]
        no_plugins: bool,
    },
    /// Ask a single question and print the reply.
    Ask {
        prompt: String,
        /// Attach an image file to the question.
        #[arg(long)]
        image: Option<PathBuf>,
        /// Print the reply as it is generated.
        #[arg(long)]
        stream: bool,
    },
    /// Ask a question and a follow-up, then print the whole history.
    Followup,
    /// Print a prebuilt conversation showing each message role.
    Roles,
    /// Print the effective configuration as TOML.
    Config,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Chat { no_plugins: false })
    }
}

pub fn parse() -> Args {
    Args::parse()
}
