mod cli;
mod commands;
mod setup;

use std::process::ExitCode;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::cli::{Args, Command};
use crate::commands::ai_error;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` plus the comma-separated `directive`. Unparseable parts are
/// returned so they can be reported once a subscriber exists.
fn build_filter(directive: &str) -> (EnvFilter, Vec<String>) {
    let mut filter = EnvFilter::from_default_env();
    let mut rejected = Vec::new();
    for part in directive.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(_) => rejected.push(part.to_string()),
        }
    }
    (filter, rejected)
}

fn warn_rejected(rejected: Vec<String>) {
    for part in rejected {
        tracing::warn!("Ignoring invalid log directive: {part}");
    }
}

/// Install the stderr subscriber before config loading so loader events
/// are not lost. The filter can be swapped once the config is known.
fn init_logging(directive: &str) -> FilterHandle {
    let (filter, rejected) = build_filter(directive);
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    warn_rejected(rejected);
    handle
}

fn set_log_filter(handle: &FilterHandle, directive: &str) {
    let (filter, rejected) = build_filter(directive);
    if let Err(e) = handle.reload(filter) {
        tracing::warn!("Failed to apply configured log level: {e}");
    }
    warn_rejected(rejected);
}

async fn run(args: Args) -> lamplight_common::Result<()> {
    let log_handle = init_logging(&setup::bootstrap_log_directive(&args));

    let mut config = lamplight_config::load_unvalidated(args.config.as_deref())?;
    setup::apply_cli_overrides(&mut config, &args)?;
    if args.log_level.is_none() {
        set_log_filter(&log_handle, &setup::log_directive(&args, &config));
    }

    tracing::info!("Lamplight v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }

    let mut stdout = std::io::stdout();
    let command = args.command();

    match command {
        Command::Roles => return commands::demos::roles(&mut stdout),
        Command::Config => {
            print!("{}", lamplight_config::config_to_toml(&config));
            return Ok(());
        }
        _ => {}
    }

    let services = setup::build_services(&config).map_err(ai_error)?;
    let client = services.get(&config.provider.service_id).map_err(ai_error)?;
    let plugins = !matches!(command, Command::Chat { no_plugins: true });
    let tools = setup::build_tools(&config, plugins).map_err(ai_error)?;
    let mut session = setup::build_session(&config, tools);
    tracing::info!(session = %session.id(), model = %config.provider.model_id, "Session started");

    match command {
        Command::Chat { .. } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::chat::run(&mut session, client.as_ref(), stdin, &mut stdout).await?;
        }
        Command::Ask { prompt, image, stream } => {
            commands::ask::run(
                &mut session,
                client.as_ref(),
                &prompt,
                image.as_deref(),
                stream,
                &mut stdout,
            )
            .await?;
        }
        Command::Followup => commands::demos::followup(&mut session, client.as_ref(), &mut stdout).await?,
        Command::Roles | Command::Config => {}
    }

    tracing::debug!(session = %session.id(), usage = %session.tracker(), "Done");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
