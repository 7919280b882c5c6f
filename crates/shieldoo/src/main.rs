mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use shieldoo_api::ApiClient;
use shieldoo_core::Manager;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::{CliError, exit_code};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Usage errors exit 1 like every other failure; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_code::FAILURE
            } else {
                exit_code::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions need no API configuration
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "shieldoo", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let manager = connect(&cli.global)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &manager, &cli.global).await
        }
    }
}

/// Resolve configuration and build the API-backed manager.
fn connect(global: &GlobalOpts) -> Result<Manager, CliError> {
    let api_config = config::resolve_api_config(global)?;
    tracing::debug!(
        uri = %api_config.base_url,
        timeout_secs = api_config.transport.timeout.as_secs(),
        "using management API"
    );
    let client = ApiClient::new(&api_config)?;
    Ok(Manager::new(client))
}
