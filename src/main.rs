//! `stx-agent`: command-line tools for agents on the Stacks blockchain.
//!
//! Each subcommand validates its input, derives credentials when it needs
//! them, performs one remote operation and prints a JSON result envelope.

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use stx_agent_tools::commands::{self, Command};
use stx_agent_tools::config::{self, AppConfig};
use stx_agent_tools::invoker::JsonSink;
use stx_agent_tools::observability;
use stx_agent_tools::wallet::Network;

#[derive(Debug, Parser)]
#[command(name = "stx-agent", version)]
#[command(about = "Read, sign and broadcast on Stacks from the command line", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Network override (mainnet or testnet)
    #[arg(long, global = true)]
    network: Option<Network>,

    /// Account index override
    #[arg(long, global = true)]
    account_index: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(index) = self.account_index {
            config.wallet.account_index = Some(index);
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Print the usage error, plus the example of the subcommand that was named.
fn usage_failure(error: clap::Error) -> ExitCode {
    match error.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let _ = error.print();
    if let Some(example) = std::env::args()
        .skip(1)
        .find_map(|arg| commands::example(&arg))
    {
        eprintln!("\n{}", example);
    }
    ExitCode::FAILURE
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_failure(e),
    };

    let dotenv = config::load_dotenv();
    let config = match config::load(cli.config.as_deref(), |config| cli.apply_overrides(config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    observability::init(&config.observability.log_level);

    if let Some(path) = &dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    tracing::debug!(
        network = %config.network,
        account_index = ?config.wallet.account_index,
        apis = config.apis.len(),
        "Configuration loaded"
    );

    let mut sink = JsonSink::stdout();
    match cli.command.run(&config, &mut sink).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::debug!(error = %e, "Command aborted");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
