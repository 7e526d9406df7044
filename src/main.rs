use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxr::core::SortKey;
use fxr::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxr::AppCommand {
    fn from(cmd: Commands) -> fxr::AppCommand {
        match cmd {
            Commands::Gallery { search, sort, base } => {
                fxr::AppCommand::Gallery { search, sort, base }
            }
            Commands::Pair {
                from,
                to,
                amount,
                to_amount,
                interactive,
            } => fxr::AppCommand::Pair {
                from,
                to,
                amount,
                to_amount,
                interactive,
            },
            Commands::Open { path } => fxr::AppCommand::Open { path },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List exchange rates against the base currency
    Gallery {
        /// Only show currencies whose code or name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Sort order: code, code-desc, rate or rate-desc
        #[arg(long, default_value = "code")]
        sort: SortKey,
        /// Base currency, overriding the configured one
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Show the rate, converter and history for a currency pair
    Pair {
        from: String,
        to: String,
        /// Amount in the FROM currency
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// Amount in the TO currency
        #[arg(short, long, conflicts_with = "amount", allow_hyphen_values = true)]
        to_amount: Option<String>,
        /// Keep converting interactively
        #[arg(short, long)]
        interactive: bool,
    },
    /// Open a route such as `/` or `/eur/usd`
    Open { path: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxr::cli::setup::setup(),
        Some(cmd) => fxr::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
