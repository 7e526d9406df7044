pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::pair::PairOptions;
use crate::core::config::{AppConfig, Preferences};
use crate::core::{CalculatorSession, CurrencyCode, GalleryFilter, Route, SortKey};
use crate::providers::frankfurter::FrankfurterProvider;
use anyhow::Result;
use tokio::io::BufReader;
use tracing::{debug, info, warn};

/// What to show, already decoupled from command-line parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// All rates against a base currency
    Gallery {
        search: Option<String>,
        sort: SortKey,
        base: Option<String>,
    },
    /// Calculator for one currency pair
    Pair {
        from: String,
        to: String,
        amount: Option<String>,
        to_amount: Option<String>,
        interactive: bool,
    },
    /// Whatever view a route path resolves to
    Open { path: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxr starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut preferences = Preferences::from(&config);
    let provider = FrankfurterProvider::new(&config.frankfurter())?;

    match command {
        AppCommand::Gallery { search, sort, base } => {
            let base = match base {
                Some(code) => code.parse::<CurrencyCode>()?,
                None => config.base_currency.clone(),
            };
            let filter = GalleryFilter::new(search.as_deref().unwrap_or_default(), sort);
            cli::gallery::run(&provider, &base, &filter, &preferences).await
        }
        AppCommand::Pair {
            from,
            to,
            amount,
            to_amount,
            interactive,
        } => {
            let options = PairOptions {
                amount,
                to_amount,
                history_days: config.history_days,
            };
            match Route::from_params(&from, &to) {
                Route::Pair(pair) => {
                    let mut session = CalculatorSession::new(pair);
                    if interactive {
                        let stdin = BufReader::new(tokio::io::stdin());
                        cli::pair::run_interactive(
                            &provider,
                            &mut session,
                            &options,
                            &mut preferences,
                            stdin,
                            &mut std::io::stdout(),
                        )
                        .await
                    } else {
                        cli::pair::run(&provider, &mut session, &options, &preferences).await
                    }
                }
                Route::Gallery => {
                    warn!("Showing gallery instead of {}/{}", from, to);
                    show_gallery(&provider, &config, &preferences).await
                }
            }
        }
        AppCommand::Open { path } => match Route::parse(&path) {
            Route::Pair(pair) => {
                let options = PairOptions {
                    history_days: config.history_days,
                    ..Default::default()
                };
                let mut session = CalculatorSession::new(pair);
                cli::pair::run(&provider, &mut session, &options, &preferences).await
            }
            Route::Gallery => show_gallery(&provider, &config, &preferences).await,
        },
    }
}

async fn show_gallery(
    provider: &FrankfurterProvider,
    config: &AppConfig,
    preferences: &Preferences,
) -> Result<()> {
    cli::gallery::run(
        provider,
        &config.base_currency,
        &GalleryFilter::default(),
        preferences,
    )
    .await
}
