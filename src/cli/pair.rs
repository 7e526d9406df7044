use super::{chart, ui};
use crate::core::config::Preferences;
use crate::core::format::format_rate;
use crate::core::loader::{history_start, load_calculator, load_rate};
use crate::core::{CalculatorSession, RateProvider};
use anyhow::{Result, anyhow};
use chrono::Local;
use comfy_table::Cell;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Options for a one-shot calculator view.
#[derive(Debug, Clone, Default)]
pub struct PairOptions {
    pub amount: Option<String>,
    pub to_amount: Option<String>,
    pub history_days: u32,
}

/// A line of input in the interactive calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    From(String),
    To(String),
    Swap,
    Refresh,
    Theme,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim().to_string();
        match word.to_lowercase().as_str() {
            "from" | "f" => Ok(SessionCommand::From(rest)),
            "to" | "t" => Ok(SessionCommand::To(rest)),
            "swap" | "s" => Ok(SessionCommand::Swap),
            "refresh" | "r" => Ok(SessionCommand::Refresh),
            "theme" => Ok(SessionCommand::Theme),
            "help" | "h" | "?" => Ok(SessionCommand::Help),
            "quit" | "q" | "exit" => Ok(SessionCommand::Quit),
            _ => Err(anyhow!("Unknown command: {}", line)),
        }
    }
}

const HELP: &str = "Commands: from <amount>, to <amount>, swap, refresh, theme, help, quit";

/// Renders the rate line and the two linked amount fields.
pub fn render_calculator(session: &CalculatorSession, preferences: &Preferences) -> String {
    let theme = preferences.theme();
    let pair = session.pair();
    let mut output = format!(
        "{}\n",
        ui::style_text(
            &format!("{} / {}", pair.from, pair.to),
            ui::StyleType::Title,
            theme
        )
    );

    let rate = session.rate();
    if let Some(error) = &rate.error {
        output.push_str(&ui::style_text(
            &format!("Error loading rate: {error}"),
            ui::StyleType::Error,
            theme,
        ));
        return output;
    }
    let Some(current) = rate.rate else {
        output.push_str("Loading current rate...");
        return output;
    };

    let as_of = rate
        .as_of
        .map(|d| format!(" (as of {d})"))
        .unwrap_or_default();
    output.push_str(&format!(
        "Current rate{as_of}: {}\n",
        ui::style_text(
            &format!(
                "1 {} = {} {}",
                pair.from,
                format_rate(Some(current)),
                pair.to
            ),
            ui::StyleType::Value,
            theme
        )
    ));

    let engine = session.engine();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(pair.from.as_str(), theme),
        ui::header_cell("⇄", theme),
        ui::header_cell(pair.to.as_str(), theme),
    ]);
    table.add_row(vec![
        ui::amount_cell(engine.from_text()),
        Cell::new(""),
        ui::amount_cell(engine.to_text()),
    ]);
    output.push_str(&table.to_string());
    output
}

fn render_full(session: &CalculatorSession, preferences: &Preferences, history_days: u32) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        render_calculator(session, preferences),
        ui::style_text(&ui::separator(), ui::StyleType::Subtle, preferences.theme()),
        ui::style_text(
            &format!("Rate History (Last {history_days} Days)"),
            ui::StyleType::Label,
            preferences.theme()
        ),
        chart::render_history(session.history(), session.pair(), preferences.theme())
    )
}

/// Loads rate and history for the session's current pair and applies them
/// unless the session moved on meanwhile.
async fn reload(
    session: &mut CalculatorSession,
    provider: &(dyn RateProvider + Send + Sync),
    history_days: u32,
) {
    let ticket = session.begin_load();
    let pair = session.pair().clone();
    let start = history_start(Local::now().date_naive(), history_days);
    let data = load_calculator(provider, &pair, start).await;
    session.apply(ticket, data);
}

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    session: &mut CalculatorSession,
    options: &PairOptions,
    preferences: &Preferences,
) -> Result<()> {
    let pb = ui::new_spinner(&format!("Fetching {} rates...", session.pair()));
    reload(session, provider, options.history_days).await;
    pb.finish_and_clear();

    if let Some(amount) = &options.amount {
        session.on_from_changed(amount);
    } else if let Some(amount) = &options.to_amount {
        session.on_to_changed(amount);
    }

    println!("{}", render_full(session, preferences, options.history_days));
    Ok(())
}

/// Interactive calculator: reads commands from `input` until `quit` or end
/// of input, printing the converter after each one.
pub async fn run_interactive<R, W>(
    provider: &(dyn RateProvider + Send + Sync),
    session: &mut CalculatorSession,
    options: &PairOptions,
    preferences: &mut Preferences,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    reload(session, provider, options.history_days).await;
    writeln!(out, "{}", render_full(session, preferences, options.history_days))?;
    writeln!(out, "{HELP}")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}. {HELP}")?;
                continue;
            }
        };
        debug!(?command, "Calculator command");

        match command {
            SessionCommand::From(text) => session.on_from_changed(&text),
            SessionCommand::To(text) => session.on_to_changed(&text),
            SessionCommand::Swap => {
                let pair = session.swap();
                writeln!(out, "Switched to {}", pair.path())?;
                reload(session, provider, options.history_days).await;
                writeln!(out, "{}", render_full(session, preferences, options.history_days))?;
                continue;
            }
            SessionCommand::Refresh => {
                let ticket = session.begin_load();
                let pair = session.pair().clone();
                let rate = load_rate(provider, &pair).await;
                session.apply_rate(ticket, rate);
            }
            SessionCommand::Theme => {
                let theme = preferences.toggle_theme();
                writeln!(out, "Theme: {theme:?}")?;
            }
            SessionCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            SessionCommand::Quit => break,
        }
        writeln!(out, "{}", render_calculator(session, preferences))?;
    }
    Ok(())
}
