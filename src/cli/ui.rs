use crate::core::config::Theme;
use crate::core::format::format_rate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType, theme: Theme) -> String {
    let styled = match (style_type, theme) {
        (StyleType::Title, _) => style(text).bold().underlined(),
        (StyleType::Label, _) => style(text).bold(),
        (StyleType::Value, Theme::Dark) => style(text).green().bold(),
        (StyleType::Value, Theme::Light) => style(text).blue().bold(),
        (StyleType::Error, _) => style(text).red(),
        (StyleType::Subtle, _) => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str, theme: Theme) -> Cell {
    let color = match theme {
        Theme::Dark => Color::Cyan,
        Theme::Light => Color::DarkBlue,
    };
    Cell::new(text).fg(color).add_attribute(Attribute::Bold)
}

/// Right-aligned rate cell. Missing rates are displayed as "N/A".
pub fn rate_cell(value: Option<f64>) -> Cell {
    match value {
        Some(v) if v.is_finite() => {
            Cell::new(format_rate(Some(v))).set_alignment(CellAlignment::Right)
        }
        _ => Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// Right-aligned amount cell, blank text shown dimmed as "-".
pub fn amount_cell(text: &str) -> Cell {
    if text.is_empty() {
        Cell::new("-")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new(text)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right)
    }
}

/// Creates a spinner shown while requests are in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Returns a separator line matching the terminal width.
pub fn separator() -> String {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    "─".repeat(term_width)
}
