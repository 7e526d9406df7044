use super::ui;
use crate::core::config::Theme;
use crate::core::format::{format_chart_date, format_rate};
use crate::core::loader::HistoryData;
use crate::core::{CurrencyPair, HistoryPoint};
use comfy_table::Cell;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const MAX_WIDTH: usize = 60;
const RECENT_POINTS: usize = 7;

/// Averages consecutive points so the result fits in `width` columns.
fn downsample(points: &[HistoryPoint], width: usize) -> Vec<f64> {
    if points.is_empty() || width == 0 {
        return Vec::new();
    }
    let chunk = points.len().div_ceil(width);
    points
        .chunks(chunk)
        .map(|c| c.iter().map(|p| p.rate).sum::<f64>() / c.len() as f64)
        .collect()
}

/// One block character per value, scaled between the lowest and highest value.
pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    values
        .iter()
        .map(|v| {
            if span <= 0.0 {
                BARS[BARS.len() / 2]
            } else {
                let index = ((v - min) / span * (BARS.len() - 1) as f64).round() as usize;
                BARS[index.min(BARS.len() - 1)]
            }
        })
        .collect()
}

/// Renders the history section for `pair`: sparkline, date range, min, max
/// and average, then the most recent points.
pub fn render_history(history: &HistoryData, pair: &CurrencyPair, theme: Theme) -> String {
    if let Some(error) = &history.error {
        return ui::style_text(
            &format!("Error loading history: {error}"),
            ui::StyleType::Error,
            theme,
        );
    }
    let points = history.series.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return format!("No historical data available to display for {pair}.");
    };

    let line = sparkline(&downsample(points, MAX_WIDTH));
    let axis_start = format_chart_date(first.date);
    let axis_end = format_chart_date(last.date);
    let padding = line
        .chars()
        .count()
        .saturating_sub(axis_start.len() + axis_end.len())
        .max(1);

    let mut output = format!(
        "1 {} to {}\n{}\n{}{}{}\n",
        pair.from,
        pair.to,
        ui::style_text(&line, ui::StyleType::Value, theme),
        axis_start,
        " ".repeat(padding),
        axis_end
    );
    output.push_str(&format!(
        "Min: {}  Max: {}  Avg: {}\n",
        format_rate(history.series.min()),
        format_rate(history.series.max()),
        format_rate(history.series.average()),
    ));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date", theme),
        ui::header_cell(&format!("1 {} = {}", pair.from, pair.to), theme),
    ]);
    let skip = points.len().saturating_sub(RECENT_POINTS);
    for point in &points[skip..] {
        table.add_row(vec![
            Cell::new(point.date.to_string()),
            ui::rate_cell(Some(point.rate)),
        ]);
    }
    output.push_str(&table.to_string());
    output
}
