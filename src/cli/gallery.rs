use super::ui;
use crate::core::config::{Preferences, Theme};
use crate::core::gallery::{self, GalleryFilter};
use crate::core::loader::{GalleryData, load_gallery};
use crate::core::{CurrencyCode, CurrencyPair, GalleryEntry, RateProvider};
use anyhow::Result;
use comfy_table::Cell;

impl GalleryData {
    /// Renders the gallery header and the already filtered `entries`.
    pub fn display_as_table(
        &self,
        entries: &[GalleryEntry],
        filter: &GalleryFilter,
        theme: Theme,
    ) -> String {
        let mut output = format!(
            "{}\n",
            ui::style_text(
                &format!("{} Exchange Rates Today", self.base),
                ui::StyleType::Title,
                theme
            )
        );

        if let Some(error) = &self.error {
            output.push_str(&ui::style_text(
                &format!("Data loading error: {error}"),
                ui::StyleType::Error,
                theme,
            ));
            return output;
        }

        if let Some(date) = self.as_of {
            output.push_str(&ui::style_text(
                &format!("Data as of: {date}"),
                ui::StyleType::Subtle,
                theme,
            ));
            output.push('\n');
        }

        if self.entries.is_empty() {
            output.push_str("No exchange rate data available.");
            return output;
        }
        if entries.is_empty() {
            output.push_str(&format!(
                "No currencies match \"{}\".",
                filter.search_term.trim()
            ));
            return output;
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Code", theme),
            ui::header_cell("Currency", theme),
            ui::header_cell("Rate", theme),
            ui::header_cell("Per", theme),
            ui::header_cell("Calculator", theme),
        ]);

        for entry in entries {
            table.add_row(vec![
                Cell::new(entry.code.as_str()),
                Cell::new(&entry.name),
                ui::rate_cell(Some(entry.rate)),
                Cell::new(format!("1 {}", self.base)),
                Cell::new(calculator_path(&self.base, &entry.code)),
            ]);
        }

        output.push('\n');
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} of {} currencies, sorted by {}",
            entries.len(),
            self.entries.len(),
            filter.sort_key
        ));
        output
    }
}

fn calculator_path(base: &CurrencyCode, target: &CurrencyCode) -> String {
    CurrencyPair::new(base.clone(), target.clone())
        .map(|pair| pair.path())
        .unwrap_or_default()
}

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    base: &CurrencyCode,
    filter: &GalleryFilter,
    preferences: &Preferences,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates...");
    let data = load_gallery(provider, base).await;
    pb.finish_and_clear();

    let entries = gallery::apply(&data.entries, filter);
    println!(
        "{}",
        data.display_as_table(&entries, filter, preferences.theme())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SortKey;

    fn data(entries: Vec<GalleryEntry>, error: Option<&str>) -> GalleryData {
        GalleryData {
            base: "EUR".parse().unwrap(),
            as_of: chrono::NaiveDate::from_ymd_opt(2024, 1, 2),
            entries,
            error: error.map(str::to_string),
        }
    }

    fn entry(code: &str, name: &str, rate: f64) -> GalleryEntry {
        GalleryEntry {
            code: code.parse().unwrap(),
            name: name.to_string(),
            rate,
        }
    }

    #[test]
    fn test_table_lists_entries_with_links() {
        let gallery = data(
            vec![
                entry("USD", "United States Dollar", 1.0956),
                entry("JPY", "Japanese Yen", 157.4567),
            ],
            None,
        );
        let filter = GalleryFilter::default();
        let entries = gallery::apply(&gallery.entries, &filter);
        let output = gallery.display_as_table(&entries, &filter, Theme::Dark);

        assert!(output.contains("EUR Exchange Rates Today"));
        assert!(output.contains("Data as of: 2024-01-02"));
        assert!(output.contains("United States Dollar"));
        assert!(output.contains("1.0956"));
        assert!(output.contains("157.46"));
        assert!(output.contains("/eur/usd"));
        assert!(output.contains("2 of 2 currencies, sorted by code"));
    }

    #[test]
    fn test_error_shows_message_without_table() {
        let gallery = data(Vec::new(), Some("Network error: boom"));
        let output =
            gallery.display_as_table(&[], &GalleryFilter::default(), Theme::Light);
        assert!(output.contains("Data loading error: Network error: boom"));
        assert!(!output.contains("Calculator"));
    }

    #[test]
    fn test_empty_and_unmatched_states() {
        let empty = data(Vec::new(), None);
        let output = empty.display_as_table(&[], &GalleryFilter::default(), Theme::Dark);
        assert!(output.contains("No exchange rate data available."));

        let gallery = data(vec![entry("USD", "United States Dollar", 1.1)], None);
        let filter = GalleryFilter::new("peso", SortKey::CodeAsc);
        let entries = gallery::apply(&gallery.entries, &filter);
        let output = gallery.display_as_table(&entries, &filter, Theme::Dark);
        assert!(output.contains("No currencies match \"peso\"."));
    }
}
