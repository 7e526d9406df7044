//! Two linked amount fields kept consistent with an exchange rate.
//!
//! One field is always the source of truth (`last_edited`); the other is
//! derived from it. Rate updates go through their own transition so they
//! never flip which field is the source.

use crate::core::format::format_rate;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    From,
    To,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionEngine {
    from_text: String,
    to_text: String,
    last_edited: Field,
    rate: Option<f64>,
}

/// Parses user input; empty, non-numeric and non-finite text has no value.
fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl ConversionEngine {
    /// Starts with an amount of 1 in the `from` field and no rate yet.
    pub fn new() -> Self {
        ConversionEngine {
            from_text: "1".to_string(),
            to_text: String::new(),
            last_edited: Field::From,
            rate: None,
        }
    }

    pub fn from_text(&self) -> &str {
        &self.from_text
    }

    pub fn to_text(&self) -> &str {
        &self.to_text
    }

    pub fn last_edited(&self) -> Field {
        self.last_edited
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    pub fn on_from_changed(&mut self, text: &str) {
        self.from_text = text.to_string();
        self.last_edited = Field::From;
        self.to_text = self.convert_forward(text);
    }

    pub fn on_to_changed(&mut self, text: &str) {
        self.to_text = text.to_string();
        self.last_edited = Field::To;
        self.from_text = self.convert_backward(text);
    }

    /// Applies a new (or lost) rate to the derived field only.
    ///
    /// Non-finite rates are treated as unknown.
    pub fn on_rate_updated(&mut self, rate: Option<f64>) {
        self.rate = rate.filter(|r| r.is_finite());
        debug!(rate = ?self.rate, source = ?self.last_edited, "Rate updated");
        match self.last_edited {
            Field::From => self.to_text = self.convert_forward(&self.from_text),
            Field::To => self.from_text = self.convert_backward(&self.to_text),
        }
    }

    fn convert_forward(&self, text: &str) -> String {
        match (self.rate, parse_amount(text)) {
            (Some(rate), Some(amount)) => format_rate(Some(amount * rate)),
            _ => String::new(),
        }
    }

    fn convert_backward(&self, text: &str) -> String {
        match (self.rate.filter(|r| *r != 0.0), parse_amount(text)) {
            (Some(rate), Some(amount)) => format_rate(Some(amount / rate)),
            _ => String::new(),
        }
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new()
    }
}
