//! Turns raw provider payloads into display-ready records.
//!
//! Everything here is pure: no I/O and no hidden state.

use crate::core::currency::{CurrencyCode, CurrencyDirectory, LatestRatesRaw, TimeSeriesRaw};
use crate::core::error::{RateError, RateResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Point-in-time rates for one base currency. Never contains the base itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub base: CurrencyCode,
    pub as_of: Option<NaiveDate>,
    rates: Vec<(CurrencyCode, f64)>,
}

impl RateSnapshot {
    /// Rates in the order the provider returned them.
    pub fn rates(&self) -> &[(CurrencyCode, f64)] {
        &self.rates
    }

    pub fn get(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, rate)| *rate)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Rates for one pair, strictly ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySeries(Vec<HistoryPoint>);

impl HistorySeries {
    pub fn points(&self) -> &[HistoryPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn average(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        let total: f64 = self.0.iter().map(|p| p.rate).sum();
        Some(total / self.0.len() as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.0.iter().map(|p| p.rate).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.0.iter().map(|p| p.rate).reduce(f64::max)
    }
}

/// A gallery card: one rate against the gallery base, with a display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryEntry {
    pub code: CurrencyCode,
    pub name: String,
    pub rate: f64,
}

fn positive_rate(value: &serde_json::Value) -> Option<f64> {
    value.as_f64().filter(|rate| rate.is_finite() && *rate > 0.0)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Builds a snapshot from a `/latest` response.
///
/// The base's own code is dropped. Entries that are not positive numbers or
/// not valid codes are skipped. Fails with [`RateError::NoData`] when no rate
/// is left.
pub fn to_rate_snapshot(raw: &LatestRatesRaw, base: &CurrencyCode) -> RateResult<RateSnapshot> {
    let base = raw
        .base
        .as_deref()
        .and_then(|b| b.parse::<CurrencyCode>().ok())
        .unwrap_or_else(|| base.clone());

    let raw_rates = raw
        .rates
        .as_ref()
        .filter(|rates| !rates.is_empty())
        .ok_or_else(|| RateError::NoData(format!("No rates returned for base {base}")))?;

    let rates: Vec<(CurrencyCode, f64)> = raw_rates
        .iter()
        .filter_map(|(code, value)| {
            let Ok(code) = code.parse::<CurrencyCode>() else {
                debug!("Skipping invalid currency code in rates: {}", code);
                return None;
            };
            if code == base {
                return None;
            }
            match positive_rate(value) {
                Some(rate) => Some((code, rate)),
                None => {
                    debug!("Skipping unusable rate for {}: {}", code, value);
                    None
                }
            }
        })
        .collect();

    if rates.is_empty() {
        return Err(RateError::NoData(format!(
            "No usable rates returned for base {base}"
        )));
    }

    let as_of = raw.date.as_deref().and_then(parse_date);
    debug!(base = %base, count = rates.len(), "Built rate snapshot");

    Ok(RateSnapshot { base, as_of, rates })
}

/// Extracts the series of `target` rates from a time-series response.
///
/// Dates are compared as calendar dates. Missing or null rates, unparseable
/// dates and repeated dates are dropped; the first occurrence of a date wins.
pub fn to_history_series(raw: &TimeSeriesRaw, target: &CurrencyCode) -> HistorySeries {
    let Some(raw_rates) = raw.rates.as_ref().filter(|rates| !rates.is_empty()) else {
        debug!("Time series for {} has no dated entries", target);
        return HistorySeries::default();
    };

    let mut by_date = BTreeMap::new();
    for (date_str, day) in raw_rates {
        let Some(date) = parse_date(date_str) else {
            debug!("Skipping unparseable history date: {}", date_str);
            continue;
        };
        if let Some(rate) = day.get(target.as_str()).and_then(positive_rate) {
            by_date.entry(date).or_insert(rate);
        }
    }

    HistorySeries(
        by_date
            .into_iter()
            .map(|(date, rate)| HistoryPoint { date, rate })
            .collect(),
    )
}

/// Pairs every rate with its display name, falling back to the code itself.
pub fn merge_directory(
    snapshot: &RateSnapshot,
    directory: Option<&CurrencyDirectory>,
) -> Vec<GalleryEntry> {
    snapshot
        .rates()
        .iter()
        .map(|(code, rate)| GalleryEntry {
            code: code.clone(),
            name: directory
                .and_then(|d| d.get(code.as_str()))
                .cloned()
                .unwrap_or_else(|| code.to_string()),
            rate: *rate,
        })
        .collect()
}
