//! Query boundary between the rate provider and the views.
//!
//! Every provider or transform failure is caught here and downgraded to an
//! error message on the returned record. Callers always get normalized,
//! possibly empty, data.

use crate::core::currency::{CurrencyCode, CurrencyPair, RateProvider};
use crate::core::error::RateError;
use crate::core::transform::{
    GalleryEntry, HistorySeries, merge_directory, to_history_series, to_rate_snapshot,
};
use chrono::{Days, NaiveDate};
use futures::join;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryData {
    pub base: CurrencyCode,
    pub as_of: Option<NaiveDate>,
    pub entries: Vec<GalleryEntry>,
    pub error: Option<String>,
}

/// Current rate of a pair. All fields are `None` until a load completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairRate {
    pub rate: Option<f64>,
    pub as_of: Option<NaiveDate>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryData {
    pub series: HistorySeries,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorData {
    pub pair: CurrencyPair,
    pub rate: PairRate,
    pub history: HistoryData,
}

/// First day of a history window ending `today`.
pub fn history_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Loads every rate against `base`, decorated with currency names.
///
/// Rates and names are fetched concurrently. Without names the gallery still
/// shows every code; without rates it is empty and carries an error.
#[instrument(name = "GalleryLoad", skip(provider), fields(base = %base))]
pub async fn load_gallery(
    provider: &(dyn RateProvider + Send + Sync),
    base: &CurrencyCode,
) -> GalleryData {
    let (latest, currencies) = join!(provider.fetch_latest(base, &[]), provider.fetch_currencies());

    let directory = currencies
        .map_err(|e| warn!("Currency names unavailable, falling back to codes: {}", e))
        .ok();

    match latest.and_then(|raw| to_rate_snapshot(&raw, base)) {
        Ok(snapshot) => {
            debug!("Loaded {} gallery rates", snapshot.len());
            GalleryData {
                base: snapshot.base.clone(),
                as_of: snapshot.as_of,
                entries: merge_directory(&snapshot, directory.as_ref()),
                error: None,
            }
        }
        Err(e) => {
            warn!("Gallery rates unavailable: {}", e);
            GalleryData {
                base: base.clone(),
                as_of: None,
                entries: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Loads the current rate of `pair`.
pub async fn load_rate(provider: &(dyn RateProvider + Send + Sync), pair: &CurrencyPair) -> PairRate {
    let result = provider
        .fetch_latest(&pair.from, std::slice::from_ref(&pair.to))
        .await
        .and_then(|raw| to_rate_snapshot(&raw, &pair.from))
        .and_then(|snapshot| {
            snapshot
                .get(&pair.to)
                .map(|rate| (rate, snapshot.as_of))
                .ok_or_else(|| {
                    RateError::NoData(format!(
                        "Rate for {} not found for base {}",
                        pair.to, pair.from
                    ))
                })
        });

    match result {
        Ok((rate, as_of)) => {
            debug!(pair = %pair, rate, "Loaded current rate");
            PairRate {
                rate: Some(rate),
                as_of,
                error: None,
            }
        }
        Err(e) => {
            warn!("Rate for {} unavailable: {}", pair, e);
            PairRate {
                rate: None,
                as_of: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Loads the daily history of `pair` from `start` up to today.
pub async fn load_history(
    provider: &(dyn RateProvider + Send + Sync),
    pair: &CurrencyPair,
    start: NaiveDate,
) -> HistoryData {
    match provider
        .fetch_time_series(&pair.from, std::slice::from_ref(&pair.to), start, None)
        .await
    {
        Ok(raw) => {
            let series = to_history_series(&raw, &pair.to);
            debug!(pair = %pair, points = series.len(), "Loaded rate history");
            HistoryData {
                series,
                error: None,
            }
        }
        Err(e) => {
            warn!("History for {} unavailable: {}", pair, e);
            HistoryData {
                series: HistorySeries::default(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Loads the current rate and the history of `pair` concurrently. Each
/// half fails independently.
#[instrument(name = "CalculatorLoad", skip(provider), fields(pair = %pair))]
pub async fn load_calculator(
    provider: &(dyn RateProvider + Send + Sync),
    pair: &CurrencyPair,
    start: NaiveDate,
) -> CalculatorData {
    let (rate, history) = join!(load_rate(provider, pair), load_history(provider, pair, start));
    CalculatorData {
        pair: pair.clone(),
        rate,
        history,
    }
}
