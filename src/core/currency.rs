//! Currency codes, pairs and the rate-data provider abstraction

use crate::core::error::RateResult;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// Three-letter ISO currency code, always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(pub(crate) String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CurrencyCode(code.to_ascii_uppercase()))
        } else {
            Err(anyhow!("Invalid currency code: {}", s))
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered pair of distinct currencies: amounts in `from` priced in `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    /// Builds a pair, rejecting identical codes.
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> anyhow::Result<Self> {
        if from == to {
            return Err(anyhow!("Currency pair needs two different codes, got {}", from));
        }
        Ok(CurrencyPair { from, to })
    }

    pub fn swapped(&self) -> Self {
        CurrencyPair {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    /// Route path for this pair, lowercase as it appears in links.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.from.to_lowercase(), self.to.to_lowercase())
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

/// Raw `/latest` response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LatestRatesRaw {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Code to rate, in the order the provider sent them
    #[serde(default)]
    pub rates: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Raw `/{start}..{end}` response. `rates` maps a date to a code-to-rate object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TimeSeriesRaw {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub rates: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Currency code to human-readable name.
pub type CurrencyDirectory = HashMap<String, String>;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest rates for `base`; an empty `symbols` slice asks for every currency.
    async fn fetch_latest(
        &self,
        base: &CurrencyCode,
        symbols: &[CurrencyCode],
    ) -> RateResult<LatestRatesRaw>;

    /// Daily rates from `start` up to `end`, or up to today when `end` is `None`.
    async fn fetch_time_series(
        &self,
        base: &CurrencyCode,
        symbols: &[CurrencyCode],
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> RateResult<TimeSeriesRaw>;

    async fn fetch_currencies(&self) -> RateResult<CurrencyDirectory>;
}
