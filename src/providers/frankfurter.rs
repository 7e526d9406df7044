use crate::core::config::FrankfurterProviderConfig;
use crate::core::currency::{
    CurrencyCode, CurrencyDirectory, LatestRatesRaw, RateProvider, TimeSeriesRaw,
};
use crate::core::error::{RateError, RateResult};
use crate::core::format::format_api_date;
use crate::providers::util::with_retry;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

const RETRY_DELAY_MS: u64 = 500;

/// Client for the Frankfurter exchange-rate API.
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
}

impl FrankfurterProvider {
    pub fn new(config: &FrankfurterProviderConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxr/1.0")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FrankfurterProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retries: config.retries,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        what: &str,
    ) -> RateResult<T> {
        let url = reqwest::Url::parse_with_params(&format!("{}{}", self.base_url, endpoint), params)
            .map_err(|e| RateError::Network(format!("Invalid request URL for {what}: {e}")))?;
        debug!("Requesting {} from {}", what, url);

        let response = with_retry(
            || {
                let request = self.client.get(url.clone());
                async move { request.send().await.and_then(|r| r.error_for_status()) }
            },
            self.retries,
            RETRY_DELAY_MS,
        )
        .await
        .map_err(|e| network_error(e, what))?;

        debug!(status = %response.status(), "Received response for {}", what);

        let text = response.text().await.map_err(|e| network_error(e, what))?;
        serde_json::from_str(&text)
            .map_err(|e| RateError::Parse(format!("Failed to parse JSON response for {what}: {e}")))
    }
}

fn network_error(err: reqwest::Error, what: &str) -> RateError {
    if let Some(status) = err.status() {
        RateError::Network(format!("HTTP error: {status} for {what}"))
    } else if err.is_timeout() {
        RateError::Network(format!("Request timed out for {what}"))
    } else {
        RateError::Network(format!("Request error: {err} for {what}"))
    }
}

fn symbol_params(base: &CurrencyCode, symbols: &[CurrencyCode]) -> Vec<(&'static str, String)> {
    let mut params = vec![("base", base.to_string())];
    if !symbols.is_empty() {
        let joined = symbols
            .iter()
            .map(CurrencyCode::as_str)
            .collect::<Vec<_>>()
            .join(",");
        params.push(("symbols", joined));
    }
    params
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterLatest", skip(self), fields(base = %base))]
    async fn fetch_latest(
        &self,
        base: &CurrencyCode,
        symbols: &[CurrencyCode],
    ) -> RateResult<LatestRatesRaw> {
        self.get_json(
            "/latest",
            &symbol_params(base, symbols),
            &format!("latest rates {base}"),
        )
        .await
    }

    #[instrument(name = "FrankfurterSeries", skip(self), fields(base = %base))]
    async fn fetch_time_series(
        &self,
        base: &CurrencyCode,
        symbols: &[CurrencyCode],
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> RateResult<TimeSeriesRaw> {
        let endpoint = format!(
            "/{}..{}",
            format_api_date(start),
            end.map(format_api_date).unwrap_or_default()
        );
        self.get_json(
            &endpoint,
            &symbol_params(base, symbols),
            &format!("rate history {base}"),
        )
        .await
    }

    #[instrument(name = "FrankfurterCurrencies", skip(self))]
    async fn fetch_currencies(&self) -> RateResult<CurrencyDirectory> {
        self.get_json("/currencies", &[], "currency names").await
    }
}
