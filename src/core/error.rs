//! Error types for the rate-data client and transforms.

use thiserror::Error;

/// Failures surfaced by a [`RateProvider`](crate::core::RateProvider) call or a transform.
///
/// Loaders downgrade these into display-level error messages; nothing past
/// the query boundary ever sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// Transport failure, timeout, or a non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// Body is not valid JSON or does not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Well-formed response without any usable rates
    #[error("No data: {0}")]
    NoData(String),
}

pub type RateResult<T> = Result<T, RateError>;
