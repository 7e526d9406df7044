//! Core rate-data logic: transforms, conversion, gallery queries and the
//! provider abstraction

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod format;
pub mod gallery;
pub mod loader;
pub mod log;
pub mod route;
pub mod session;
pub mod transform;

// Re-export main types for cleaner imports
pub use conversion::{ConversionEngine, Field};
pub use currency::{CurrencyCode, CurrencyDirectory, CurrencyPair, RateProvider};
pub use error::{RateError, RateResult};
pub use format::format_rate;
pub use gallery::{GalleryFilter, SortKey};
pub use route::Route;
pub use session::CalculatorSession;
pub use transform::{GalleryEntry, HistoryPoint, HistorySeries, RateSnapshot};
