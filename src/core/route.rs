//! The two navigable views: the gallery root and a `/{from}/{to}` pair.

use crate::core::currency::{CurrencyCode, CurrencyPair};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Gallery,
    Pair(CurrencyPair),
}

impl Route {
    /// Resolves a path. Anything that is not a valid pair of distinct codes
    /// redirects to the gallery.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Route::Gallery,
            [from, to] => Self::from_params(from, to),
            _ => {
                warn!("Unknown route {}, redirecting to gallery", path);
                Route::Gallery
            }
        }
    }

    pub fn from_params(from: &str, to: &str) -> Route {
        let pair = from
            .parse::<CurrencyCode>()
            .and_then(|from| Ok((from, to.parse::<CurrencyCode>()?)))
            .and_then(|(from, to)| CurrencyPair::new(from, to));
        match pair {
            Ok(pair) => Route::Pair(pair),
            Err(e) => {
                warn!("Invalid currency parameters {}/{}: {}", from, to, e);
                Route::Gallery
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Gallery => "/".to_string(),
            Route::Pair(pair) => pair.path(),
        }
    }
}
