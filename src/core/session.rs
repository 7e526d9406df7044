//! Calculator state for one pair, guarded against superseded responses.

use crate::core::conversion::ConversionEngine;
use crate::core::currency::CurrencyPair;
use crate::core::loader::{CalculatorData, HistoryData, PairRate};
use tracing::debug;

/// Identity of a load, captured when the load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Counter bumped whenever the view moves on; results carrying an older
/// ticket are stale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.current)
    }

    pub fn advance(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.ticket() == ticket
    }
}

#[derive(Debug)]
pub struct CalculatorSession {
    pair: CurrencyPair,
    engine: ConversionEngine,
    generation: Generation,
    rate: PairRate,
    history: HistoryData,
}

impl CalculatorSession {
    pub fn new(pair: CurrencyPair) -> Self {
        CalculatorSession {
            pair,
            engine: ConversionEngine::new(),
            generation: Generation::new(),
            rate: PairRate::default(),
            history: HistoryData::default(),
        }
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn rate(&self) -> &PairRate {
        &self.rate
    }

    pub fn history(&self) -> &HistoryData {
        &self.history
    }

    /// Ticket to attach to a load started now.
    pub fn begin_load(&self) -> Ticket {
        self.generation.ticket()
    }

    /// Applies a full calculator load. Returns `false` and leaves the session
    /// untouched when the load is stale.
    pub fn apply(&mut self, ticket: Ticket, data: CalculatorData) -> bool {
        if !self.generation.is_current(ticket) || data.pair != self.pair {
            debug!(pair = %data.pair, "Discarding superseded calculator data");
            return false;
        }
        self.history = data.history;
        self.apply_rate_unchecked(data.rate);
        true
    }

    /// Applies a refreshed rate, with the same staleness check as [`Self::apply`].
    pub fn apply_rate(&mut self, ticket: Ticket, rate: PairRate) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(pair = %self.pair, "Discarding superseded rate");
            return false;
        }
        self.apply_rate_unchecked(rate);
        true
    }

    fn apply_rate_unchecked(&mut self, rate: PairRate) {
        self.engine.on_rate_updated(rate.rate);
        self.rate = rate;
    }

    pub fn on_from_changed(&mut self, text: &str) {
        self.engine.on_from_changed(text);
    }

    pub fn on_to_changed(&mut self, text: &str) {
        self.engine.on_to_changed(text);
    }

    /// Switches to the reversed pair. In-flight loads become stale and the
    /// converter starts over; the caller loads the new pair.
    pub fn swap(&mut self) -> CurrencyPair {
        let swapped = self.pair.swapped();
        self.navigate(swapped);
        self.pair.clone()
    }

    pub fn navigate(&mut self, pair: CurrencyPair) {
        self.generation.advance();
        debug!(from = %self.pair, to = %pair, "Navigating calculator");
        self.pair = pair;
        self.engine = ConversionEngine::new();
        self.rate = PairRate::default();
        self.history = HistoryData::default();
    }
}
