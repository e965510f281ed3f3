//! Carried state surviving between ticks.
//!
//! The harness round-trips an opaque string blob for the agent; this module
//! gives that blob an explicit versioned schema instead of generic object
//! serialization. The only content today is the rolling mid-price history
//! for products priced by the smoothed model.

use crate::error::AgentError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Schema version written into every encoded blob.
pub const STATE_VERSION: u32 = 1;

/// Tick after which the price history stops growing: from then on the oldest
/// sample is dropped before each append, a one-sided cap rather than a ring
/// buffer sized from the start.
pub const HISTORY_WARMUP_TICKS: u64 = 2000;

/// State the agent carries from one tick to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarriedState {
    /// Schema version, checked on decode.
    pub version: u32,
    /// Rolling mid-price history per smoothed product.
    pub price_history: HashMap<String, Vec<f64>>,
}

impl CarriedState {
    /// Fresh state for tick 0: no history yet.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: STATE_VERSION,
            price_history: HashMap::new(),
        }
    }

    /// Decodes a blob produced by [`CarriedState::encode`] on the previous
    /// tick.
    ///
    /// # Errors
    /// [`AgentError::StateDecode`] when the blob is not valid JSON for this
    /// schema, [`AgentError::StateVersion`] when the version does not match.
    /// There is no sane default reconstructable mid-run, so neither is
    /// recoverable.
    pub fn decode(blob: &str) -> Result<Self, AgentError> {
        let state: Self = serde_json::from_str(blob)?;
        if state.version != STATE_VERSION {
            return Err(AgentError::StateVersion(state.version));
        }
        Ok(state)
    }

    /// Encodes the state into the blob handed to the harness.
    ///
    /// # Errors
    /// [`AgentError::StateDecode`] when serialization fails (a non-finite
    /// mid price would be the only way).
    pub fn encode(&self) -> Result<String, AgentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Price history for a symbol; `None` when none has been recorded.
    #[must_use]
    pub fn history(&self, symbol: &str) -> Option<&[f64]> {
        self.price_history.get(symbol).map(Vec::as_slice)
    }

    /// Records this tick's mid price for a symbol.
    ///
    /// Past the warm-up threshold the oldest sample is dropped first, so the
    /// history length never grows beyond what it reached by then.
    pub fn record_mid(&mut self, symbol: &str, mid: f64, timestamp: u64) {
        let history = self.price_history.entry(symbol.to_string()).or_default();
        if timestamp > HISTORY_WARMUP_TICKS && !history.is_empty() {
            history.remove(0);
        }
        history.push(mid);
    }
}
