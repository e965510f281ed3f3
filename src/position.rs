//! Per-tick position tracking against configured limits.
//!
//! The harness report is authoritative: the tracker is rebuilt from it every
//! tick and the agent never accumulates its own risk state across ticks. It
//! is consulted, not mutated, while orders are constructed; the quoter keeps
//! its own local running counters for a single product's call.

use crate::config::Config;
use crate::error::AgentError;
use std::collections::HashMap;

/// Signed positions for all configured products at one tick.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    positions: HashMap<String, i64>,
}

impl PositionTracker {
    /// Builds the tracker from the harness-reported positions.
    ///
    /// Configured products absent from the report default to flat. A
    /// reported product with no configured position limit is rejected: the
    /// agent cannot bound risk on a product it knows nothing about.
    ///
    /// # Errors
    /// Returns [`AgentError::UnknownProduct`] for an unconfigured product in
    /// the report.
    pub fn from_report(
        config: &Config,
        reported: &HashMap<String, i64>,
    ) -> Result<Self, AgentError> {
        for symbol in reported.keys() {
            if config.position_limit(symbol).is_none() {
                return Err(AgentError::UnknownProduct(symbol.clone()));
            }
        }

        let positions = config
            .products
            .iter()
            .map(|p| {
                let held = reported.get(&p.symbol).copied().unwrap_or(0);
                (p.symbol.clone(), held)
            })
            .collect();

        Ok(Self { positions })
    }

    /// Current signed position for a symbol; flat for anything untracked.
    #[must_use]
    pub fn get(&self, symbol: &str) -> i64 {
        self.positions.get(symbol).copied().unwrap_or(0)
    }
}
