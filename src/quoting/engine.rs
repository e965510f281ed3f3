//! Tick orchestration: one snapshot in, one set of orders out.

use crate::config::{Config, StrategyConfig};
use crate::error::AgentError;
use crate::models::{Order, TickOutput, TickSnapshot};
use crate::position::PositionTracker;
use crate::quoting::{FairPricer, Quoter, mid_price};
use crate::state::CarriedState;
use crate::telemetry::TickLog;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Conversion request emitted every tick; its meaning is owned entirely by
/// the harness.
pub const CONVERSIONS: i64 = 1;

/// The per-tick decision engine.
///
/// Holds only configuration and model parameters; everything tick-scoped
/// (positions, carried state, the log context) is rebuilt inside [`run`].
/// One tick is processed start to finish before the next begins, so the
/// engine is a plain value with no interior mutability.
///
/// [`run`]: Engine::run
pub struct Engine {
    config: Config,
    pricer: FairPricer,
    quoter: Quoter,
}

impl Engine {
    /// Creates an engine for the given product configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pricer: FairPricer::default(),
            quoter: Quoter::default(),
        }
    }

    /// The engine's product configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes one tick.
    ///
    /// Rebuilds positions from the report, restores the carried state (fresh
    /// at tick 0), prices and quotes every configured strategy product
    /// (fixed-price products always, history-driven products from tick 1),
    /// then appends this tick's mids and re-encodes the state for the
    /// harness. Deterministic: the same snapshot always yields the same
    /// output.
    ///
    /// # Errors
    /// Any [`AgentError`] is fatal for the tick; the agent does not trade on
    /// guesses.
    pub fn run(&self, tick: &TickSnapshot) -> Result<(TickOutput, TickLog), AgentError> {
        let positions = PositionTracker::from_report(&self.config, &tick.positions)?;
        let mut state = if tick.timestamp == 0 {
            CarriedState::empty()
        } else {
            CarriedState::decode(&tick.trader_state)?
        };
        let mut log = TickLog::new();
        let mut orders: BTreeMap<String, Vec<Order>> = BTreeMap::new();

        for product in self.config.quoted_products() {
            let Some(strategy) = &product.strategy else {
                continue;
            };
            if strategy.requires_history() && tick.timestamp == 0 {
                continue;
            }

            let fair_price = self.fair_price(tick, &state, &product.symbol, strategy)?;
            let depth = tick
                .order_depths
                .get(&product.symbol)
                .ok_or_else(|| AgentError::MissingBook(product.symbol.clone()))?;

            let product_orders = self.quoter.compute_orders(
                &product.symbol,
                depth,
                fair_price,
                strategy.tolerance(),
                positions.get(&product.symbol),
                product.position_limit,
            )?;

            debug!(
                symbol = %product.symbol,
                fair_price,
                position = positions.get(&product.symbol),
                orders = product_orders.len(),
                "quoted product"
            );
            log.print(format!(
                "{} fair={} orders={}",
                product.symbol,
                fair_price,
                product_orders.len()
            ));

            if !product_orders.is_empty() {
                orders.insert(product.symbol.clone(), product_orders);
            }
        }

        // Mids are recorded after order construction so this tick's quoting
        // never sees its own mid.
        for product in &self.config.products {
            if matches!(product.strategy, Some(StrategyConfig::Smoothed { .. })) {
                let depth = tick
                    .order_depths
                    .get(&product.symbol)
                    .ok_or_else(|| AgentError::MissingBook(product.symbol.clone()))?;
                let mid = mid_price(&product.symbol, depth)?;
                state.record_mid(&product.symbol, mid, tick.timestamp);
            }
        }

        let trader_state = state.encode()?;
        info!(
            timestamp = tick.timestamp,
            products = orders.len(),
            "tick processed"
        );

        Ok((
            TickOutput {
                orders,
                conversions: CONVERSIONS,
                trader_state,
            },
            log,
        ))
    }

    /// Fair price for one product under its configured strategy.
    fn fair_price(
        &self,
        tick: &TickSnapshot,
        state: &CarriedState,
        symbol: &str,
        strategy: &StrategyConfig,
    ) -> Result<i64, AgentError> {
        match strategy {
            StrategyConfig::Fixed { fair_price, .. } => Ok(*fair_price),
            StrategyConfig::Smoothed { .. } => {
                let history = state
                    .history(symbol)
                    .ok_or_else(|| AgentError::MissingHistory(symbol.to_string()))?;
                self.pricer
                    .smoothed(history)
                    .ok_or_else(|| AgentError::MissingHistory(symbol.to_string()))
            }
            StrategyConfig::Basket { legs, offset, .. } => {
                let mut leg_mids = Vec::with_capacity(legs.len());
                for leg in legs {
                    let depth = tick
                        .order_depths
                        .get(&leg.symbol)
                        .ok_or_else(|| AgentError::MissingBook(leg.symbol.clone()))?;
                    leg_mids.push((leg.weight, mid_price(&leg.symbol, depth)?));
                }
                Ok(self.pricer.basket(&leg_mids, *offset))
            }
        }
    }
}
