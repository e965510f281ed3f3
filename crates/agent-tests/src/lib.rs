//! Integration tests for the trading agent.
//!
//! These tests drive the engine end-to-end through its public API, feeding
//! the carried state blob from one tick into the next the way the exchange
//! harness does. This crate holds the shared fixture builders; the suites
//! live under `tests/`.

use std::collections::HashMap;
use trading_agent::models::{OrderDepth, TickSnapshot};

/// Builds an order depth from `(price, volume)` level lists.
///
/// Sell volumes are negative, buy volumes positive, per the book convention.
#[must_use]
pub fn depth(sells: &[(i64, i64)], buys: &[(i64, i64)]) -> OrderDepth {
    let mut d = OrderDepth::new();
    for &(price, volume) in sells {
        d.sell_orders.insert(price, volume);
    }
    for &(price, volume) in buys {
        d.buy_orders.insert(price, volume);
    }
    d
}

/// Builds a tick snapshot from named books.
#[must_use]
pub fn snapshot(timestamp: u64, trader_state: &str, books: Vec<(&str, OrderDepth)>) -> TickSnapshot {
    TickSnapshot {
        timestamp,
        trader_state: trader_state.to_string(),
        order_depths: books
            .into_iter()
            .map(|(symbol, depth)| (symbol.to_string(), depth))
            .collect(),
        ..Default::default()
    }
}

/// Straddling books for every product in the default configuration: no side
/// crosses its fair price, so ticks built from these produce make quotes
/// only.
#[must_use]
pub fn quiet_books() -> Vec<(&'static str, OrderDepth)> {
    vec![
        // Fixed fair 10000.
        ("OBSIDIAN", depth(&[(10_002, -9)], &[(9_998, 9)])),
        // Mid 5001 seeds the smoothed history.
        ("QUARTZ", depth(&[(5_003, -9)], &[(4_999, 9)])),
        // Basket fair: 4*7800 + 14500 + 6*4050 + 379 = 70379.
        ("GEODE", depth(&[(70_450, -9)], &[(70_300, 9)])),
        ("BASALT", depth(&[(7_801, -9)], &[(7_799, 9)])),
        ("FLINT", depth(&[(14_501, -9)], &[(14_499, 9)])),
        ("PUMICE", depth(&[(4_051, -9)], &[(4_049, 9)])),
    ]
}

/// Applies an emitted order set to a position map as if every order filled.
#[must_use]
pub fn apply_fills(
    positions: &HashMap<String, i64>,
    orders: &std::collections::BTreeMap<String, Vec<trading_agent::models::Order>>,
) -> HashMap<String, i64> {
    let mut applied = positions.clone();
    for (symbol, product_orders) in orders {
        let delta: i64 = product_orders.iter().map(|o| o.quantity).sum();
        *applied.entry(symbol.clone()).or_insert(0) += delta;
    }
    applied
}
