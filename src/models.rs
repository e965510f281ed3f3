//! Data model for the exchange harness boundary.
//!
//! The harness calls the agent once per tick with a [`TickSnapshot`] and
//! expects a [`TickOutput`] back. All types here are plain serde DTOs; the
//! agent never mutates a snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Order Book Types
// ============================================================================

/// Resting orders for one product at one tick.
///
/// Both ladders map price to the quantity available at that price. Sell-side
/// quantities are negative (their magnitude is the size offered); buy-side
/// quantities are positive. The `BTreeMap` keeps the sell side in ascending
/// price order and lets the buy side be walked in descending order, which is
/// exactly the order the take loop consumes levels in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    /// Price to negative quantity available, best ask first when iterated.
    pub sell_orders: BTreeMap<i64, i64>,
    /// Price to positive quantity available, best bid at the highest key.
    pub buy_orders: BTreeMap<i64, i64>,
}

impl OrderDepth {
    /// Creates an empty order depth.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Best ask price, the minimum sell-side key.
    #[must_use]
    pub fn best_ask(&self) -> Option<i64> {
        self.sell_orders.keys().next().copied()
    }

    /// Best bid price, the maximum buy-side key.
    #[must_use]
    pub fn best_bid(&self) -> Option<i64> {
        self.buy_orders.keys().next_back().copied()
    }

    /// Mid price, `(best bid + best ask) / 2`.
    ///
    /// `None` when either side of the book is empty; callers that price a
    /// product must treat that as a precondition violation, not a value.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) as f64 / 2.0),
            _ => None,
        }
    }
}

// ============================================================================
// Order & Trade Types
// ============================================================================

/// An order emitted by the agent for the coming tick.
///
/// Positive quantity buys, negative quantity sells. Orders are emitted once
/// and never mutated; matching belongs to the harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Product the order is for.
    pub symbol: String,
    /// Limit price.
    pub price: i64,
    /// Signed quantity: positive = buy, negative = sell.
    pub quantity: i64,
}

impl Order {
    /// Creates a new order.
    #[must_use]
    pub fn new(symbol: impl Into<String>, price: i64, quantity: i64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
        }
    }

    /// Whether this order buys (positive quantity).
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.quantity > 0
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = if self.is_buy() { "BUY" } else { "SELL" };
        write!(
            f,
            "{} {} {} @ {}",
            side,
            self.quantity.abs(),
            self.symbol,
            self.price
        )
    }
}

/// A trade reported by the harness, carried into telemetry only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReport {
    /// Product traded.
    pub symbol: String,
    /// Execution price.
    pub price: i64,
    /// Executed quantity.
    pub quantity: i64,
    /// Buyer identifier, empty when unknown.
    #[serde(default)]
    pub buyer: String,
    /// Seller identifier, empty when unknown.
    #[serde(default)]
    pub seller: String,
    /// Tick at which the trade happened.
    pub timestamp: u64,
}

// ============================================================================
// Tick Input / Output
// ============================================================================

/// Everything the harness reports for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Monotonically increasing tick timestamp.
    pub timestamp: u64,
    /// Opaque state blob echoed back from the previous tick; empty at tick 0.
    #[serde(default)]
    pub trader_state: String,
    /// Per-product order books.
    pub order_depths: HashMap<String, OrderDepth>,
    /// Trades the agent itself was party to since the last tick.
    #[serde(default)]
    pub own_trades: HashMap<String, Vec<TradeReport>>,
    /// Trades between other parties since the last tick.
    #[serde(default)]
    pub market_trades: HashMap<String, Vec<TradeReport>>,
    /// Authoritative signed positions; absent products are flat.
    #[serde(default)]
    pub positions: HashMap<String, i64>,
}

/// The agent's answer for one tick.
///
/// Orders are keyed by product in a `BTreeMap` so the serialized output is
/// byte-identical for identical inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickOutput {
    /// Orders per product; products with nothing to do are absent.
    pub orders: BTreeMap<String, Vec<Order>>,
    /// Conversion request passed through to the harness verbatim.
    pub conversions: i64,
    /// Opaque state blob for the harness to echo back next tick.
    pub trader_state: String,
}
