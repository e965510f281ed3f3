//! Per-tick observability record for external tooling.
//!
//! Every tick produces one flat JSON array on the data sink:
//! `[tick_summary, compressed_orders, conversions, trader_state, log_text]`.
//! The summary is `[timestamp, incoming_state, order_depths, own_trades,
//! market_trades, positions]` and trades/orders are compressed to positional
//! arrays. Field order is stable so downstream tooling can index into it.
//!
//! Free-text lines go through [`TickLog`], an explicit context created for
//! each tick and flushed by the caller; there is no global logger.

use crate::models::{Order, OrderDepth, TickOutput, TickSnapshot, TradeReport};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

/// Free-text log lines collected while processing one tick.
#[derive(Debug, Clone, Default)]
pub struct TickLog {
    lines: String,
}

impl TickLog {
    /// Creates an empty log context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line of free text.
    pub fn print(&mut self, line: impl AsRef<str>) {
        self.lines.push_str(line.as_ref());
        self.lines.push('\n');
    }

    /// The accumulated text, newline-terminated per line.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.lines
    }

    /// Whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builds the flat-array record for one processed tick.
#[must_use]
pub fn tick_record(tick: &TickSnapshot, output: &TickOutput, log: &TickLog) -> Value {
    json!([
        compress_snapshot(tick),
        compress_orders(&output.orders),
        output.conversions,
        output.trader_state,
        log.as_str(),
    ])
}

/// Writes one record as a single line on the sink.
///
/// # Errors
/// Propagates sink write failures.
pub fn write_record<W: Write>(sink: &mut W, record: &Value) -> io::Result<()> {
    writeln!(sink, "{record}")
}

/// Summary of the incoming snapshot:
/// `[timestamp, incoming_state, depths, own_trades, market_trades, positions]`.
fn compress_snapshot(tick: &TickSnapshot) -> Value {
    json!([
        tick.timestamp,
        tick.trader_state,
        compress_depths(&tick.order_depths),
        compress_trades(&tick.own_trades),
        compress_trades(&tick.market_trades),
        sorted_map(&tick.positions),
    ])
}

/// Depths as `symbol: [buy_orders, sell_orders]`, symbols sorted.
fn compress_depths(depths: &HashMap<String, OrderDepth>) -> Value {
    let compressed: BTreeMap<&str, Value> = depths
        .iter()
        .map(|(symbol, depth)| {
            (
                symbol.as_str(),
                json!([depth.buy_orders, depth.sell_orders]),
            )
        })
        .collect();
    json!(compressed)
}

/// Trades flattened to `[symbol, price, quantity, buyer, seller, timestamp]`
/// rows, grouped by symbol in sorted order.
fn compress_trades(trades: &HashMap<String, Vec<TradeReport>>) -> Value {
    let mut symbols: Vec<&String> = trades.keys().collect();
    symbols.sort();

    let rows: Vec<Value> = symbols
        .into_iter()
        .flat_map(|symbol| &trades[symbol])
        .map(|t| {
            json!([
                t.symbol,
                t.price,
                t.quantity,
                t.buyer,
                t.seller,
                t.timestamp
            ])
        })
        .collect();
    json!(rows)
}

/// Orders flattened to `[symbol, price, quantity]` rows.
fn compress_orders(orders: &BTreeMap<String, Vec<Order>>) -> Value {
    let rows: Vec<Value> = orders
        .values()
        .flatten()
        .map(|o| json!([o.symbol, o.price, o.quantity]))
        .collect();
    json!(rows)
}

/// Positions as a sorted object for stable output.
fn sorted_map(map: &HashMap<String, i64>) -> Value {
    let sorted: BTreeMap<&str, i64> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    json!(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tick() -> TickSnapshot {
        let mut depth = OrderDepth::new();
        depth.sell_orders.insert(101, -5);
        depth.buy_orders.insert(99, 4);

        let mut tick = TickSnapshot {
            timestamp: 3,
            trader_state: "prev".to_string(),
            ..Default::default()
        };
        tick.order_depths.insert("QUARTZ".to_string(), depth);
        tick.positions.insert("QUARTZ".to_string(), -2);
        tick.own_trades.insert(
            "QUARTZ".to_string(),
            vec![TradeReport {
                symbol: "QUARTZ".to_string(),
                price: 100,
                quantity: 2,
                buyer: "us".to_string(),
                seller: "them".to_string(),
                timestamp: 2,
            }],
        );
        tick
    }

    fn sample_output() -> TickOutput {
        let mut output = TickOutput {
            conversions: 1,
            trader_state: "next".to_string(),
            ..Default::default()
        };
        output
            .orders
            .insert("QUARTZ".to_string(), vec![Order::new("QUARTZ", 98, 3)]);
        output
    }

    #[test]
    fn test_record_is_five_element_array() {
        let log = TickLog::new();
        let record = tick_record(&sample_tick(), &sample_output(), &log);
        let elements = record.as_array().unwrap();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements[2], json!(1));
        assert_eq!(elements[3], json!("next"));
    }

    #[test]
    fn test_summary_field_order() {
        let record = tick_record(&sample_tick(), &sample_output(), &TickLog::new());
        let summary = record[0].as_array().unwrap();
        assert_eq!(summary.len(), 6);
        assert_eq!(summary[0], json!(3)); // timestamp
        assert_eq!(summary[1], json!("prev")); // incoming state
        assert_eq!(summary[5], json!({ "QUARTZ": -2 })); // positions
    }

    #[test]
    fn test_depths_compress_to_buy_then_sell() {
        let record = tick_record(&sample_tick(), &sample_output(), &TickLog::new());
        let depths = &record[0][2];
        assert_eq!(depths["QUARTZ"][0], json!({ "99": 4 }));
        assert_eq!(depths["QUARTZ"][1], json!({ "101": -5 }));
    }

    #[test]
    fn test_trades_compress_to_rows() {
        let record = tick_record(&sample_tick(), &sample_output(), &TickLog::new());
        let own = record[0][3].as_array().unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0], json!(["QUARTZ", 100, 2, "us", "them", 2]));
        // No market trades were reported.
        assert_eq!(record[0][4], json!([]));
    }

    #[test]
    fn test_orders_compress_to_rows() {
        let record = tick_record(&sample_tick(), &sample_output(), &TickLog::new());
        assert_eq!(record[1], json!([["QUARTZ", 98, 3]]));
    }

    #[test]
    fn test_log_lines_carried_in_record() {
        let mut log = TickLog::new();
        log.print("QUARTZ fair=5001");
        assert!(!log.is_empty());
        let record = tick_record(&sample_tick(), &sample_output(), &log);
        assert_eq!(record[4], json!("QUARTZ fair=5001\n"));
    }

    #[test]
    fn test_write_record_emits_one_line() {
        let record = tick_record(&sample_tick(), &sample_output(), &TickLog::new());
        let mut sink = Vec::new();
        write_record(&mut sink, &record).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
    }
}
