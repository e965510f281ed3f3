//! # Trading Agent - Tick-Driven Quoting for a Simulated Exchange
//!
//! A deterministic trading agent for a simulated market exchange. Each
//! discrete tick, the exchange harness hands the agent a snapshot of every
//! product's order book together with the agent's own positions; the agent
//! answers with the orders it wants working for the coming tick, bounded by
//! per-product position limits.
//!
//! ## Key Features
//!
//! - **Pure per-tick decision function**: same snapshot in, same orders out.
//!   All tick-scoped state is rebuilt from the input; nothing survives a
//!   tick except an explicitly serialized price history.
//!
//! - **Three fair-price models**: a constant reference for stable-value
//!   products, a smoothed estimate over the carried mid-price history, and
//!   a weighted basket of constituent mids.
//!
//! - **Two-phase quoting**: cross resting orders priced favorably against
//!   fair (market take), then post fresh quotes around fair sized to the
//!   remaining position headroom (market make).
//!
//! - **Config-driven products**: position limits, strategies, basket
//!   weights, and tolerances all live in TOML; adding a product touches no
//!   core logic.
//!
//! - **Structured telemetry**: one flat-array JSON record per tick on
//!   stdout for external tooling, with free-text lines collected through an
//!   explicit per-tick log context.
//!
//! ## Architecture
//!
//! ```text
//! TickSnapshot ──► Engine::run
//!                    ├── PositionTracker   (report validated against config)
//!                    ├── CarriedState      (decode blob, fresh at tick 0)
//!                    ├── FairPricer        (fixed / smoothed / basket)
//!                    ├── Quoter            (market take, then market make)
//!                    └── CarriedState      (append mids, re-encode blob)
//!                  ◄── TickOutput + TickLog
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML product/strategy configuration with validation |
//! | [`error`] | Per-tick error taxonomy |
//! | [`models`] | Harness boundary DTOs: books, orders, tick I/O |
//! | [`position`] | Per-tick position tracking against limits |
//! | [`quoting`] | Fair-price models, order construction, tick engine |
//! | [`state`] | Versioned carried state (rolling mid-price history) |
//! | [`telemetry`] | Per-tick observability record and log context |
//!
//! ## Example Usage
//!
//! ```
//! use trading_agent::config::Config;
//! use trading_agent::models::TickSnapshot;
//! use trading_agent::quoting::Engine;
//! use trading_agent::telemetry;
//!
//! # fn main() -> Result<(), trading_agent::error::AgentError> {
//! let engine = Engine::new(Config::default());
//!
//! let tick: TickSnapshot = serde_json::from_str(
//!     r#"{
//!         "timestamp": 0,
//!         "trader_state": "",
//!         "order_depths": {
//!             "OBSIDIAN": {
//!                 "sell_orders": { "10002": -9 },
//!                 "buy_orders": { "9998": 9 }
//!             },
//!             "QUARTZ": {
//!                 "sell_orders": { "5003": -9 },
//!                 "buy_orders": { "4999": 9 }
//!             }
//!         }
//!     }"#,
//! )
//! .expect("valid snapshot");
//!
//! let (output, log) = engine.run(&tick)?;
//! let record = telemetry::tick_record(&tick, &output, &log);
//! assert_eq!(record.as_array().map(Vec::len), Some(5));
//! # Ok(())
//! # }
//! ```
//!
//! The shipped binary wraps exactly this loop around stdin/stdout: one
//! `TickSnapshot` JSON document per input line, one telemetry record per
//! output line, diagnostics on stderr.

pub mod config;
pub mod error;
pub mod models;
pub mod position;
pub mod quoting;
pub mod state;
pub mod telemetry;
