//! Decision engine: fair-price models and the quoting loop.

mod engine;
mod pricer;
mod quoter;

pub use engine::{CONVERSIONS, Engine};
pub use pricer::{FairPricer, mid_price};
pub use quoter::Quoter;
