//! Error types for a single agent tick.
//!
//! A tick either fully completes or fails with one of these; there is no
//! partial recovery. The variants fall into three families: book
//! preconditions ([`AgentError::EmptyBook`], [`AgentError::MissingBook`]),
//! configuration ([`AgentError::UnknownProduct`]), and carried state
//! ([`AgentError::StateDecode`], [`AgentError::StateVersion`],
//! [`AgentError::MissingHistory`]).

use serde::Serialize;


/// Side of an order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    /// Buy side.
    Bid,
    /// Sell side.
    Ask,
}

impl std::fmt::Display for BookSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

/// Errors raised while processing a tick.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A product being priced has an empty book side. The mid price is
    /// undefined, so the tick cannot produce a valid order for the product;
    /// guessing a fallback would trade on an invented price.
    #[error("order book for {symbol} has no resting {side} orders")]
    EmptyBook {
        /// Product whose book is unusable.
        symbol: String,
        /// The empty side.
        side: BookSide,
    },

    /// The tick supplied no order book at all for a product the agent quotes.
    #[error("tick snapshot has no order book for {0}")]
    MissingBook(String),

    /// A reported product has no configured position limit.
    #[error("product has no configured position limit: {0}")]
    UnknownProduct(String),

    /// The carried state blob from the previous tick did not parse.
    #[error("failed to decode carried state: {0}")]
    StateDecode(#[from] serde_json::Error),

    /// The carried state blob parsed but carries an unsupported schema
    /// version.
    #[error("unsupported carried state version {0}")]
    StateVersion(u32),

    /// The carried state decoded but holds no price history for a product
    /// whose pricing model needs one. Masking this would silently degrade
    /// pricing, so it is fatal like any other state corruption.
    #[error("carried state has no price history for {0}")]
    MissingHistory(String),
}
