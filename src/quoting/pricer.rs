//! Fair-price models for quoting.

use crate::error::{AgentError, BookSide};
use crate::models::OrderDepth;

/// Mid price of a book, `(best bid + best ask) / 2`.
///
/// # Errors
/// [`AgentError::EmptyBook`] when either side has no resting orders; the
/// tick must supply non-empty books for any product being priced, and no
/// fallback is guessed.
pub fn mid_price(symbol: &str, depth: &OrderDepth) -> Result<f64, AgentError> {
    let ask = depth.best_ask().ok_or_else(|| AgentError::EmptyBook {
        symbol: symbol.to_string(),
        side: BookSide::Ask,
    })?;
    let bid = depth.best_bid().ok_or_else(|| AgentError::EmptyBook {
        symbol: symbol.to_string(),
        side: BookSide::Bid,
    })?;
    Ok((ask + bid) as f64 / 2.0)
}

/// Computes fair prices from mid-price history or basket composition.
///
/// The smoothed model blends a short recent window against the full history
/// once enough samples exist; before that it falls back to the plain mean.
pub struct FairPricer {
    /// Length of the recent window.
    short_window: usize,
    /// History length below which only the plain mean is used.
    min_samples: usize,
    /// Weight of the full-history mean in the blend; the short window gets
    /// the remainder.
    blend: f64,
}

impl FairPricer {
    /// Creates a new pricer.
    ///
    /// # Arguments
    /// * `short_window` - Length of the recent window
    /// * `min_samples` - Minimum history length before blending kicks in
    /// * `blend` - Weight of the full-history mean (0.0 to 1.0)
    #[must_use]
    pub fn new(short_window: usize, min_samples: usize, blend: f64) -> Self {
        Self {
            short_window,
            min_samples,
            blend,
        }
    }

    /// Smoothed fair price from the rolling mid-price history.
    ///
    /// With fewer than `min_samples` samples this is the rounded mean of the
    /// whole history; from `min_samples` on it is the rounded
    /// `blend * mean(history) + (1 - blend) * mean(last short_window)`.
    /// `None` when the history is empty.
    #[must_use]
    pub fn smoothed(&self, history: &[f64]) -> Option<i64> {
        if history.is_empty() {
            return None;
        }

        let n = history.len();
        let mean = history.iter().sum::<f64>() / n as f64;
        if n < self.min_samples {
            return Some(mean.round() as i64);
        }

        let tail = &history[n - self.short_window.min(n)..];
        let tail_mean = tail.iter().sum::<f64>() / tail.len() as f64;
        Some((self.blend * mean + (1.0 - self.blend) * tail_mean).round() as i64)
    }

    /// Basket fair price: the weighted sum of constituent mids plus the
    /// configured offset, truncated to integer.
    #[must_use]
    pub fn basket(&self, leg_mids: &[(f64, f64)], offset: f64) -> i64 {
        let weighted: f64 = leg_mids.iter().map(|(weight, mid)| weight * mid).sum();
        (weighted + offset) as i64
    }
}

impl Default for FairPricer {
    fn default() -> Self {
        Self::new(6, 10, 0.5)
    }
}
