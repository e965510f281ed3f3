//! Order construction: market take followed by market make.

use crate::error::{AgentError, BookSide};
use crate::models::{Order, OrderDepth};

/// Builds one product's orders for a tick from a fair price and tolerance.
///
/// Each call is independent: it starts from the tick's reported position and
/// keeps two local running counters, one per side. Phase A (market take)
/// advances only the counter of the side it trades; Phase B (market make)
/// then reads both counters as they stand, so the untouched side still sees
/// the tick-start position.
pub struct Quoter {
    /// Cap on the size of a single make quote.
    max_quote_size: i64,
}

impl Quoter {
    /// Creates a new quoter.
    ///
    /// # Arguments
    /// * `max_quote_size` - Cap on the size of each make quote
    #[must_use]
    pub fn new(max_quote_size: i64) -> Self {
        Self { max_quote_size }
    }

    /// Computes the orders for one product.
    ///
    /// Phase A crosses resting levels priced favorably against `fair_price`:
    /// buying walks the sell side in ascending price order, selling walks the
    /// buy side in descending order. A level exactly at fair is only taken
    /// while the running position on that side does not already lean the same
    /// way. Sizes are clamped to the remaining headroom against `limit` and
    /// zero-size orders are skipped.
    ///
    /// Phase B posts one make quote per side with remaining headroom: an ask
    /// at `max(fair + tolerance, best_ask - 1)` and a bid at
    /// `min(fair - tolerance, best_ask + 1)`. The bid price anchors on the
    /// best ask, not the best bid.
    ///
    /// Take orders precede make orders in the returned list.
    ///
    /// # Errors
    /// [`AgentError::EmptyBook`] when either side of the book is empty.
    pub fn compute_orders(
        &self,
        symbol: &str,
        depth: &OrderDepth,
        fair_price: i64,
        tolerance: i64,
        position: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AgentError> {
        let best_ask = depth.best_ask().ok_or_else(|| AgentError::EmptyBook {
            symbol: symbol.to_string(),
            side: BookSide::Ask,
        })?;
        let best_bid = depth.best_bid().ok_or_else(|| AgentError::EmptyBook {
            symbol: symbol.to_string(),
            side: BookSide::Bid,
        })?;

        let mut running_buy = position;
        let mut running_sell = position;
        let mut orders = Vec::new();

        // Phase A: take whichever side of the book crosses fair, if any.
        if best_ask <= fair_price {
            for (&ask, &ask_volume) in &depth.sell_orders {
                if ask < fair_price || (ask == fair_price && running_buy <= 0) {
                    let volume = (-ask_volume).min(limit - running_buy);
                    if volume > 0 {
                        orders.push(Order::new(symbol, ask, volume));
                        running_buy += volume;
                    }
                }
            }
        } else if best_bid >= fair_price {
            for (&bid, &bid_volume) in depth.buy_orders.iter().rev() {
                if bid > fair_price || (bid == fair_price && running_sell >= 0) {
                    let volume = bid_volume.min(limit + running_sell);
                    if volume > 0 {
                        orders.push(Order::new(symbol, bid, -volume));
                        running_sell -= volume;
                    }
                }
            }
        }

        // Phase B: post a resting quote on each side that still has headroom.
        if running_sell > -limit {
            let price = (fair_price + tolerance).max(best_ask - 1);
            let volume = (-self.max_quote_size).max(-limit - running_sell);
            orders.push(Order::new(symbol, price, volume));
        }

        if running_buy < limit {
            let price = (fair_price - tolerance).min(best_ask + 1);
            let volume = self.max_quote_size.min(limit - running_buy);
            orders.push(Order::new(symbol, price, volume));
        }

        Ok(orders)
    }
}

impl Default for Quoter {
    fn default() -> Self {
        Self::new(40)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(sells: &[(i64, i64)], buys: &[(i64, i64)]) -> OrderDepth {
        let mut d = OrderDepth::new();
        for &(price, volume) in sells {
            d.sell_orders.insert(price, volume);
        }
        for &(price, volume) in buys {
            d.buy_orders.insert(price, volume);
        }
        d
    }

    #[test]
    fn test_no_take_when_book_straddles_fair() {
        let quoter = Quoter::default();
        let d = depth(&[(101, -5), (102, -3)], &[(99, 4)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 0, 20)
            .unwrap();

        // Only the two make quotes.
        assert_eq!(orders.len(), 2);
        let ask = &orders[0];
        let bid = &orders[1];
        // max(100 + 2, 101 - 1) = 102 ask, min(100 - 2, 101 + 1) = 98 bid.
        assert_eq!((ask.price, ask.quantity), (102, -20));
        assert_eq!((bid.price, bid.quantity), (98, 20));
    }

    #[test]
    fn test_take_cheap_asks_in_ascending_order() {
        let quoter = Quoter::default();
        let d = depth(&[(98, -5), (99, -3), (101, -4)], &[(95, 4)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 0, 20)
            .unwrap();

        // Takes at 98 then 99; 101 sits above fair and is left alone.
        assert_eq!((orders[0].price, orders[0].quantity), (98, 5));
        assert_eq!((orders[1].price, orders[1].quantity), (99, 3));
        assert!(orders[2].quantity < 0); // make ask follows the takes
    }

    #[test]
    fn test_take_respects_buy_headroom() {
        let quoter = Quoter::default();
        let d = depth(&[(98, -30)], &[(95, 4)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 15, 20)
            .unwrap();

        // Headroom is 5; the 30 on offer is clamped.
        assert_eq!((orders[0].price, orders[0].quantity), (98, 5));
        // Buy side is now full, so no make bid, only the make ask remains.
        assert_eq!(orders.len(), 2);
        assert!(orders[1].quantity < 0);
    }

    #[test]
    fn test_equal_price_take_only_when_not_long() {
        let quoter = Quoter::default();
        let d = depth(&[(100, -5)], &[(95, 4)]);

        // Flat: a level exactly at fair is taken.
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 0, 20)
            .unwrap();
        assert_eq!((orders[0].price, orders[0].quantity), (100, 5));

        // Already long: the same level is passed over.
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 3, 20)
            .unwrap();
        assert!(orders.iter().all(|o| o.quantity < 0 || o.price < 100));
    }

    #[test]
    fn test_equal_price_tiebreak_uses_running_position() {
        let quoter = Quoter::default();
        // Two asks below fair flip the running position positive, so the
        // level exactly at fair must no longer be taken.
        let d = depth(&[(98, -4), (100, -5)], &[(95, 4)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, -2, 20)
            .unwrap();

        // -2 + 4 = +2 after the first take; the 100 level is skipped.
        assert_eq!((orders[0].price, orders[0].quantity), (98, 4));
        assert!(!orders.iter().any(|o| o.price == 100 && o.quantity > 0));
    }

    #[test]
    fn test_take_rich_bids_in_descending_order() {
        let quoter = Quoter::default();
        let d = depth(&[(105, -5)], &[(103, 6), (102, 4), (99, 8)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 0, 20)
            .unwrap();

        assert_eq!((orders[0].price, orders[0].quantity), (103, -6));
        assert_eq!((orders[1].price, orders[1].quantity), (102, -4));
        assert!(!orders.iter().any(|o| o.price == 99));
    }

    #[test]
    fn test_make_sizes_capped_at_max_quote_size() {
        let quoter = Quoter::default();
        let d = depth(&[(110, -5)], &[(90, 5)]);
        let orders = quoter
            .compute_orders("PUMICE", &d, 100, 2, 0, 350)
            .unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].quantity, -40);
        assert_eq!(orders[1].quantity, 40);
    }

    #[test]
    fn test_make_sizes_capped_by_headroom() {
        let quoter = Quoter::default();
        let d = depth(&[(110, -5)], &[(90, 5)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 15, 20)
            .unwrap();

        // Long 15 of 20: sell side may quote 35, buy side only 5 more.
        assert_eq!(orders[0].quantity, -35);
        assert_eq!(orders[1].quantity, 5);
    }

    #[test]
    fn test_no_make_quote_without_headroom() {
        let quoter = Quoter::default();
        let d = depth(&[(110, -5)], &[(90, 5)]);

        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 20, 20)
            .unwrap();
        // At the long limit only the ask side quotes.
        assert_eq!(orders.len(), 1);
        assert!(orders[0].quantity < 0);

        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, -20, 20)
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert!(orders[0].quantity > 0);
    }

    #[test]
    fn test_make_bid_price_anchors_on_best_ask() {
        let quoter = Quoter::default();
        // With fair far above the book, the take consumes the 101 ask and
        // the make bid caps at best_ask + 1 = 102. Anchoring on the best bid
        // would have given 100 instead.
        let d = depth(&[(101, -5)], &[(99, 5)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 150, 3, 0, 20)
            .unwrap();

        let bid = orders.last().unwrap();
        assert!(bid.quantity > 0);
        assert_eq!(bid.price, 102);
    }

    #[test]
    fn test_empty_side_is_an_error() {
        let quoter = Quoter::default();
        let no_asks = depth(&[], &[(99, 5)]);
        assert!(matches!(
            quoter.compute_orders("OBSIDIAN", &no_asks, 100, 2, 0, 20),
            Err(AgentError::EmptyBook {
                side: BookSide::Ask,
                ..
            })
        ));

        let no_bids = depth(&[(101, -5)], &[]);
        assert!(matches!(
            quoter.compute_orders("OBSIDIAN", &no_bids, 100, 2, 0, 20),
            Err(AgentError::EmptyBook {
                side: BookSide::Bid,
                ..
            })
        ));
    }

    #[test]
    fn test_take_plus_make_never_breaches_buy_limit() {
        let quoter = Quoter::default();
        let d = depth(&[(97, -10), (98, -15)], &[(95, 4)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 0, 20)
            .unwrap();

        let bought: i64 = orders.iter().filter(|o| o.quantity > 0).map(|o| o.quantity).sum();
        assert!(bought <= 20);
    }

    #[test]
    fn test_sell_take_leaves_buy_make_at_tick_start() {
        let quoter = Quoter::default();
        // Rich bids trigger the sell branch; the buy counter is untouched,
        // so the make bid still sizes from the tick-start position.
        let d = depth(&[(106, -5)], &[(104, 10)]);
        let orders = quoter
            .compute_orders("OBSIDIAN", &d, 100, 2, 5, 20)
            .unwrap();

        let bid = orders.iter().find(|o| o.quantity > 0).unwrap();
        assert_eq!(bid.quantity, 15); // 20 - 5, not 20 - (5 - 10)
    }
}
