//! Fast/slow SMA crossover momentum trader.
//!
//! Each tick the mid-price feeds both rolling windows. Once both averages
//! exist on this tick and the previous one, the change in their spread is
//! classified into a [`Signal`]:
//!
//! - fast above slow and spread widening: long entry, buy the best ask
//! - fast above slow and spread narrowing: long exit, sell the best bid
//! - fast below slow and spread widening: short entry, sell the best bid
//! - fast below slow and spread narrowing: short exit, buy the best ask
//!
//! Equal averages or an unchanged spread yield [`Signal::NoCrossover`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ProductStrategy;
use crate::domain::{Order, OrderDepth, Side};
use crate::error::{Result, TraderError};
use crate::state::{CarriedState, Reading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    LongEntry,
    LongExit,
    ShortEntry,
    ShortExit,
    NoCrossover,
}

impl Signal {
    /// Which side of the book the signal trades against, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Signal::LongEntry | Signal::ShortExit => Some(Side::Buy),
            Signal::LongExit | Signal::ShortEntry => Some(Side::Sell),
            Signal::NoCrossover => None,
        }
    }

    /// Classifies the tick-over-tick spread change between the averages.
    pub fn classify(fast: Reading, slow: Reading) -> Self {
        let (Some(f), Some(s), Some(f0), Some(s0)) =
            (fast.current, slow.current, fast.previous, slow.previous)
        else {
            return Signal::NoCrossover;
        };

        let spread = f - s;
        let prev_spread = f0 - s0;

        if f > s {
            if spread > prev_spread {
                Signal::LongEntry
            } else if spread < prev_spread {
                Signal::LongExit
            } else {
                Signal::NoCrossover
            }
        } else if f < s {
            if -spread > -prev_spread {
                Signal::ShortEntry
            } else if -spread < -prev_spread {
                Signal::ShortExit
            } else {
                Signal::NoCrossover
            }
        } else {
            Signal::NoCrossover
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrossoverTrader {
    pub product: String,
}

impl CrossoverTrader {
    pub fn new(product: impl Into<String>) -> Self {
        Self { product: product.into() }
    }

    /// Advances both windows and returns the signal with its order.
    ///
    /// Fails before touching `state` when the book cannot produce a mid-price.
    pub fn step(&self, depth: &OrderDepth, state: &mut CarriedState) -> Result<(Signal, Option<Order>)> {
        let mid = depth
            .mid_price()
            .ok_or_else(|| TraderError::InsufficientLiquidity { product: self.product.clone() })?;

        let fast = state.fast.advance(mid);
        let slow = state.slow.advance(mid);
        let signal = Signal::classify(fast, slow);

        debug!(
            product = %self.product,
            mid,
            fast = ?fast.current,
            slow = ?slow.current,
            ?signal,
            "crossover.tick"
        );

        let order = match signal.side() {
            Some(Side::Buy) => Order::lift_best_ask(&self.product, depth),
            Some(Side::Sell) => Order::hit_best_bid(&self.product, depth),
            None => None,
        };

        if let Some(o) = &order {
            info!(product = %self.product, ?signal, price = o.price, quantity = o.quantity, "crossover.signal");
        }

        Ok((signal, order))
    }
}

impl ProductStrategy for CrossoverTrader {
    fn name(&self) -> &'static str {
        "sma_crossover"
    }

    fn product(&self) -> &str {
        &self.product
    }

    fn on_tick(&self, depth: &OrderDepth, state: &mut CarriedState) -> Result<Vec<Order>> {
        let (_, order) = self.step(depth, state)?;
        Ok(order.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(previous: f64, current: f64) -> Reading {
        Reading { previous: Some(previous), current: Some(current) }
    }

    fn book(mid: i64, bid_qty: i64, ask_qty: i64) -> OrderDepth {
        OrderDepth {
            buy_orders: [(mid - 1, bid_qty)].into_iter().collect(),
            sell_orders: [(mid + 1, -ask_qty)].into_iter().collect(),
        }
    }

    #[test]
    fn classify_covers_every_branch() {
        assert_eq!(Signal::classify(reading(101.0, 103.0), reading(100.0, 100.0)), Signal::LongEntry);
        assert_eq!(Signal::classify(reading(103.0, 101.0), reading(100.0, 100.0)), Signal::LongExit);
        assert_eq!(Signal::classify(reading(99.0, 97.0), reading(100.0, 100.0)), Signal::ShortEntry);
        assert_eq!(Signal::classify(reading(97.0, 99.0), reading(100.0, 100.0)), Signal::ShortExit);
        assert_eq!(Signal::classify(reading(102.0, 102.0), reading(100.0, 100.0)), Signal::NoCrossover);
    }

    #[test]
    fn crossing_from_below_counts_as_long_entry() {
        assert_eq!(Signal::classify(reading(99.0, 101.0), reading(100.0, 100.0)), Signal::LongEntry);
        assert_eq!(Signal::classify(reading(101.0, 99.0), reading(100.0, 100.0)), Signal::ShortEntry);
    }

    #[test]
    fn equal_averages_never_trade() {
        assert_eq!(Signal::classify(reading(98.0, 100.0), reading(100.0, 100.0)), Signal::NoCrossover);
        assert_eq!(Signal::classify(reading(102.0, 100.0), reading(100.0, 100.0)), Signal::NoCrossover);
    }

    #[test]
    fn missing_averages_never_trade() {
        let partial = Reading { previous: None, current: Some(100.0) };
        assert_eq!(Signal::classify(partial, reading(1.0, 2.0)), Signal::NoCrossover);
        assert_eq!(Signal::classify(reading(1.0, 2.0), Reading { previous: Some(1.0), current: None }), Signal::NoCrossover);
    }

    #[test]
    fn signal_sides_match_action_table() {
        assert_eq!(Signal::LongEntry.side(), Some(Side::Buy));
        assert_eq!(Signal::ShortExit.side(), Some(Side::Buy));
        assert_eq!(Signal::LongExit.side(), Some(Side::Sell));
        assert_eq!(Signal::ShortEntry.side(), Some(Side::Sell));
        assert_eq!(Signal::NoCrossover.side(), None);
    }

    #[test]
    fn step_sells_full_bid_on_short_entry() {
        let trader = CrossoverTrader::new("STARFRUIT");
        let mut st = CarriedState::new(2, 4);
        for _ in 0..5 {
            let (signal, order) = trader.step(&book(100, 3, 3), &mut st).unwrap();
            assert_eq!(signal, Signal::NoCrossover);
            assert!(order.is_none());
        }
        // fast (100+90)/2 = 95, slow (100*3+90)/4 = 97.5, previous both 100
        let (signal, order) = trader.step(&book(90, 7, 4), &mut st).unwrap();
        assert_eq!(signal, Signal::ShortEntry);
        assert_eq!(order, Some(Order { product: "STARFRUIT".into(), price: 89, quantity: -7 }));
    }

    #[test]
    fn step_without_liquidity_leaves_state_untouched() {
        let trader = CrossoverTrader::new("STARFRUIT");
        let mut st = CarriedState::new(2, 4);
        trader.step(&book(100, 1, 1), &mut st).unwrap();
        let before = st.clone();

        let one_sided = OrderDepth {
            buy_orders: [(99, 5)].into_iter().collect(),
            ..OrderDepth::default()
        };
        let err = trader.step(&one_sided, &mut st).unwrap_err();
        assert!(matches!(err, TraderError::InsufficientLiquidity { .. }));
        assert_eq!(st, before);
    }
}
