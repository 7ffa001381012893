use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Product = String;

/// One product's resting book. Bid volumes are positive, ask volumes are
/// negative, as delivered by the exchange simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    #[serde(default)]
    pub buy_orders: BTreeMap<i64, i64>,
    #[serde(default)]
    pub sell_orders: BTreeMap<i64, i64>,
}

impl OrderDepth {
    /// Highest bid and the volume resting there.
    pub fn best_bid(&self) -> Option<(i64, i64)> {
        self.buy_orders.iter().next_back().map(|(p, q)| (*p, *q))
    }

    /// Lowest ask and the (negative) volume resting there.
    pub fn best_ask(&self) -> Option<(i64, i64)> {
        self.sell_orders.iter().next().map(|(p, q)| (*p, *q))
    }

    /// Mean of the bid-side and ask-side volume-weighted prices, truncated
    /// toward zero. `None` when either side is empty or has no volume.
    pub fn mid_price(&self) -> Option<i64> {
        let (bid_notional, bid_volume) = side_totals(&self.buy_orders)?;
        let (ask_notional, ask_volume) = side_totals(&self.sell_orders)?;
        // (bn/bv + an/av) / 2 over a common denominator keeps it exact
        let mid = (bid_notional * ask_volume + ask_notional * bid_volume) / (2 * bid_volume * ask_volume);
        i64::try_from(mid).ok()
    }
}

fn side_totals(levels: &BTreeMap<i64, i64>) -> Option<(i128, i128)> {
    let (notional, volume) = levels.iter().fold((0i128, 0i128), |(n, v), (p, q)| {
        let q = i128::from(q.unsigned_abs());
        (n + i128::from(*p) * q, v + q)
    });
    (volume > 0).then_some((notional, volume))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// An order for the current tick. Positive quantity buys, negative sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub product: Product,
    pub price: i64,
    pub quantity: i64,
}

impl Order {
    /// Takes the whole best ask level.
    pub fn lift_best_ask(product: &str, depth: &OrderDepth) -> Option<Self> {
        let (price, volume) = depth.best_ask()?;
        Some(Self { product: product.to_string(), price, quantity: -volume })
    }

    /// Hits the whole best bid level.
    pub fn hit_best_bid(product: &str, depth: &OrderDepth) -> Option<Self> {
        let (price, volume) = depth.best_bid()?;
        Some(Self { product: product.to_string(), price, quantity: -volume })
    }

    pub fn side(&self) -> Side {
        if self.quantity >= 0 {
            Side::Buy
        } else {
            Side::Sell
        }
    }
}

/// Per-tick input from the simulator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingState {
    #[serde(default)]
    pub timestamp: i64,
    /// Opaque blob returned by the previous tick, if any.
    #[serde(default)]
    pub trader_data: Option<String>,
    #[serde(default)]
    pub order_depths: BTreeMap<Product, OrderDepth>,
}

/// Per-tick output handed back to the simulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderOutput {
    pub orders: BTreeMap<Product, Vec<Order>>,
    pub conversions: i64,
    pub trader_data: String,
}
