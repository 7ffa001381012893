use tracing::debug;

use super::ProductStrategy;
use crate::domain::{Order, OrderDepth};
use crate::error::Result;
use crate::state::CarriedState;

/// Takes any best level priced through a fixed fair value.
#[derive(Debug, Clone)]
pub struct ThresholdScalper {
    pub product: String,
    pub fair_value: i64,
}

impl ThresholdScalper {
    pub fn new(product: impl Into<String>, fair_value: i64) -> Self {
        Self { product: product.into(), fair_value }
    }

    pub fn evaluate(&self, depth: &OrderDepth) -> Vec<Order> {
        let mut orders = Vec::with_capacity(2);

        if let Some((ask, _)) = depth.best_ask() {
            if ask < self.fair_value {
                orders.extend(Order::lift_best_ask(&self.product, depth));
            }
        }

        if let Some((bid, _)) = depth.best_bid() {
            if bid > self.fair_value {
                orders.extend(Order::hit_best_bid(&self.product, depth));
            }
        }

        if !orders.is_empty() {
            debug!(product = %self.product, fair_value = self.fair_value, ?orders, "scalper.orders");
        }
        orders
    }
}

impl ProductStrategy for ThresholdScalper {
    fn name(&self) -> &'static str {
        "threshold_scalper"
    }

    fn product(&self) -> &str {
        &self.product
    }

    fn on_tick(&self, depth: &OrderDepth, _state: &mut CarriedState) -> Result<Vec<Order>> {
        Ok(self.evaluate(depth))
    }
}
