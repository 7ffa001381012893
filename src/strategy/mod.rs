pub mod crossover;
pub mod scalper;

use crate::domain::{Order, OrderDepth};
use crate::error::Result;
use crate::state::CarriedState;

pub use crossover::{CrossoverTrader, Signal};
pub use scalper::ThresholdScalper;

/// Per-product order logic run once per tick.
pub trait ProductStrategy {
    fn name(&self) -> &'static str;
    fn product(&self) -> &str;

    /// Orders for this tick. Stateless strategies leave `state` alone.
    fn on_tick(&self, depth: &OrderDepth, state: &mut CarriedState) -> Result<Vec<Order>>;
}
