use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{Order, TraderOutput, TradingState};
use crate::error::{Result, TraderError};
use crate::state::StateStore;
use crate::strategy::{CrossoverTrader, ProductStrategy, ThresholdScalper};

/// One tick in, orders and the next trader-data blob out.
///
/// Holds configuration only; all memory between ticks lives in the blob.
pub struct Trader {
    store: StateStore,
    strategies: Vec<Box<dyn ProductStrategy>>,
    conversions: i64,
}

impl Trader {
    pub fn new(cfg: &Config) -> Self {
        let strategies: Vec<Box<dyn ProductStrategy>> = vec![
            Box::new(ThresholdScalper::new(cfg.scalper_product.clone(), cfg.fair_value)),
            Box::new(CrossoverTrader::new(cfg.crossover_product.clone())),
        ];
        Self {
            store: StateStore::new(cfg.fast_period, cfg.slow_period),
            strategies,
            conversions: cfg.conversions,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    fn strategy_for(&self, product: &str) -> Option<&dyn ProductStrategy> {
        self.strategies.iter().find(|s| s.product() == product).map(|s| s.as_ref())
    }

    pub fn run(&self, ts: &TradingState) -> Result<TraderOutput> {
        let mut state = self.store.restore(ts.trader_data.as_deref());
        let mut orders: BTreeMap<String, Vec<Order>> = BTreeMap::new();

        for (product, depth) in &ts.order_depths {
            let Some(strategy) = self.strategy_for(product) else {
                debug!(%product, "trader.unconfigured_product");
                orders.insert(product.clone(), vec![]);
                continue;
            };

            let product_orders = match strategy.on_tick(depth, &mut state) {
                Ok(o) => o,
                Err(err @ TraderError::InsufficientLiquidity { .. }) => {
                    warn!(%product, strategy = strategy.name(), error = %err, "trader.skip_product");
                    vec![]
                }
                Err(err) => return Err(err),
            };
            orders.insert(product.clone(), product_orders);
        }

        let trader_data = self.store.persist(&state)?;

        debug!(
            timestamp = ts.timestamp,
            products = ts.order_depths.len(),
            orders = orders.values().map(Vec::len).sum::<usize>(),
            "trader.tick"
        );

        Ok(TraderOutput { orders, conversions: self.conversions, trader_data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderDepth;

    fn book(bid: (i64, i64), ask: (i64, i64)) -> OrderDepth {
        OrderDepth {
            buy_orders: [bid].into_iter().collect(),
            sell_orders: [ask].into_iter().collect(),
        }
    }

    #[test]
    fn first_tick_without_trader_data_scalps_and_starts_history() {
        let trader = Trader::new(&Config::default());
        let ts = TradingState {
            timestamp: 0,
            trader_data: None,
            order_depths: [
                ("AMETHYSTS".to_string(), book((9996, 1), (9999, -5))),
                ("STARFRUIT".to_string(), book((5000, 2), (5004, -2))),
            ]
            .into_iter()
            .collect(),
        };

        let out = trader.run(&ts).unwrap();
        assert_eq!(out.conversions, 1);
        assert_eq!(
            out.orders["AMETHYSTS"],
            vec![Order { product: "AMETHYSTS".into(), price: 9999, quantity: 5 }]
        );
        assert!(out.orders["STARFRUIT"].is_empty());

        let st = trader.store().restore(Some(&out.trader_data));
        assert_eq!(st.fast.history().iter().copied().collect::<Vec<_>>(), vec![5002]);
        assert_eq!(st.slow.sum(), 5002);
    }

    #[test]
    fn unknown_products_pass_through_empty() {
        let trader = Trader::new(&Config::default());
        let ts = TradingState {
            order_depths: [("ORCHIDS".to_string(), book((1000, 1), (1001, -1)))].into_iter().collect(),
            ..TradingState::default()
        };
        let out = trader.run(&ts).unwrap();
        assert_eq!(out.orders["ORCHIDS"], vec![]);
        assert_eq!(trader.store().restore(Some(&out.trader_data)), trader.store().empty());
    }

    #[test]
    fn malformed_trader_data_starts_fresh() {
        let trader = Trader::new(&Config::default());
        let ts = TradingState {
            trader_data: Some("garbage".into()),
            order_depths: [("STARFRUIT".to_string(), book((99, 1), (101, -1)))].into_iter().collect(),
            ..TradingState::default()
        };
        let out = trader.run(&ts).unwrap();
        let st = trader.store().restore(Some(&out.trader_data));
        assert_eq!(st.fast.history().len(), 1);
    }
}
