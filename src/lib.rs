//! # Tick Trader
//!
//! Per-tick trading agent for a simulated market-making round.
//!
//! - `config`: environment-driven settings
//! - `domain`: order book snapshot, orders and the per-tick input/output records
//! - `state`: rolling SMA windows and the trader-data blob codec
//! - `strategy`: threshold scalper and SMA crossover trader
//! - `trader`: runs every configured strategy for one tick

pub mod config;
pub mod domain;
pub mod error;
pub mod monitoring;
pub mod state;
pub mod strategy;
pub mod trader;

pub use config::Config;
pub use error::{Result, TraderError};
pub use trader::Trader;
