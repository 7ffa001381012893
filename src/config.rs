use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::TraderError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    // Threshold scalper
    pub scalper_product: String,
    pub fair_value: i64,

    // SMA crossover
    pub crossover_product: String,
    pub fast_period: usize,
    pub slow_period: usize,

    // Exchange protocol
    pub conversions: i64,

    // Runtime
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scalper_product: "AMETHYSTS".into(),
            fair_value: 10_000,
            crossover_product: "STARFRUIT".into(),
            fast_period: 10,
            slow_period: 100,
            conversions: 1,
            log_json: false,
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|x| x.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let d = Self::default();

        let cfg = Self {
            scalper_product: std::env::var("TT_SCALPER_PRODUCT").unwrap_or(d.scalper_product),
            fair_value: env_parse::<i64>("TT_FAIR_VALUE").unwrap_or(d.fair_value),
            crossover_product: std::env::var("TT_CROSSOVER_PRODUCT").unwrap_or(d.crossover_product),
            fast_period: env_parse::<usize>("TT_FAST_PERIOD").unwrap_or(d.fast_period),
            slow_period: env_parse::<usize>("TT_SLOW_PERIOD").unwrap_or(d.slow_period),
            conversions: env_parse::<i64>("TT_CONVERSIONS").unwrap_or(d.conversions),
            log_json: env_bool("TT_LOG_JSON", d.log_json),
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TraderError> {
        if self.fast_period == 0 || self.slow_period == 0 {
            return Err(TraderError::InvalidConfig("SMA periods must be positive".into()));
        }
        if self.fast_period >= self.slow_period {
            return Err(TraderError::InvalidConfig(format!(
                "TT_FAST_PERIOD ({}) must be below TT_SLOW_PERIOD ({})",
                self.fast_period, self.slow_period
            )));
        }
        if self.scalper_product == self.crossover_product {
            return Err(TraderError::InvalidConfig(format!(
                "scalper and crossover cannot both trade {}",
                self.scalper_product
            )));
        }
        Ok(())
    }
}
