use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::error::Result;

pub const STATE_VERSION: u32 = 1;

/// Fixed-period simple moving average kept in O(1) per observation.
///
/// Holds at most `period` prices between ticks together with their sum, so the
/// next average is `(sum - oldest + new) / period` without rescanning history.
/// The average is only reported once a full window precedes the new price.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    period: usize,
    history: VecDeque<i64>,
    sum: i64,
    prev_avg: Option<f64>,
}

/// Previous and current average produced by one [`RollingWindow::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub previous: Option<f64>,
    pub current: Option<f64>,
}

impl RollingWindow {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            history: VecDeque::with_capacity(period + 1),
            sum: 0,
            prev_avg: None,
        }
    }

    /// Rebuilds a window from decoded fields. Keeps the newest `period`
    /// prices; the sum is recomputed when absent or when history was trimmed.
    pub fn from_parts(
        period: usize,
        history: Vec<i64>,
        sum: Option<i64>,
        prev_avg: Option<f64>,
    ) -> Self {
        let mut history: VecDeque<i64> = history.into();
        let mut trimmed = false;
        while history.len() > period {
            history.pop_front();
            trimmed = true;
        }
        let sum = match sum {
            Some(s) if !trimmed => s,
            _ => history.iter().sum(),
        };
        Self { period, history, sum, prev_avg }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn history(&self) -> &VecDeque<i64> {
        &self.history
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }

    pub fn prev_avg(&self) -> Option<f64> {
        self.prev_avg
    }

    /// Average over the last `period` prices if `price` were appended now.
    pub fn peek(&self, price: i64) -> Option<f64> {
        if self.period == 0 || self.history.len() < self.period {
            return None;
        }
        let oldest = *self.history.front()?;
        Some((self.sum - oldest + price) as f64 / self.period as f64)
    }

    /// Appends `price`, evicts the oldest entry once the window overflows and
    /// records the new average as the previous one for the next tick.
    pub fn advance(&mut self, price: i64) -> Reading {
        let current = self.peek(price);
        self.history.push_back(price);
        self.sum += price;
        if self.history.len() > self.period {
            if let Some(oldest) = self.history.pop_front() {
                self.sum -= oldest;
            }
        }
        let previous = std::mem::replace(&mut self.prev_avg, current);
        Reading { previous, current }
    }
}

/// Everything the trader carries from one tick to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct CarriedState {
    pub fast: RollingWindow,
    pub slow: RollingWindow,
}

impl CarriedState {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast: RollingWindow::new(fast_period),
            slow: RollingWindow::new(slow_period),
        }
    }
}

/// Wire shape of the trader-data blob. Every field is optional on decode.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateRecord {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    fast_history: Vec<i64>,
    #[serde(default)]
    slow_history: Vec<i64>,
    #[serde(default)]
    fast_sum: Option<i64>,
    #[serde(default)]
    slow_sum: Option<i64>,
    #[serde(default)]
    prev_fast_avg: Option<f64>,
    #[serde(default)]
    prev_slow_avg: Option<f64>,
}

/// Decodes and encodes [`CarriedState`] to the opaque string the simulator
/// hands back on the next tick.
#[derive(Debug, Clone, Copy)]
pub struct StateStore {
    fast_period: usize,
    slow_period: usize,
}

impl StateStore {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self { fast_period, slow_period }
    }

    pub fn empty(&self) -> CarriedState {
        CarriedState::new(self.fast_period, self.slow_period)
    }

    /// Never fails: absent, blank or unparseable blobs give the empty state.
    pub fn restore(&self, blob: Option<&str>) -> CarriedState {
        let raw = match blob.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return self.empty(),
        };

        let rec: StateRecord = match serde_json::from_str(raw) {
            Ok(rec) => rec,
            Err(err) => {
                warn!(error = %err, len = raw.len(), "state.restore.malformed");
                return self.empty();
            }
        };

        if let Some(v) = rec.version.filter(|v| *v != STATE_VERSION) {
            debug!(version = v, expected = STATE_VERSION, "state.restore.version_mismatch");
        }

        CarriedState {
            fast: RollingWindow::from_parts(
                self.fast_period,
                rec.fast_history,
                rec.fast_sum,
                rec.prev_fast_avg,
            ),
            slow: RollingWindow::from_parts(
                self.slow_period,
                rec.slow_history,
                rec.slow_sum,
                rec.prev_slow_avg,
            ),
        }
    }

    pub fn persist(&self, st: &CarriedState) -> Result<String> {
        let rec = StateRecord {
            version: Some(STATE_VERSION),
            fast_history: st.fast.history.iter().copied().collect(),
            slow_history: st.slow.history.iter().copied().collect(),
            fast_sum: Some(st.fast.sum),
            slow_sum: Some(st.slow.sum),
            prev_fast_avg: st.fast.prev_avg,
            prev_slow_avg: st.slow.prev_avg,
        };
        Ok(serde_json::to_string(&rec)?)
    }
}
