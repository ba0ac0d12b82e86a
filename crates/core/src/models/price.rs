use serde::{Deserialize, Serialize};

use super::date::DateInt;

/// A single recorded exchange-rate observation for a security.
///
/// `rate` is units-per-base (or per relative-currency unit) exactly as the
/// host recorded it on `date`. `split_adjust` is the multiplicative
/// correction for splits that happened between `date` and now; the rate in
/// effect is `rate * split_adjust`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: DateInt,
    pub rate: f64,
    #[serde(default = "default_split_adjust")]
    pub split_adjust: f64,
}

fn default_split_adjust() -> f64 {
    1.0
}

impl PriceObservation {
    pub fn new(date: DateInt, rate: f64) -> Self {
        Self {
            date,
            rate,
            split_adjust: 1.0,
        }
    }

    /// Attach a split-adjustment factor.
    pub fn with_split_adjust(mut self, split_adjust: f64) -> Self {
        self.split_adjust = split_adjust;
        self
    }

    /// The split-corrected rate as of now.
    pub fn effective_rate(&self) -> f64 {
        self.rate * self.split_adjust
    }
}

/// Base-currency prices of one security at the five fixed snapshot
/// horizons: today and 1/7/30/365 days back. A horizon with no fresh-enough
/// observation is NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSeries {
    pub current: f64,
    pub day_ago: f64,
    pub week_ago: f64,
    pub month_ago: f64,
    pub year_ago: f64,
}

impl PriceSeries {
    /// True when today's price resolved.
    pub fn has_current(&self) -> bool {
        !self.current.is_nan()
    }

    /// True when at least one historical horizon resolved.
    pub fn has_history(&self) -> bool {
        !self.day_ago.is_nan()
            || !self.week_ago.is_nan()
            || !self.month_ago.is_nan()
            || !self.year_ago.is_nan()
    }

    /// True when the series carries any usable price at all. A series that
    /// is NaN across every horizon can never produce a meaningful row.
    pub fn is_informative(&self) -> bool {
        self.has_current() || self.has_history()
    }
}
