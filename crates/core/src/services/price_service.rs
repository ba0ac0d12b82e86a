use tracing::trace;

use crate::models::date::DateInt;
use crate::models::price::{PriceObservation, PriceSeries};
use crate::models::security::Security;
use crate::models::settings::{FreshnessWindow, SnapshotPolicy};

/// The fixed snapshot horizons, in days back from today.
const HORIZON_DAYS: [u32; 5] = [0, 1, 7, 30, 365];

/// Resolves base-currency prices from a security's recorded observations.
///
/// Pure lookup logic — no I/O, no catalog access. Every way a lookup can
/// fail (stale or absent history, zero rate, quote chain through a dead
/// currency) degrades to NaN; nothing here panics on market data.
///
/// **Note on precision**: prices are `f64`, ~15-17 significant decimal
/// digits. Sufficient for display math; not a ledger.
pub struct PriceService;

impl PriceService {
    pub fn new() -> Self {
        Self
    }

    /// True when `observations` contains a usable observation for
    /// `target`: one dated at-or-before `target` and at most the window's
    /// day count older, measured in calendar days (raw DateInt differences
    /// are not linear across month boundaries).
    ///
    /// An infinite window accepts any non-empty history. An empty history
    /// is governed solely by `empty_ok` — fixed-rate securities carry no
    /// observations and may still be priceable.
    pub fn has_fresh_observation(
        &self,
        observations: &[PriceObservation],
        target: DateInt,
        window: FreshnessWindow,
        empty_ok: bool,
    ) -> bool {
        if observations.is_empty() {
            return empty_ok;
        }
        match window {
            FreshnessWindow::Infinite => true,
            FreshnessWindow::Days(days) => observations.iter().any(|obs| {
                let age = obs.date.days_until(target);
                0 <= age && age <= i64::from(days)
            }),
        }
    }

    /// The base-currency price of one unit of `security` at `target`, or
    /// NaN when no rate can be resolved.
    ///
    /// The rate in effect is the newest observation dated at-or-before
    /// `target` (split-adjusted); a security with no observations at all
    /// falls back to its fixed current rate, while a non-empty history with
    /// nothing at-or-before `target` is an out-of-range lookup and yields
    /// NaN. The price is the reciprocal of the rate, divided through the
    /// relative currency's current rate when the security is not quoted
    /// directly in the base currency. Zero and non-finite rates yield NaN.
    pub fn price_at(
        &self,
        security: &Security,
        relative: Option<&Security>,
        target: DateInt,
    ) -> f64 {
        let rate = match self.rate_in_effect(security, target) {
            Some(rate) => rate,
            None => return f64::NAN,
        };

        let rate = match relative {
            Some(rel) => rate * rel.current_rate,
            None => rate,
        };

        if rate == 0.0 || !rate.is_finite() {
            trace!(symbol = %security.symbol, %target, rate, "unresolvable rate");
            return f64::NAN;
        }
        1.0 / rate
    }

    /// Prices for the five fixed horizons (today, 1/7/30/365 days back),
    /// each gated by the policy's freshness window.
    pub fn price_series(
        &self,
        security: &Security,
        relative: Option<&Security>,
        today: DateInt,
        policy: &SnapshotPolicy,
    ) -> PriceSeries {
        let mut prices = [f64::NAN; 5];
        for (slot, &days_back) in prices.iter_mut().zip(HORIZON_DAYS.iter()) {
            let target = today.subtract_days(days_back);
            if self.has_fresh_observation(
                &security.observations,
                target,
                policy.freshness_window,
                policy.empty_history_is_fresh,
            ) {
                *slot = self.price_at(security, relative, target);
            }
        }
        PriceSeries {
            current: prices[0],
            day_ago: prices[1],
            week_ago: prices[2],
            month_ago: prices[3],
            year_ago: prices[4],
        }
    }

    /// The split-adjusted rate in effect at `target`: newest observation
    /// dated at-or-before `target`, else the fixed rate for a security with
    /// no history at all.
    fn rate_in_effect(&self, security: &Security, target: DateInt) -> Option<f64> {
        if security.observations.is_empty() {
            return Some(security.current_rate);
        }
        security
            .observations
            .iter()
            .filter(|obs| obs.date <= target)
            .max_by_key(|obs| obs.date)
            .map(PriceObservation::effective_rate)
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new()
    }
}
