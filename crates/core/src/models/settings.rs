use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How old a price observation may be and still count for a target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreshnessWindow {
    /// Observations at most this many calendar days before the target date
    /// are usable.
    Days(u32),
    /// Any recorded observation counts, regardless of age.
    Infinite,
}

impl Default for FreshnessWindow {
    fn default() -> Self {
        FreshnessWindow::Days(7)
    }
}

impl std::fmt::Display for FreshnessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreshnessWindow::Days(days) => write!(f, "{days} days"),
            FreshnessWindow::Infinite => write!(f, "infinite"),
        }
    }
}

/// Policy flags controlling which securities a snapshot includes and how
/// strict the price-history requirements are.
///
/// Every combination of flags is valid; they only change how complete the
/// output is. The core receives the policy as plain input — persisting it
/// is the host's preference store's job (see `SnapshotPolicy::load_from`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPolicy {
    /// Include securities whose historical horizons are incomplete. Only
    /// relaxes the *historical* leg: a security with no usable price at any
    /// horizon is still excluded.
    pub include_incomplete_price_history: bool,

    /// Include securities whose aggregated balance is zero or absent.
    pub include_zero_balance: bool,

    /// Maximum age of a usable observation relative to each horizon date.
    pub freshness_window: FreshnessWindow,

    /// Treat an entirely empty observation list as fresh — fixed-rate
    /// securities then price from their current rate. With this off, a
    /// security without history never resolves a price.
    pub empty_history_is_fresh: bool,

    /// When set, only securities named here are considered. `None` = all.
    pub displayed_securities: Option<HashSet<String>>,
}

impl Default for SnapshotPolicy {
    fn default() -> Self {
        Self {
            include_incomplete_price_history: false,
            include_zero_balance: false,
            freshness_window: FreshnessWindow::default(),
            empty_history_is_fresh: true,
            displayed_securities: None,
        }
    }
}

impl SnapshotPolicy {
    /// True when `symbol` passes the displayed-securities filter.
    pub fn displays(&self, symbol: &str) -> bool {
        match &self.displayed_securities {
            Some(filter) => filter.contains(symbol),
            None => true,
        }
    }
}

/// Preference-store key names for the policy fields. The store itself is an
/// opaque host facility; these constants are the shared vocabulary.
pub mod pref_keys {
    pub const INCLUDE_INCOMPLETE_HISTORY: &str = "include_incomplete_history";
    pub const INCLUDE_ZERO_BALANCE: &str = "include_zero_balance";
    /// Days as a non-negative integer; any negative value means infinite.
    pub const FRESHNESS_WINDOW_DAYS: &str = "freshness_window_days";
    pub const EMPTY_HISTORY_IS_FRESH: &str = "empty_history_is_fresh";
    /// Comma-separated symbols; absent or empty means "show all".
    pub const DISPLAYED_SECURITIES: &str = "displayed_securities";
}
