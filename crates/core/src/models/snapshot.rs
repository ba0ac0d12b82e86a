use serde::Serialize;

use super::date::DateInt;
use super::security::Security;

/// One display row of a snapshot: a security's price, yesterday's change,
/// base-currency balance, and four horizon returns.
///
/// Every numeric field uses NaN as the "undefined" sentinel; serde_json
/// renders NaN as `null`, which is the blank-cell contract for the
/// presentation layer. Rows are regenerated wholesale on every build and
/// are never deserialized back.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRow {
    /// Ticker symbol
    pub symbol: String,

    /// Display name
    pub name: String,

    /// Today's price in the base currency (NaN = no fresh observation)
    pub price: f64,

    /// Absolute change since yesterday: `price - price_one_day_ago`
    pub change: f64,

    /// Holdings value in the base currency (NaN when the price is undefined)
    pub balance: f64,

    /// (price - price_1d) / price_1d
    pub day_return: f64,

    /// (price - price_7d) / price_7d
    pub week_return: f64,

    /// (price - price_30d) / price_30d
    pub month_return: f64,

    /// (price - price_365d) / price_365d
    pub year_return: f64,

    /// The resolved security behind this row, so the presentation layer can
    /// format per-currency without re-querying the catalog.
    #[serde(skip)]
    pub security: Option<Security>,
}

impl SnapshotRow {
    /// The synthesized footer row: only the aggregate balance is populated,
    /// every other numeric field is undefined and the labels are blank.
    pub fn total(balance: f64) -> Self {
        Self {
            symbol: String::new(),
            name: String::new(),
            price: f64::NAN,
            change: f64::NAN,
            balance,
            day_return: f64::NAN,
            week_return: f64::NAN,
            month_return: f64::NAN,
            year_return: f64::NAN,
            security: None,
        }
    }
}

/// A complete point-in-time snapshot: the included rows plus exactly one
/// total row.
///
/// The total row's balance equals the sum of the rows' defined balances at
/// the moment of construction — there is no incremental maintenance; a new
/// build replaces the whole structure.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// The "today" this snapshot was computed against
    pub as_of: DateInt,

    /// One row per included security, in catalog iteration order
    pub rows: Vec<SnapshotRow>,

    /// Footer row carrying only the aggregate base-currency balance
    pub total: SnapshotRow,
}

impl Snapshot {
    /// The aggregate base-currency balance from the total row.
    pub fn total_balance(&self) -> f64 {
        self.total.balance
    }
}
