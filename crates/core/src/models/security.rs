use serde::{Deserialize, Serialize};

use super::price::PriceObservation;

/// What kind of entry a catalog row is. Snapshots only cover securities;
/// plain currencies appear in catalogs as conversion anchors and are
/// skipped during row assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityKind {
    /// A tradeable security (stock, fund, bond) with a price history.
    Security,
    /// A currency entry — used for relative quoting, never a snapshot row.
    Currency,
}

impl std::fmt::Display for SecurityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityKind::Security => write!(f, "Security"),
            SecurityKind::Currency => write!(f, "Currency"),
        }
    }
}

/// A security or currency as the host catalog describes it.
///
/// Rates are expressed as *units of this entry per one base-currency unit*
/// (per one unit of `relative_currency` when set), so the base-currency
/// price of one unit is the reciprocal of the rate.
///
/// **Equality and hashing** are based solely on `(symbol, kind)`, NOT on the
/// display name. This keeps HashMap lookups consistent regardless of the
/// name used when the entry was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    /// Ticker symbol, uppercased (e.g., "ACME", "USD")
    pub symbol: String,

    /// Human-readable display name (e.g., "Acme Corp.")
    pub name: String,

    /// Hidden entries are excluded from snapshots entirely.
    #[serde(default)]
    pub hidden: bool,

    /// Security vs. currency — only securities become snapshot rows.
    pub kind: SecurityKind,

    /// The current (fixed) rate: units per base-currency unit. This is the
    /// fallback price source for securities with no recorded history.
    pub current_rate: f64,

    /// Symbol of the currency this entry is quoted against, if it is not
    /// quoted directly in the base currency.
    #[serde(default)]
    pub relative_currency: Option<String>,

    /// Decimal places of the native unit scale: a stored balance of
    /// `1_234_500` with 4 decimal places is 123.45 units.
    pub decimal_places: u8,

    /// Recorded price observations. May be empty; order is not guaranteed.
    #[serde(default)]
    pub observations: Vec<PriceObservation>,
}

impl PartialEq for Security {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.kind == other.kind
    }
}

impl Eq for Security {}

impl std::hash::Hash for Security {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.kind.hash(state);
    }
}

impl Security {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        kind: SecurityKind,
        current_rate: f64,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            hidden: false,
            kind,
            current_rate,
            relative_currency: None,
            decimal_places: 4,
            observations: Vec::new(),
        }
    }

    /// Convenience constructor for a tradeable security.
    pub fn security(symbol: impl Into<String>, name: impl Into<String>, current_rate: f64) -> Self {
        Self::new(symbol, name, SecurityKind::Security, current_rate)
    }

    /// Convenience constructor for a currency entry.
    pub fn currency(symbol: impl Into<String>, name: impl Into<String>, current_rate: f64) -> Self {
        Self::new(symbol, name, SecurityKind::Currency, current_rate)
    }

    /// Attach recorded price observations.
    pub fn with_observations(mut self, observations: Vec<PriceObservation>) -> Self {
        self.observations = observations;
        self
    }

    /// Quote this entry against another currency instead of the base.
    pub fn quoted_in(mut self, currency_symbol: impl Into<String>) -> Self {
        self.relative_currency = Some(currency_symbol.into().to_uppercase());
        self
    }

    /// Set the hidden-from-snapshots flag.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Override the native unit scale.
    pub fn with_decimal_places(mut self, decimal_places: u8) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Multiplier converting a raw micro-unit balance into whole units.
    pub fn unit_scale(&self) -> f64 {
        10f64.powi(i32::from(self.decimal_places))
    }
}
