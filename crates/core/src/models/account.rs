use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One account's position in a single security, as reported by the host
/// account catalog.
///
/// `balance` is a signed integer in the security's native micro-units
/// (scaled by the security's `decimal_places`); negative balances (short
/// positions, overdrafts) are legitimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: Uuid,

    /// Account display name (e.g., "Brokerage", "Retirement")
    pub name: String,

    /// Symbol of the security/currency this account is denominated in
    pub security_symbol: String,

    /// Current balance in native micro-units, signed
    pub balance: i64,
}

impl Account {
    pub fn new(name: impl Into<String>, security_symbol: impl Into<String>, balance: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            security_symbol: security_symbol.into().to_uppercase(),
            balance,
        }
    }
}
