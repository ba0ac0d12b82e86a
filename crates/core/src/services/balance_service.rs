use std::collections::HashMap;

use crate::models::account::Account;
use crate::models::security::Security;

/// Aggregates raw account balances into one total per security.
///
/// Pure arithmetic — no I/O, no catalog access. Addition is commutative, so
/// the result is independent of account iteration order.
pub struct BalanceService;

impl BalanceService {
    pub fn new() -> Self {
        Self
    }

    /// Sum each account's signed micro-unit balance into a running total
    /// keyed by the account's security symbol. Symbols with no account
    /// simply don't appear; zero and negative totals are kept.
    pub fn aggregate(&self, accounts: &[Account]) -> HashMap<String, i64> {
        let mut totals: HashMap<String, i64> = HashMap::new();
        for account in accounts {
            *totals.entry(account.security_symbol.clone()).or_insert(0) += account.balance;
        }
        totals
    }

    /// Convert a micro-unit quantity into a base-currency value: scale by
    /// the security's native unit and multiply by the base-currency price.
    /// An undefined (NaN) price propagates into an undefined value.
    pub fn to_base_value(&self, quantity: i64, security: &Security, price: f64) -> f64 {
        (quantity as f64 / security.unit_scale()) * price
    }
}

impl Default for BalanceService {
    fn default() -> Self {
        Self::new()
    }
}
