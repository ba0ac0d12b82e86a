use crate::models::account::Account;
use crate::models::date::DateInt;
use crate::models::security::Security;

/// Host-side catalog of securities and currencies.
///
/// The core only ever reads: each snapshot build takes one consistent
/// listing and never mutates an entry. If the host's catalog changes shape
/// or source, only its implementation of this trait changes — the snapshot
/// machinery is untouched.
pub trait SecurityCatalog: Send + Sync {
    /// All catalog entries (securities and currencies, hidden included —
    /// filtering is snapshot policy, not catalog policy).
    fn securities(&self) -> Vec<Security>;
}

/// Host-side catalog of accounts and their current balances.
pub trait AccountCatalog: Send + Sync {
    /// All accounts with their current signed micro-unit balances.
    fn accounts(&self) -> Vec<Account>;
}

/// Source of the snapshot's reference "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> DateInt;
}

/// Host-side store of named settings.
///
/// The core reads and writes policy flags through this seam but treats the
/// storage format as opaque — persistence, file layout, and migration are
/// entirely the host's business. Absent keys are `None`, never an error.
pub trait PreferenceStore: Send + Sync {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_bool(&self, key: &str, value: bool);

    fn get_int(&self, key: &str) -> Option<i64>;
    fn set_int(&self, key: &str, value: i64);

    fn get_str(&self, key: &str) -> Option<String>;
    fn set_str(&self, key: &str, value: &str);
}
