use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Datelike;

use crate::models::account::Account;
use crate::models::date::DateInt;
use crate::models::security::Security;

use super::traits::{AccountCatalog, Clock, PreferenceStore, SecurityCatalog};

/// In-memory security catalog. Useful as-is for hosts whose data is already
/// resident, and as the standard test double.
#[derive(Debug, Default)]
pub struct MemorySecurityCatalog {
    securities: Mutex<Vec<Security>>,
}

impl MemorySecurityCatalog {
    pub fn new(securities: Vec<Security>) -> Self {
        Self {
            securities: Mutex::new(securities),
        }
    }

    /// Add a catalog entry.
    pub fn add(&self, security: Security) {
        self.securities.lock().unwrap().push(security);
    }

    /// Replace the entry with the same symbol and kind, or add it.
    pub fn upsert(&self, security: Security) {
        let mut securities = self.securities.lock().unwrap();
        match securities.iter_mut().find(|s| **s == security) {
            Some(slot) => *slot = security,
            None => securities.push(security),
        }
    }
}

impl SecurityCatalog for MemorySecurityCatalog {
    fn securities(&self) -> Vec<Security> {
        self.securities.lock().unwrap().clone()
    }
}

/// In-memory account catalog.
#[derive(Debug, Default)]
pub struct MemoryAccountCatalog {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountCatalog {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
        }
    }

    pub fn add(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    /// Set the balance of the account with the given id, if present.
    pub fn set_balance(&self, id: uuid::Uuid, balance: i64) {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.balance = balance;
        }
    }
}

impl AccountCatalog for MemoryAccountCatalog {
    fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }
}

/// Wall-clock "today" in the system's local date.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateInt {
        let now = chrono::Local::now().date_naive();
        DateInt::encode(now.year(), now.month(), now.day())
    }
}

/// A clock pinned to a fixed date. The standard test double, also useful
/// for "as of" rebuilds.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateInt);

impl Clock for FixedClock {
    fn today(&self) -> DateInt {
        self.0
    }
}

/// In-memory preference store keeping every value as a string, the way
/// simple host preference files do.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values
            .lock()
            .unwrap()
            .get(key)
            .and_then(|v| v.parse().ok())
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values
            .lock()
            .unwrap()
            .get(key)
            .and_then(|v| v.parse().ok())
    }

    fn set_int(&self, key: &str, value: i64) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn get_str(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set_str(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}
