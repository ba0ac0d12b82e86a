pub mod catalog;
pub mod errors;
pub mod models;
pub mod refresh;
pub mod services;

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use tracing::debug;

use catalog::traits::{AccountCatalog, Clock, PreferenceStore, SecurityCatalog};
use errors::CoreError;
use models::settings::{pref_keys, FreshnessWindow, SnapshotPolicy};
use models::snapshot::Snapshot;
use refresh::RefreshCoalescer;
use services::snapshot_service::SnapshotService;

/// Main entry point for the Quoteboard core library.
///
/// Holds references to the host's catalogs and produces point-in-time
/// snapshots of security prices, returns, and balances on demand. Each
/// build is synchronous and allocation-fresh; the previous snapshot stays
/// valid (and shared) until the new one atomically replaces it, so readers
/// never observe a half-built table.
#[must_use]
pub struct QuoteBoard {
    securities: Arc<dyn SecurityCatalog>,
    accounts: Arc<dyn AccountCatalog>,
    clock: Arc<dyn Clock>,
    snapshot_service: SnapshotService,
    policy: RwLock<SnapshotPolicy>,
    current: RwLock<Option<Arc<Snapshot>>>,
    refresher: RefreshCoalescer,
}

impl std::fmt::Debug for QuoteBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteBoard")
            .field("policy", &self.policy.read().unwrap().clone())
            .field("has_snapshot", &self.current.read().unwrap().is_some())
            .field("refresh_pending", &self.refresher.is_pending())
            .finish()
    }
}

impl QuoteBoard {
    /// Create a board over the host's catalogs with the default policy.
    pub fn new(
        securities: Arc<dyn SecurityCatalog>,
        accounts: Arc<dyn AccountCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_policy(securities, accounts, clock, SnapshotPolicy::default())
    }

    /// Create a board with an explicit starting policy.
    pub fn with_policy(
        securities: Arc<dyn SecurityCatalog>,
        accounts: Arc<dyn AccountCatalog>,
        clock: Arc<dyn Clock>,
        policy: SnapshotPolicy,
    ) -> Self {
        Self {
            securities,
            accounts,
            clock,
            snapshot_service: SnapshotService::new(),
            policy: RwLock::new(policy),
            current: RwLock::new(None),
            refresher: RefreshCoalescer::new(),
        }
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Build a fresh snapshot from the catalogs' current contents and make
    /// it the board's current snapshot. The single computational entry
    /// point — everything else is policy and plumbing.
    pub fn build_snapshot(&self) -> Arc<Snapshot> {
        let securities = self.securities.securities();
        let accounts = self.accounts.accounts();
        let today = self.clock.today();
        let policy = self.policy.read().unwrap().clone();

        let snapshot = Arc::new(
            self.snapshot_service
                .build(&securities, &accounts, today, &policy),
        );
        *self.current.write().unwrap() = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// The most recently built snapshot, if any. The returned `Arc` stays
    /// valid even while a newer build replaces the board's current one.
    #[must_use]
    pub fn current_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.read().unwrap().clone()
    }

    // ── Change notification ─────────────────────────────────────────

    /// Notify the board that underlying data (prices, balances, catalog
    /// entries) changed. Bursts collapse into a single pending rebuild;
    /// nothing is recomputed until [`refresh_if_pending`](Self::refresh_if_pending)
    /// drains the request.
    pub fn on_underlying_data_changed(&self) {
        if self.refresher.request() {
            debug!("rebuild queued");
        }
    }

    /// Run at most one rebuild, satisfying every change notification that
    /// arrived since the last drain. Returns the new snapshot, or `None`
    /// when nothing was pending.
    pub fn refresh_if_pending(&self) -> Option<Arc<Snapshot>> {
        if self.refresher.take() {
            Some(self.build_snapshot())
        } else {
            None
        }
    }

    /// Whether a change notification is waiting for a rebuild.
    #[must_use]
    pub fn refresh_pending(&self) -> bool {
        self.refresher.is_pending()
    }

    // ── Policy ──────────────────────────────────────────────────────

    /// The board's current snapshot policy.
    #[must_use]
    pub fn policy(&self) -> SnapshotPolicy {
        self.policy.read().unwrap().clone()
    }

    /// Replace the snapshot policy. Takes effect on the next build.
    pub fn set_policy(&self, policy: SnapshotPolicy) {
        *self.policy.write().unwrap() = policy;
    }

    /// Load the policy from the host's preference store. Absent keys keep
    /// their defaults; a stored window larger than a `u32` can hold is a
    /// malformed preference and is reported, not guessed at.
    pub fn load_policy(&self, store: &dyn PreferenceStore) -> Result<SnapshotPolicy, CoreError> {
        let mut policy = SnapshotPolicy::default();

        if let Some(value) = store.get_bool(pref_keys::INCLUDE_INCOMPLETE_HISTORY) {
            policy.include_incomplete_price_history = value;
        }
        if let Some(value) = store.get_bool(pref_keys::INCLUDE_ZERO_BALANCE) {
            policy.include_zero_balance = value;
        }
        if let Some(value) = store.get_bool(pref_keys::EMPTY_HISTORY_IS_FRESH) {
            policy.empty_history_is_fresh = value;
        }
        if let Some(days) = store.get_int(pref_keys::FRESHNESS_WINDOW_DAYS) {
            policy.freshness_window = if days < 0 {
                FreshnessWindow::Infinite
            } else {
                let days = u32::try_from(days).map_err(|_| CoreError::Preference {
                    key: pref_keys::FRESHNESS_WINDOW_DAYS.to_string(),
                    message: format!("{days} does not fit a day count"),
                })?;
                FreshnessWindow::Days(days)
            };
        }
        if let Some(symbols) = store.get_str(pref_keys::DISPLAYED_SECURITIES) {
            let filter: HashSet<String> = symbols
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_uppercase())
                .collect();
            policy.displayed_securities = if filter.is_empty() {
                None
            } else {
                Some(filter)
            };
        }

        self.set_policy(policy.clone());
        Ok(policy)
    }

    /// Write the board's current policy to the host's preference store.
    pub fn store_policy(&self, store: &dyn PreferenceStore) {
        let policy = self.policy();

        store.set_bool(
            pref_keys::INCLUDE_INCOMPLETE_HISTORY,
            policy.include_incomplete_price_history,
        );
        store.set_bool(pref_keys::INCLUDE_ZERO_BALANCE, policy.include_zero_balance);
        store.set_bool(
            pref_keys::EMPTY_HISTORY_IS_FRESH,
            policy.empty_history_is_fresh,
        );
        let days = match policy.freshness_window {
            FreshnessWindow::Days(days) => i64::from(days),
            FreshnessWindow::Infinite => -1,
        };
        store.set_int(pref_keys::FRESHNESS_WINDOW_DAYS, days);
        let symbols = match &policy.displayed_securities {
            Some(filter) => {
                let mut symbols: Vec<&str> = filter.iter().map(String::as_str).collect();
                symbols.sort_unstable();
                symbols.join(",")
            }
            None => String::new(),
        };
        store.set_str(pref_keys::DISPLAYED_SECURITIES, &symbols);
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export a snapshot as pretty-printed JSON. Undefined (NaN) fields
    /// serialize as `null` — the blank-cell convention.
    pub fn export_snapshot_to_json(&self, snapshot: &Snapshot) -> Result<String, CoreError> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
    }

    /// Export a snapshot as CSV, rows sorted by symbol, total row last.
    /// Columns: symbol, name, price, change, balance, day_return,
    /// week_return, month_return, year_return. Undefined fields are empty.
    #[must_use]
    pub fn export_snapshot_to_csv(&self, snapshot: &Snapshot) -> String {
        fn cell(value: f64) -> String {
            if value.is_nan() {
                String::new()
            } else {
                format!("{value}")
            }
        }
        fn escape(field: &str) -> String {
            if field.contains(',') || field.contains('"') || field.contains('\n') {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.to_string()
            }
        }

        let mut rows: Vec<_> = snapshot.rows.iter().collect();
        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let mut csv = String::from(
            "symbol,name,price,change,balance,day_return,week_return,month_return,year_return\n",
        );
        for row in rows.into_iter().chain(std::iter::once(&snapshot.total)) {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                escape(&row.symbol),
                escape(&row.name),
                cell(row.price),
                cell(row.change),
                cell(row.balance),
                cell(row.day_return),
                cell(row.week_return),
                cell(row.month_return),
                cell(row.year_return),
            ));
        }
        csv
    }
}
