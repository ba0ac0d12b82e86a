use std::collections::HashMap;

use tracing::debug;

use crate::models::account::Account;
use crate::models::date::DateInt;
use crate::models::price::PriceSeries;
use crate::models::security::{Security, SecurityKind};
use crate::models::settings::SnapshotPolicy;
use crate::models::snapshot::{Snapshot, SnapshotRow};
use crate::services::balance_service::BalanceService;
use crate::services::price_service::PriceService;

/// Assembles a complete snapshot from catalog data: one row per included
/// security plus a total row.
///
/// Stateless — each build reads its inputs, produces a wholly new
/// `Snapshot`, and holds nothing between invocations.
pub struct SnapshotService {
    price_service: PriceService,
    balance_service: BalanceService,
}

impl SnapshotService {
    pub fn new() -> Self {
        Self {
            price_service: PriceService::new(),
            balance_service: BalanceService::new(),
        }
    }

    /// Build a snapshot of `securities` as of `today`.
    ///
    /// Per security: skip hidden entries, currency entries, and anything
    /// outside the displayed-securities filter; resolve the five-horizon
    /// price series; apply the inclusion policy; skip zero balances unless
    /// the policy keeps them; derive change and returns with NaN
    /// propagation; and fold the row's base-currency balance into the
    /// total. Rows come out in catalog iteration order — sorting is the
    /// presentation layer's concern.
    pub fn build(
        &self,
        securities: &[Security],
        accounts: &[Account],
        today: DateInt,
        policy: &SnapshotPolicy,
    ) -> Snapshot {
        let by_symbol: HashMap<&str, &Security> = securities
            .iter()
            .map(|sec| (sec.symbol.as_str(), sec))
            .collect();
        let balances = self.balance_service.aggregate(accounts);

        let mut rows = Vec::new();
        let mut total_balance = 0.0;

        for security in securities {
            if security.hidden || security.kind != SecurityKind::Security {
                continue;
            }
            if !policy.displays(&security.symbol) {
                continue;
            }

            let relative = security
                .relative_currency
                .as_deref()
                .and_then(|symbol| by_symbol.get(symbol).copied());
            let series =
                self.price_service
                    .price_series(security, relative, today, policy);

            if !Self::includes(&series, policy) {
                continue;
            }

            let quantity = balances.get(&security.symbol).copied().unwrap_or(0);
            if quantity == 0 && !policy.include_zero_balance {
                continue;
            }

            let balance =
                self.balance_service
                    .to_base_value(quantity, security, series.current);
            if balance.is_finite() {
                total_balance += balance;
            }

            rows.push(SnapshotRow {
                symbol: security.symbol.clone(),
                name: security.name.clone(),
                price: series.current,
                change: series.current - series.day_ago,
                balance,
                day_return: Self::horizon_return(series.current, series.day_ago),
                week_return: Self::horizon_return(series.current, series.week_ago),
                month_return: Self::horizon_return(series.current, series.month_ago),
                year_return: Self::horizon_return(series.current, series.year_ago),
                security: Some(security.clone()),
            });
        }

        debug!(
            %today,
            rows = rows.len(),
            considered = securities.len(),
            total_balance,
            "snapshot built"
        );

        Snapshot {
            as_of: today,
            rows,
            total: SnapshotRow::total(total_balance),
        }
    }

    /// Inclusion policy for one security's price series.
    ///
    /// Normally a row needs today's price plus at least one historical
    /// horizon. `include_incomplete_price_history` relaxes only the
    /// historical leg — any single usable price (current *or* historical)
    /// then suffices, which permits rows with a blank Price column. A
    /// series that is undefined at every horizon is never included.
    fn includes(series: &PriceSeries, policy: &SnapshotPolicy) -> bool {
        if policy.include_incomplete_price_history {
            series.is_informative()
        } else {
            series.has_current() && series.has_history()
        }
    }

    /// `(current - past) / past`, undefined when either price is undefined
    /// or the denominator is zero.
    fn horizon_return(current: f64, past: f64) -> f64 {
        if past == 0.0 {
            return f64::NAN;
        }
        (current - past) / past
    }
}

impl Default for SnapshotService {
    fn default() -> Self {
        Self::new()
    }
}
