use chrono::NaiveDate;
use quoteboard_core::models::account::Account;
use quoteboard_core::models::date::{days_in_month, days_in_year, is_leap_year, DateInt};
use quoteboard_core::models::price::{PriceObservation, PriceSeries};
use quoteboard_core::models::security::{Security, SecurityKind};
use quoteboard_core::models::settings::{FreshnessWindow, SnapshotPolicy};
use quoteboard_core::models::snapshot::SnapshotRow;
use std::collections::HashSet;

fn d(y: i32, m: u32, day: u32) -> DateInt {
    DateInt::encode(y, m, day)
}

// ═══════════════════════════════════════════════════════════════════
//  DateInt — encoding
// ═══════════════════════════════════════════════════════════════════

mod date_encoding {
    use super::*;

    #[test]
    fn encode_packs_yyyymmdd() {
        assert_eq!(d(2016, 3, 28), DateInt(20160328));
        assert_eq!(d(2015, 12, 31), DateInt(20151231));
    }

    #[test]
    fn parts_roundtrip() {
        let date = d(2016, 3, 28);
        assert_eq!(date.parts(), (2016, 3, 28));
        assert_eq!(date.year(), 2016);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 28);
    }

    #[test]
    fn numeric_ordering_matches_calendar_ordering() {
        assert!(d(2015, 12, 31) < d(2016, 1, 1));
        assert!(d(2016, 2, 29) < d(2016, 3, 1));
        assert!(d(2016, 3, 28) > d(2016, 3, 27));
    }

    #[test]
    fn display_is_iso_like() {
        assert_eq!(d(2016, 3, 8).to_string(), "2016-03-08");
    }

    #[test]
    fn from_naive_matches_encode() {
        let naive = NaiveDate::from_ymd_opt(2016, 3, 28).unwrap();
        assert_eq!(DateInt::from_naive(naive), d(2016, 3, 28));
        assert_eq!(DateInt::from(naive), d(2016, 3, 28));
    }

    #[test]
    fn to_naive_roundtrip() {
        let date = d(2016, 2, 29);
        assert_eq!(
            date.to_naive(),
            Some(NaiveDate::from_ymd_opt(2016, 2, 29).unwrap())
        );
    }

    #[test]
    fn to_naive_rejects_impossible_day() {
        assert_eq!(DateInt(20150230).to_naive(), None);
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&d(2016, 3, 28)).unwrap();
        assert_eq!(json, "20160328");
        let back: DateInt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d(2016, 3, 28));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DateInt — leap years and month lengths
// ═══════════════════════════════════════════════════════════════════

mod leap_years {
    use super::*;

    #[test]
    fn divisible_by_four() {
        assert!(is_leap_year(2016));
        assert!(is_leap_year(2024));
    }

    #[test]
    fn ordinary_years() {
        assert!(!is_leap_year(2017));
        assert!(!is_leap_year(2015));
    }

    #[test]
    fn century_exception() {
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn four_hundred_exception() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1600));
    }

    #[test]
    fn days_in_year_tracks_leap_status() {
        assert_eq!(days_in_year(2016), 366);
        assert_eq!(days_in_year(2017), 365);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2000), 366);
    }
}

mod month_lengths {
    use super::*;

    #[test]
    fn standard_months() {
        assert_eq!(days_in_month(1, 2015), 31);
        assert_eq!(days_in_month(4, 2015), 30);
        assert_eq!(days_in_month(9, 2015), 30);
        assert_eq!(days_in_month(12, 2015), 31);
    }

    #[test]
    fn february_follows_leap_rule() {
        assert_eq!(days_in_month(2, 2016), 29);
        assert_eq!(days_in_month(2, 2017), 28);
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 2000), 29);
    }

    #[test]
    fn month_zero_is_previous_december() {
        assert_eq!(days_in_month(0, 2016), 31);
    }

    #[test]
    fn negative_months_normalize_backward() {
        // month -10 of 2016 is February 2015
        assert_eq!(days_in_month(-10, 2016), 28);
        // month -10 of 2017 is February 2016 (leap)
        assert_eq!(days_in_month(-10, 2017), 29);
    }

    #[test]
    fn month_thirteen_is_next_january() {
        assert_eq!(days_in_month(13, 2015), 31);
        // month 14 of 2015 is February 2016 (leap)
        assert_eq!(days_in_month(14, 2015), 29);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DateInt — subtract_days
// ═══════════════════════════════════════════════════════════════════

mod subtract_days {
    use super::*;

    #[test]
    fn zero_delta_is_identity() {
        for date in [d(2016, 3, 28), d(2016, 2, 29), d(2015, 1, 1), d(2000, 12, 31)] {
            assert_eq!(date.subtract_days(0), date);
        }
    }

    #[test]
    fn within_a_month() {
        assert_eq!(d(2016, 3, 28).subtract_days(7), d(2016, 3, 21));
        assert_eq!(d(2016, 3, 28).subtract_days(27), d(2016, 3, 1));
    }

    #[test]
    fn crosses_into_leap_february() {
        assert_eq!(d(2016, 3, 1).subtract_days(1), d(2016, 2, 29));
    }

    #[test]
    fn crosses_into_ordinary_february() {
        assert_eq!(d(2017, 3, 1).subtract_days(1), d(2017, 2, 28));
    }

    #[test]
    fn crosses_a_year_boundary() {
        assert_eq!(d(2016, 1, 1).subtract_days(1), d(2015, 12, 31));
    }

    #[test]
    fn full_year_back_across_leap_day() {
        assert_eq!(d(2016, 3, 28).subtract_days(365), d(2015, 3, 29));
    }

    #[test]
    fn leap_year_count_back_lands_on_leap_day() {
        assert_eq!(d(2017, 3, 1).subtract_days(366), d(2016, 2, 29));
    }

    #[test]
    fn thirty_days_back_across_february() {
        assert_eq!(d(2016, 3, 28).subtract_days(30), d(2016, 2, 27));
    }

    #[test]
    fn multi_year_delta_uses_year_walk() {
        assert_eq!(d(2018, 6, 15).subtract_days(730), d(2016, 6, 15));
    }

    #[test]
    fn subtraction_agrees_with_calendar_distance() {
        // Every result must sit exactly `delta` calendar days earlier.
        let starts = [d(2016, 3, 28), d(2016, 1, 1), d(2017, 3, 1), d(2000, 3, 1)];
        for start in starts {
            for delta in [0u32, 1, 7, 30, 90, 365] {
                let back = start.subtract_days(delta);
                assert_eq!(
                    back.days_until(start),
                    i64::from(delta),
                    "{start} - {delta} gave {back}"
                );
            }
        }
    }
}

mod days_until {
    use super::*;

    #[test]
    fn adjacent_days() {
        assert_eq!(d(2015, 12, 31).days_until(d(2016, 1, 1)), 1);
    }

    #[test]
    fn not_raw_integer_subtraction() {
        // Raw DateInt difference would be 73 here; the calendar distance is 2.
        assert_eq!(d(2016, 2, 28).days_until(d(2016, 3, 1)), 2);
    }

    #[test]
    fn negative_when_target_is_earlier() {
        assert_eq!(d(2016, 3, 1).days_until(d(2016, 2, 28)), -2);
    }

    #[test]
    fn full_leap_year_span() {
        assert_eq!(d(2016, 1, 1).days_until(d(2017, 1, 1)), 366);
        assert_eq!(d(2017, 1, 1).days_until(d(2018, 1, 1)), 365);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceObservation & PriceSeries
// ═══════════════════════════════════════════════════════════════════

mod price_observation {
    use super::*;

    #[test]
    fn new_defaults_split_adjust_to_one() {
        let obs = PriceObservation::new(d(2016, 3, 1), 0.5);
        assert_eq!(obs.split_adjust, 1.0);
        assert_eq!(obs.effective_rate(), 0.5);
    }

    #[test]
    fn split_adjust_multiplies_the_rate() {
        let obs = PriceObservation::new(d(2016, 3, 1), 0.5).with_split_adjust(2.0);
        assert_eq!(obs.effective_rate(), 1.0);
    }

    #[test]
    fn serde_defaults_missing_split_adjust() {
        let obs: PriceObservation =
            serde_json::from_str(r#"{"date": 20160301, "rate": 0.5}"#).unwrap();
        assert_eq!(obs.split_adjust, 1.0);
    }
}

mod price_series {
    use super::*;

    fn series(current: f64, day: f64, week: f64, month: f64, year: f64) -> PriceSeries {
        PriceSeries {
            current,
            day_ago: day,
            week_ago: week,
            month_ago: month,
            year_ago: year,
        }
    }

    #[test]
    fn fully_resolved_series() {
        let s = series(2.0, 1.9, 1.8, 1.5, 1.0);
        assert!(s.has_current());
        assert!(s.has_history());
        assert!(s.is_informative());
    }

    #[test]
    fn current_only() {
        let s = series(2.0, f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        assert!(s.has_current());
        assert!(!s.has_history());
        assert!(s.is_informative());
    }

    #[test]
    fn history_only() {
        let s = series(f64::NAN, f64::NAN, f64::NAN, 1.5, f64::NAN);
        assert!(!s.has_current());
        assert!(s.has_history());
        assert!(s.is_informative());
    }

    #[test]
    fn fully_undefined_series_is_uninformative() {
        let s = series(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        assert!(!s.is_informative());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Security & Account
// ═══════════════════════════════════════════════════════════════════

mod security {
    use super::*;

    #[test]
    fn new_uppercases_symbol() {
        let sec = Security::security("acme", "Acme Corp.", 0.5);
        assert_eq!(sec.symbol, "ACME");
    }

    #[test]
    fn convenience_ctors_set_kind() {
        assert_eq!(
            Security::security("ACME", "Acme Corp.", 0.5).kind,
            SecurityKind::Security
        );
        assert_eq!(
            Security::currency("EUR", "Euro", 0.9).kind,
            SecurityKind::Currency
        );
    }

    #[test]
    fn equality_ignores_name_and_rate() {
        let a = Security::security("ACME", "Acme Corp.", 0.5);
        let b = Security::security("ACME", "Acme Corporation", 0.75);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_distinguishes_kind() {
        let sec = Security::security("XAU", "Gold Fund", 0.5);
        let cur = Security::currency("XAU", "Gold", 0.5);
        assert_ne!(sec, cur);
    }

    #[test]
    fn hash_follows_equality() {
        let mut set = HashSet::new();
        set.insert(Security::security("ACME", "Acme Corp.", 0.5));
        assert!(set.contains(&Security::security("ACME", "Renamed", 1.0)));
    }

    #[test]
    fn quoted_in_uppercases() {
        let sec = Security::security("ACME", "Acme Corp.", 0.5).quoted_in("eur");
        assert_eq!(sec.relative_currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn unit_scale_from_decimal_places() {
        let sec = Security::security("ACME", "Acme Corp.", 0.5).with_decimal_places(2);
        assert_eq!(sec.unit_scale(), 100.0);
        let default = Security::security("ACME", "Acme Corp.", 0.5);
        assert_eq!(default.unit_scale(), 10_000.0);
    }

    #[test]
    fn hidden_defaults_off() {
        assert!(!Security::security("ACME", "Acme Corp.", 0.5).hidden);
        assert!(Security::security("ACME", "Acme Corp.", 0.5)
            .with_hidden(true)
            .hidden);
    }

    #[test]
    fn kind_display() {
        assert_eq!(SecurityKind::Security.to_string(), "Security");
        assert_eq!(SecurityKind::Currency.to_string(), "Currency");
    }
}

mod account {
    use super::*;

    #[test]
    fn new_uppercases_security_symbol() {
        let account = Account::new("Brokerage", "acme", 1_000_000);
        assert_eq!(account.security_symbol, "ACME");
        assert_eq!(account.balance, 1_000_000);
    }

    #[test]
    fn ids_are_unique() {
        let a = Account::new("A", "ACME", 0);
        let b = Account::new("B", "ACME", 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn negative_balances_are_representable() {
        let account = Account::new("Margin", "ACME", -250_000);
        assert_eq!(account.balance, -250_000);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Snapshot rows
// ═══════════════════════════════════════════════════════════════════

mod snapshot_row {
    use super::*;

    #[test]
    fn total_row_carries_only_the_balance() {
        let total = SnapshotRow::total(496.9);
        assert_eq!(total.balance, 496.9);
        assert!(total.symbol.is_empty());
        assert!(total.name.is_empty());
        assert!(total.price.is_nan());
        assert!(total.change.is_nan());
        assert!(total.day_return.is_nan());
        assert!(total.week_return.is_nan());
        assert!(total.month_return.is_nan());
        assert!(total.year_return.is_nan());
        assert!(total.security.is_none());
    }

    #[test]
    fn nan_serializes_as_null() {
        let total = SnapshotRow::total(1.0);
        let json = serde_json::to_string(&total).unwrap();
        assert!(json.contains(r#""price":null"#));
        assert!(json.contains(r#""balance":1.0"#));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  SnapshotPolicy & FreshnessWindow
// ═══════════════════════════════════════════════════════════════════

mod policy {
    use super::*;

    #[test]
    fn default_matches_documented_behavior() {
        let policy = SnapshotPolicy::default();
        assert!(!policy.include_incomplete_price_history);
        assert!(!policy.include_zero_balance);
        assert_eq!(policy.freshness_window, FreshnessWindow::Days(7));
        assert!(policy.empty_history_is_fresh);
        assert!(policy.displayed_securities.is_none());
    }

    #[test]
    fn displays_everything_without_a_filter() {
        let policy = SnapshotPolicy::default();
        assert!(policy.displays("ACME"));
        assert!(policy.displays("ANYTHING"));
    }

    #[test]
    fn filter_restricts_displayed_symbols() {
        let policy = SnapshotPolicy {
            displayed_securities: Some(HashSet::from(["ACME".to_string()])),
            ..SnapshotPolicy::default()
        };
        assert!(policy.displays("ACME"));
        assert!(!policy.displays("BETA"));
    }

    #[test]
    fn serde_roundtrip() {
        let policy = SnapshotPolicy {
            include_incomplete_price_history: true,
            include_zero_balance: true,
            freshness_window: FreshnessWindow::Infinite,
            empty_history_is_fresh: false,
            displayed_securities: Some(HashSet::from(["ACME".to_string(), "BETA".to_string()])),
        };
        let json = serde_json::to_string(&policy).unwrap();
        let back: SnapshotPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, back);
    }

    #[test]
    fn freshness_window_display() {
        assert_eq!(FreshnessWindow::Days(7).to_string(), "7 days");
        assert_eq!(FreshnessWindow::Infinite.to_string(), "infinite");
    }
}
