use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar date packed into a single sortable integer: `year*10000 +
/// month*100 + day` (January == 1). E.g. 2016-03-28 is `20160328`.
///
/// Numeric ordering matches calendar ordering for every value produced by
/// [`DateInt::encode`]. All arithmetic here is plain integer math — snapshot
/// builds never consult a calendar library, only the host boundary does
/// (see [`DateInt::from_naive`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateInt(pub i32);

/// Gregorian leap-year rule: divisible by 4 and not by 100, or divisible
/// by 400. 2000 is a leap year; 1900 is not.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`: 366 for leap years, 365 otherwise.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days in `month` of `year`, with February = 29 in leap years.
///
/// Accepts months outside 1–12 and normalizes them against `year`
/// (month 0 is the previous December, month 13 the next January), so
/// month-rollback chains can index one month back without wrapping
/// themselves.
pub fn days_in_month(month: i32, year: i32) -> u32 {
    let (mut month, mut year) = (month, year);
    while month < 1 {
        month += 12;
        year -= 1;
    }
    while month > 12 {
        month -= 12;
        year += 1;
    }
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

impl DateInt {
    /// Pack `(year, month, day)` into a DateInt. No calendar validation —
    /// the packing is the contract, callers supply sane triples.
    pub fn encode(year: i32, month: u32, day: u32) -> Self {
        DateInt(year * 10_000 + (month as i32) * 100 + day as i32)
    }

    pub fn year(self) -> i32 {
        self.0 / 10_000
    }

    pub fn month(self) -> u32 {
        ((self.0 / 100) % 100) as u32
    }

    pub fn day(self) -> u32 {
        (self.0 % 100) as u32
    }

    /// Unpack into `(year, month, day)`.
    pub fn parts(self) -> (i32, u32, u32) {
        (self.year(), self.month(), self.day())
    }

    /// The date `delta` days before `self`, crossing month and year
    /// boundaries (leap years included).
    ///
    /// Walks backward in three stages: whole years while `delta` covers the
    /// current year's day count, then whole months (stepping over the
    /// *previous* month's length, which is what separates day D of one month
    /// from day D of the month before), then borrows from the previous month
    /// if the remaining subtraction underflows the day-of-month.
    ///
    /// Total over all non-negative deltas; `subtract_days(0)` is identity.
    pub fn subtract_days(self, delta: u32) -> Self {
        let (mut year, month, day) = self.parts();
        let mut month = month as i32;
        let mut delta = delta;

        let mut year_days = days_in_year(year);
        while delta >= year_days {
            delta -= year_days;
            year -= 1;
            year_days = days_in_year(year);
        }

        loop {
            let prev_month_days = days_in_month(month - 1, year);
            if delta < prev_month_days {
                break;
            }
            delta -= prev_month_days;
            month -= 1;
            if month == 0 {
                month = 12;
                year -= 1;
            }
        }

        let mut day = day as i32 - delta as i32;
        while day <= 0 {
            month -= 1;
            if month == 0 {
                month = 12;
                year -= 1;
            }
            day += days_in_month(month, year) as i32;
        }

        DateInt::encode(year, month as u32, day as u32)
    }

    /// Serial day number (proleptic Gregorian, Julian-day-based constant
    /// offset). Only differences matter here, so the epoch is irrelevant.
    fn day_number(self) -> i64 {
        let (year, month, day) = self.parts();
        let a = (14 - month as i64) / 12;
        let y = year as i64 + 4800 - a;
        let m = month as i64 + 12 * a - 3;
        day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32_045
    }

    /// Calendar-day distance from `self` to `later` (positive when `later`
    /// is after `self`). Raw DateInt subtraction is NOT linear across month
    /// boundaries; this is.
    pub fn days_until(self, later: DateInt) -> i64 {
        later.day_number() - self.day_number()
    }

    /// Convert from a chrono date at the host boundary.
    pub fn from_naive(date: NaiveDate) -> Self {
        DateInt::encode(date.year(), date.month(), date.day())
    }

    /// Convert back to a chrono date, if the packed triple is a real
    /// calendar date.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), self.day())
    }
}

impl std::fmt::Display for DateInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl From<NaiveDate> for DateInt {
    fn from(date: NaiveDate) -> Self {
        DateInt::from_naive(date)
    }
}
