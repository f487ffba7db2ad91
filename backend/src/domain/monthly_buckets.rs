//! Six-month chart buckets.
//!
//! A [`MonthWindow`] is the run of six calendar months ending at the current
//! month, oldest first. Records are placed into a bucket by their
//! (year, month) pair, so a record from the same month name in another year
//! never lands in the window. Records outside the window are dropped.
//!
//! Instants (the current time, member join timestamps) are placed in the
//! month they fall in at the window's UTC offset.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use shared::{ChartDataset, ChartSeries};

use crate::domain::locale::DisplayLocale;
use crate::domain::models::{Member, Transaction};

/// Number of calendar months covered by dashboard charts
pub const WINDOW_MONTHS: usize = 6;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based
    pub month: u32,
}

impl MonthKey {
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

/// Six consecutive calendar months, oldest first, ending at a given month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    months: Vec<MonthKey>,
    offset: FixedOffset,
}

impl MonthWindow {
    /// Window ending at the month of `today`, counting instants in UTC
    pub fn ending_at(today: NaiveDate) -> Self {
        let last = MonthKey::of(&today).ordinal();
        let first = last - (WINDOW_MONTHS as i64 - 1);
        let months = (first..=last).map(MonthKey::from_ordinal).collect();
        Self {
            months,
            offset: Utc.fix(),
        }
    }

    /// Window ending at the month `now` falls in at `offset`
    pub fn local_to(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            offset,
            ..Self::ending_at(now.with_timezone(&offset).date_naive())
        }
    }

    /// Month an instant falls in at the window's offset
    pub fn month_of(&self, instant: &DateTime<Utc>) -> MonthKey {
        MonthKey::of(&instant.with_timezone(&self.offset))
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    /// Bucket index of `key`, or `None` if it lies outside the window
    pub fn position(&self, key: MonthKey) -> Option<usize> {
        let first = self.months.first()?.ordinal();
        let offset = key.ordinal() - first;
        if (0..self.months.len() as i64).contains(&offset) {
            Some(offset as usize)
        } else {
            None
        }
    }

    pub fn labels(&self, locale: DisplayLocale) -> Vec<String> {
        self.months
            .iter()
            .map(|key| locale.short_month(key.month).to_string())
            .collect()
    }
}

/// Income vs. expenses per month. Tithes go into the income dataset.
pub fn finance_series(
    window: &MonthWindow,
    transactions: &[Transaction],
    locale: DisplayLocale,
) -> ChartSeries {
    let mut income = vec![0.0; window.months().len()];
    let mut expenses = vec![0.0; window.months().len()];

    for transaction in transactions {
        let Some(bucket) = window.position(MonthKey::of(&transaction.date)) else {
            continue;
        };
        if transaction.transaction_type.is_expense() {
            expenses[bucket] += transaction.amount;
        } else {
            income[bucket] += transaction.amount;
        }
    }

    ChartSeries {
        labels: window.labels(locale),
        datasets: vec![
            ChartDataset {
                label: locale.income_label().to_string(),
                data: income,
            },
            ChartDataset {
                label: locale.expenses_label().to_string(),
                data: expenses,
            },
        ],
    }
}

/// Members who joined in each month of the window
pub fn membership_series(
    window: &MonthWindow,
    members: &[Member],
    locale: DisplayLocale,
) -> ChartSeries {
    let mut joined = vec![0.0; window.months().len()];

    for member in members {
        if let Some(bucket) = window.position(window.month_of(&member.joined_at)) {
            joined[bucket] += 1.0;
        }
    }

    ChartSeries {
        labels: window.labels(locale),
        datasets: vec![ChartDataset {
            label: locale.new_members_label().to_string(),
            data: joined,
        }],
    }
}
