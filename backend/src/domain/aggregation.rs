//! Builds the dashboard snapshot from one fetch cycle's records.
//!
//! Everything here is a pure function of the records, the current time, the
//! display locale and the UTC offset charts are counted in; running it twice
//! on the same input gives the same snapshot.

use chrono::{DateTime, FixedOffset, Utc};
use shared::{DashboardSnapshot, DashboardStats};

use crate::domain::event_metrics::{attendance_series, count_upcoming};
use crate::domain::finance_metrics::summarize_transactions;
use crate::domain::inventory_metrics::summarize_inventory;
use crate::domain::locale::DisplayLocale;
use crate::domain::models::{Event, InventoryItem, Member, Transaction};
use crate::domain::monthly_buckets::{finance_series, membership_series, MonthWindow};

/// Raw records returned by the gateway for one load cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardRecords {
    pub members: Vec<Member>,
    pub transactions: Vec<Transaction>,
    pub inventory: Vec<InventoryItem>,
    pub events: Vec<Event>,
}

pub fn aggregate(
    records: &DashboardRecords,
    now: DateTime<Utc>,
    locale: DisplayLocale,
    utc_offset: FixedOffset,
) -> DashboardSnapshot {
    let window = MonthWindow::local_to(now, utc_offset);
    let finance = summarize_transactions(&records.transactions);
    let inventory = summarize_inventory(&records.inventory);

    let stats = DashboardStats {
        total_members: records.members.len(),
        total_income: finance.total_income,
        upcoming_events: count_upcoming(&records.events, now),
        low_stock_items: inventory.low_stock_count,
    };

    DashboardSnapshot {
        stats,
        membership_series: membership_series(&window, &records.members, locale),
        finance_series: finance_series(&window, &records.transactions, locale),
        attendance_series: attendance_series(&records.events, locale),
        finance,
        inventory,
    }
}
