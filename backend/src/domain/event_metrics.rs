//! Event card and attendance chart.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use shared::{ChartDataset, ChartSeries};

use crate::domain::locale::DisplayLocale;
use crate::domain::models::Event;

/// Events scheduled at or after `now`
pub fn count_upcoming(events: &[Event], now: DateTime<Utc>) -> usize {
    events.iter().filter(|event| event.date >= now).count()
}

/// Average attendance per event category, categories in lexical order.
///
/// Events without a recorded attendance are left out of the average.
pub fn attendance_series(events: &[Event], locale: DisplayLocale) -> ChartSeries {
    let mut per_category: BTreeMap<&str, (u64, u64)> = BTreeMap::new();

    for event in events {
        if let Some(attendance) = event.attendance {
            let entry = per_category.entry(event.category.as_str()).or_insert((0, 0));
            entry.0 += u64::from(attendance);
            entry.1 += 1;
        }
    }

    let labels = per_category.keys().map(|category| category.to_string()).collect();
    let data = per_category
        .values()
        .map(|(total, count)| *total as f64 / *count as f64)
        .collect();

    ChartSeries {
        labels,
        datasets: vec![ChartDataset {
            label: locale.attendance_label().to_string(),
            data,
        }],
    }
}
