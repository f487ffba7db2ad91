//! Inventory totals for the Inventory page and the low-stock dashboard card.

use std::collections::BTreeSet;

use shared::{InventoryStatus, InventorySummary};

use crate::domain::models::InventoryItem;

pub fn summarize_inventory(items: &[InventoryItem]) -> InventorySummary {
    let total_items = items.iter().map(|item| u64::from(item.quantity)).sum();
    let total_value = items.iter().map(InventoryItem::stock_value).sum();
    let low_stock_count = count_low_stock(items);
    let category_count = items
        .iter()
        .map(|item| item.category.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    InventorySummary {
        total_items,
        total_value,
        low_stock_count,
        category_count,
    }
}

/// Items explicitly marked `low`. Quantity and `min_quantity` are not consulted.
pub fn count_low_stock(items: &[InventoryItem]) -> usize {
    items
        .iter()
        .filter(|item| item.status == InventoryStatus::Low)
        .count()
}
