use crate::domain::models::{InventoryItem, InventoryItemUpdate, NewInventoryItem};
use crate::gateway::rows::{InventoryItemPatchRow, InventoryItemRow, NewInventoryItemRow};
use crate::gateway::{Collection, RemoteError};

use super::{format_date, parse_count, parse_date, parse_enum, parse_timestamp};

const COLLECTION: Collection = Collection::InventoryItems;

pub struct InventoryMapper;

impl InventoryMapper {
    pub fn to_domain(row: InventoryItemRow) -> Result<InventoryItem, RemoteError> {
        let purchase_date = row
            .purchase_date
            .as_deref()
            .map(|value| parse_date(COLLECTION, "purchase_date", value))
            .transpose()?;
        let min_quantity = row
            .min_quantity
            .map(|value| parse_count(COLLECTION, "min_quantity", value))
            .transpose()?;

        Ok(InventoryItem {
            quantity: parse_count(COLLECTION, "quantity", row.quantity)?,
            status: parse_enum(COLLECTION, &row.status)?,
            created_at: parse_timestamp(COLLECTION, "created_at", &row.created_at)?,
            purchase_date,
            min_quantity,
            id: row.id,
            name: row.name,
            category: row.category,
            location: row.location,
            value: row.value,
            supplier: row.supplier,
            notes: row.notes,
        })
    }

    pub fn to_insert_row(item: &NewInventoryItem) -> NewInventoryItemRow {
        NewInventoryItemRow {
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: i64::from(item.quantity),
            location: item.location.clone(),
            value: item.value,
            status: item.status.as_str().to_string(),
            supplier: item.supplier.clone(),
            purchase_date: item.purchase_date.map(format_date),
            min_quantity: item.min_quantity.map(i64::from),
            notes: item.notes.clone(),
        }
    }

    pub fn to_patch_row(changes: &InventoryItemUpdate) -> InventoryItemPatchRow {
        InventoryItemPatchRow {
            name: changes.name.clone(),
            category: changes.category.clone(),
            quantity: changes.quantity.map(i64::from),
            location: changes.location.clone(),
            value: changes.value,
            status: changes.status.map(|status| status.as_str().to_string()),
            supplier: changes.supplier.clone(),
            purchase_date: changes.purchase_date.map(|date| date.map(format_date)),
            min_quantity: changes.min_quantity.map(|min| min.map(i64::from)),
            notes: changes.notes.clone(),
        }
    }
}
