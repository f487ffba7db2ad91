//! Domain model for an inventory item.
//!
//! `status` is whatever was recorded when the item was last edited; it is not
//! recomputed from `quantity` and `min_quantity` anywhere in the backend.
use chrono::{DateTime, NaiveDate, Utc};
use shared::InventoryStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub location: String,
    /// Unit value
    pub value: f64,
    pub status: InventoryStatus,
    pub supplier: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub min_quantity: Option<u32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub location: String,
    pub value: f64,
    pub status: InventoryStatus,
    pub supplier: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub min_quantity: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub location: Option<String>,
    pub value: Option<f64>,
    pub status: Option<InventoryStatus>,
    pub supplier: Option<Option<String>>,
    pub purchase_date: Option<Option<NaiveDate>>,
    pub min_quantity: Option<Option<u32>>,
    pub notes: Option<Option<String>>,
}

impl InventoryItem {
    pub fn from_new(id: String, new: NewInventoryItem, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            category: new.category,
            quantity: new.quantity,
            location: new.location,
            value: new.value,
            status: new.status,
            supplier: new.supplier,
            purchase_date: new.purchase_date,
            min_quantity: new.min_quantity,
            notes: new.notes,
            created_at,
        }
    }

    /// Total value held for this item (unit value times quantity)
    pub fn stock_value(&self) -> f64 {
        self.value * f64::from(self.quantity)
    }

    pub fn apply(&mut self, update: InventoryItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(value) = update.value {
            self.value = value;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(supplier) = update.supplier {
            self.supplier = supplier;
        }
        if let Some(purchase_date) = update.purchase_date {
            self.purchase_date = purchase_date;
        }
        if let Some(min_quantity) = update.min_quantity {
            self.min_quantity = min_quantity;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
    }
}
