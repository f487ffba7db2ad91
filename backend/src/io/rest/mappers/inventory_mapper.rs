use shared::{
    CreateInventoryItemRequest, InventoryItem as InventoryItemDto, UpdateInventoryItemRequest,
};

use crate::domain::models::{InventoryItem, InventoryItemUpdate, NewInventoryItem};
use crate::io::rest::error::ApiError;

use super::{format_date, parse_amount, parse_date};

pub struct InventoryMapper;

impl InventoryMapper {
    pub fn to_dto(domain: InventoryItem) -> InventoryItemDto {
        InventoryItemDto {
            id: domain.id,
            name: domain.name,
            category: domain.category,
            quantity: domain.quantity,
            location: domain.location,
            value: domain.value,
            status: domain.status,
            supplier: domain.supplier,
            purchase_date: domain.purchase_date.map(format_date),
            min_quantity: domain.min_quantity,
            notes: domain.notes,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_new(request: CreateInventoryItemRequest) -> Result<NewInventoryItem, ApiError> {
        Ok(NewInventoryItem {
            value: parse_amount("value", request.value)?,
            purchase_date: match request.purchase_date {
                Some(value) => Some(parse_date("purchase_date", &value)?),
                None => None,
            },
            name: request.name,
            category: request.category,
            quantity: request.quantity,
            location: request.location,
            status: request.status,
            supplier: request.supplier,
            min_quantity: request.min_quantity,
            notes: request.notes,
        })
    }

    pub fn to_update(request: UpdateInventoryItemRequest) -> Result<InventoryItemUpdate, ApiError> {
        Ok(InventoryItemUpdate {
            value: request
                .value
                .map(|value| parse_amount("value", value))
                .transpose()?,
            purchase_date: match request.purchase_date {
                Some(Some(value)) => Some(Some(parse_date("purchase_date", &value)?)),
                Some(None) => Some(None),
                None => None,
            },
            name: request.name,
            category: request.category,
            quantity: request.quantity,
            location: request.location,
            status: request.status,
            supplier: request.supplier,
            min_quantity: request.min_quantity,
            notes: request.notes,
        })
    }
}
