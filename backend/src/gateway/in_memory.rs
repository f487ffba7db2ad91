//! Process-local [`RemoteGateway`].
//!
//! Behaves like the remote tables for everything the dashboard relies on:
//! server-assigned ids and timestamps, newest-first reads, not-null checks on
//! required text columns and `NotFound` for unknown ids. Failures can be
//! injected per collection.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregation::DashboardRecords;
use crate::domain::models::{
    Event, EventUpdate, InventoryItem, InventoryItemUpdate, Member, MemberUpdate, NewEvent,
    NewInventoryItem, NewMember, NewTransaction, Transaction, TransactionUpdate,
};

use super::{Collection, GatewayError, RemoteError, RemoteGateway, ValidationError};

/// SQLSTATE for a not-null / check violation
const CHECK_VIOLATION: &str = "23514";

#[derive(Default)]
struct Tables {
    records: DashboardRecords,
    failing: HashSet<Collection>,
}

#[derive(Default)]
pub struct InMemoryGateway {
    tables: Mutex<Tables>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call on `collection` fail with a query error until cleared.
    pub fn set_failing(&self, collection: Collection, failing: bool) {
        let mut tables = self.lock();
        if failing {
            info!(table = %collection, "Injecting failures");
            tables.failing.insert(collection);
        } else {
            tables.failing.remove(&collection);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Writes are single pushes or assignments; a poisoned table is still whole.
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(tables: &Tables, collection: Collection) -> Result<(), GatewayError> {
        if tables.failing.contains(&collection) {
            return Err(RemoteError::Query {
                collection,
                status: 503,
                code: None,
                message: format!("{collection} is unavailable"),
            }
            .into());
        }
        Ok(())
    }
}

fn require_text(collection: Collection, field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(ValidationError {
            collection,
            code: Some(CHECK_VIOLATION.to_string()),
            message: format!("{field} must not be blank"),
        }
        .into());
    }
    Ok(())
}

fn require_optional_text(
    collection: Collection,
    field: &str,
    value: Option<&str>,
) -> Result<(), GatewayError> {
    value.map_or(Ok(()), |value| require_text(collection, field, value))
}

fn not_found(collection: Collection, id: &str) -> GatewayError {
    RemoteError::NotFound {
        collection,
        id: id.to_string(),
    }
    .into()
}

/// Newest first; records sharing a timestamp keep reverse insertion order.
fn newest_first<T: Clone>(records: &[T], created_at: fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = records.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl RemoteGateway for InMemoryGateway {
    async fn list_members(&self) -> Result<Vec<Member>, GatewayError> {
        let tables = self.lock();
        Self::check_available(&tables, Collection::Members)?;
        Ok(newest_first(&tables.records.members, |m: &Member| m.created_at))
    }

    async fn create_member(&self, member: NewMember) -> Result<Member, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::Members)?;
        require_text(Collection::Members, "name", &member.name)?;

        let created = Member::from_new(new_id(), member, Utc::now());
        tables.records.members.push(created.clone());
        Ok(created)
    }

    async fn update_member(&self, id: &str, changes: MemberUpdate) -> Result<Member, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::Members)?;
        require_optional_text(Collection::Members, "name", changes.name.as_deref())?;

        let member = tables
            .records
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(Collection::Members, id))?;
        member.apply(changes);
        Ok(member.clone())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError> {
        let tables = self.lock();
        Self::check_available(&tables, Collection::Transactions)?;
        Ok(newest_first(&tables.records.transactions, |t: &Transaction| t.created_at))
    }

    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::Transactions)?;

        let created = Transaction::from_new(new_id(), transaction, Utc::now());
        tables.records.transactions.push(created.clone());
        Ok(created)
    }

    async fn update_transaction(
        &self,
        id: &str,
        changes: TransactionUpdate,
    ) -> Result<Transaction, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::Transactions)?;

        let transaction = tables
            .records
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(Collection::Transactions, id))?;
        transaction.apply(changes);
        Ok(transaction.clone())
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, GatewayError> {
        let tables = self.lock();
        Self::check_available(&tables, Collection::InventoryItems)?;
        Ok(newest_first(&tables.records.inventory, |i: &InventoryItem| i.created_at))
    }

    async fn create_inventory_item(
        &self,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::InventoryItems)?;
        require_text(Collection::InventoryItems, "name", &item.name)?;
        require_text(Collection::InventoryItems, "category", &item.category)?;
        require_text(Collection::InventoryItems, "location", &item.location)?;

        let created = InventoryItem::from_new(new_id(), item, Utc::now());
        tables.records.inventory.push(created.clone());
        Ok(created)
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        changes: InventoryItemUpdate,
    ) -> Result<InventoryItem, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::InventoryItems)?;
        require_optional_text(Collection::InventoryItems, "name", changes.name.as_deref())?;
        require_optional_text(
            Collection::InventoryItems,
            "category",
            changes.category.as_deref(),
        )?;
        require_optional_text(
            Collection::InventoryItems,
            "location",
            changes.location.as_deref(),
        )?;

        let item = tables
            .records
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found(Collection::InventoryItems, id))?;
        item.apply(changes);
        Ok(item.clone())
    }

    async fn list_events(&self) -> Result<Vec<Event>, GatewayError> {
        let tables = self.lock();
        Self::check_available(&tables, Collection::Events)?;
        Ok(newest_first(&tables.records.events, |e: &Event| e.created_at))
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::Events)?;
        require_text(Collection::Events, "title", &event.title)?;
        require_text(Collection::Events, "location", &event.location)?;
        require_text(Collection::Events, "type", &event.category)?;

        let created = Event::from_new(new_id(), event, Utc::now());
        tables.records.events.push(created.clone());
        Ok(created)
    }

    async fn update_event(&self, id: &str, changes: EventUpdate) -> Result<Event, GatewayError> {
        let mut tables = self.lock();
        Self::check_available(&tables, Collection::Events)?;
        require_optional_text(Collection::Events, "title", changes.title.as_deref())?;
        require_optional_text(Collection::Events, "location", changes.location.as_deref())?;
        require_optional_text(Collection::Events, "type", changes.category.as_deref())?;

        let event = tables
            .records
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found(Collection::Events, id))?;
        event.apply(changes);
        Ok(event.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use shared::{InventoryStatus, MemberStatus};

    fn new_member(name: &str) -> NewMember {
        NewMember {
            name: name.to_string(),
            email: None,
            phone: None,
            status: MemberStatus::Active,
            joined_at: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_lists_newest_first() {
        let gateway = InMemoryGateway::new();

        let first = gateway.create_member(new_member("Pedro")).await.unwrap();
        let second = gateway.create_member(new_member("Tiago")).await.unwrap();

        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_ne!(first.id, second.id);

        let names: Vec<String> = gateway
            .list_members()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Tiago", "Pedro"]);
    }

    #[tokio::test]
    async fn test_blank_required_field_is_validation_error() {
        let gateway = InMemoryGateway::new();

        let err = gateway.create_member(new_member("   ")).await.unwrap_err();

        assert_eq!(
            err,
            GatewayError::Validation(ValidationError {
                collection: Collection::Members,
                code: Some(CHECK_VIOLATION.to_string()),
                message: "name must not be blank".to_string(),
            })
        );
        assert!(gateway.list_members().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_partial_changes() {
        let gateway = InMemoryGateway::new();
        let item = gateway
            .create_inventory_item(NewInventoryItem {
                name: "Toalhas".to_string(),
                category: "Limpeza".to_string(),
                quantity: 10,
                location: "Cozinha".to_string(),
                value: 12.0,
                status: InventoryStatus::Available,
                supplier: None,
                purchase_date: None,
                min_quantity: Some(4),
                notes: None,
            })
            .await
            .unwrap();

        let updated = gateway
            .update_inventory_item(
                &item.id,
                InventoryItemUpdate {
                    quantity: Some(3),
                    status: Some(InventoryStatus::Low),
                    min_quantity: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.status, InventoryStatus::Low);
        assert_eq!(updated.min_quantity, None);
        assert_eq!(updated.name, "Toalhas");
        assert_eq!(updated.created_at, item.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let gateway = InMemoryGateway::new();

        let err = gateway
            .update_event("nope", EventUpdate::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_injected_failure_only_hits_its_collection() {
        let gateway = InMemoryGateway::new();
        gateway.set_failing(Collection::Transactions, true);

        assert!(matches!(
            gateway.list_transactions().await,
            Err(GatewayError::Remote(RemoteError::Query { status: 503, .. }))
        ));
        assert!(gateway.list_members().await.is_ok());

        gateway.set_failing(Collection::Transactions, false);
        assert!(gateway.list_transactions().await.is_ok());
    }
}
