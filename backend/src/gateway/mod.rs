//! # Gateway Module
//!
//! Remote data access for the dashboard. Every collection offers the same
//! three verbs: read-all (newest first), insert-one and update-by-id.
//!
//! The [`RemoteGateway`] trait is what the domain layer depends on. Two
//! implementations exist:
//!
//! - [`SupabaseGateway`]: PostgREST over HTTP, the production backend
//! - [`InMemoryGateway`]: process-local tables, used by tests and when no
//!   backend is configured
//!
//! Wire rows ([`rows`]) are kept separate from the domain entities; the
//! [`mappers`] validate every row on the way in, so a schema change on the
//! backend fails here with [`RemoteError::Schema`] instead of leaking further.

pub mod error;
pub mod in_memory;
pub mod mappers;
pub mod rows;
pub mod supabase;

use std::fmt;

use async_trait::async_trait;

use crate::domain::models::{
    Event, EventUpdate, InventoryItem, InventoryItemUpdate, Member, MemberUpdate, NewEvent,
    NewInventoryItem, NewMember, NewTransaction, Transaction, TransactionUpdate,
};

pub use error::{GatewayError, RemoteError, ValidationError};
pub use in_memory::InMemoryGateway;
pub use supabase::SupabaseGateway;

/// Remote record collections (backend table names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Members,
    Transactions,
    InventoryItems,
    Events,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Members => "members",
            Collection::Transactions => "transactions",
            Collection::InventoryItems => "inventory_items",
            Collection::Events => "events",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Typed read/insert/update access to the remote collections.
///
/// Implementations do no caching and no retries: each call is exactly one
/// remote operation.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn list_members(&self) -> Result<Vec<Member>, GatewayError>;
    async fn create_member(&self, member: NewMember) -> Result<Member, GatewayError>;
    async fn update_member(&self, id: &str, changes: MemberUpdate) -> Result<Member, GatewayError>;

    async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError>;
    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, GatewayError>;
    async fn update_transaction(
        &self,
        id: &str,
        changes: TransactionUpdate,
    ) -> Result<Transaction, GatewayError>;

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, GatewayError>;
    async fn create_inventory_item(
        &self,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, GatewayError>;
    async fn update_inventory_item(
        &self,
        id: &str,
        changes: InventoryItemUpdate,
    ) -> Result<InventoryItem, GatewayError>;

    async fn list_events(&self) -> Result<Vec<Event>, GatewayError>;
    async fn create_event(&self, event: NewEvent) -> Result<Event, GatewayError>;
    async fn update_event(&self, id: &str, changes: EventUpdate) -> Result<Event, GatewayError>;
}
