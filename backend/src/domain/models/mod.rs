//! Domain entities of the church dashboard.
//!
//! These types are what the aggregation engine and the dashboard service work
//! with. They are independent from the Supabase wire rows (see
//! `gateway::rows`) and from the UI DTOs in the `shared` crate.

pub mod event;
pub mod inventory_item;
pub mod member;
pub mod transaction;

pub use event::{Event, EventUpdate, NewEvent};
pub use inventory_item::{InventoryItem, InventoryItemUpdate, NewInventoryItem};
pub use member::{Member, MemberUpdate, NewMember};
pub use transaction::{NewTransaction, Transaction, TransactionUpdate};
