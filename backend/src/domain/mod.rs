//! # Domain Module
//!
//! Business logic of the church dashboard: entity models, the metric
//! calculations behind every dashboard card and chart, and the service that
//! keeps one consistent snapshot of it all.
//!
//! ## Module Organization
//!
//! - **models**: Members, transactions, inventory items and events
//! - **finance_metrics**: Income, expense, balance and tithe totals
//! - **inventory_metrics**: Item count, stock value, low-stock and category counts
//! - **monthly_buckets**: Six-month windows and the finance / membership charts
//! - **event_metrics**: Upcoming events and the attendance chart
//! - **locale**: Month names and chart labels per display locale
//! - **datetime**: Date and timestamp text formats
//! - **aggregation**: Combines the above into a `DashboardSnapshot`
//! - **dashboard_service**: Fetch-and-aggregate cycles, mutations, load state
//!
//! ## Business Rules
//!
//! - Everything except expenses counts as income; tithes are also reported on their own
//! - Stock value is unit value times quantity
//! - Low stock is whatever status the item was given, never recomputed
//! - Charts cover the six calendar months ending with the current one, as seen
//!   from the configured UTC offset
//! - A snapshot is only ever built from one complete fetch of all four collections
//!
//! The aggregation modules are pure functions; only `dashboard_service` talks
//! to a [`RemoteGateway`](crate::gateway::RemoteGateway).

pub mod aggregation;
pub mod dashboard_service;
pub mod datetime;
pub mod event_metrics;
pub mod finance_metrics;
pub mod inventory_metrics;
pub mod locale;
pub mod models;
pub mod monthly_buckets;

pub use aggregation::{aggregate, DashboardRecords};
pub use dashboard_service::{DashboardService, RefreshOutcome};
pub use locale::DisplayLocale;
