use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Membership status of a church member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Visitor,
}

/// Kind of finance transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Offerings, donations and any other money coming in
    Income,
    /// Money going out
    Expense,
    /// Tithes (counted as income)
    Tithe,
}

/// Stock status of an inventory item, set when the item is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    Available,
    Low,
    Depleted,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Visitor => "visitor",
        }
    }
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Tithe => "tithe",
        }
    }

    /// Everything that is not an expense counts towards income
    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionType::Expense)
    }
}

impl InventoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::Available => "available",
            InventoryStatus::Low => "low",
            InventoryStatus::Depleted => "depleted",
        }
    }
}

/// Returned when a status/type string does not name a known variant
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for MemberStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            "visitor" => Ok(MemberStatus::Visitor),
            other => Err(UnknownVariant { kind: "member status", value: other.to_string() }),
        }
    }
}

impl FromStr for TransactionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            "tithe" => Ok(TransactionType::Tithe),
            other => Err(UnknownVariant { kind: "transaction type", value: other.to_string() }),
        }
    }
}

impl FromStr for InventoryStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(InventoryStatus::Available),
            "low" => Ok(InventoryStatus::Low),
            "depleted" => Ok(InventoryStatus::Depleted),
            other => Err(UnknownVariant { kind: "inventory status", value: other.to_string() }),
        }
    }
}

/// A church member as shown in the members list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    /// RFC 3339 timestamp
    pub joined_at: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    /// RFC 3339 timestamp; defaults to now
    pub joined_at: Option<String>,
}

/// Keeps a present `null` apart from an absent field in update requests.
///
/// Absent stays `None` (leave unchanged) through `#[serde(default)]`; a
/// present value, `null` included, becomes `Some`, so `Some(None)` clears
/// the column.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    pub status: Option<MemberStatus>,
    pub joined_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<Member>,
}

/// A finance transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
}

/// An inventory item (equipment, supplies, property)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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
    /// ISO 8601 date (YYYY-MM-DD)
    pub purchase_date: Option<String>,
    pub min_quantity: Option<u32>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInventoryItemRequest {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub location: String,
    pub value: f64,
    pub status: InventoryStatus,
    pub supplier: Option<String>,
    pub purchase_date: Option<String>,
    pub min_quantity: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateInventoryItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub location: Option<String>,
    pub value: Option<f64>,
    pub status: Option<InventoryStatus>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<Option<u32>>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryListResponse {
    pub items: Vec<InventoryItem>,
}

/// A church event (service, meeting, gathering)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// RFC 3339 timestamp
    pub date: String,
    pub location: String,
    pub category: String,
    pub description: Option<String>,
    pub attendance: Option<u32>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub date: String,
    pub location: String,
    pub category: String,
    pub description: Option<String>,
    pub attendance: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present", skip_serializing_if = "Option::is_none")]
    pub attendance: Option<Option<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<Event>,
}

/// Metric cards shown at the top of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: usize,
    pub total_income: f64,
    pub upcoming_events: usize,
    pub low_stock_items: usize,
}

/// Finance page totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub tithes_total: f64,
}

/// Inventory page totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: u64,
    pub total_value: f64,
    pub low_stock_count: usize,
    pub category_count: usize,
}

/// One named line/bar group of a chart, aligned with `ChartSeries::labels`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart-ready data: ordered labels (left to right) and one or more datasets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Everything the dashboard pages render, derived from one fetch cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub membership_series: ChartSeries,
    pub finance_series: ChartSeries,
    pub attendance_series: ChartSeries,
    pub finance: FinanceSummary,
    pub inventory: InventorySummary,
}

/// Load state of the dashboard data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Read-only view of the dashboard handed to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub status: LoadStatus,
    /// Message of the last failed load cycle, if the current status is `Error`
    pub error: Option<String>,
    /// RFC 3339 timestamp of the last successful load cycle
    pub last_refreshed_at: Option<String>,
    pub snapshot: DashboardSnapshot,
}

/// Body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
