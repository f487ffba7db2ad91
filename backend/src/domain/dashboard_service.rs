//! Dashboard service.
//!
//! Owns the fetched records and the snapshot derived from them, and moves
//! through `Idle -> Loading -> Ready | Error` as load cycles run. Each cycle
//! reads all four collections concurrently and aggregates only once every
//! read has succeeded, so the snapshot never mixes data from two cycles.
//!
//! Cycles are numbered. When a newer cycle has started (or [`DashboardService::reset`]
//! ran) by the time an older one finishes, the older result is dropped and
//! reported as [`RefreshOutcome::Superseded`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use shared::{DashboardSnapshot, DashboardView, LoadStatus};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::domain::aggregation::{aggregate, DashboardRecords};
use crate::domain::locale::DisplayLocale;
use crate::domain::models::{
    Event, EventUpdate, InventoryItem, InventoryItemUpdate, Member, MemberUpdate, NewEvent,
    NewInventoryItem, NewMember, NewTransaction, Transaction, TransactionUpdate,
};
use crate::gateway::{GatewayError, RemoteGateway};

/// What happened to the result of a load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cycle was the latest one; its result is now the current state.
    Applied,
    /// A newer cycle or a reset happened meanwhile; the result was discarded.
    Superseded,
}

#[derive(Debug, Clone)]
struct ServiceState {
    status: LoadStatus,
    error: Option<String>,
    last_refreshed_at: Option<DateTime<Utc>>,
    records: DashboardRecords,
    snapshot: DashboardSnapshot,
}

impl Default for ServiceState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            error: None,
            last_refreshed_at: None,
            records: DashboardRecords::default(),
            snapshot: DashboardSnapshot::default(),
        }
    }
}

pub struct DashboardService {
    gateway: Arc<dyn RemoteGateway>,
    locale: DisplayLocale,
    utc_offset: FixedOffset,
    state: RwLock<ServiceState>,
    generation: AtomicU64,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn RemoteGateway>, locale: DisplayLocale) -> Self {
        Self {
            gateway,
            locale,
            utc_offset: Utc.fix(),
            state: RwLock::new(ServiceState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Counts chart months at `offset` instead of UTC.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Runs one fetch-and-aggregate cycle against the current time.
    pub async fn refresh(&self) -> Result<RefreshOutcome, GatewayError> {
        self.refresh_at(Utc::now()).await
    }

    /// Runs one fetch-and-aggregate cycle; `now` decides the chart window and
    /// which events are upcoming.
    ///
    /// Returns the gateway error when the cycle fails and is still the latest.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<RefreshOutcome, GatewayError> {
        let generation = {
            let mut state = self.state.write().await;
            state.status = LoadStatus::Loading;
            state.error = None;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!(generation, "Starting dashboard load cycle");

        let fetched = tokio::try_join!(
            self.gateway.list_members(),
            self.gateway.list_transactions(),
            self.gateway.list_inventory(),
            self.gateway.list_events(),
        );

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            warn!(generation, "Discarding result of superseded load cycle");
            return Ok(RefreshOutcome::Superseded);
        }

        match fetched {
            Ok((members, transactions, inventory, events)) => {
                let records = DashboardRecords {
                    members,
                    transactions,
                    inventory,
                    events,
                };
                state.snapshot = aggregate(&records, now, self.locale, self.utc_offset);
                state.records = records;
                state.last_refreshed_at = Some(now);
                state.status = LoadStatus::Ready;
                info!(
                    generation,
                    members = state.records.members.len(),
                    transactions = state.records.transactions.len(),
                    inventory = state.records.inventory.len(),
                    events = state.records.events.len(),
                    "Dashboard data loaded"
                );
                Ok(RefreshOutcome::Applied)
            }
            Err(err) => {
                error!(generation, "Dashboard load failed: {}", err);
                state.status = LoadStatus::Error;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Back to `Idle` with empty records; any cycle still in flight is discarded.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = ServiceState::default();
        info!("Dashboard state reset");
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status
    }

    pub async fn view(&self) -> DashboardView {
        let state = self.state.read().await;
        DashboardView {
            status: state.status,
            error: state.error.clone(),
            last_refreshed_at: state.last_refreshed_at.map(|at| at.to_rfc3339()),
            snapshot: state.snapshot.clone(),
        }
    }

    pub async fn members(&self) -> Vec<Member> {
        self.state.read().await.records.members.clone()
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.state.read().await.records.transactions.clone()
    }

    pub async fn inventory(&self) -> Vec<InventoryItem> {
        self.state.read().await.records.inventory.clone()
    }

    pub async fn events(&self) -> Vec<Event> {
        self.state.read().await.records.events.clone()
    }

    pub async fn create_member(&self, member: NewMember) -> Result<Member, GatewayError> {
        let created = self.gateway.create_member(member).await?;
        info!(id = %created.id, "Member created");
        self.reload_after_write().await;
        Ok(created)
    }

    pub async fn update_member(
        &self,
        id: &str,
        changes: MemberUpdate,
    ) -> Result<Member, GatewayError> {
        let updated = self.gateway.update_member(id, changes).await?;
        info!(id, "Member updated");
        self.reload_after_write().await;
        Ok(updated)
    }

    pub async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, GatewayError> {
        let created = self.gateway.create_transaction(transaction).await?;
        info!(id = %created.id, amount = created.amount, "Transaction created");
        self.reload_after_write().await;
        Ok(created)
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        changes: TransactionUpdate,
    ) -> Result<Transaction, GatewayError> {
        let updated = self.gateway.update_transaction(id, changes).await?;
        info!(id, "Transaction updated");
        self.reload_after_write().await;
        Ok(updated)
    }

    pub async fn create_inventory_item(
        &self,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, GatewayError> {
        let created = self.gateway.create_inventory_item(item).await?;
        info!(id = %created.id, "Inventory item created");
        self.reload_after_write().await;
        Ok(created)
    }

    pub async fn update_inventory_item(
        &self,
        id: &str,
        changes: InventoryItemUpdate,
    ) -> Result<InventoryItem, GatewayError> {
        let updated = self.gateway.update_inventory_item(id, changes).await?;
        info!(id, "Inventory item updated");
        self.reload_after_write().await;
        Ok(updated)
    }

    pub async fn create_event(&self, event: NewEvent) -> Result<Event, GatewayError> {
        let created = self.gateway.create_event(event).await?;
        info!(id = %created.id, "Event created");
        self.reload_after_write().await;
        Ok(created)
    }

    pub async fn update_event(&self, id: &str, changes: EventUpdate) -> Result<Event, GatewayError> {
        let updated = self.gateway.update_event(id, changes).await?;
        info!(id, "Event updated");
        self.reload_after_write().await;
        Ok(updated)
    }

    /// The write already succeeded; a failed reload only shows up in the load state.
    async fn reload_after_write(&self) {
        if let Err(err) = self.refresh().await {
            warn!("Reload after write failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;
    use shared::{DashboardStats, TransactionType};
    use tokio::sync::{oneshot, Mutex, Notify};

    use crate::gateway::{Collection, InMemoryGateway};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn tithe(amount: f64) -> NewTransaction {
        NewTransaction {
            amount,
            transaction_type: TransactionType::Tithe,
            date: NaiveDate::from_ymd_opt(2026, 10, 11).unwrap(),
            description: None,
            category: None,
        }
    }

    fn service_over(gateway: Arc<dyn RemoteGateway>) -> DashboardService {
        DashboardService::new(gateway, DisplayLocale::PtBr)
    }

    /// Holds the first `list_members` call until released.
    struct GatedGateway {
        inner: InMemoryGateway,
        entered: Notify,
        release: Mutex<Option<oneshot::Receiver<()>>>,
    }

    impl GatedGateway {
        fn new(inner: InMemoryGateway) -> (Arc<Self>, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            let gateway = Arc::new(Self {
                inner,
                entered: Notify::new(),
                release: Mutex::new(Some(rx)),
            });
            (gateway, tx)
        }
    }

    #[async_trait]
    impl RemoteGateway for GatedGateway {
        async fn list_members(&self) -> Result<Vec<Member>, GatewayError> {
            let gate = self.release.lock().await.take();
            if let Some(gate) = gate {
                self.entered.notify_one();
                let _ = gate.await;
            }
            self.inner.list_members().await
        }
        async fn create_member(&self, member: NewMember) -> Result<Member, GatewayError> {
            self.inner.create_member(member).await
        }
        async fn update_member(
            &self,
            id: &str,
            changes: MemberUpdate,
        ) -> Result<Member, GatewayError> {
            self.inner.update_member(id, changes).await
        }
        async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError> {
            self.inner.list_transactions().await
        }
        async fn create_transaction(
            &self,
            transaction: NewTransaction,
        ) -> Result<Transaction, GatewayError> {
            self.inner.create_transaction(transaction).await
        }
        async fn update_transaction(
            &self,
            id: &str,
            changes: TransactionUpdate,
        ) -> Result<Transaction, GatewayError> {
            self.inner.update_transaction(id, changes).await
        }
        async fn list_inventory(&self) -> Result<Vec<InventoryItem>, GatewayError> {
            self.inner.list_inventory().await
        }
        async fn create_inventory_item(
            &self,
            item: NewInventoryItem,
        ) -> Result<InventoryItem, GatewayError> {
            self.inner.create_inventory_item(item).await
        }
        async fn update_inventory_item(
            &self,
            id: &str,
            changes: InventoryItemUpdate,
        ) -> Result<InventoryItem, GatewayError> {
            self.inner.update_inventory_item(id, changes).await
        }
        async fn list_events(&self) -> Result<Vec<Event>, GatewayError> {
            self.inner.list_events().await
        }
        async fn create_event(&self, event: NewEvent) -> Result<Event, GatewayError> {
            self.inner.create_event(event).await
        }
        async fn update_event(
            &self,
            id: &str,
            changes: EventUpdate,
        ) -> Result<Event, GatewayError> {
            self.inner.update_event(id, changes).await
        }
    }

    #[tokio::test]
    async fn test_starts_idle_with_zero_stats() {
        let service = service_over(Arc::new(InMemoryGateway::new()));

        let view = service.view().await;
        assert_eq!(view.status, LoadStatus::Idle);
        assert_eq!(view.snapshot.stats, DashboardStats::default());
        assert_eq!(view.last_refreshed_at, None);
    }

    #[tokio::test]
    async fn test_refresh_reaches_ready() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.create_transaction(tithe(500.0)).await.unwrap();
        let service = service_over(gateway);

        let outcome = service.refresh_at(now()).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Applied);
        let view = service.view().await;
        assert_eq!(view.status, LoadStatus::Ready);
        assert_eq!(view.error, None);
        assert_eq!(view.snapshot.stats.total_income, 500.0);
        assert_eq!(view.last_refreshed_at, Some(now().to_rfc3339()));
        assert_eq!(service.transactions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_chart_months_follow_configured_offset() {
        let service = service_over(Arc::new(InMemoryGateway::new()))
            .with_utc_offset(FixedOffset::west_opt(3 * 3600).unwrap());
        let late_on_october_31 = Utc.with_ymd_and_hms(2026, 11, 1, 1, 0, 0).unwrap();

        service.refresh_at(late_on_october_31).await.unwrap();

        let view = service.view().await;
        assert_eq!(
            view.snapshot.finance_series.labels,
            vec!["mai", "jun", "jul", "ago", "set", "out"]
        );
    }

    #[tokio::test]
    async fn test_failed_first_load_keeps_zero_stats() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_failing(Collection::Transactions, true);
        let service = service_over(gateway);

        let result = service.refresh_at(now()).await;

        assert!(result.is_err());
        let view = service.view().await;
        assert_eq!(view.status, LoadStatus::Error);
        assert_eq!(view.error, Some("query on transactions failed (503): transactions is unavailable".to_string()));
        assert_eq!(view.snapshot.stats, DashboardStats::default());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_last_good_snapshot() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.create_transaction(tithe(300.0)).await.unwrap();
        let service = service_over(gateway.clone());
        service.refresh_at(now()).await.unwrap();

        gateway.create_transaction(tithe(200.0)).await.unwrap();
        gateway.set_failing(Collection::Events, true);
        assert!(service.refresh_at(now()).await.is_err());

        let view = service.view().await;
        assert_eq!(view.status, LoadStatus::Error);
        assert_eq!(view.snapshot.stats.total_income, 300.0);
        assert_eq!(service.transactions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mutation_reloads_snapshot() {
        let service = service_over(Arc::new(InMemoryGateway::new()));

        let created = service.create_transaction(tithe(150.0)).await.unwrap();

        assert_eq!(created.amount, 150.0);
        let view = service.view().await;
        assert_eq!(view.status, LoadStatus::Ready);
        assert_eq!(view.snapshot.finance.tithes_total, 150.0);
    }

    #[tokio::test]
    async fn test_mutation_succeeds_even_if_reload_fails() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_failing(Collection::Members, true);
        let service = service_over(gateway);

        let created = service.create_transaction(tithe(90.0)).await;

        assert!(created.is_ok());
        assert_eq!(service.status().await, LoadStatus::Error);
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_reload() {
        let service = service_over(Arc::new(InMemoryGateway::new()));

        let err = service
            .update_member("missing", MemberUpdate::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(service.status().await, LoadStatus::Idle);
    }

    #[tokio::test]
    async fn test_stale_cycle_is_discarded() {
        let inner = InMemoryGateway::new();
        inner.create_transaction(tithe(100.0)).await.unwrap();
        let (gateway, release) = GatedGateway::new(inner);
        let service = Arc::new(service_over(gateway.clone()));

        let slow = tokio::spawn({
            let service = service.clone();
            async move { service.refresh_at(now()).await }
        });
        gateway.entered.notified().await;

        gateway.inner.create_transaction(tithe(50.0)).await.unwrap();
        let fast = service.refresh_at(now()).await.unwrap();
        assert_eq!(fast, RefreshOutcome::Applied);

        release.send(()).unwrap();
        let slow = slow.await.unwrap().unwrap();

        assert_eq!(slow, RefreshOutcome::Superseded);
        let view = service.view().await;
        assert_eq!(view.status, LoadStatus::Ready);
        assert_eq!(view.snapshot.stats.total_income, 150.0);
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle_and_drops_in_flight_cycle() {
        let inner = InMemoryGateway::new();
        inner.create_transaction(tithe(100.0)).await.unwrap();
        let (gateway, release) = GatedGateway::new(inner);
        let service = Arc::new(service_over(gateway.clone()));

        let in_flight = tokio::spawn({
            let service = service.clone();
            async move { service.refresh_at(now()).await }
        });
        gateway.entered.notified().await;

        service.reset().await;
        release.send(()).unwrap();

        assert_eq!(in_flight.await.unwrap().unwrap(), RefreshOutcome::Superseded);
        let view = service.view().await;
        assert_eq!(view.status, LoadStatus::Idle);
        assert_eq!(view.snapshot.stats, DashboardStats::default());
        assert!(service.transactions().await.is_empty());
    }
}
