//! PostgREST (Supabase) implementation of [`RemoteGateway`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::models::{
    Event, EventUpdate, InventoryItem, InventoryItemUpdate, Member, MemberUpdate, NewEvent,
    NewInventoryItem, NewMember, NewTransaction, Transaction, TransactionUpdate,
};

use super::error::schema_error;
use super::mappers::{EventMapper, InventoryMapper, MemberMapper, TransactionMapper};
use super::rows::{EventRow, InventoryItemRow, MemberRow, TransactionRow};
use super::{Collection, GatewayError, RemoteError, RemoteGateway, ValidationError};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const DEFAULT_SCHEMA: &str = "public";

/// Error body PostgREST sends with every non-2xx response
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

pub struct SupabaseGateway {
    client: Client,
    rest_url: String,
    anon_key: String,
    access_token: Option<String>,
    schema: String,
}

impl SupabaseGateway {
    /// `url` is the project URL, e.g. `https://abcd.supabase.co`.
    pub fn new(url: &str, anon_key: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            access_token: None,
            schema: DEFAULT_SCHEMA.to_string(),
        })
    }

    /// Authenticate as a signed-in user instead of the anonymous role.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    fn request(&self, method: Method, collection: Collection) -> RequestBuilder {
        let url = format!("{}/{}", self.rest_url, collection.table_name());
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);

        let mut builder = self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer);

        if self.schema != DEFAULT_SCHEMA {
            builder = builder
                .header("Accept-Profile", &self.schema)
                .header("Content-Profile", &self.schema);
        }
        builder
    }

    async fn read_all<R: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<R>, GatewayError> {
        debug!(table = %collection, "Fetching all records");
        let response = self
            .request(Method::GET, collection)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(transport_error)?;

        let body = check_response(collection, None, response).await?;
        decode(collection, &body)
    }

    async fn insert_one<B, R>(&self, collection: Collection, row: &B) -> Result<R, GatewayError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!(table = %collection, "Inserting record");
        let response = self
            .request(Method::POST, collection)
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(row)
            .send()
            .await
            .map_err(transport_error)?;

        let body = check_response(collection, None, response).await?;
        decode(collection, &body)
    }

    async fn update_by_id<B, R>(
        &self,
        collection: Collection,
        id: &str,
        patch: &B,
    ) -> Result<R, GatewayError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!(table = %collection, id, "Updating record");
        let response = self
            .request(Method::PATCH, collection)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(patch)
            .send()
            .await
            .map_err(transport_error)?;

        let body = check_response(collection, Some(id), response).await?;
        decode(collection, &body)
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

fn decode<R: DeserializeOwned>(collection: Collection, body: &str) -> Result<R, GatewayError> {
    serde_json::from_str(body).map_err(|e| schema_error(collection, e.to_string()).into())
}

fn map_rows<R, T>(
    rows: Vec<R>,
    to_domain: fn(R) -> Result<T, RemoteError>,
) -> Result<Vec<T>, GatewayError> {
    rows.into_iter()
        .map(to_domain)
        .collect::<Result<Vec<_>, _>>()
        .map_err(GatewayError::from)
}

/// Returns the body of a 2xx response, or the classified failure.
async fn check_response(
    collection: Collection,
    id: Option<&str>,
    response: Response,
) -> Result<String, GatewayError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if status.is_success() {
        return Ok(body);
    }

    let error = classify_failure(collection, id, status.as_u16(), &body);
    warn!(table = %collection, status = status.as_u16(), "Remote request failed: {}", error);
    Err(error)
}

pub(crate) fn classify_failure(
    collection: Collection,
    id: Option<&str>,
    status: u16,
    body: &str,
) -> GatewayError {
    let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();
    let message = match (parsed.message, parsed.details) {
        (Some(message), Some(details)) => format!("{message} ({details})"),
        (Some(message), None) => message,
        (None, _) => body.to_string(),
    };

    if status == 401 || status == 403 {
        return RemoteError::Unauthorized { status, message }.into();
    }

    match (parsed.code.as_deref(), id) {
        (Some("PGRST116"), Some(id)) => RemoteError::NotFound {
            collection,
            id: id.to_string(),
        }
        .into(),
        (Some(code), _) if is_constraint_violation(code) => ValidationError {
            collection,
            code: Some(code.to_string()),
            message,
        }
        .into(),
        _ => RemoteError::Query {
            collection,
            status,
            code: parsed.code,
            message,
        }
        .into(),
    }
}

/// SQLSTATE classes 22 (data exception) and 23 (integrity constraint), plus
/// PostgREST's unknown-column error.
fn is_constraint_violation(code: &str) -> bool {
    code == "PGRST204" || (code.len() == 5 && (code.starts_with("22") || code.starts_with("23")))
}

#[async_trait]
impl RemoteGateway for SupabaseGateway {
    async fn list_members(&self) -> Result<Vec<Member>, GatewayError> {
        let rows: Vec<MemberRow> = self.read_all(Collection::Members).await?;
        map_rows(rows, MemberMapper::to_domain)
    }

    async fn create_member(&self, member: NewMember) -> Result<Member, GatewayError> {
        let row: MemberRow = self
            .insert_one(Collection::Members, &MemberMapper::to_insert_row(&member))
            .await?;
        Ok(MemberMapper::to_domain(row)?)
    }

    async fn update_member(&self, id: &str, changes: MemberUpdate) -> Result<Member, GatewayError> {
        let row: MemberRow = self
            .update_by_id(Collection::Members, id, &MemberMapper::to_patch_row(&changes))
            .await?;
        Ok(MemberMapper::to_domain(row)?)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, GatewayError> {
        let rows: Vec<TransactionRow> = self.read_all(Collection::Transactions).await?;
        map_rows(rows, TransactionMapper::to_domain)
    }

    async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, GatewayError> {
        let row: TransactionRow = self
            .insert_one(
                Collection::Transactions,
                &TransactionMapper::to_insert_row(&transaction),
            )
            .await?;
        Ok(TransactionMapper::to_domain(row)?)
    }

    async fn update_transaction(
        &self,
        id: &str,
        changes: TransactionUpdate,
    ) -> Result<Transaction, GatewayError> {
        let row: TransactionRow = self
            .update_by_id(
                Collection::Transactions,
                id,
                &TransactionMapper::to_patch_row(&changes),
            )
            .await?;
        Ok(TransactionMapper::to_domain(row)?)
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, GatewayError> {
        let rows: Vec<InventoryItemRow> = self.read_all(Collection::InventoryItems).await?;
        map_rows(rows, InventoryMapper::to_domain)
    }

    async fn create_inventory_item(
        &self,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, GatewayError> {
        let row: InventoryItemRow = self
            .insert_one(Collection::InventoryItems, &InventoryMapper::to_insert_row(&item))
            .await?;
        Ok(InventoryMapper::to_domain(row)?)
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        changes: InventoryItemUpdate,
    ) -> Result<InventoryItem, GatewayError> {
        let row: InventoryItemRow = self
            .update_by_id(
                Collection::InventoryItems,
                id,
                &InventoryMapper::to_patch_row(&changes),
            )
            .await?;
        Ok(InventoryMapper::to_domain(row)?)
    }

    async fn list_events(&self) -> Result<Vec<Event>, GatewayError> {
        let rows: Vec<EventRow> = self.read_all(Collection::Events).await?;
        map_rows(rows, EventMapper::to_domain)
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, GatewayError> {
        let row: EventRow = self
            .insert_one(Collection::Events, &EventMapper::to_insert_row(&event))
            .await?;
        Ok(EventMapper::to_domain(row)?)
    }

    async fn update_event(&self, id: &str, changes: EventUpdate) -> Result<Event, GatewayError> {
        let row: EventRow = self
            .update_by_id(Collection::Events, id, &EventMapper::to_patch_row(&changes))
            .await?;
        Ok(EventMapper::to_domain(row)?)
    }
}
