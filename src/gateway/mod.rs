//! Record gateway
//!
//! A single generic entry point for create/read/update/delete calls against
//! named tables of the remote record backend. Every call is one request;
//! nothing is buffered, retried or mutated locally.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{BackendConfig, BackendKind};

pub mod envelope;
pub mod http;
pub mod memory;
pub mod query;

pub use envelope::{DeletePayload, Envelope, FieldError, Record, RecordOutcome, WritePayload};
pub use query::{Condition, FetchParams, OrderBy, PagingInfo, WhereGroup};

/// Transport level failure
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Record not found")]
    NotFound,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Raw request/response calls of the record API
#[async_trait]
pub trait RecordTransport: Send + Sync {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> GatewayResult<Envelope<Vec<Record>>>;

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &FetchParams,
    ) -> GatewayResult<Envelope<Record>>;

    async fn create_records(
        &self,
        table: &str,
        payload: &WritePayload,
    ) -> GatewayResult<Envelope<serde_json::Value>>;

    async fn update_records(
        &self,
        table: &str,
        payload: &WritePayload,
    ) -> GatewayResult<Envelope<serde_json::Value>>;

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> GatewayResult<Envelope<serde_json::Value>>;
}

/// Result of a multi-record write, split by per-record success
#[derive(Debug, Clone, Default)]
pub struct WriteOutcome {
    pub saved: Vec<Record>,
    pub failed: Vec<RecordOutcome>,
}

impl WriteOutcome {
    fn from_envelope(envelope: Envelope<serde_json::Value>) -> GatewayResult<Self> {
        if !envelope.success {
            return Err(GatewayError::Backend(
                envelope.message.unwrap_or_else(|| "request failed".to_string()),
            ));
        }

        let mut outcome = WriteOutcome::default();
        for result in envelope.results.unwrap_or_default() {
            if result.success {
                outcome.saved.push(result.data.unwrap_or_default());
            } else {
                outcome.failed.push(result);
            }
        }
        Ok(outcome)
    }
}

/// Gateway over a shared transport
#[derive(Clone)]
pub struct RecordGateway {
    transport: Arc<dyn RecordTransport>,
}

impl RecordGateway {
    pub fn new(transport: Arc<dyn RecordTransport>) -> Self {
        Self { transport }
    }

    /// Build the transport selected by the backend configuration
    pub fn from_config(config: &BackendConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let transport: Arc<dyn RecordTransport> = match config.kind {
            BackendKind::Http => Arc::new(http::HttpTransport::new(config)?),
            BackendKind::Memory => {
                let store = memory::MemoryTransport::with_lookups(crate::entity::LOOKUPS);
                if let Some(path) = &config.seed_path {
                    store.seed_from_file(path)?;
                }
                Arc::new(store)
            }
        };
        Ok(Self::new(transport))
    }

    /// Fetch records, surfacing failures to the caller
    pub async fn try_fetch_all(&self, table: &str, params: &FetchParams) -> GatewayResult<Vec<Record>> {
        let envelope = self.transport.fetch_records(table, params).await?;
        if !envelope.success {
            return Err(GatewayError::Backend(
                envelope.message.unwrap_or_else(|| format!("failed to fetch {}", table)),
            ));
        }
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fetch records; a failure is logged and reads as an empty list
    pub async fn fetch_all(&self, table: &str, params: &FetchParams) -> Vec<Record> {
        match self.try_fetch_all(table, params).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", table, e);
                Vec::new()
            }
        }
    }

    /// Fetch one record; missing and failed lookups both read as `None`
    pub async fn fetch_one(&self, table: &str, id: i64, params: &FetchParams) -> Option<Record> {
        match self.transport.get_record_by_id(table, id, params).await {
            Ok(envelope) if envelope.success => envelope.data,
            Ok(envelope) => {
                tracing::error!(
                    "Failed to fetch {} {}: {}",
                    table,
                    id,
                    envelope.message.unwrap_or_default()
                );
                None
            }
            Err(GatewayError::NotFound) => None,
            Err(e) => {
                tracing::error!("Failed to fetch {} {}: {}", table, id, e);
                None
            }
        }
    }

    pub async fn create(&self, table: &str, records: Vec<Record>) -> GatewayResult<WriteOutcome> {
        let payload = WritePayload { records };
        let result = self.transport.create_records(table, &payload).await;
        Self::finish_write(table, "create", result)
    }

    pub async fn update(&self, table: &str, records: Vec<Record>) -> GatewayResult<WriteOutcome> {
        let payload = WritePayload { records };
        let result = self.transport.update_records(table, &payload).await;
        Self::finish_write(table, "update", result)
    }

    pub async fn delete(&self, table: &str, ids: Vec<i64>) -> GatewayResult<WriteOutcome> {
        let payload = DeletePayload { record_ids: ids };
        let result = self.transport.delete_records(table, &payload).await;
        Self::finish_write(table, "delete", result)
    }

    fn finish_write(
        table: &str,
        action: &str,
        result: GatewayResult<Envelope<serde_json::Value>>,
    ) -> GatewayResult<WriteOutcome> {
        let outcome = result.and_then(WriteOutcome::from_envelope);
        match &outcome {
            Ok(o) if !o.failed.is_empty() => {
                tracing::error!("Failed to {} {} {} records: {:?}", action, o.failed.len(), table, o.failed);
            }
            Err(e) => tracing::error!("Failed to {} {}: {}", action, table, e),
            Ok(_) => {}
        }
        outcome
    }
}
