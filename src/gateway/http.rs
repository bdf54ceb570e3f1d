//! HTTP transport for the hosted record API

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::{
    DeletePayload, Envelope, FetchParams, GatewayError, GatewayResult, Record, RecordTransport,
    WritePayload,
};
use crate::config::BackendConfig;

/// Header carrying the project identifier
const PROJECT_HEADER: &str = "X-Project-Id";

/// reqwest-backed transport, one request per call
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl HttpTransport {
    /// Create a new transport from the backend configuration
    pub fn new(config: &BackendConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    fn records_url(&self, table: &str) -> String {
        format!("{}/tables/{}/records", self.base_url, table)
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> GatewayResult<Envelope<T>> {
        tracing::debug!("{} {}", method, url);
        let response = self
            .client
            .request(method, &url)
            .header(PROJECT_HEADER, &self.project_id)
            .bearer_auth(&self.public_key)
            .json(body)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> GatewayResult<Envelope<T>> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await?;
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl RecordTransport for HttpTransport {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> GatewayResult<Envelope<Vec<Record>>> {
        let url = format!("{}/query", self.records_url(table));
        self.send(Method::POST, url, params).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &FetchParams,
    ) -> GatewayResult<Envelope<Record>> {
        let url = format!("{}/{}/query", self.records_url(table), id);
        self.send(Method::POST, url, params).await
    }

    async fn create_records(
        &self,
        table: &str,
        payload: &WritePayload,
    ) -> GatewayResult<Envelope<serde_json::Value>> {
        self.send(Method::POST, self.records_url(table), payload).await
    }

    async fn update_records(
        &self,
        table: &str,
        payload: &WritePayload,
    ) -> GatewayResult<Envelope<serde_json::Value>> {
        self.send(Method::PATCH, self.records_url(table), payload).await
    }

    async fn delete_records(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> GatewayResult<Envelope<serde_json::Value>> {
        self.send(Method::DELETE, self.records_url(table), payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_per_table() {
        let config = BackendConfig {
            base_url: "https://records.example.com/v1/".to_string(),
            project_id: "p".to_string(),
            public_key: "k".to_string(),
            ..Default::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.records_url("employee_c"),
            "https://records.example.com/v1/tables/employee_c/records"
        );
    }
}
