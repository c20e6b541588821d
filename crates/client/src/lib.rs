//! HTTP client for the SAP AI Documentation Assistant API.
//!
//! No UI imports — this crate is pure HTTP logic so it can be tested
//! independently against a mock backend.

pub mod error;
pub mod models;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub use error::ApiError;
use models::{
    AskRequest, AskResponse, DeleteConfirmation, HealthStatus, KbEntry, KbEntryUpdate, NewKbEntry,
    ServiceInfo,
};

const CONNECT_MESSAGE: &str = "Cannot connect to the API. Is the backend running?";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` with the shared request timeout.
    /// The health check uses its own shorter per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::new(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health
    pub async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| translate_send_error(e, "Health check timed out."))?;
        decode(resp, "Health check failed", "Health check timed out.").await
    }

    /// GET /api/v1/kb/services
    pub async fn fetch_services(&self) -> Result<Vec<ServiceInfo>, ApiError> {
        let url = format!("{}/api/v1/kb/services", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| translate_send_error(e, "Service list request timed out."))?;
        decode(resp, "Failed to fetch services", "Service list request timed out.").await
    }

    /// GET /api/v1/kb/entries — all entries, optionally filtered by service.
    pub async fn fetch_entries(&self, service: Option<&str>) -> Result<Vec<KbEntry>, ApiError> {
        let url = format!("{}/api/v1/kb/entries", self.base_url);
        let mut req = self.http.get(&url);
        if let Some(service) = service {
            req = req.query(&[("service", service)]);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| translate_send_error(e, "KB entries request timed out."))?;
        decode(resp, "Failed to fetch KB entries", "KB entries request timed out.").await
    }

    /// POST /api/v1/kb/entries
    pub async fn create_entry(&self, entry: &NewKbEntry) -> Result<KbEntry, ApiError> {
        let url = format!("{}/api/v1/kb/entries", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(entry)
            .send()
            .await
            .map_err(|e| translate_send_error(e, "Create entry request timed out."))?;
        decode(resp, "Failed to create entry", "Create entry request timed out.").await
    }

    /// PUT /api/v1/kb/entries/{id} — partial update, changed fields only.
    pub async fn update_entry(
        &self,
        id: &str,
        updates: &KbEntryUpdate,
    ) -> Result<KbEntry, ApiError> {
        let url = format!("{}/api/v1/kb/entries/{id}", self.base_url);
        let resp = self
            .http
            .put(&url)
            .json(updates)
            .send()
            .await
            .map_err(|e| translate_send_error(e, "Update entry request timed out."))?;
        decode(resp, "Failed to update entry", "Update entry request timed out.").await
    }

    /// DELETE /api/v1/kb/entries/{id}
    pub async fn delete_entry(&self, id: &str) -> Result<DeleteConfirmation, ApiError> {
        let url = format!("{}/api/v1/kb/entries/{id}", self.base_url);
        let resp = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| translate_send_error(e, "Delete entry request timed out."))?;
        decode(resp, "Failed to delete entry", "Delete entry request timed out.").await
    }

    /// POST /api/v1/ask
    pub async fn ask(&self, question: &str, show_pipeline: bool) -> Result<AskResponse, ApiError> {
        let url = format!("{}/api/v1/ask", self.base_url);
        let payload = AskRequest {
            question,
            show_pipeline,
        };
        let timeout_msg =
            "The request timed out. The API may be under heavy load — please try again.";
        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| translate_send_error(e, timeout_msg))?;
        decode(resp, "API error", timeout_msg).await
    }
}

/// Map transport failures into the uniform error shape. Timeouts get an
/// operation-specific message; connection failures share one message.
fn translate_send_error(err: reqwest::Error, timeout_message: &str) -> ApiError {
    if err.is_timeout() {
        ApiError::new(timeout_message)
    } else if err.is_connect() {
        ApiError::new(CONNECT_MESSAGE)
    } else {
        ApiError::new(format!("request failed: {err}"))
    }
}

/// Non-2xx responses become errors embedding the numeric status code;
/// the code is preserved for programmatic branching.
async fn decode<T: DeserializeOwned>(
    resp: Response,
    error_prefix: &str,
    timeout_message: &str,
) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::with_status(
            format!("{error_prefix}: {}", status.as_u16()),
            status.as_u16(),
        ));
    }
    resp.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::new(timeout_message)
        } else {
            ApiError::new(format!("invalid response body: {e}"))
        }
    })
}
