//! Datadog v1 HTTP API implementation of [`MonitoringApi`].
//!
//! Credentials are sent as `DD-API-KEY` / `DD-APPLICATION-KEY` headers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dogtrainer_client::{DatadogClient, MonitoringApi};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DatadogClient::builder()
//!         .endpoint("https://api.datadoghq.eu")
//!         .credentials("api-key", "app-key")
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     let boards = client.list_timeboards().await?;
//!     println!("{}", boards.body["dashes"]);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use tracing::debug;

use dogtrainer_types::{BoardDefinition, BoardId, BoardKind, MonitorId, MonitorParams};

use crate::{ApiResponse, ClientError, MonitoringApi};

/// Default API endpoint (US1 site).
pub const DEFAULT_ENDPOINT: &str = "https://api.datadoghq.com";

const API_KEY_HEADER: &str = "DD-API-KEY";
const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// Client for the Datadog v1 API.
#[derive(Debug, Clone)]
pub struct DatadogClient {
    client: Client,
    endpoint: String,
    api_key: String,
    app_key: String,
}

impl DatadogClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> DatadogClientBuilder {
        DatadogClientBuilder::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.endpoint, path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(APP_KEY_HEADER, &self.app_key);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => value,
                Err(e) if status.is_success() => return Err(ClientError::Parse(e.to_string())),
                // Error pages are not always JSON; keep the text for the caller.
                Err(_) => Value::String(text),
            }
        };

        Ok(ApiResponse::new(status.as_u16(), body))
    }

    fn monitor_body(params: &MonitorParams) -> Result<Value, ClientError> {
        serde_json::to_value(params).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MonitoringApi for DatadogClient {
    async fn list_monitors(&self, group_states: &str) -> Result<ApiResponse, ClientError> {
        self.send(
            Method::GET,
            "/api/v1/monitor",
            &[("group_states", group_states)],
            None,
        )
        .await
    }

    async fn create_monitor(&self, params: &MonitorParams) -> Result<ApiResponse, ClientError> {
        let body = Self::monitor_body(params)?;
        self.send(Method::POST, "/api/v1/monitor", &[], Some(&body))
            .await
    }

    async fn update_monitor(
        &self,
        id: MonitorId,
        params: &MonitorParams,
    ) -> Result<ApiResponse, ClientError> {
        let body = Self::monitor_body(params)?;
        self.send(
            Method::PUT,
            &format!("/api/v1/monitor/{}", id),
            &[],
            Some(&body),
        )
        .await
    }

    async fn mute_monitor(
        &self,
        id: MonitorId,
        end: Option<i64>,
    ) -> Result<ApiResponse, ClientError> {
        let body = match end {
            Some(end) => json!({ "end": end }),
            None => json!({}),
        };
        self.send(
            Method::POST,
            &format!("/api/v1/monitor/{}/mute", id),
            &[],
            Some(&body),
        )
        .await
    }

    async fn unmute_monitor(
        &self,
        id: MonitorId,
        all_scopes: bool,
    ) -> Result<ApiResponse, ClientError> {
        self.send(
            Method::POST,
            &format!("/api/v1/monitor/{}/unmute", id),
            &[],
            Some(&json!({ "all_scopes": all_scopes })),
        )
        .await
    }

    async fn list_timeboards(&self) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, "/api/v1/dash", &[], None).await
    }

    async fn get_timeboard(&self, id: &BoardId) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, &format!("/api/v1/dash/{}", id), &[], None)
            .await
    }

    async fn create_timeboard(
        &self,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        let body = board.to_body(BoardKind::Timeboard);
        self.send(Method::POST, "/api/v1/dash", &[], Some(&body))
            .await
    }

    async fn update_timeboard(
        &self,
        id: &BoardId,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        let body = board.to_body(BoardKind::Timeboard);
        self.send(
            Method::PUT,
            &format!("/api/v1/dash/{}", id),
            &[],
            Some(&body),
        )
        .await
    }

    async fn list_screenboards(&self) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, "/api/v1/screen", &[], None).await
    }

    async fn get_screenboard(&self, id: &BoardId) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, &format!("/api/v1/screen/{}", id), &[], None)
            .await
    }

    async fn create_screenboard(
        &self,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        let body = board.to_body(BoardKind::Screenboard);
        self.send(Method::POST, "/api/v1/screen", &[], Some(&body))
            .await
    }

    async fn update_screenboard(
        &self,
        id: &BoardId,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        let body = board.to_body(BoardKind::Screenboard);
        self.send(
            Method::PUT,
            &format!("/api/v1/screen/{}", id),
            &[],
            Some(&body),
        )
        .await
    }
}

/// Builder for DatadogClient.
#[derive(Debug, Default)]
pub struct DatadogClientBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    app_key: Option<String>,
    timeout: Option<Duration>,
}

impl DatadogClientBuilder {
    /// Set the API endpoint (default: "https://api.datadoghq.com").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the API key and application key.
    pub fn credentials(mut self, api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.app_key = Some(app_key.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DatadogClient, ClientError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(DatadogClient {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: self.api_key.unwrap_or_default(),
            app_key: self.app_key.unwrap_or_default(),
        })
    }
}
