//! The operations dogtrainer needs from the monitoring service.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use dogtrainer_types::{BoardDefinition, BoardId, MonitorId, MonitorParams};

use crate::{ApiError, ClientError};

/// Status code the remote uses to signal success.
pub const STATUS_OK: u16 = 200;

/// Status and parsed body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `null` when the body was empty.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the remote reported success. Only 200 counts.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// The body on success, an [`ApiError`] otherwise.
    pub fn into_result(self) -> Result<Value, ApiError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ApiError::new(self.status, Some(self.body)))
        }
    }

    /// Deserialize the body into a typed document.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}

/// Remote monitoring service, one method per API operation.
///
/// Implementations return whatever status the remote sent; only transport
/// failures are errors.
#[async_trait]
pub trait MonitoringApi: Send + Sync {
    /// List every monitor. `group_states` selects which group states are
    /// included in each record (e.g. `"all"`).
    async fn list_monitors(&self, group_states: &str) -> Result<ApiResponse, ClientError>;

    /// Create a monitor; the body of a successful response is the new record.
    async fn create_monitor(&self, params: &MonitorParams) -> Result<ApiResponse, ClientError>;

    async fn update_monitor(
        &self,
        id: MonitorId,
        params: &MonitorParams,
    ) -> Result<ApiResponse, ClientError>;

    /// Mute a monitor, indefinitely or until the `end` POSIX timestamp.
    async fn mute_monitor(
        &self,
        id: MonitorId,
        end: Option<i64>,
    ) -> Result<ApiResponse, ClientError>;

    async fn unmute_monitor(
        &self,
        id: MonitorId,
        all_scopes: bool,
    ) -> Result<ApiResponse, ClientError>;

    /// List timeboards; the body holds a `dashes` array of summaries.
    async fn list_timeboards(&self) -> Result<ApiResponse, ClientError>;

    async fn get_timeboard(&self, id: &BoardId) -> Result<ApiResponse, ClientError>;

    async fn create_timeboard(&self, board: &BoardDefinition)
        -> Result<ApiResponse, ClientError>;

    async fn update_timeboard(
        &self,
        id: &BoardId,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError>;

    /// List screenboards; the body holds a `screenboards` array of summaries.
    async fn list_screenboards(&self) -> Result<ApiResponse, ClientError>;

    async fn get_screenboard(&self, id: &BoardId) -> Result<ApiResponse, ClientError>;

    async fn create_screenboard(
        &self,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError>;

    async fn update_screenboard(
        &self,
        id: &BoardId,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError>;
}
