//! In-memory [`MonitoringApi`] that records every call.

use async_trait::async_trait;
use dogtrainer_client::{ApiResponse, ClientError, MonitoringApi};
use dogtrainer_types::{BoardDefinition, BoardId, MonitorId, MonitorParams};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::Trainer;

pub const CREATED_MONITOR_ID: MonitorId = 12345;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListMonitors(String),
    CreateMonitor(MonitorParams),
    UpdateMonitor(MonitorId, MonitorParams),
    Mute(MonitorId, Option<i64>),
    Unmute(MonitorId, bool),
    ListTimeboards,
    GetTimeboard(BoardId),
    CreateTimeboard(BoardDefinition),
    UpdateTimeboard(BoardId, BoardDefinition),
    ListScreenboards,
    GetScreenboard(BoardId),
    CreateScreenboard(BoardDefinition),
    UpdateScreenboard(BoardId, BoardDefinition),
}

#[derive(Debug)]
pub struct FakeApi {
    monitors: Vec<Value>,
    /// Full timeboards as returned under `dash`.
    timeboards: Vec<Value>,
    screenboards: Vec<Value>,
    write_status: u16,
    failing_mutes: Vec<MonitorId>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
            timeboards: Vec::new(),
            screenboards: Vec::new(),
            write_status: 200,
            failing_mutes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_monitors(mut self, monitors: Value) -> Self {
        self.monitors = monitors.as_array().cloned().unwrap_or_default();
        self
    }

    pub fn with_timeboard(mut self, id: &str, title: &str, description: &str, graphs: Value) -> Self {
        self.timeboards.push(json!({
            "id": id,
            "title": title,
            "description": description,
            "graphs": graphs,
        }));
        self
    }

    pub fn with_screenboard(mut self, id: &str, title: &str, description: &str, widgets: Value) -> Self {
        self.screenboards.push(json!({
            "id": id,
            "board_title": title,
            "description": description,
            "widgets": widgets,
        }));
        self
    }

    /// Make every create and update answer with `status`.
    pub fn with_write_status(mut self, status: u16) -> Self {
        self.write_status = status;
        self
    }

    pub fn with_failing_mute(mut self, id: MonitorId) -> Self {
        self.failing_mutes.push(id);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    /// Calls that change remote state.
    pub fn writes(&self) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::CreateMonitor(..)
                        | Call::UpdateMonitor(..)
                        | Call::Mute(..)
                        | Call::Unmute(..)
                        | Call::CreateTimeboard(..)
                        | Call::UpdateTimeboard(..)
                        | Call::CreateScreenboard(..)
                        | Call::UpdateScreenboard(..)
                )
            })
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn write_response(&self, body: Value) -> ApiResponse {
        if self.write_status == 200 {
            ApiResponse::new(200, body)
        } else {
            ApiResponse::new(self.write_status, json!({"errors": ["write rejected"]}))
        }
    }

    fn board_response(boards: &[Value], id: &BoardId, wrap: bool) -> ApiResponse {
        match boards.iter().find(|b| b["id"].as_str() == Some(id.as_str())) {
            Some(board) if wrap => ApiResponse::new(200, json!({ "dash": board })),
            Some(board) => ApiResponse::new(200, board.clone()),
            None => ApiResponse::new(404, json!({"errors": ["Not found"]})),
        }
    }
}

#[async_trait]
impl MonitoringApi for FakeApi {
    async fn list_monitors(&self, group_states: &str) -> Result<ApiResponse, ClientError> {
        self.record(Call::ListMonitors(group_states.to_string()));
        Ok(ApiResponse::new(200, Value::Array(self.monitors.clone())))
    }

    async fn create_monitor(&self, params: &MonitorParams) -> Result<ApiResponse, ClientError> {
        self.record(Call::CreateMonitor(params.clone()));
        Ok(self.write_response(json!({ "id": CREATED_MONITOR_ID })))
    }

    async fn update_monitor(
        &self,
        id: MonitorId,
        params: &MonitorParams,
    ) -> Result<ApiResponse, ClientError> {
        self.record(Call::UpdateMonitor(id, params.clone()));
        Ok(self.write_response(json!({ "id": id })))
    }

    async fn mute_monitor(
        &self,
        id: MonitorId,
        end: Option<i64>,
    ) -> Result<ApiResponse, ClientError> {
        self.record(Call::Mute(id, end));
        if self.failing_mutes.contains(&id) {
            return Ok(ApiResponse::new(500, json!({"errors": ["mute failed"]})));
        }
        Ok(ApiResponse::new(200, json!({ "id": id })))
    }

    async fn unmute_monitor(
        &self,
        id: MonitorId,
        all_scopes: bool,
    ) -> Result<ApiResponse, ClientError> {
        self.record(Call::Unmute(id, all_scopes));
        Ok(ApiResponse::new(200, json!({ "id": id })))
    }

    async fn list_timeboards(&self) -> Result<ApiResponse, ClientError> {
        self.record(Call::ListTimeboards);
        let dashes: Vec<Value> = self
            .timeboards
            .iter()
            .map(|b| json!({ "id": b["id"], "title": b["title"] }))
            .collect();
        Ok(ApiResponse::new(200, json!({ "dashes": dashes })))
    }

    async fn get_timeboard(&self, id: &BoardId) -> Result<ApiResponse, ClientError> {
        self.record(Call::GetTimeboard(id.clone()));
        Ok(Self::board_response(&self.timeboards, id, true))
    }

    async fn create_timeboard(
        &self,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        self.record(Call::CreateTimeboard(board.clone()));
        Ok(self.write_response(json!({ "dash": { "id": "new-dash" } })))
    }

    async fn update_timeboard(
        &self,
        id: &BoardId,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        self.record(Call::UpdateTimeboard(id.clone(), board.clone()));
        Ok(self.write_response(json!({ "dash": { "id": id } })))
    }

    async fn list_screenboards(&self) -> Result<ApiResponse, ClientError> {
        self.record(Call::ListScreenboards);
        let screenboards: Vec<Value> = self
            .screenboards
            .iter()
            .map(|b| json!({ "id": b["id"], "title": b["board_title"] }))
            .collect();
        Ok(ApiResponse::new(200, json!({ "screenboards": screenboards })))
    }

    async fn get_screenboard(&self, id: &BoardId) -> Result<ApiResponse, ClientError> {
        self.record(Call::GetScreenboard(id.clone()));
        Ok(Self::board_response(&self.screenboards, id, false))
    }

    async fn create_screenboard(
        &self,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        self.record(Call::CreateScreenboard(board.clone()));
        Ok(self.write_response(json!({ "id": "new-screen" })))
    }

    async fn update_screenboard(
        &self,
        id: &BoardId,
        board: &BoardDefinition,
    ) -> Result<ApiResponse, ClientError> {
        self.record(Call::UpdateScreenboard(id.clone(), board.clone()));
        Ok(self.write_response(json!({ "id": id })))
    }
}

/// A trainer over `api` with provenance `my_repo_path` and notify target
/// `@my-notify-to`.
pub fn trainer(api: FakeApi) -> Trainer<FakeApi> {
    Trainer::new(api, Some("@my-notify-to".to_string()), "my_repo_path")
}
