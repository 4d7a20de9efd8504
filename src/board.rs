//! Timeboard and screenboard reconciliation.
//!
//! Both kinds go through one flow: find the board by title, create it when
//! absent, otherwise compare description, title and content and update only
//! when one of them differs. Content items are opaque and compared
//! structurally.

use dogtrainer_client::{ApiResponse, MonitoringApi};
use dogtrainer_types::{
    values_match, Board, BoardDefinition, BoardKind, BoardSummary, ScreenboardList,
    ScreenboardRecord, TimeboardEnvelope, TimeboardList,
};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::cache::find_by_name;
use crate::{Error, Trainer};

/// Tool name stamped into every managed board's description.
pub const BOARD_TOOL_NAME: &str = "dogtrainer";

/// Description of a board managed from `provenance`.
pub fn board_description(provenance: &str) -> String {
    format!("created by {BOARD_TOOL_NAME} via {provenance}")
}

fn content_matches(current: &[Value], desired: &[Value]) -> bool {
    current.len() == desired.len()
        && current
            .iter()
            .zip(desired)
            .all(|(current, desired)| values_match(current, desired))
}

/// Id of a freshly created board, for logging.
fn created_id(kind: BoardKind, body: &Value) -> String {
    let id = match kind {
        BoardKind::Timeboard => &body["dash"]["id"],
        BoardKind::Screenboard => &body["id"],
    };
    match id {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

impl<A: MonitoringApi> Trainer<A> {
    /// Create or update the timeboard titled `name` with `graphs`.
    pub async fn upsert_timeboard(&self, name: &str, graphs: Vec<Value>) -> Result<(), Error> {
        self.upsert_board(BoardKind::Timeboard, name, graphs).await
    }

    /// Create or update the screenboard titled `name` with `widgets`.
    pub async fn upsert_screenboard(&self, name: &str, widgets: Vec<Value>) -> Result<(), Error> {
        self.upsert_board(BoardKind::Screenboard, name, widgets).await
    }

    /// The first timeboard titled `name`, fetched in full.
    pub async fn existing_timeboard(&self, name: &str) -> Result<Option<Board>, Error> {
        self.existing_board(BoardKind::Timeboard, name).await
    }

    /// The first screenboard titled `name`, fetched in full.
    pub async fn existing_screenboard(&self, name: &str) -> Result<Option<Board>, Error> {
        self.existing_board(BoardKind::Screenboard, name).await
    }

    /// Summaries of every board of `kind`, listed once per trainer.
    pub async fn boards(&self, kind: BoardKind) -> Result<&[BoardSummary], Error> {
        let decode = Error::decode(kind.resource());
        match kind {
            BoardKind::Timeboard => {
                self.timeboards
                    .get_or_load(|| async {
                        let body = self.api.list_timeboards().await?.into_result()?;
                        let list: TimeboardList = serde_json::from_value(body).map_err(decode)?;
                        Ok::<_, Error>(list.dashes)
                    })
                    .await
            }
            BoardKind::Screenboard => {
                self.screenboards
                    .get_or_load(|| async {
                        let body = self.api.list_screenboards().await?.into_result()?;
                        let list: ScreenboardList =
                            serde_json::from_value(body).map_err(decode)?;
                        Ok::<_, Error>(list.screenboards)
                    })
                    .await
            }
        }
    }

    async fn existing_board(&self, kind: BoardKind, name: &str) -> Result<Option<Board>, Error> {
        let Some(summary) = find_by_name(self.boards(kind).await?, name) else {
            return Ok(None);
        };
        let decode = Error::decode(kind.resource());
        let board = match kind {
            BoardKind::Timeboard => {
                let body = self.api.get_timeboard(&summary.id).await?.into_result()?;
                Board::from(serde_json::from_value::<TimeboardEnvelope>(body).map_err(decode)?)
            }
            BoardKind::Screenboard => {
                let body = self.api.get_screenboard(&summary.id).await?.into_result()?;
                Board::from(serde_json::from_value::<ScreenboardRecord>(body).map_err(decode)?)
            }
        };
        Ok(Some(board))
    }

    async fn upsert_board(
        &self,
        kind: BoardKind,
        name: &str,
        content: Vec<Value>,
    ) -> Result<(), Error> {
        info!("Upserting {}: {}", kind, name);
        let desired = BoardDefinition {
            title: name.to_string(),
            description: board_description(self.provenance()),
            content,
        };

        let Some(existing) = self.existing_board(kind, name).await? else {
            let response = match kind {
                BoardKind::Timeboard => self.api.create_timeboard(&desired).await?,
                BoardKind::Screenboard => self.api.create_screenboard(&desired).await?,
            };
            if response.is_success() {
                info!("Created {} {}", kind, created_id(kind, &response.body));
            } else {
                log_failure("creating", kind, &response);
            }
            return Ok(());
        };
        debug!("\tfound existing {} id={}", kind, existing.id);

        let mut needs_update = false;
        if existing.description.as_deref() != Some(desired.description.as_str()) {
            debug!("\tneeds update of description");
            needs_update = true;
        }
        if existing.title != desired.title {
            debug!("\tneeds update of title");
            needs_update = true;
        }
        if !content_matches(&existing.content, &desired.content) {
            debug!("\tneeds update of {}", kind.content_field());
            needs_update = true;
        }

        if !needs_update {
            info!("\t{} {} is up-to-date", kind, existing.id);
            return Ok(());
        }

        info!("\tUpdating {} {}", kind, existing.id);
        let response = match kind {
            BoardKind::Timeboard => self.api.update_timeboard(&existing.id, &desired).await?,
            BoardKind::Screenboard => self.api.update_screenboard(&existing.id, &desired).await?,
        };
        if response.is_success() {
            info!("\t{} {} updated.", kind, existing.id);
        } else {
            log_failure("updating", kind, &response);
        }
        Ok(())
    }
}

fn log_failure(action: &str, kind: BoardKind, response: &ApiResponse) {
    error!(
        "\tError {} {}: {} {}",
        action, kind, response.status, response.body
    );
}
