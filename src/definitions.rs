//! Declarative monitor and board definitions read from a JSON file.
//!
//! ```json
//! {
//!   "monitors": [
//!     {"name": "disk full", "query": "avg(last_5m):max:system.disk.in_use{*} > 0.9",
//!      "threshold": 0.9, "comparator": "<="}
//!   ],
//!   "timeboards": [
//!     {"name": "disk", "graphs": [{"title": "usage", "queries": ["max:system.disk.in_use{*}"]}]}
//!   ],
//!   "screenboards": []
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use dogtrainer_client::MonitoringApi;
use dogtrainer_types::{Graph, Threshold};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::monitor::UpsertOptions;
use crate::{Error, Trainer};

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorDefinition {
    pub name: String,
    pub query: String,
    pub threshold: Threshold,
    pub comparator: String,
    #[serde(flatten)]
    pub options: UpsertOptions,
}

/// A graph given either in full or as `{title, queries, markers}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GraphEntry {
    Shorthand(Graph),
    Raw(Value),
}

impl GraphEntry {
    pub fn into_value(self) -> Value {
        match self {
            GraphEntry::Shorthand(graph) => graph.build(),
            GraphEntry::Raw(value) => value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeboardDefinition {
    pub name: String,
    #[serde(default)]
    pub graphs: Vec<GraphEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenboardDefinition {
    pub name: String,
    #[serde(default)]
    pub widgets: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Definitions {
    #[serde(default)]
    pub monitors: Vec<MonitorDefinition>,
    #[serde(default)]
    pub timeboards: Vec<TimeboardDefinition>,
    #[serde(default)]
    pub screenboards: Vec<ScreenboardDefinition>,
}

/// Counts from one [`Definitions::apply`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub monitors: usize,
    /// Monitors whose create or update the remote rejected.
    pub failed_monitors: usize,
    pub boards: usize,
}

impl Definitions {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read definitions from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse definitions in {}", path.display()))
    }

    /// Reconcile every definition, monitors first, in file order.
    ///
    /// Stops at the first error; a rejected monitor create or update is
    /// counted instead.
    pub async fn apply<A: MonitoringApi>(self, trainer: &Trainer<A>) -> Result<ApplySummary, Error> {
        let mut summary = ApplySummary::default();

        for monitor in self.monitors {
            let id = trainer
                .upsert_monitor(
                    &monitor.name,
                    &monitor.query,
                    monitor.threshold,
                    &monitor.comparator,
                    monitor.options,
                )
                .await?;
            summary.monitors += 1;
            if id.is_none() {
                error!("Monitor '{}' was not reconciled", monitor.name);
                summary.failed_monitors += 1;
            }
        }

        for board in self.timeboards {
            let graphs = board.graphs.into_iter().map(GraphEntry::into_value).collect();
            trainer.upsert_timeboard(&board.name, graphs).await?;
            summary.boards += 1;
        }

        for board in self.screenboards {
            trainer.upsert_screenboard(&board.name, board.widgets).await?;
            summary.boards += 1;
        }

        info!(
            "Applied {} monitors ({} failed) and {} boards",
            summary.monitors, summary.failed_monitors, summary.boards
        );
        Ok(summary)
    }
}
