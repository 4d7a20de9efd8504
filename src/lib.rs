//! # dogtrainer
//!
//! Keeps Datadog monitors, timeboards and screenboards in line with
//! definitions kept in source control.
//!
//! ## Architecture
//!
//! ```text
//! definitions ──▶ Trainer ──▶ MonitoringApi ──▶ Datadog
//!                  │  ▲
//!                  ▼  │
//!           ResourceCache (one listing per kind)
//! ```
//!
//! - **[`Trainer`]**: the reconciler. Each upsert looks the resource up by
//!   name in a cached listing, creates it when absent and updates it only
//!   when a field differs
//! - **[`messages`]**: alert and escalation text pointing humans at the
//!   definitions' [`provenance`]
//! - **[`cache`]**: per-kind listings fetched once per trainer
//! - **[`definitions`]**: the JSON file format read by the CLI
//!
//! ## Usage
//!
//! ```bash
//! export DOGTRAINER_API_KEY=... DOGTRAINER_APP_KEY=...
//! dogtrainer apply monitors.json
//! dogtrainer mute --matching myapp --until 1474076393
//! ```
//!
//! ### As a library
//!
//! ```rust,no_run
//! use dogtrainer::{DatadogClient, Trainer, UpsertOptions};
//!
//! # tokio_test::block_on(async {
//! let client = DatadogClient::builder()
//!     .credentials("api-key", "app-key")
//!     .build()
//!     .unwrap();
//! let trainer = Trainer::new(client, Some("@ops".to_string()), "git@github.com:org/repo.git");
//!
//! let id = trainer
//!     .upsert_monitor(
//!         "disk full",
//!         "avg(last_5m):max:system.disk.in_use{*} > 0.9",
//!         0.9,
//!         "<=",
//!         UpsertOptions::default(),
//!     )
//!     .await
//!     .unwrap();
//! println!("monitor id: {id:?}");
//! # });
//! ```

pub mod board;
pub mod cache;
pub mod definitions;
pub mod error;
pub mod logging;
pub mod messages;
pub mod monitor;
pub mod provenance;
pub mod settings;
mod trainer;

#[cfg(test)]
mod testing;

pub use definitions::{ApplySummary, Definitions};
pub use error::Error;
pub use logging::LogConfig;
pub use messages::{GeneratedMessages, MessageGenerator};
pub use monitor::{params, EscalationMessage, NamePattern, UpsertOptions};
pub use settings::Settings;
pub use trainer::Trainer;

pub use dogtrainer_client::{ApiError, ApiResponse, ClientError, DatadogClient, MonitoringApi};
pub use dogtrainer_types::{graphdef, Board, BoardKind, Graph, MonitorId, MonitorKind, Threshold};
