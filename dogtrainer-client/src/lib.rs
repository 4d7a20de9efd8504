//! # dogtrainer-client
//!
//! The remote side of dogtrainer: an async [`MonitoringApi`] trait covering
//! the monitor, timeboard and screenboard operations the reconciler needs,
//! and [`DatadogClient`], its implementation over the Datadog v1 HTTP API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dogtrainer_client::{DatadogClient, MonitoringApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DatadogClient::builder()
//!         .credentials("api-key", "app-key")
//!         .build()?;
//!
//!     let response = client.list_monitors("all").await?;
//!     println!("status {}: {}", response.status, response.body);
//!     Ok(())
//! }
//! ```
//!
//! Operations return the raw status and body in an [`ApiResponse`]; deciding
//! whether a non-200 status is fatal is left to the caller. [`ApiError`]
//! turns such a response into an error value when that is what the caller
//! wants.

mod api;
mod datadog;
pub mod error;

pub use api::{ApiResponse, MonitoringApi};
pub use datadog::{DatadogClient, DatadogClientBuilder, DEFAULT_ENDPOINT};
pub use error::{ApiError, ClientError};

// Re-export types for convenience
pub use dogtrainer_types::{BoardDefinition, BoardId, MonitorId, MonitorParams};
