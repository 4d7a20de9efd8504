//! # dogtrainer-types
//!
//! Wire documents exchanged with the Datadog v1 API for the three resource
//! kinds dogtrainer manages: monitors, timeboards and screenboards.
//!
//! ## Design Goals
//!
//! - **Desired vs. observed**: desired documents ([`MonitorParams`],
//!   [`BoardDefinition`]) are strongly typed; observed records
//!   ([`MonitorRecord`], [`Board`]) keep the remote's extra fields so they
//!   can be diffed against the desired state
//! - **Stable key order**: documents serialize in a fixed field order so a
//!   diff walks keys the same way every time
//! - **Ergonomic builders**: fluent API for monitor parameters and graphs
//!
//! ## Example
//!
//! ```rust
//! use dogtrainer_types::{Graph, MonitorKind, MonitorParams};
//!
//! let params = MonitorParams::new("disk full", "alert text", "avg(last_5m):disk > 90", 90.0)
//!     .kind(MonitorKind::MetricAlert)
//!     .renotify_interval(None);
//! assert_eq!(params.options.thresholds.get("critical"), Some(&90.0));
//!
//! let graph = Graph::new("disk usage")
//!     .query("avg:system.disk.in_use{*}")
//!     .marker("full", 0.9)
//!     .build();
//! assert_eq!(graph["definition"]["viz"], "timeseries");
//! ```

mod board;
mod graph;
mod monitor;
mod value;

pub use board::*;
pub use graph::*;
pub use monitor::*;
pub use value::values_match;

/// The three kinds of remote resource dogtrainer reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Monitor,
    Timeboard,
    Screenboard,
}

impl ResourceKind {
    /// Plural noun used in log lines and error messages.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Monitor => "monitors",
            ResourceKind::Timeboard => "timeboards",
            ResourceKind::Screenboard => "screenboards",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Monitor => "monitor",
            ResourceKind::Timeboard => "timeboard",
            ResourceKind::Screenboard => "screenboard",
        };
        f.write_str(name)
    }
}
