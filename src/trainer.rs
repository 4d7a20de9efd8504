use dogtrainer_client::MonitoringApi;
use dogtrainer_types::{BoardSummary, MonitorKind, MonitorRecord, ResourceKind};
use tracing::debug;

use crate::cache::ResourceCache;
use crate::messages::{GeneratedMessages, MessageGenerator};

/// Reconciles monitors and boards against the remote through `A`.
///
/// A trainer holds one cached listing per resource kind. Listings are fetched
/// on first use and kept for the trainer's lifetime, so a trainer should live
/// for a single reconciliation run.
#[derive(Debug)]
pub struct Trainer<A> {
    pub(crate) api: A,
    pub(crate) generator: MessageGenerator,
    pub(crate) monitors: ResourceCache<MonitorRecord>,
    pub(crate) timeboards: ResourceCache<BoardSummary>,
    pub(crate) screenboards: ResourceCache<BoardSummary>,
}

impl<A: MonitoringApi> Trainer<A> {
    /// Create a trainer.
    ///
    /// `notify_to` is appended to every generated alert message; `provenance`
    /// names where the definitions live and appears in messages and board
    /// descriptions.
    pub fn new(api: A, notify_to: Option<String>, provenance: impl Into<String>) -> Self {
        let provenance = provenance.into();
        debug!("Trainer initialized with provenance {}", provenance);
        Self {
            api,
            generator: MessageGenerator::new(provenance, notify_to),
            monitors: ResourceCache::new(ResourceKind::Monitor),
            timeboards: ResourceCache::new(ResourceKind::Timeboard),
            screenboards: ResourceCache::new(ResourceKind::Screenboard),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn provenance(&self) -> &str {
        self.generator.provenance()
    }

    /// Generate the alert and escalation messages for a monitor.
    pub fn messages(
        &self,
        metric_desc: &str,
        comparator: &str,
        kind: &MonitorKind,
    ) -> GeneratedMessages {
        self.generator.generate(metric_desc, comparator, kind)
    }
}
