//! Lazily-filled cache of every remote resource of one kind.
//!
//! Each kind is listed once per [`Trainer`](crate::Trainer) on first use and
//! never refreshed: creates and updates made afterwards are not reflected in
//! the cached listing.

use std::future::Future;

use dogtrainer_types::{BoardSummary, MonitorRecord, ResourceKind};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::Error;

/// Something that can be looked up by name in a cached listing.
pub trait Named {
    fn name(&self) -> Option<&str>;
}

impl Named for MonitorRecord {
    fn name(&self) -> Option<&str> {
        MonitorRecord::name(self)
    }
}

impl Named for BoardSummary {
    fn name(&self) -> Option<&str> {
        Some(&self.title)
    }
}

/// Process-lifetime listing of one resource kind.
///
/// The listing is fetched at most once even under concurrent first access:
/// the check, fetch and store happen inside a single [`OnceCell`]
/// initialization. A failed or empty fetch leaves the cache unfilled.
#[derive(Debug)]
pub struct ResourceCache<T> {
    kind: ResourceKind,
    items: OnceCell<Vec<T>>,
}

impl<T> ResourceCache<T> {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            items: OnceCell::new(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Whether the listing has been fetched.
    pub fn is_loaded(&self) -> bool {
        self.items.initialized()
    }

    /// Return the cached listing, calling `load` to fetch it the first time.
    ///
    /// An empty listing is [`Error::NoRemoteResources`].
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<&[T], Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, Error>>,
    {
        let items = self
            .items
            .get_or_try_init(|| async move {
                let items = load().await?;
                info!(
                    "Found {} existing {} in Datadog",
                    items.len(),
                    self.kind.plural()
                );
                if items.is_empty() {
                    error!(
                        "Datadog API call returned no existing {}. Something is wrong.",
                        self.kind.plural()
                    );
                    return Err(Error::NoRemoteResources(self.kind));
                }
                Ok(items)
            })
            .await?;
        Ok(items.as_slice())
    }
}

/// First item whose name equals `name`, in listing order.
pub fn find_by_name<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == Some(name))
}
