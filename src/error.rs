//! Error types for reconciliation.

use dogtrainer_client::{ApiError, ClientError};
use dogtrainer_types::ResourceKind;
use thiserror::Error;

/// Errors surfaced by [`Trainer`](crate::Trainer) operations.
///
/// Create and update failures reported by the remote are *not* errors: they
/// are logged and surface as an absent result. Everything here either stops
/// the operation the caller asked for or, for
/// [`NoRemoteResources`](Error::NoRemoteResources), the whole run.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote listed zero resources of a kind. An account with no
    /// monitors or boards at all almost always means bad credentials or the
    /// wrong site, so reconciliation stops rather than recreating everything.
    #[error("Datadog API call returned no existing {}. Something is wrong.", .0.plural())]
    NoRemoteResources(ResourceKind),

    /// A by-name operation found no monitor with that name.
    #[error("Could not find monitor with name {0}")]
    MonitorNotFound(String),

    /// Request could not be completed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A listing or lookup call returned a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response body did not have the expected shape.
    #[error("Failed to decode {kind} response: {source}")]
    Decode {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },

    /// A monitor name pattern did not compile.
    #[error("Invalid monitor name pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// No repository path was given and none could be discovered.
    #[error("Unable to determine source code path; please specify repo_path")]
    Provenance,
}

impl Error {
    /// Whether the error should terminate the process rather than just the
    /// current operation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NoRemoteResources(_))
    }

    pub(crate) fn decode(kind: ResourceKind) -> impl FnOnce(serde_json::Error) -> Error {
        move |source| Error::Decode { kind, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_listing_is_fatal() {
        assert!(Error::NoRemoteResources(ResourceKind::Monitor).is_fatal());
        assert!(!Error::MonitorNotFound("x".to_string()).is_fatal());
        assert!(!Error::Provenance.is_fatal());
    }

    #[test]
    fn test_messages_name_the_resource() {
        assert_eq!(
            Error::NoRemoteResources(ResourceKind::Screenboard).to_string(),
            "Datadog API call returned no existing screenboards. Something is wrong."
        );
        assert_eq!(
            Error::MonitorNotFound("My Monitor".to_string()).to_string(),
            "Could not find monitor with name My Monitor"
        );
    }
}
