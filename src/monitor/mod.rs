//! Monitor reconciliation.
//!
//! [`Trainer::upsert_monitor`] makes the remote monitor with a given name
//! match the desired parameters, creating it when absent and updating it only
//! when some field differs. Muting lives in [`mute`].

mod mute;

pub use mute::NamePattern;

use dogtrainer_client::MonitoringApi;
use dogtrainer_types::{
    values_match, MonitorId, MonitorKind, MonitorParams, MonitorRecord, ResourceKind, Threshold,
    DEFAULT_RENOTIFY_INTERVAL,
};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::cache::find_by_name;
use crate::{Error, Trainer};

/// What to send as a monitor's escalation message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EscalationMessage {
    /// Use the generated escalation text.
    #[default]
    Generated,
    /// Send no escalation message at all.
    Disabled,
    /// Send this text verbatim.
    Custom(String),
}

/// `null` is [`Disabled`](EscalationMessage::Disabled) and a string is
/// [`Custom`](EscalationMessage::Custom). A missing field needs
/// `#[serde(default)]` to become [`Generated`](EscalationMessage::Generated).
impl<'de> Deserialize<'de> for EscalationMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(text) => EscalationMessage::Custom(text),
            None => EscalationMessage::Disabled,
        })
    }
}

impl From<Option<String>> for EscalationMessage {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => EscalationMessage::Custom(text),
            None => EscalationMessage::Disabled,
        }
    }
}

fn default_alert_no_data() -> bool {
    true
}

fn default_renotify_interval() -> Option<u32> {
    Some(DEFAULT_RENOTIFY_INTERVAL)
}

/// Caller-facing options for [`Trainer::upsert_monitor`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpsertOptions {
    /// Alert when the monitored metric stops reporting.
    #[serde(default = "default_alert_no_data")]
    pub alert_no_data: bool,
    #[serde(default)]
    pub kind: MonitorKind,
    /// Minutes between re-notifications; `None` disables them.
    #[serde(default = "default_renotify_interval")]
    pub renotify_interval: Option<u32>,
    /// Replaces the generated alert message.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub escalation_message: EscalationMessage,
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self {
            alert_no_data: default_alert_no_data(),
            kind: MonitorKind::default(),
            renotify_interval: default_renotify_interval(),
            message: None,
            escalation_message: EscalationMessage::default(),
        }
    }
}

impl UpsertOptions {
    pub fn alert_no_data(mut self, alert: bool) -> Self {
        self.alert_no_data = alert;
        self
    }

    pub fn kind(mut self, kind: impl Into<MonitorKind>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn renotify_interval(mut self, minutes: Option<u32>) -> Self {
        self.renotify_interval = minutes;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn escalation_message(mut self, escalation: impl Into<EscalationMessage>) -> Self {
        self.escalation_message = escalation.into();
        self
    }
}

/// Build the wire document for a monitor.
///
/// Only a [`Custom`](EscalationMessage::Custom) escalation message is
/// included; resolving [`Generated`](EscalationMessage::Generated) to text is
/// the caller's job.
pub fn params(
    name: &str,
    message: &str,
    query: &str,
    threshold: impl Into<Threshold>,
    options: &UpsertOptions,
) -> MonitorParams {
    let escalation = match &options.escalation_message {
        EscalationMessage::Custom(text) => Some(text.clone()),
        EscalationMessage::Generated | EscalationMessage::Disabled => None,
    };
    MonitorParams::new(name, message, query, threshold)
        .kind(options.kind.clone())
        .notify_no_data(options.alert_no_data)
        .renotify_interval(options.renotify_interval)
        .escalation_message(escalation)
}

/// How an existing monitor differs from the desired document.
#[derive(Debug, Clone, PartialEq)]
pub enum Drift {
    Missing(String),
    Changed {
        key: String,
        current: Value,
        desired: Value,
    },
}

/// The first key of `desired`, in order, whose value the existing monitor
/// lacks or holds differently.
pub fn first_difference(desired: &Map<String, Value>, existing: &MonitorRecord) -> Option<Drift> {
    for (key, value) in desired {
        match existing.get(key) {
            None => return Some(Drift::Missing(key.clone())),
            Some(current) if !values_match(current, value) => {
                return Some(Drift::Changed {
                    key: key.clone(),
                    current: current.clone(),
                    desired: value.clone(),
                })
            }
            Some(_) => {}
        }
    }
    None
}

#[derive(Deserialize)]
struct Created {
    id: MonitorId,
}

impl<A: MonitoringApi> Trainer<A> {
    /// Create or update the monitor named `name`.
    ///
    /// Returns the monitor id, or `None` when the remote rejected the create
    /// or update (the failure is logged). `comparator` is only used in the
    /// generated message text.
    pub async fn upsert_monitor(
        &self,
        name: &str,
        query: &str,
        threshold: impl Into<Threshold>,
        comparator: &str,
        options: UpsertOptions,
    ) -> Result<Option<MonitorId>, Error> {
        let generated = self.messages(name, comparator, &options.kind);
        let message = options.message.clone().unwrap_or(generated.message);
        let mut options = options;
        if options.escalation_message == EscalationMessage::Generated {
            options.escalation_message = EscalationMessage::Custom(generated.escalation);
        }
        let desired = params(name, &message, query, threshold, &options);

        info!("Upserting monitor: {}", name);
        let Some(existing) = self.existing_monitor(name).await? else {
            return self.create_monitor(&desired).await;
        };
        debug!("\tfound existing monitor id={}", existing.id);

        match first_difference(&desired.to_document(), existing) {
            None => {
                debug!("\tmonitor is correct in Datadog.");
                return Ok(Some(existing.id));
            }
            Some(Drift::Missing(key)) => debug!("\tneeds update: {} missing", key),
            Some(Drift::Changed {
                key,
                current,
                desired: wanted,
            }) => debug!("\tneeds update: {} is {} instead of {}", key, current, wanted),
        }

        let id = existing.id;
        let response = self.api.update_monitor(id, &desired).await?;
        if response.is_success() {
            info!("\tMonitor {} updated successfully", id);
            Ok(Some(id))
        } else {
            error!(
                "\tError updating monitor {}: {} {}",
                id, response.status, response.body
            );
            Ok(None)
        }
    }

    async fn create_monitor(&self, params: &MonitorParams) -> Result<Option<MonitorId>, Error> {
        let response = self.api.create_monitor(params).await?;
        if !response.is_success() {
            error!(
                "\tError creating monitor: {} {}",
                response.status, response.body
            );
            return Ok(None);
        }
        let created: Created = response
            .decode()
            .map_err(Error::decode(ResourceKind::Monitor))?;
        info!("\tMonitor {} created successfully", created.id);
        Ok(Some(created.id))
    }

    /// Every monitor in the account, listed once per trainer.
    pub async fn monitors(&self) -> Result<&[MonitorRecord], Error> {
        self.monitors
            .get_or_load(|| async {
                let body = self.api.list_monitors("all").await?.into_result()?;
                serde_json::from_value::<Vec<MonitorRecord>>(body)
                    .map_err(Error::decode(ResourceKind::Monitor))
            })
            .await
    }

    /// The first cached monitor named `name`.
    pub async fn existing_monitor(&self, name: &str) -> Result<Option<&MonitorRecord>, Error> {
        Ok(find_by_name(self.monitors().await?, name))
    }
}
