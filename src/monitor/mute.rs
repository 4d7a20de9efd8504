use dogtrainer_client::{ApiResponse, MonitoringApi};
use dogtrainer_types::MonitorId;
use regex::Regex;
use tracing::{debug, error, info};

use crate::{Error, Trainer};

/// Selects monitors by name for bulk mute and unmute.
///
/// A plain string matches any name containing it literally; regex
/// metacharacters in it have no special meaning.
#[derive(Debug, Clone)]
pub enum NamePattern {
    Regex(Regex),
    Literal(String),
}

impl NamePattern {
    pub fn compile(self) -> Result<Regex, Error> {
        match self {
            NamePattern::Regex(regex) => Ok(regex),
            NamePattern::Literal(text) => Ok(Regex::new(&regex::escape(&text))?),
        }
    }
}

impl From<Regex> for NamePattern {
    fn from(regex: Regex) -> Self {
        NamePattern::Regex(regex)
    }
}

impl From<&str> for NamePattern {
    fn from(text: &str) -> Self {
        NamePattern::Literal(text.to_string())
    }
}

impl From<String> for NamePattern {
    fn from(text: String) -> Self {
        NamePattern::Literal(text)
    }
}

impl<A: MonitoringApi> Trainer<A> {
    /// Mute a monitor indefinitely, or until the `end` POSIX timestamp.
    pub async fn mute_monitor_by_id(
        &self,
        id: MonitorId,
        end: Option<i64>,
    ) -> Result<ApiResponse, Error> {
        match end {
            None => info!("Muting monitor by ID {}", id),
            Some(ts) => info!("Muting monitor by ID {} until {}", id, ts),
        }
        Ok(self.api.mute_monitor(id, end).await?)
    }

    /// Mute the monitor named `name`.
    ///
    /// Fails with [`Error::MonitorNotFound`] when no monitor has that name.
    pub async fn mute_monitor_by_name(
        &self,
        name: &str,
        end: Option<i64>,
    ) -> Result<ApiResponse, Error> {
        let id = self.monitor_id_by_name(name).await?;
        match end {
            None => info!("Muting monitor by name {} ({})", name, id),
            Some(ts) => info!("Muting monitor by name {} ({}) until {}", name, id, ts),
        }
        Ok(self.api.mute_monitor(id, end).await?)
    }

    /// Mute every monitor whose name matches `pattern`.
    ///
    /// Each match is muted independently; a failure is logged and does not
    /// stop the rest. Returns the ids that were muted, which is empty when
    /// nothing matched.
    pub async fn mute_monitors_by_regex(
        &self,
        pattern: impl Into<NamePattern>,
        end: Option<i64>,
    ) -> Result<Vec<MonitorId>, Error> {
        let regex = pattern.into().compile()?;
        match end {
            None => info!("Muting monitors by regex {}", regex.as_str()),
            Some(ts) => info!("Muting monitors by regex {} until {}", regex.as_str(), ts),
        }

        let mut muted = Vec::new();
        for (id, name) in self.matching_monitors(&regex).await? {
            info!("Muting monitor '{}' ({})", name, id);
            let result = self.mute_monitor_by_id(id, end).await;
            if succeeded("mute", id, result) {
                muted.push(id);
            }
        }
        Ok(muted)
    }

    /// Remove every mute, across all scopes, from a monitor.
    pub async fn unmute_monitor_by_id(&self, id: MonitorId) -> Result<ApiResponse, Error> {
        info!("Unmuting monitor by ID {}", id);
        Ok(self.api.unmute_monitor(id, true).await?)
    }

    /// Unmute the monitor named `name`.
    ///
    /// Fails with [`Error::MonitorNotFound`] when no monitor has that name.
    pub async fn unmute_monitor_by_name(&self, name: &str) -> Result<ApiResponse, Error> {
        let id = self.monitor_id_by_name(name).await?;
        info!("Unmuting monitor by name {} ({})", name, id);
        Ok(self.api.unmute_monitor(id, true).await?)
    }

    /// Unmute every monitor whose name matches `pattern`. Same failure
    /// handling as [`mute_monitors_by_regex`](Self::mute_monitors_by_regex).
    pub async fn unmute_monitors_by_regex(
        &self,
        pattern: impl Into<NamePattern>,
    ) -> Result<Vec<MonitorId>, Error> {
        let regex = pattern.into().compile()?;
        info!("Unmuting monitors by regex {}", regex.as_str());

        let mut unmuted = Vec::new();
        for (id, name) in self.matching_monitors(&regex).await? {
            info!("Unmuting monitor '{}' ({})", name, id);
            let result = self.unmute_monitor_by_id(id).await;
            if succeeded("unmute", id, result) {
                unmuted.push(id);
            }
        }
        Ok(unmuted)
    }

    async fn monitor_id_by_name(&self, name: &str) -> Result<MonitorId, Error> {
        match self.existing_monitor(name).await? {
            Some(monitor) => Ok(monitor.id),
            None => Err(Error::MonitorNotFound(name.to_string())),
        }
    }

    async fn matching_monitors(&self, regex: &Regex) -> Result<Vec<(MonitorId, String)>, Error> {
        debug!("Searching for monitors matching: {}", regex.as_str());
        Ok(self
            .monitors()
            .await?
            .iter()
            .filter_map(|monitor| {
                let name = monitor.name()?;
                regex
                    .is_match(name)
                    .then(|| (monitor.id, name.to_string()))
            })
            .collect())
    }
}

fn succeeded(action: &str, id: MonitorId, result: Result<ApiResponse, Error>) -> bool {
    match result {
        Ok(response) if response.is_success() => true,
        Ok(response) => {
            error!(
                "\tFailed to {} monitor {}: {} {}",
                action, id, response.status, response.body
            );
            false
        }
        Err(e) => {
            error!("\tFailed to {} monitor {}: {}", action, id, e);
            false
        }
    }
}
