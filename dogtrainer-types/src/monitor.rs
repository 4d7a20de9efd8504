//! Monitor documents: the desired [`MonitorParams`] and the observed
//! [`MonitorRecord`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Remote identifier of a monitor.
pub type MonitorId = u64;

/// Minutes between re-notifications when the caller doesn't say otherwise.
pub const DEFAULT_RENOTIFY_INTERVAL: u32 = 60;

/// Minutes without data before a no-data notification fires.
pub const NO_DATA_TIMEFRAME: u32 = 20;

/// Monitor type as understood by the remote.
///
/// Only the two kinds the message generator distinguishes get their own
/// variant; anything else is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MonitorKind {
    #[default]
    MetricAlert,
    ServiceCheck,
    Other(String),
}

impl MonitorKind {
    pub fn as_str(&self) -> &str {
        match self {
            MonitorKind::MetricAlert => "metric alert",
            MonitorKind::ServiceCheck => "service check",
            MonitorKind::Other(kind) => kind,
        }
    }
}

impl From<String> for MonitorKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "metric alert" => MonitorKind::MetricAlert,
            "service check" => MonitorKind::ServiceCheck,
            _ => MonitorKind::Other(kind),
        }
    }
}

impl From<&str> for MonitorKind {
    fn from(kind: &str) -> Self {
        MonitorKind::from(kind.to_string())
    }
}

impl From<MonitorKind> for String {
    fn from(kind: MonitorKind) -> Self {
        match kind {
            MonitorKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named threshold tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityLevel {
    Critical,
    Warning,
    Ok,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Critical => "critical",
            SeverityLevel::Warning => "warning",
            SeverityLevel::Ok => "ok",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation threshold for a monitor.
///
/// A bare number is the `critical` threshold. An explicit map of severity
/// levels is passed through to the remote unchanged; the caller is
/// responsible for using keys the remote accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Critical(f64),
    Levels(BTreeMap<String, f64>),
}

impl Threshold {
    /// Build a severity map from typed levels.
    ///
    /// ```rust
    /// use dogtrainer_types::{SeverityLevel, Threshold};
    ///
    /// let t = Threshold::levels([(SeverityLevel::Warning, 50.0), (SeverityLevel::Critical, 90.0)]);
    /// assert_eq!(t.into_map().get("warning"), Some(&50.0));
    /// ```
    pub fn levels<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = (SeverityLevel, f64)>,
    {
        Threshold::Levels(
            levels
                .into_iter()
                .map(|(level, value)| (level.as_str().to_string(), value))
                .collect(),
        )
    }

    /// The thresholds map as sent to the remote.
    pub fn into_map(self) -> BTreeMap<String, f64> {
        match self {
            Threshold::Critical(value) => {
                BTreeMap::from([(SeverityLevel::Critical.as_str().to_string(), value)])
            }
            Threshold::Levels(levels) => levels,
        }
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Threshold::Critical(value)
    }
}

impl From<BTreeMap<String, f64>> for Threshold {
    fn from(levels: BTreeMap<String, f64>) -> Self {
        Threshold::Levels(levels)
    }
}

/// The `options` bag of a monitor document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorOptions {
    pub notify_audit: bool,
    pub locked: bool,
    pub timeout_h: u32,
    pub silenced: Map<String, Value>,
    pub thresholds: BTreeMap<String, f64>,
    pub require_full_window: bool,
    pub notify_no_data: bool,
    /// `None` disables re-notification; serialized as `null`.
    pub renotify_interval: Option<u32>,
    pub no_data_timeframe: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_message: Option<String>,
}

/// Desired monitor document, as sent on create and update.
///
/// Field order is the order in which an existing monitor is diffed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorParams {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MonitorKind,
    pub query: String,
    pub message: String,
    pub tags: Vec<String>,
    pub options: MonitorOptions,
}

impl MonitorParams {
    /// Parameters with the default options: metric alert, alerting on
    /// missing data, re-notifying every 60 minutes, no escalation message.
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        query: impl Into<String>,
        threshold: impl Into<Threshold>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MonitorKind::default(),
            query: query.into(),
            message: message.into(),
            tags: Vec::new(),
            options: MonitorOptions {
                notify_audit: false,
                locked: false,
                timeout_h: 0,
                silenced: Map::new(),
                thresholds: threshold.into().into_map(),
                require_full_window: false,
                notify_no_data: true,
                renotify_interval: Some(DEFAULT_RENOTIFY_INTERVAL),
                no_data_timeframe: NO_DATA_TIMEFRAME,
                escalation_message: None,
            },
        }
    }

    pub fn kind(mut self, kind: impl Into<MonitorKind>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn notify_no_data(mut self, notify: bool) -> Self {
        self.options.notify_no_data = notify;
        self
    }

    pub fn renotify_interval(mut self, minutes: Option<u32>) -> Self {
        self.options.renotify_interval = minutes;
        self
    }

    pub fn escalation_message(mut self, message: Option<String>) -> Self {
        self.options.escalation_message = message;
        self
    }

    /// The document as a JSON object, keys in declaration order.
    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// A monitor as returned by the remote.
///
/// Apart from the id, every field the remote sends is kept so it can be
/// compared key-by-key against a desired [`MonitorParams`] document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorRecord {
    pub id: MonitorId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MonitorRecord {
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_params_document() {
        let params = MonitorParams::new("monname", "my_msg", "my_query", 123.4);
        let expected = json!({
            "name": "monname",
            "type": "metric alert",
            "query": "my_query",
            "message": "my_msg",
            "tags": [],
            "options": {
                "notify_audit": false,
                "locked": false,
                "timeout_h": 0,
                "silenced": {},
                "thresholds": { "critical": 123.4 },
                "require_full_window": false,
                "notify_no_data": true,
                "renotify_interval": 60,
                "no_data_timeframe": 20
            }
        });
        assert_eq!(Value::Object(params.to_document()), expected);
    }

    #[test]
    fn test_document_keys_in_declaration_order() {
        let params = MonitorParams::new("n", "m", "q", 1.0);
        let keys: Vec<_> = params.to_document().keys().cloned().collect();
        assert_eq!(keys, ["name", "type", "query", "message", "tags", "options"]);
    }

    #[test]
    fn test_disabled_renotify_is_null() {
        let doc = MonitorParams::new("n", "m", "q", 1.0)
            .renotify_interval(None)
            .to_document();
        assert_eq!(doc["options"]["renotify_interval"], Value::Null);
    }

    #[test]
    fn test_escalation_message_only_when_set() {
        let without = MonitorParams::new("n", "m", "q", 1.0).to_document();
        assert!(without["options"].get("escalation_message").is_none());

        let with = MonitorParams::new("n", "m", "q", 1.0)
            .escalation_message(Some("esc".to_string()))
            .to_document();
        assert_eq!(with["options"]["escalation_message"], "esc");
    }

    #[test]
    fn test_threshold_levels_pass_through() {
        let levels = BTreeMap::from([
            ("warning".to_string(), 50.0),
            ("critical".to_string(), 123.4),
            ("ok".to_string(), 20.0),
        ]);
        let params = MonitorParams::new("n", "m", "q", levels.clone());
        assert_eq!(params.options.thresholds, levels);
    }

    #[test]
    fn test_threshold_deserializes_number_or_map() {
        let single: Threshold = serde_json::from_value(json!(12.5)).unwrap();
        assert_eq!(single, Threshold::Critical(12.5));

        let levels: Threshold = serde_json::from_value(json!({"warning": 1, "critical": 2})).unwrap();
        assert_eq!(
            levels.into_map(),
            BTreeMap::from([("critical".to_string(), 2.0), ("warning".to_string(), 1.0)])
        );
    }

    #[test]
    fn test_monitor_kind_round_trips_unknown_types() {
        assert_eq!(MonitorKind::from("service check"), MonitorKind::ServiceCheck);
        let other = MonitorKind::from("query alert");
        assert_eq!(other, MonitorKind::Other("query alert".to_string()));
        assert_eq!(serde_json::to_value(&other).unwrap(), json!("query alert"));
    }

    #[test]
    fn test_monitor_record_keeps_remote_fields() {
        let record: MonitorRecord = serde_json::from_value(json!({
            "id": 42,
            "name": "mon",
            "overall_state": "OK"
        }))
        .unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.name(), Some("mon"));
        assert_eq!(record.get("overall_state"), Some(&json!("OK")));
        assert!(record.get("id").is_none());
    }
}
