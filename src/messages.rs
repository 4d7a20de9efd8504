//! Notification text for monitors.
//!
//! The `{{...}}` tokens are template directives expanded by the remote when
//! a notification is sent. They are reproduced byte-for-byte, including the
//! newlines between sections.

use dogtrainer_types::MonitorKind;

/// Alert and escalation text generated for a monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessages {
    pub message: String,
    pub escalation: String,
}

/// Builds monitor messages that point operators at where the monitor is
/// defined and who gets notified.
#[derive(Debug, Clone)]
pub struct MessageGenerator {
    provenance: String,
    notify_to: Option<String>,
}

impl MessageGenerator {
    pub fn new(provenance: impl Into<String>, notify_to: Option<String>) -> Self {
        Self {
            provenance: provenance.into(),
            notify_to,
        }
    }

    pub fn provenance(&self) -> &str {
        &self.provenance
    }

    /// Generate the message and escalation message for a monitor.
    ///
    /// `comparator` describes the healthy relation between metric and
    /// threshold (the inverse of the query's alert condition) and is only
    /// used in the text of threshold-based messages.
    pub fn generate(
        &self,
        metric_desc: &str,
        comparator: &str,
        kind: &MonitorKind,
    ) -> GeneratedMessages {
        if *kind == MonitorKind::ServiceCheck {
            let message = format!(
                "{{{{#is_alert}}}}'{desc}' is FAILING: {{{{check_message}}}}{{{{/is_alert}}}}\n\
                 {{{{#is_warning}}}}'{desc}' is WARNING: {{{{check_message}}}}{{{{/is_warning}}}}\n\
                 {{{{#is_recovery}}}}'{desc}' recovered: {{{{check_message}}}}{{{{/is_recovery}}}}\n\
                 {{{{#is_no_data}}}}'{desc}' is not reporting data{{{{/is_no_data}}}}\n\
                 {suffix}",
                desc = metric_desc,
                suffix = self.suffix(),
            );
            let escalation =
                format!("'{metric_desc}' is still in error state: {{{{check_message}}}}");
            return GeneratedMessages {
                message,
                escalation,
            };
        }

        let message = format!(
            "{{{{#is_alert}}}}'{desc}' should be {cmp} {{{{threshold}}}}, but is {{{{value}}}}.{{{{/is_alert}}}}\n\
             {{{{#is_recovery}}}}'{desc}' recovered  (current value {{{{value}}}} is {cmp} threshold of {{{{threshold}}}}).{{{{/is_recovery}}}}\n\
             {suffix}",
            desc = metric_desc,
            cmp = comparator,
            suffix = self.suffix(),
        );
        let escalation = format!(
            "'{metric_desc}' is still in error state (current value {{{{value}}}} is {comparator} threshold of {{{{threshold}}}})"
        );
        GeneratedMessages {
            message,
            escalation,
        }
    }

    fn suffix(&self) -> String {
        format!(
            "(monitor and threshold configuration for this alert is managed by {}) {}",
            self.provenance,
            self.notify_to.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> MessageGenerator {
        MessageGenerator::new("my_repo_path", Some("@my-notify-to".to_string()))
    }

    #[test]
    fn test_metric_alert_message() {
        let expected = "{{#is_alert}}'mydesc' should be comp {{threshold}}, but is {{value}}.{{/is_alert}}\n\
                        {{#is_recovery}}'mydesc' recovered  (current value {{value}} is comp threshold of {{threshold}}).{{/is_recovery}}\n\
                        (monitor and threshold configuration for this alert is managed by my_repo_path) @my-notify-to";
        let generated = generator().generate("mydesc", "comp", &MonitorKind::MetricAlert);
        assert_eq!(generated.message, expected);
    }

    #[test]
    fn test_metric_alert_escalation() {
        let generated = generator().generate("mydesc", "comp", &MonitorKind::MetricAlert);
        assert_eq!(
            generated.escalation,
            "'mydesc' is still in error state (current value {{value}} is comp threshold of {{threshold}})"
        );
    }

    #[test]
    fn test_service_check_message() {
        let expected = "{{#is_alert}}'mydesc' is FAILING: {{check_message}}{{/is_alert}}\n\
                        {{#is_warning}}'mydesc' is WARNING: {{check_message}}{{/is_warning}}\n\
                        {{#is_recovery}}'mydesc' recovered: {{check_message}}{{/is_recovery}}\n\
                        {{#is_no_data}}'mydesc' is not reporting data{{/is_no_data}}\n\
                        (monitor and threshold configuration for this alert is managed by my_repo_path) @my-notify-to";
        let generated = generator().generate("mydesc", "comp", &MonitorKind::ServiceCheck);
        assert_eq!(generated.message, expected);
    }

    #[test]
    fn test_service_check_escalation() {
        let generated = generator().generate("mydesc", "comp", &MonitorKind::ServiceCheck);
        assert_eq!(
            generated.escalation,
            "'mydesc' is still in error state: {{check_message}}"
        );
    }

    #[test]
    fn test_other_kinds_use_threshold_text() {
        let generated = generator().generate("d", ">=", &MonitorKind::from("query alert"));
        assert!(generated.message.starts_with("{{#is_alert}}'d' should be >= {{threshold}}"));
    }

    #[test]
    fn test_missing_notify_target_leaves_trailing_space() {
        let generated = MessageGenerator::new("repo", None).generate("d", "<", &MonitorKind::MetricAlert);
        assert!(generated
            .message
            .ends_with("(monitor and threshold configuration for this alert is managed by repo) "));
    }
}
