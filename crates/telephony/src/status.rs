//! Call lifecycle events
//!
//! The provider posts these form-encoded over a call's life. The webhook
//! only logs them, so the types are tolerant: unknown statuses parse instead
//! of failing the request.

use serde::Deserialize;

/// Provider call state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Initiated,
    Ringing,
    InProgress,
    Answered,
    Completed,
    Busy,
    Failed,
    NoAnswer,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl CallStatus {
    /// The call is over, whatever the reason.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            CallStatus::Completed
                | CallStatus::Busy
                | CallStatus::Failed
                | CallStatus::NoAnswer
                | CallStatus::Canceled
        )
    }
}

/// One status webhook payload. Field names follow the provider's
/// PascalCase form encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct CallStatusEvent {
    #[serde(rename = "CallSid")]
    pub call_sid: String,

    #[serde(rename = "CallStatus")]
    pub call_status: CallStatus,

    #[serde(rename = "To", default)]
    pub to: Option<String>,

    #[serde(rename = "From", default)]
    pub from: Option<String>,

    /// Seconds, present on completed calls only.
    #[serde(rename = "CallDuration", default)]
    pub call_duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_statuses_parse() {
        let status: CallStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, CallStatus::InProgress);

        let status: CallStatus = serde_json::from_str("\"no-answer\"").unwrap();
        assert_eq!(status, CallStatus::NoAnswer);
        assert!(status.is_final());
    }

    #[test]
    fn unknown_statuses_do_not_fail_the_webhook() {
        let status: CallStatus = serde_json::from_str("\"transferring\"").unwrap();
        assert_eq!(status, CallStatus::Unknown);
        assert!(!status.is_final());
    }

    #[test]
    fn event_parses_from_provider_field_names() {
        let raw = r#"{
            "CallSid": "CA0123",
            "CallStatus": "completed",
            "To": "+34600000001",
            "From": "+34600000000",
            "CallDuration": "42"
        }"#;
        let event: CallStatusEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.call_sid, "CA0123");
        assert_eq!(event.call_status, CallStatus::Completed);
        assert!(event.call_status.is_final());
        assert_eq!(event.call_duration.as_deref(), Some("42"));
    }

    #[test]
    fn sparse_early_events_parse() {
        let raw = r#"{ "CallSid": "CA0123", "CallStatus": "ringing" }"#;
        let event: CallStatusEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.call_status, CallStatus::Ringing);
        assert!(event.call_duration.is_none());
    }
}
