use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{EventId, RegistrationStatus},
    error::GenericError,
};

/// Body shared by every function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIdRequest {
    pub event_id: EventId,
}

/// Wrapper around every function response. At most one side is meaningful;
/// when both are present the error wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<GenericError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Data(T),
    Error(GenericError),
    /// Success with neither data nor error.
    Empty,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }

    pub fn error(error: GenericError) -> Self {
        Self {
            error: Some(error),
            data: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            error: None,
            data: None,
        }
    }

    pub fn into_reply(self) -> Reply<T> {
        match (self.error, self.data) {
            (Some(error), _) => Reply::Error(error),
            (None, Some(data)) => Reply::Data(data),
            (None, None) => Reply::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub event_name: String,
    pub registrations_open: bool,
    pub description: String,
    pub date: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<String>,
}

impl RegistrationRecord {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            meta: None,
            checked_in_at: None,
        }
    }

    pub fn status(&self) -> RegistrationStatus {
        RegistrationStatus::parse(&self.status)
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == RegistrationStatus::CONFIRMED
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == RegistrationStatus::CANCELLED
    }

    /// Check-in time, if present and RFC 3339.
    pub fn checked_in_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.checked_in_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredData {
    pub registration_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelledData {
    #[serde(default = "cancelled_default")]
    pub cancelled: bool,
}

fn cancelled_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::NOT_REGISTERED;

    #[test]
    fn confirmed_record_is_not_cancelled() {
        let record = RegistrationRecord::new("CONFIRMED");
        assert!(record.is_confirmed());
        assert!(!record.is_cancelled());
        assert_eq!(record.status(), RegistrationStatus::Confirmed);
    }

    #[test]
    fn cancelled_record_is_not_confirmed() {
        let record = RegistrationRecord::new("CANCELLED");
        assert!(record.is_cancelled());
        assert!(!record.is_confirmed());
        assert_eq!(record.status(), RegistrationStatus::Cancelled);
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let record = RegistrationRecord::new("WAITLISTED");
        assert!(!record.is_confirmed());
        assert!(!record.is_cancelled());
        assert_eq!(record.status().as_str(), "WAITLISTED");
    }

    #[test]
    fn event_id_request_uses_camel_case() {
        let body = EventIdRequest {
            event_id: EventId::new(7).expect("event id"),
        };
        assert_eq!(
            serde_json::to_value(body).expect("encode"),
            json!({ "eventId": 7 })
        );
    }

    #[test]
    fn event_id_rejects_non_positive_values() {
        assert!(EventId::new(0).is_err());
        assert!(EventId::new(-3).is_err());
        assert!(serde_json::from_value::<EventIdRequest>(json!({ "eventId": 0 })).is_err());
    }

    #[test]
    fn envelope_ignores_unknown_fields() {
        let envelope: Envelope<EventDetails> = serde_json::from_value(json!({
            "data": {
                "eventName": "DevFest",
                "registrationsOpen": true,
                "description": "A day of talks",
                "date": "2025-11-29",
                "title": "DevFest Bengaluru",
                "venue": "somewhere new"
            },
            "requestId": "abc"
        }))
        .expect("decode");

        match envelope.into_reply() {
            Reply::Data(details) => {
                assert_eq!(details.event_name, "DevFest");
                assert!(details.registrations_open);
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn envelope_error_takes_precedence_over_data() {
        let envelope: Envelope<RegistrationRecord> = serde_json::from_value(json!({
            "error": { "code": NOT_REGISTERED, "message": "not registered" },
            "data": { "status": "CONFIRMED" }
        }))
        .expect("decode");

        match envelope.into_reply() {
            Reply::Error(error) => assert!(error.has_code(NOT_REGISTERED)),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn envelope_without_data_or_error_is_empty() {
        let envelope: Envelope<RegisteredData> =
            serde_json::from_value(json!({ "data": null })).expect("decode");
        assert_eq!(envelope.into_reply(), Reply::Empty);
    }

    #[test]
    fn envelope_decodes_payloads_without_default() {
        let envelope: Envelope<EventDetails> = serde_json::from_value(json!({})).expect("decode");
        assert_eq!(envelope.into_reply(), Reply::Empty);

        let envelope: Envelope<RegistrationRecord> =
            serde_json::from_str(r#"{"data":{"status":"CANCELLED"}}"#).expect("decode");
        assert_eq!(envelope.into_reply(), Reply::Data(RegistrationRecord::new("CANCELLED")));
    }

    #[test]
    fn error_code_without_message_still_decodes() {
        let envelope: Envelope<RegistrationRecord> =
            serde_json::from_str(r#"{"error":{"code":"NOT_REGISTERED"}}"#).expect("decode");

        match envelope.into_reply() {
            Reply::Error(error) => {
                assert!(error.has_code(NOT_REGISTERED));
                assert!(error.message.is_empty());
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn cancelled_flag_defaults_to_true() {
        let data: CancelledData = serde_json::from_value(json!({})).expect("decode");
        assert!(data.cancelled);
    }

    #[test]
    fn check_in_timestamp_parses_rfc3339_only() {
        let mut record = RegistrationRecord::new("CONFIRMED");
        record.checked_in_at = Some("2025-11-29T09:30:00+05:30".into());
        let at = record.checked_in_at().expect("parsed");
        assert_eq!(at.to_rfc3339(), "2025-11-29T04:00:00+00:00");

        record.checked_in_at = Some("yesterday".into());
        assert!(record.checked_in_at().is_none());
    }
}
