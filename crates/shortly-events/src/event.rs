use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ShortCreated,
    ValidationError,
    CreationError,
    RedirectAttempt,
    RedirectNotfound,
    RedirectExpired,
    ClickRecorded,
    ClickRecordFailed,
    ShortDeleted,
    StoreCleared,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ShortCreated => "short_created",
            EventKind::ValidationError => "validation_error",
            EventKind::CreationError => "creation_error",
            EventKind::RedirectAttempt => "redirect_attempt",
            EventKind::RedirectNotfound => "redirect_notfound",
            EventKind::RedirectExpired => "redirect_expired",
            EventKind::ClickRecorded => "click_recorded",
            EventKind::ClickRecordFailed => "click_record_failed",
            EventKind::ShortDeleted => "short_deleted",
            EventKind::StoreCleared => "store_cleared",
        }
    }

    /// Whether the event reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            EventKind::ValidationError | EventKind::CreationError | EventKind::ClickRecordFailed
        )
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the persisted event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub ts: Timestamp,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub meta: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialized_kind_matches_as_str() {
        for kind in [
            EventKind::ShortCreated,
            EventKind::ValidationError,
            EventKind::CreationError,
            EventKind::RedirectAttempt,
            EventKind::RedirectNotfound,
            EventKind::RedirectExpired,
            EventKind::ClickRecorded,
            EventKind::ClickRecordFailed,
            EventKind::ShortDeleted,
            EventKind::StoreCleared,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn persisted_shape() {
        let event = LogEvent {
            ts: Timestamp::from_millisecond(42).unwrap(),
            kind: EventKind::RedirectAttempt,
            meta: json!({ "shortcode": "abc123" }),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "ts": 42, "type": "redirect_attempt", "meta": { "shortcode": "abc123" } })
        );
    }
}
