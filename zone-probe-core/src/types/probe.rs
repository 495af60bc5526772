//! 注册探测结果类型

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened to the zone after a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum CleanupStatus {
    /// Registration failed, nothing to clean up.
    NotAttempted,
    /// The zone was deleted again.
    Deleted,
    /// Deletion failed; the zone is still live in the account.
    DeleteFailed(String),
    /// Registration succeeded but returned no zone id.
    MissingZoneId,
}

impl CleanupStatus {
    /// A live zone may have been left behind.
    #[must_use]
    pub fn needs_manual_cleanup(&self) -> bool {
        matches!(self, Self::DeleteFailed(_) | Self::MissingZoneId)
    }
}

/// Outcome of probing one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// The base domain from the candidate list.
    pub candidate: String,
    /// `<prefix>.<candidate>`
    pub derived_name: String,
    pub success: bool,
    /// Provider response envelope, verbatim or synthesized on transport failure.
    pub raw_response: Value,
    pub zone_id: Option<String>,
    pub cleanup: CleanupStatus,
}

impl ProbeOutcome {
    /// Ledger line for this outcome: `name | compact JSON`.
    #[must_use]
    pub fn ledger_line(&self) -> String {
        format!("{} | {}", self.derived_name, self.raw_response)
    }

    /// First error message of the envelope, or `"Unknown error"`.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.raw_response
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("Unknown error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(raw: Value, success: bool) -> ProbeOutcome {
        ProbeOutcome {
            candidate: "c.test".to_string(),
            derived_name: "exsub.c.test".to_string(),
            success,
            raw_response: raw,
            zone_id: None,
            cleanup: CleanupStatus::NotAttempted,
        }
    }

    #[test]
    fn ledger_line_is_name_then_compact_json() {
        let o = outcome(json!({"errors": [{"message": "already exists"}]}), false);
        assert_eq!(
            o.ledger_line(),
            r#"exsub.c.test | {"errors":[{"message":"already exists"}]}"#
        );
    }

    #[test]
    fn error_message_defaults_to_unknown() {
        assert_eq!(
            outcome(json!({"success": false}), false).error_message(),
            "Unknown error"
        );
        assert_eq!(
            outcome(json!({"errors": [{"message": "quota"}]}), false).error_message(),
            "quota"
        );
    }

    #[test]
    fn manual_cleanup_flags() {
        assert!(CleanupStatus::MissingZoneId.needs_manual_cleanup());
        assert!(CleanupStatus::DeleteFailed("x".into()).needs_manual_cleanup());
        assert!(!CleanupStatus::Deleted.needs_manual_cleanup());
        assert!(!CleanupStatus::NotAttempted.needs_manual_cleanup());
    }
}
