use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

/// Roles that register in the `pending` state and need an admin sign-off
/// before the account is usable.
const PRIVILEGED_ROLES: [&str; 2] = ["admin", "flight-operator"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 hash, never the plaintext. Redacted from every API response.
    pub password: String,
    pub usertype: String,
    pub approval: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            other => Err(CoreError::UnknownApprovalState(other.to_string())),
        }
    }
}

/// Normalize a raw role string to its canonical tag: lowercase, with runs of
/// whitespace collapsed to a single hyphen ("Flight Operator" -> "flight-operator").
pub fn normalize_usertype(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Initial approval state for a normalized role tag. Privileged roles wait
/// for approval, everyone else is usable immediately.
pub fn default_approval(usertype: &str) -> ApprovalStatus {
    if PRIVILEGED_ROLES.contains(&usertype) {
        ApprovalStatus::Pending
    } else {
        ApprovalStatus::Approved
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub usertype: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_role_to_lowercase_hyphenated() {
        assert_eq!(normalize_usertype("Flight Operator"), "flight-operator");
        assert_eq!(normalize_usertype("Customer"), "customer");
        assert_eq!(normalize_usertype("ADMIN"), "admin");
        assert_eq!(normalize_usertype("  flight   operator  "), "flight-operator");
    }

    #[test]
    fn privileged_roles_start_pending() {
        assert_eq!(default_approval("admin"), ApprovalStatus::Pending);
        assert_eq!(default_approval("flight-operator"), ApprovalStatus::Pending);
    }

    #[test]
    fn other_roles_start_approved() {
        assert_eq!(default_approval("customer"), ApprovalStatus::Approved);
        assert_eq!(default_approval("travel-agent"), ApprovalStatus::Approved);
    }

    #[test]
    fn approval_tags_round_trip() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApprovalStatus>().unwrap(), status);
        }
        assert!("unknown".parse::<ApprovalStatus>().is_err());
    }
}
