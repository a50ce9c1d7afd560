//! Account model types.

use serde::{Deserialize, Serialize};

/// Unique identifier for an account.
///
/// IDs are opaque strings assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    /// Create a new account ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of an adoption inquiry the current account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// A shelter reviewing adoption applications.
    Shelter,
    /// An applicant who submitted an adoption application.
    Applicant,
}

impl AccountRole {
    /// Parse from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "shelter" => Self::Shelter,
            _ => Self::Applicant,
        }
    }

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shelter => "shelter",
            Self::Applicant => "applicant",
        }
    }
}

/// The current local account context.
///
/// Injected into the registry instead of being read from ambient globals,
/// so each consumer gets an explicitly scoped store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Account the session belongs to.
    pub account_id: AccountId,
    /// Role the account holds.
    pub role: AccountRole,
}

impl Session {
    /// Create a new session context.
    #[must_use]
    pub const fn new(account_id: AccountId, role: AccountRole) -> Self {
        Self { account_id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [AccountRole::Shelter, AccountRole::Applicant] {
            assert_eq!(AccountRole::parse(role.as_str()), role);
        }
    }

    #[test]
    fn test_unknown_role_defaults_to_applicant() {
        assert_eq!(AccountRole::parse("moderator"), AccountRole::Applicant);
    }
}
