//! Inquiry data models and the status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::{AccountId, AccountRole};

/// Unique identifier for an inquiry.
///
/// IDs are opaque strings assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

impl InquiryId {
    /// Create a new inquiry ID.
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

impl std::fmt::Display for InquiryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a pet record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(pub String);

impl PetId {
    /// Create a new pet ID.
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

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an inquiry.
///
/// Transitions are monotonic: once an inquiry reaches a terminal status
/// (`Approved`, `Rejected`, `Cancelled`) it never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    /// Freshly submitted; the shelter has not looked at it yet.
    #[default]
    New,
    /// The shelter has opened the inquiry.
    Contacted,
    /// The shelter approved the adoption.
    Approved,
    /// The shelter declined the adoption.
    Rejected,
    /// The applicant withdrew the application.
    Cancelled,
}

impl InquiryStatus {
    /// Parse from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "contacted" => Self::Contacted,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::New,
        }
    }

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether no further transitions are permitted out of this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }

    /// Whether the state machine permits moving from this status to `to`.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (
                Self::New,
                Self::Contacted | Self::Approved | Self::Rejected | Self::Cancelled
            ) | (
                Self::Contacted,
                Self::Approved | Self::Rejected | Self::Cancelled
            )
        )
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Adoption availability of a pet record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetAvailability {
    /// Listed and open for applications.
    #[default]
    Available,
    /// Adopted; no longer open for applications.
    Adopted,
}

impl PetAvailability {
    /// Parse from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "adopted" => Self::Adopted,
            _ => Self::Available,
        }
    }

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Adopted => "adopted",
        }
    }
}

/// Extra detail the applicant provided with the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    /// Household situation (other pets, children, garden...).
    #[serde(default)]
    pub household: String,
    /// Free-text introduction.
    #[serde(default)]
    pub bio: String,
    /// When the applicant could welcome the pet.
    #[serde(default)]
    pub availability: String,
}

/// An applicant's request to adopt a specific pet from a specific shelter.
///
/// `shelter_id` and `pet_id` are immutable after creation; `pet_name` is a
/// denormalized snapshot taken at submission time. Inquiries are never
/// hard-deleted — withdrawal is the `Cancelled` status, not a removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    /// Unique identifier.
    pub id: InquiryId,
    /// Shelter the application was sent to.
    pub shelter_id: AccountId,
    /// Pet the application is about.
    pub pet_id: PetId,
    /// Snapshot of the pet's display name.
    pub pet_name: String,
    /// Applicant account, if one exists yet. Applications can be submitted
    /// before the applicant finishes creating an account.
    pub applicant_id: Option<AccountId>,
    /// Applicant's name as entered on the form.
    pub applicant_name: String,
    /// Applicant's email address.
    pub applicant_email: String,
    /// Applicant's phone number.
    pub applicant_phone: String,
    /// Free-text opening message from the application form.
    pub message: String,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: InquiryStatus,
    /// Whether the thread holds chat messages the current account has not
    /// read yet. Set by the remote store.
    #[serde(default)]
    pub has_unread_messages: bool,
    /// Extra applicant detail, when provided.
    #[serde(default)]
    pub details: Option<ApplicantDetails>,
}

impl Inquiry {
    /// Whether this inquiry should count toward the unread total.
    ///
    /// Two independent triggers:
    /// - `has_unread_messages` always counts, even for an acknowledged
    ///   inquiry — new chat activity re-arms notification on a thread the
    ///   user has already seen.
    /// - Otherwise, an unacknowledged role-relevant status counts: a shelter
    ///   is notified of `New` inquiries, an applicant of any inquiry the
    ///   shelter has acted on (non-`New`).
    #[must_use]
    pub fn needs_attention(&self, role: AccountRole, acknowledged: bool) -> bool {
        if self.has_unread_messages {
            return true;
        }
        if acknowledged {
            return false;
        }
        match role {
            AccountRole::Shelter => self.status == InquiryStatus::New,
            AccountRole::Applicant => self.status != InquiryStatus::New,
        }
    }
}
