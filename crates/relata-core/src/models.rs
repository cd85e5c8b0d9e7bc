//! Core data models for the relata referral engine.
//!
//! These types are shared across all relata crates and represent the core
//! domain entities: referral requests, their lifecycle state, the collaborator
//! records they reference, and the derived analytics report shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// LIFECYCLE ENUMS
// =============================================================================

/// Lifecycle state of a referral request.
///
/// Transitions are driven by explicit user actions only:
/// `draft → sent` (send), `sent → sent` (resend), `sent → received`
/// (record_response). There is no automatic expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Created but not yet sent; freely editable.
    #[default]
    Draft,
    /// Sent to the contact; awaiting a response.
    Sent,
    /// A response arrived; the record is immutable except `followup_required`.
    Received,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Sent => write!(f, "sent"),
            Self::Received => write!(f, "received"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "received" => Ok(Self::Received),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

/// Outcome judgment for a referral request.
///
/// A real tri-state, not a nullable boolean: "not yet known" is an explicit
/// variant so callers cannot conflate it with an unsuccessful outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralOutcome {
    /// The contact provided the referral.
    Successful,
    /// The contact declined or the referral fell through.
    Unsuccessful,
    /// No outcome recorded yet.
    #[default]
    Unknown,
}

impl ReferralOutcome {
    /// Whether an outcome has been recorded.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for ReferralOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Successful => write!(f, "successful"),
            Self::Unsuccessful => write!(f, "unsuccessful"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ReferralOutcome {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "successful" => Ok(Self::Successful),
            "unsuccessful" => Ok(Self::Unsuccessful),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid referral outcome: {}", s)),
        }
    }
}

// =============================================================================
// REFERRAL REQUEST
// =============================================================================

/// One tracked ask for a job referral, scoped to exactly one contact and at
/// most one job opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralRequest {
    pub id: Uuid,
    /// Immutable after creation.
    pub contact_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    /// Mutable until sent; frozen once a response is received.
    pub personalized_message: String,
    /// Which template (if any) produced the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_template_id: Option<Uuid>,
    pub status: RequestStatus,
    /// Set exactly when the request first transitions to `sent`; re-stamped
    /// on resend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_received_at: Option<DateTime<Utc>>,
    /// Full text of a received referral letter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_content: Option<String>,
    pub outcome: ReferralOutcome,
    /// Whether the requester acknowledged the contact.
    pub gratitude_expressed: bool,
    /// User-settable reminder flag; editable in every state.
    pub followup_required: bool,
    /// Free-text note on how the interaction affected the relationship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_impact: Option<String>,
    /// Display snapshot of the referenced job's title, captured at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Display snapshot of the referenced job's company, captured at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_company: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

impl ReferralRequest {
    /// Whether the request has ever been sent (`sent` or `received`).
    pub fn has_been_sent(&self) -> bool {
        self.sent_at.is_some()
    }

    /// Whether a response has been recorded.
    pub fn responded(&self) -> bool {
        self.status == RequestStatus::Received || self.response_received_at.is_some()
    }

    /// A sent request with no recorded outcome and no response yet.
    pub fn is_pending(&self) -> bool {
        self.sent_at.is_some()
            && self.outcome == ReferralOutcome::Unknown
            && self.response_received_at.is_none()
    }

    /// Check the structural invariants that must hold in every state.
    ///
    /// Returns a description of the first violation found, or `None` when the
    /// record is well-formed. Used by the analytics engine to fail fast on
    /// malformed input.
    pub fn invariant_violation(&self) -> Option<String> {
        let sent_like = matches!(self.status, RequestStatus::Sent | RequestStatus::Received);
        if self.sent_at.is_some() != sent_like {
            return Some(format!(
                "request {}: sent_at must be set iff status is sent or received (status={}, sent_at={:?})",
                self.id, self.status, self.sent_at
            ));
        }
        if self.status != RequestStatus::Received
            && (self.response_received_at.is_some() || self.response_content.is_some())
        {
            return Some(format!(
                "request {}: response fields set while status is {}",
                self.id, self.status
            ));
        }
        if self.status == RequestStatus::Received && self.response_received_at.is_none() {
            return Some(format!(
                "request {}: received status without response_received_at",
                self.id
            ));
        }
        None
    }
}

// =============================================================================
// COLLABORATOR RECORDS
// =============================================================================

/// A professional contact, as supplied by the contact directory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A job posting, as supplied by the job opportunity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOpportunity {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Archived jobs are not valid referral targets.
    pub archived: bool,
}

/// A reusable outreach message template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: Uuid,
    pub name: String,
    /// Template body; may contain substitution tokens such as
    /// `[Contact Name]` or `[Job Title]`.
    pub body: String,
    /// Desired tone hint passed to the personalization backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

// =============================================================================
// ANALYTICS REPORT TYPES
// =============================================================================

/// Counts and rates over a collection (or per-contact slice) of requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralStats {
    /// Count of all requests.
    pub total: usize,
    /// Count with `sent_at` present.
    pub sent: usize,
    /// Count with a successful outcome.
    pub successful: usize,
    /// Count with an unsuccessful outcome.
    pub unsuccessful: usize,
    /// Sent, outcome unknown, no response yet.
    pub pending: usize,
    /// `successful / sent` as a percentage; 0 when nothing was sent.
    pub success_rate: f64,
    /// `responded / sent` as a percentage; 0 when nothing was sent.
    pub response_rate: f64,
}

/// Per-contact output of the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReciprocityReport {
    pub contact_id: Uuid,
    pub stats: ReferralStats,
    /// Count of requests where the requester expressed gratitude.
    pub gratitude_expressed: usize,
    /// All non-empty relationship-impact notes, in input order, duplicates
    /// retained.
    pub relationship_impact: Vec<String>,
    /// Composite 0-100 estimate of how mutually beneficial the relationship
    /// has been; 0 when nothing was ever sent to this contact.
    pub reciprocity_score: u32,
}

/// Full output of the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub overall: ReferralStats,
    /// Sorted descending by reciprocity score, ties broken by descending
    /// total request count, further ties stable in input order.
    pub contacts: Vec<ContactReciprocityReport>,
}

/// Presentation-only grouping of requests by job opportunity.
///
/// Requests lacking a job land in a single unassigned bucket. Never persisted
/// and never filters or mutates the underlying requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    /// First non-empty job title seen among member requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// First non-empty job company seen among member requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_company: Option<String>,
    /// Sort label: `job_title ?? job_company ?? "Unassigned Job"`.
    pub label: String,
    pub requests: Vec<ReferralRequest>,
}
