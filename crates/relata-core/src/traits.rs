//! Core traits for relata abstractions.
//!
//! These traits define the seams between the referral engine and the host
//! application's services, enabling pluggable backends and testability. The
//! contact directory, job board, and personalization backend are external
//! collaborators; the store trait is the canonical surface the engine exposes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// REFERRAL REQUEST STORE
// =============================================================================

/// Request for creating a new referral request.
#[derive(Debug, Clone)]
pub struct CreateReferralRequest {
    /// Must reference an existing contact.
    pub contact_id: Uuid,
    /// If present, must reference an existing, non-archived job opportunity.
    pub job_id: Option<Uuid>,
    /// Optional initial message draft.
    pub initial_message: Option<String>,
    /// Optional template to drive personalization at send time.
    pub template_id: Option<Uuid>,
}

/// Partial update of a referral request's editable fields.
///
/// `None` fields are left untouched. Clearing `relationship_impact` goes
/// through [`ReferralRequestStore::set_relationship_impact`] instead.
#[derive(Debug, Clone, Default)]
pub struct UpdateReferralFields {
    pub personalized_message: Option<String>,
    pub request_template_id: Option<Uuid>,
    /// Settable only after the request has been sent.
    pub outcome: Option<ReferralOutcome>,
    pub gratitude_expressed: Option<bool>,
    pub followup_required: Option<bool>,
    pub relationship_impact: Option<String>,
}

/// Canonical store for referral requests, enforcing the lifecycle state
/// machine.
///
/// Implementations must serialize concurrent transition attempts on the same
/// request id; transitions on different ids are independent.
#[async_trait]
pub trait ReferralRequestStore: Send + Sync {
    /// Create a new request in `draft`.
    async fn create(&self, req: CreateReferralRequest) -> Result<ReferralRequest>;

    /// Fetch a request by id.
    async fn get(&self, id: Uuid) -> Result<ReferralRequest>;

    /// List all requests in creation order.
    async fn list(&self) -> Result<Vec<ReferralRequest>>;

    /// Update editable fields. Refused once the request is `received`.
    async fn edit(&self, id: Uuid, fields: UpdateReferralFields) -> Result<ReferralRequest>;

    /// Send a draft request, resolving the outgoing message.
    async fn send(&self, id: Uuid, override_message: Option<String>) -> Result<ReferralRequest>;

    /// Re-send an already-sent request, re-stamping `sent_at`.
    async fn resend(&self, id: Uuid, override_message: Option<String>) -> Result<ReferralRequest>;

    /// Record the contact's response, transitioning `sent → received`.
    async fn record_response(
        &self,
        id: Uuid,
        response_content: String,
        outcome: Option<ReferralOutcome>,
    ) -> Result<ReferralRequest>;

    /// Flip the followup reminder flag. Permitted in every state.
    async fn toggle_followup(&self, id: Uuid) -> Result<ReferralRequest>;

    /// Set the gratitude flag. Refused once `received`.
    async fn set_gratitude(&self, id: Uuid, expressed: bool) -> Result<ReferralRequest>;

    /// Set or clear the relationship-impact note. Refused once `received`.
    async fn set_relationship_impact(
        &self,
        id: Uuid,
        impact: Option<String>,
    ) -> Result<ReferralRequest>;

    /// Delete a request. Refused once `received`.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// COLLABORATOR SERVICES
// =============================================================================

/// Contact directory lookup, supplied by the host application.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Fetch a contact by id. `Ok(None)` when the id does not resolve.
    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>>;
}

/// Job opportunity lookup, supplied by the host application.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Fetch a job posting by id. `Ok(None)` when the id does not resolve.
    async fn get_job(&self, id: Uuid) -> Result<Option<JobOpportunity>>;
}

/// Request for creating a message template.
#[derive(Debug, Clone)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub body: String,
    pub tone: Option<String>,
}

/// Partial update of a message template.
#[derive(Debug, Clone, Default)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub body: Option<String>,
    pub tone: Option<String>,
}

/// Catalog of reusable outreach templates.
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Create a template, returning its id.
    async fn create(&self, req: CreateTemplateRequest) -> Result<Uuid>;

    /// Fetch a template by id.
    async fn get(&self, id: Uuid) -> Result<Option<MessageTemplate>>;

    /// Fetch a template by name.
    async fn get_by_name(&self, name: &str) -> Result<Option<MessageTemplate>>;

    /// List all templates, ordered by name.
    async fn list(&self) -> Result<Vec<MessageTemplate>>;

    /// Update a template's fields.
    async fn update(&self, id: Uuid, req: UpdateTemplateRequest) -> Result<()>;

    /// Delete a template.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// PERSONALIZATION BACKEND
// =============================================================================

/// Input for one personalization call.
#[derive(Debug, Clone)]
pub struct PersonalizeRequest {
    pub contact: Contact,
    pub job: Option<JobOpportunity>,
    /// Template body the backend should personalize.
    pub template_body: String,
    /// Optional tone hint ("warm", "formal", ...).
    pub tone: Option<String>,
}

/// Text-generation backend that personalizes an outreach message for a
/// (contact, job) pair.
///
/// The engine treats this as an opaque function returning text or failing.
/// Callers bound each call with a timeout and fall back to deterministic
/// token substitution when it fails; errors from this trait never propagate
/// out of `send`.
#[async_trait]
pub trait Personalizer: Send + Sync {
    /// Produce a personalized message for the given request.
    async fn personalize(&self, req: PersonalizeRequest) -> Result<String>;
}
