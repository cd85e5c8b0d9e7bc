//! In-memory referral request store implementation.
//!
//! Enforces the request lifecycle: `draft → sent → received`, with a
//! terminal-ish `received` state that freezes everything except the followup
//! flag. Concurrent transition attempts on the same request id are serialized
//! by a per-record mutex; a tombstone flag on each slot keeps a delete racing
//! an in-flight mutation from resurrecting or half-updating the record.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use relata_core::{
    defaults, new_v7, Contact, ContactDirectory, CreateReferralRequest, Error, EventBus,
    JobBoard, JobOpportunity, MessageTemplate, PersonalizeRequest, Personalizer, ReferralEvent,
    ReferralOutcome, ReferralRequest, ReferralRequestStore, RequestStatus, Result,
    TemplateCatalog, UpdateReferralFields,
};

use crate::compose::{default_message, substitute_tokens};

/// One stored record plus its tombstone flag.
///
/// The flag is set under the record mutex, so a caller that raced a delete
/// observes it the moment it acquires the lock.
struct Slot {
    deleted: bool,
    record: ReferralRequest,
}

/// In-memory implementation of [`ReferralRequestStore`].
pub struct InMemoryReferralStore {
    records: RwLock<HashMap<Uuid, Arc<Mutex<Slot>>>>,
    contacts: Arc<dyn ContactDirectory>,
    jobs: Arc<dyn JobBoard>,
    templates: Option<Arc<dyn TemplateCatalog>>,
    personalizer: Option<Arc<dyn Personalizer>>,
    events: Arc<EventBus>,
    sender_name: Option<String>,
    personalize_timeout: Duration,
}

impl InMemoryReferralStore {
    /// Create a store backed by the given collaborator services.
    pub fn new(contacts: Arc<dyn ContactDirectory>, jobs: Arc<dyn JobBoard>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            contacts,
            jobs,
            templates: None,
            personalizer: None,
            events: Arc::new(EventBus::default()),
            sender_name: None,
            personalize_timeout: Duration::from_secs(defaults::PERSONALIZE_TIMEOUT_SECS),
        }
    }

    /// Attach a template catalog for template-driven sends.
    pub fn with_templates(mut self, templates: Arc<dyn TemplateCatalog>) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Attach a personalization backend.
    pub fn with_personalizer(mut self, personalizer: Arc<dyn Personalizer>) -> Self {
        self.personalizer = Some(personalizer);
        self
    }

    /// Name substituted for `[Your Name]` in the fallback path.
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    /// Bound for a single personalization call.
    pub fn with_personalize_timeout(mut self, timeout: Duration) -> Self {
        self.personalize_timeout = timeout;
        self
    }

    /// The bus carrying lifecycle events for this store.
    pub fn events(&self) -> Arc<EventBus> {
        Arc::clone(&self.events)
    }

    async fn slot(&self, id: Uuid) -> Result<Arc<Mutex<Slot>>> {
        let records = self.records.read().await;
        records
            .get(&id)
            .cloned()
            .ok_or(Error::RequestNotFound(id))
    }

    fn guard_not_received(record: &ReferralRequest, op: &str) -> Result<()> {
        if record.status == RequestStatus::Received {
            return Err(Error::ImmutableState(format!(
                "cannot {} request {}: a response has already been received",
                op, record.id
            )));
        }
        Ok(())
    }

    async fn lookup_contact(&self, id: Uuid) -> Option<Contact> {
        match self.contacts.get_contact(id).await {
            Ok(contact) => contact,
            Err(e) => {
                warn!(contact_id = %id, error = %e, "Contact lookup failed; composing without contact data");
                None
            }
        }
    }

    async fn lookup_job(&self, id: Option<Uuid>) -> Option<JobOpportunity> {
        let id = id?;
        match self.jobs.get_job(id).await {
            Ok(job) => job,
            Err(e) => {
                warn!(job_id = %id, error = %e, "Job lookup failed; composing without job data");
                None
            }
        }
    }

    async fn lookup_template(&self, id: Uuid) -> Option<MessageTemplate> {
        let catalog = self.templates.as_ref()?;
        match catalog.get(id).await {
            Ok(template) => template,
            Err(e) => {
                warn!(template_id = %id, error = %e, "Template lookup failed");
                None
            }
        }
    }

    /// Resolve the outgoing message for a send.
    ///
    /// Order: explicit override → template personalization (bounded, with
    /// substitution fallback) → deterministic default template. Total: this
    /// never fails, whatever the collaborators do.
    async fn resolve_message(
        &self,
        record: &ReferralRequest,
        override_message: Option<String>,
    ) -> String {
        if let Some(message) = override_message {
            return message;
        }

        let contact = self.lookup_contact(record.contact_id).await;
        let job = self.lookup_job(record.job_id).await;

        if let Some(template_id) = record.request_template_id {
            if let Some(template) = self.lookup_template(template_id).await {
                return self
                    .personalize_or_substitute(contact, job, template)
                    .await;
            }
            warn!(
                request_id = %record.id,
                template_id = %template_id,
                "Template did not resolve; using default message"
            );
        }

        default_message(contact.as_ref(), job.as_ref())
    }

    async fn personalize_or_substitute(
        &self,
        contact: Option<Contact>,
        job: Option<JobOpportunity>,
        template: MessageTemplate,
    ) -> String {
        if let (Some(personalizer), Some(contact_record)) = (&self.personalizer, contact.clone()) {
            let request = PersonalizeRequest {
                contact: contact_record,
                job: job.clone(),
                template_body: template.body.clone(),
                tone: template.tone.clone(),
            };
            match tokio::time::timeout(
                self.personalize_timeout,
                personalizer.personalize(request),
            )
            .await
            {
                Ok(Ok(message)) if !message.trim().is_empty() => return message,
                Ok(Ok(_)) => {
                    warn!(fallback = true, "Composer returned an empty message")
                }
                Ok(Err(e)) => {
                    warn!(error = %e, fallback = true, "Personalization failed")
                }
                Err(_) => {
                    warn!(
                        duration_ms = self.personalize_timeout.as_millis() as u64,
                        fallback = true,
                        "Personalization timed out"
                    )
                }
            }
        }

        substitute_tokens(
            &template.body,
            contact.as_ref(),
            job.as_ref(),
            self.sender_name.as_deref(),
        )
    }
}

#[async_trait]
impl ReferralRequestStore for InMemoryReferralStore {
    async fn create(&self, req: CreateReferralRequest) -> Result<ReferralRequest> {
        if self.contacts.get_contact(req.contact_id).await?.is_none() {
            return Err(Error::Validation(format!(
                "contact {} does not exist",
                req.contact_id
            )));
        }

        let mut job_title = None;
        let mut job_company = None;
        if let Some(job_id) = req.job_id {
            let job = self.jobs.get_job(job_id).await?.ok_or_else(|| {
                Error::Validation(format!("job opportunity {} does not exist", job_id))
            })?;
            if job.archived {
                return Err(Error::Validation(format!(
                    "job opportunity {} is archived and cannot be a referral target",
                    job_id
                )));
            }
            job_title = Some(job.title);
            job_company = Some(job.company);
        }

        let now = Utc::now();
        let record = ReferralRequest {
            id: new_v7(),
            contact_id: req.contact_id,
            job_id: req.job_id,
            personalized_message: req.initial_message.unwrap_or_default(),
            request_template_id: req.template_id,
            status: RequestStatus::Draft,
            sent_at: None,
            response_received_at: None,
            response_content: None,
            outcome: ReferralOutcome::Unknown,
            gratitude_expressed: false,
            followup_required: false,
            relationship_impact: None,
            job_title,
            job_company,
            created_at_utc: now,
            updated_at_utc: now,
        };

        self.records.write().await.insert(
            record.id,
            Arc::new(Mutex::new(Slot {
                deleted: false,
                record: record.clone(),
            })),
        );

        info!(request_id = %record.id, contact_id = %record.contact_id, "Created referral request");
        self.events.emit(ReferralEvent::RequestCreated {
            request_id: record.id,
            contact_id: record.contact_id,
            job_id: record.job_id,
        });
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<ReferralRequest> {
        let slot = self.slot(id).await?;
        let guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        Ok(guard.record.clone())
    }

    async fn list(&self) -> Result<Vec<ReferralRequest>> {
        let slots: Vec<Arc<Mutex<Slot>>> =
            self.records.read().await.values().cloned().collect();

        let mut requests = Vec::with_capacity(slots.len());
        for slot in slots {
            let guard = slot.lock().await;
            if !guard.deleted {
                requests.push(guard.record.clone());
            }
        }
        // UUIDv7 ids embed creation time, so id order is creation order.
        requests.sort_by_key(|r| r.id);
        Ok(requests)
    }

    async fn edit(&self, id: Uuid, fields: UpdateReferralFields) -> Result<ReferralRequest> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        Self::guard_not_received(&guard.record, "edit")?;

        if let Some(outcome) = fields.outcome {
            if outcome.is_known() && guard.record.status == RequestStatus::Draft {
                return Err(Error::Validation(
                    "outcome cannot be set before the request is sent".to_string(),
                ));
            }
        }

        let record = &mut guard.record;
        if let Some(message) = fields.personalized_message {
            record.personalized_message = message;
        }
        if let Some(template_id) = fields.request_template_id {
            record.request_template_id = Some(template_id);
        }
        if let Some(outcome) = fields.outcome {
            record.outcome = outcome;
        }
        if let Some(gratitude) = fields.gratitude_expressed {
            record.gratitude_expressed = gratitude;
        }
        if let Some(followup) = fields.followup_required {
            record.followup_required = followup;
        }
        if let Some(impact) = fields.relationship_impact {
            record.relationship_impact = Some(impact);
        }
        record.updated_at_utc = Utc::now();

        debug!(request_id = %id, "Edited referral request");
        self.events
            .emit(ReferralEvent::RequestUpdated { request_id: id });
        Ok(record.clone())
    }

    async fn send(&self, id: Uuid, override_message: Option<String>) -> Result<ReferralRequest> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        match guard.record.status {
            RequestStatus::Draft => {}
            RequestStatus::Sent => {
                return Err(Error::InvalidTransition(format!(
                    "request {} was already sent; use resend",
                    id
                )))
            }
            RequestStatus::Received => {
                return Err(Error::ImmutableState(format!(
                    "cannot send request {}: a response has already been received",
                    id
                )))
            }
        }

        // The record lock is held across message resolution on purpose: a
        // racing send on the same id must observe the completed transition.
        let message = self.resolve_message(&guard.record, override_message).await;

        let now = Utc::now();
        let record = &mut guard.record;
        record.personalized_message = message;
        record.sent_at = Some(now);
        record.status = RequestStatus::Sent;
        record.updated_at_utc = now;

        info!(
            request_id = %id,
            contact_id = %record.contact_id,
            message_len = record.personalized_message.len(),
            "Sent referral request"
        );
        self.events.emit(ReferralEvent::RequestSent {
            request_id: id,
            contact_id: record.contact_id,
            resend: false,
        });
        Ok(record.clone())
    }

    async fn resend(&self, id: Uuid, override_message: Option<String>) -> Result<ReferralRequest> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        match guard.record.status {
            RequestStatus::Sent => {}
            RequestStatus::Draft => {
                return Err(Error::InvalidTransition(format!(
                    "request {} has not been sent yet",
                    id
                )))
            }
            RequestStatus::Received => {
                return Err(Error::ImmutableState(format!(
                    "cannot resend request {}: a response has already been received",
                    id
                )))
            }
        }

        let now = Utc::now();
        let record = &mut guard.record;
        if let Some(message) = override_message {
            record.personalized_message = message;
        }
        // Outcome and response fields survive a resend untouched.
        record.sent_at = Some(now);
        record.updated_at_utc = now;

        info!(request_id = %id, contact_id = %record.contact_id, "Re-sent referral request");
        self.events.emit(ReferralEvent::RequestSent {
            request_id: id,
            contact_id: record.contact_id,
            resend: true,
        });
        Ok(record.clone())
    }

    async fn record_response(
        &self,
        id: Uuid,
        response_content: String,
        outcome: Option<ReferralOutcome>,
    ) -> Result<ReferralRequest> {
        if response_content.trim().is_empty() {
            return Err(Error::Validation(
                "response content must not be empty".to_string(),
            ));
        }

        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        if guard.record.status != RequestStatus::Sent {
            return Err(Error::InvalidTransition(format!(
                "cannot record a response for request {} in status {}",
                id, guard.record.status
            )));
        }

        let now = Utc::now();
        let record = &mut guard.record;
        record.response_received_at = Some(now);
        record.response_content = Some(response_content);
        record.status = RequestStatus::Received;
        if let Some(outcome) = outcome {
            record.outcome = outcome;
        }
        record.updated_at_utc = now;

        info!(
            request_id = %id,
            contact_id = %record.contact_id,
            outcome = %record.outcome,
            "Recorded referral response"
        );
        self.events.emit(ReferralEvent::ResponseRecorded {
            request_id: id,
            contact_id: record.contact_id,
            outcome: record.outcome.to_string(),
        });
        Ok(record.clone())
    }

    async fn toggle_followup(&self, id: Uuid) -> Result<ReferralRequest> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }

        // The one mutation allowed in every state, received included.
        let record = &mut guard.record;
        record.followup_required = !record.followup_required;
        record.updated_at_utc = Utc::now();

        debug!(
            request_id = %id,
            followup_required = record.followup_required,
            "Toggled followup flag"
        );
        self.events
            .emit(ReferralEvent::RequestUpdated { request_id: id });
        Ok(record.clone())
    }

    async fn set_gratitude(&self, id: Uuid, expressed: bool) -> Result<ReferralRequest> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        Self::guard_not_received(&guard.record, "update gratitude on")?;

        let record = &mut guard.record;
        record.gratitude_expressed = expressed;
        record.updated_at_utc = Utc::now();

        self.events
            .emit(ReferralEvent::RequestUpdated { request_id: id });
        Ok(record.clone())
    }

    async fn set_relationship_impact(
        &self,
        id: Uuid,
        impact: Option<String>,
    ) -> Result<ReferralRequest> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        Self::guard_not_received(&guard.record, "update relationship impact on")?;

        let record = &mut guard.record;
        record.relationship_impact = impact;
        record.updated_at_utc = Utc::now();

        self.events
            .emit(ReferralEvent::RequestUpdated { request_id: id });
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let slot = self.slot(id).await?;
        let mut guard = slot.lock().await;
        if guard.deleted {
            return Err(Error::RequestNotFound(id));
        }
        Self::guard_not_received(&guard.record, "delete")?;

        // Tombstone first, under the record lock, so a racing mutation that
        // already cloned the slot observes the deletion.
        guard.deleted = true;
        drop(guard);

        self.records.write().await.remove(&id);

        info!(request_id = %id, "Deleted referral request");
        self.events
            .emit(ReferralEvent::RequestDeleted { request_id: id });
        Ok(())
    }
}
