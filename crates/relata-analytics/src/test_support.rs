//! Shared request fixtures for the unit tests in this crate.

use chrono::Utc;

use relata_core::{new_v7, ReferralOutcome, ReferralRequest, RequestStatus};

pub fn draft_request() -> ReferralRequest {
    let now = Utc::now();
    ReferralRequest {
        id: new_v7(),
        contact_id: new_v7(),
        job_id: None,
        personalized_message: String::new(),
        request_template_id: None,
        status: RequestStatus::Draft,
        sent_at: None,
        response_received_at: None,
        response_content: None,
        outcome: ReferralOutcome::Unknown,
        gratitude_expressed: false,
        followup_required: false,
        relationship_impact: None,
        job_title: None,
        job_company: None,
        created_at_utc: now,
        updated_at_utc: now,
    }
}

/// A request sent to `contact_id`, no response recorded.
pub fn sent_request(contact_id: uuid::Uuid, outcome: ReferralOutcome) -> ReferralRequest {
    let mut r = draft_request();
    r.contact_id = contact_id;
    r.status = RequestStatus::Sent;
    r.sent_at = Some(Utc::now());
    r.outcome = outcome;
    r
}

/// A request with a recorded response from `contact_id`.
pub fn received_request(contact_id: uuid::Uuid, outcome: ReferralOutcome) -> ReferralRequest {
    let mut r = sent_request(contact_id, outcome);
    r.status = RequestStatus::Received;
    r.response_received_at = Some(Utc::now());
    r.response_content = Some("Happy to refer you.".to_string());
    r
}
