//! Referral lifecycle events and the broadcast event bus.
//!
//! The store emits one event per successful state-changing operation so host
//! UIs (out of scope here) can refresh views or schedule reminders without
//! polling. Downstream consumers subscribe independently; the transport that
//! carries events to a client belongs to the host application.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Lifecycle event emitted by the referral request store.
///
/// Serialized as JSON with a `type` tag field, e.g.:
/// `{"type":"RequestSent","request_id":"...","contact_id":"..."}`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ReferralEvent {
    /// A request was created in `draft`.
    RequestCreated {
        request_id: Uuid,
        contact_id: Uuid,
        #[serde(skip_serializing_if = "Option::is_none")]
        job_id: Option<Uuid>,
    },
    /// A request was sent (or re-sent) to its contact.
    RequestSent {
        request_id: Uuid,
        contact_id: Uuid,
        /// True when this was a resend of an already-sent request.
        resend: bool,
    },
    /// The contact's response was recorded.
    ResponseRecorded {
        request_id: Uuid,
        contact_id: Uuid,
        outcome: String,
    },
    /// Editable fields or bookkeeping annotations changed.
    RequestUpdated { request_id: Uuid },
    /// A request was deleted.
    RequestDeleted { request_id: Uuid },
}

impl ReferralEvent {
    /// Namespaced event type name (e.g. `"request.sent"`).
    pub fn event_type(&self) -> &'static str {
        match self {
            ReferralEvent::RequestCreated { .. } => "request.created",
            ReferralEvent::RequestSent { .. } => "request.sent",
            ReferralEvent::ResponseRecorded { .. } => "request.response_recorded",
            ReferralEvent::RequestUpdated { .. } => "request.updated",
            ReferralEvent::RequestDeleted { .. } => "request.deleted",
        }
    }

    /// The request id this event relates to.
    pub fn request_id(&self) -> Uuid {
        match self {
            ReferralEvent::RequestCreated { request_id, .. }
            | ReferralEvent::RequestSent { request_id, .. }
            | ReferralEvent::ResponseRecorded { request_id, .. }
            | ReferralEvent::RequestUpdated { request_id }
            | ReferralEvent::RequestDeleted { request_id } => *request_id,
        }
    }
}

/// Broadcast-based event bus for distributing referral events to multiple
/// consumers.
///
/// Uses `tokio::sync::broadcast` with a configurable buffer size. Slow
/// receivers that fall behind will receive a `Lagged` error and miss events;
/// freshness matters more than completeness for UI refresh streams.
pub struct EventBus {
    tx: broadcast::Sender<ReferralEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    ///
    /// Recommended: [`crate::defaults::EVENT_BUS_CAPACITY`] for production,
    /// 32 for tests.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers.
    ///
    /// If there are no active subscribers, the event is silently dropped.
    pub fn emit(&self, event: ReferralEvent) {
        tracing::debug!(
            event_type = event.event_type(),
            request_id = %event.request_id(),
            subscriber_count = self.tx.receiver_count(),
            "EventBus emit"
        );
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events. Each subscriber gets its own independent
    /// stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ReferralEvent> {
        self.tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::defaults::EVENT_BUS_CAPACITY)
    }
}
