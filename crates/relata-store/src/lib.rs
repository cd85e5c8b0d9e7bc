//! # relata-store
//!
//! Referral request store and lifecycle state machine.
//!
//! The store owns the canonical representation of a referral request and
//! enforces its legal transitions; it never computes statistics. Hosts fetch
//! the current collection via [`ReferralRequestStore::list`] and hand it,
//! unmodified, to `relata-analytics`.

pub mod compose;
pub mod directory;
pub mod store;
pub mod templates;

// Re-export core types
pub use relata_core::*;

pub use compose::{default_message, substitute_tokens};
pub use directory::{InMemoryContactDirectory, InMemoryJobBoard};
pub use store::InMemoryReferralStore;
pub use templates::InMemoryTemplateCatalog;
