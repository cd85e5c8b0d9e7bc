//! # relata-analytics
//!
//! Pure relationship analytics over referral request collections.
//!
//! This crate is a stateless aggregation layer: it takes an explicit
//! collection of [`relata_core::ReferralRequest`]s and returns a read-only
//! report. No side effects, no I/O, no ambient state. Per-contact statistics
//! have no ordering dependency between contacts, so callers may shard the
//! input by contact and merge if they ever need to parallelize.

pub mod grouping;
pub mod report;
pub mod score;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

pub use grouping::group_by_job;
pub use report::{compute_report, compute_report_with};
pub use score::{impact_score, reciprocity_score, ScoringConfig};
pub use stats::collect_stats;
