//! Centralized default constants for the relata referral engine.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// RECIPROCITY SCORING
// =============================================================================

/// Weight of the response rate in the reciprocity score.
///
/// Responsiveness is the second-strongest signal of a reciprocal
/// relationship.
pub const SCORE_WEIGHT_RESPONSE: f64 = 0.30;

/// Weight of the success rate in the reciprocity score.
///
/// A delivered referral is the strongest signal, hence the largest weight.
pub const SCORE_WEIGHT_SUCCESS: f64 = 0.40;

/// Weight of the gratitude rate in the reciprocity score.
pub const SCORE_WEIGHT_GRATITUDE: f64 = 0.20;

/// Weight of the free-text impact signal; noisiest input, lowest weight.
pub const SCORE_WEIGHT_IMPACT: f64 = 0.10;

/// Keywords that mark a relationship-impact note as positive
/// (case-insensitive substring match).
pub const POSITIVE_IMPACT_KEYWORDS: &[&str] = &["positive", "improved", "strengthened"];

/// Impact score used when no impact notes exist at all.
///
/// Neutral rather than zero, so silence is not penalized.
pub const NEUTRAL_IMPACT_SCORE: f64 = 50.0;

// =============================================================================
// MESSAGE COMPOSITION
// =============================================================================

/// Fallback for a missing contact name in the default message.
pub const FALLBACK_CONTACT_NAME: &str = "there";

/// Fallback for a missing job title in the default message.
pub const FALLBACK_JOB_TITLE: &str = "the role";

/// Fallback for a missing job company in the default message.
pub const FALLBACK_JOB_COMPANY: &str = "the company";

/// Label for the job-less bucket in display grouping.
pub const UNASSIGNED_JOB_LABEL: &str = "Unassigned Job";

// =============================================================================
// PERSONALIZATION BACKEND
// =============================================================================

/// Default base URL for the composer generation service.
pub const COMPOSER_URL: &str = "http://127.0.0.1:11434";

/// Default generation model name.
pub const COMPOSER_MODEL: &str = "gpt-oss:20b";

/// Timeout for a single personalization call in seconds.
///
/// On timeout the store falls back to deterministic token substitution; it
/// never blocks a send indefinitely.
pub const PERSONALIZE_TIMEOUT_SECS: u64 = 20;

/// HTTP request timeout for the composer backend in seconds.
pub const COMPOSER_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// EVENTS
// =============================================================================

/// Default event bus broadcast channel capacity.
pub const EVENT_BUS_CAPACITY: usize = 256;
