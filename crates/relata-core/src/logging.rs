//! Structured logging schema and field name constants for relata.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "store", "analytics", "outreach"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "create", "send", "record_response", "compute_report"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Referral request UUID being operated on.
pub const REQUEST_ID: &str = "request_id";

/// Contact UUID a request or report row refers to.
pub const CONTACT_ID: &str = "contact_id";

/// Job opportunity UUID a request refers to.
pub const JOB_ID: &str = "job_id";

/// Template UUID driving personalization.
pub const TEMPLATE_ID: &str = "template_id";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of requests processed by an aggregation pass.
pub const REQUEST_COUNT: &str = "request_count";

/// Number of contacts in a computed report.
pub const CONTACT_COUNT: &str = "contact_count";

/// Byte length of a composed or personalized message.
pub const MESSAGE_LEN: &str = "message_len";

// ─── Outreach fields ───────────────────────────────────────────────────────

/// Model name used by the composer backend.
pub const MODEL: &str = "model";

/// Whether the deterministic substitution fallback was applied.
pub const FALLBACK: &str = "fallback";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_unique() {
        let fields = [
            SUBSYSTEM,
            OPERATION,
            REQUEST_ID,
            CONTACT_ID,
            JOB_ID,
            TEMPLATE_ID,
            DURATION_MS,
            REQUEST_COUNT,
            CONTACT_COUNT,
            MESSAGE_LEN,
            MODEL,
            FALLBACK,
            SUCCESS,
            ERROR_MSG,
        ];
        let mut deduped: Vec<&str> = fields.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), fields.len());
    }
}
