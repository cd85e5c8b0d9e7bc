//! Counting pass over a collection of referral requests.

use relata_core::{ReferralOutcome, ReferralRequest, ReferralStats};

/// Compute counts and rates over an iterator of requests.
///
/// Both rate divisions are guarded: a collection where nothing was ever sent
/// yields 0 for both rates rather than NaN.
pub fn collect_stats<'a, I>(requests: I) -> ReferralStats
where
    I: IntoIterator<Item = &'a ReferralRequest>,
{
    let mut total = 0;
    let mut sent = 0;
    let mut successful = 0;
    let mut unsuccessful = 0;
    let mut pending = 0;
    let mut responded = 0;

    for req in requests {
        total += 1;
        if req.has_been_sent() {
            sent += 1;
        }
        match req.outcome {
            ReferralOutcome::Successful => successful += 1,
            ReferralOutcome::Unsuccessful => unsuccessful += 1,
            ReferralOutcome::Unknown => {}
        }
        if req.is_pending() {
            pending += 1;
        }
        if req.responded() {
            responded += 1;
        }
    }

    let success_rate = if sent == 0 {
        0.0
    } else {
        successful as f64 / sent as f64 * 100.0
    };
    let response_rate = if sent == 0 {
        0.0
    } else {
        responded as f64 / sent as f64 * 100.0
    };

    ReferralStats {
        total,
        sent,
        successful,
        unsuccessful,
        pending,
        success_rate,
        response_rate,
    }
}
