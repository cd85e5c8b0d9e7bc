//! Report computation: overall and per-contact statistics.
//!
//! `compute_report` is a pure function over an explicit collection argument;
//! callers own fetching the current collection and re-invoking it after any
//! mutation. Calling it twice on the same input yields identical output.

use std::collections::HashMap;

use uuid::Uuid;

use relata_core::{
    AnalyticsReport, ContactReciprocityReport, Error, ReferralRequest, Result,
};

use crate::score::{reciprocity_score, ScoringConfig};
use crate::stats::collect_stats;

/// Compute the analytics report with the default scoring configuration.
pub fn compute_report(requests: &[ReferralRequest]) -> Result<AnalyticsReport> {
    compute_report_with(requests, &ScoringConfig::default())
}

/// Compute the analytics report with an explicit scoring configuration.
///
/// Fails fast with `Validation` when the input collection violates the
/// structural invariants (a malformed record would silently skew every rate
/// downstream). The empty collection is valid and yields all-zero statistics.
pub fn compute_report_with(
    requests: &[ReferralRequest],
    config: &ScoringConfig,
) -> Result<AnalyticsReport> {
    validate(requests)?;

    let overall = collect_stats(requests);

    // Group by contact, preserving first-seen order for stable tie-breaks.
    let mut order: Vec<Uuid> = Vec::new();
    let mut by_contact: HashMap<Uuid, Vec<&ReferralRequest>> = HashMap::new();
    for req in requests {
        by_contact
            .entry(req.contact_id)
            .or_insert_with(|| {
                order.push(req.contact_id);
                Vec::new()
            })
            .push(req);
    }

    let mut contacts: Vec<ContactReciprocityReport> = order
        .into_iter()
        .map(|contact_id| {
            let group = &by_contact[&contact_id];
            let stats = collect_stats(group.iter().copied());
            let gratitude_expressed = group.iter().filter(|r| r.gratitude_expressed).count();
            let relationship_impact: Vec<String> = group
                .iter()
                .filter_map(|r| r.relationship_impact.clone())
                .filter(|note| !note.is_empty())
                .collect();
            let reciprocity_score =
                reciprocity_score(&stats, gratitude_expressed, &relationship_impact, config);

            ContactReciprocityReport {
                contact_id,
                stats,
                gratitude_expressed,
                relationship_impact,
                reciprocity_score,
            }
        })
        .collect();

    // Descending score, ties by descending total; sort_by is stable so
    // remaining ties keep input order.
    contacts.sort_by(|a, b| {
        b.reciprocity_score
            .cmp(&a.reciprocity_score)
            .then(b.stats.total.cmp(&a.stats.total))
    });

    tracing::debug!(
        request_count = requests.len(),
        contact_count = contacts.len(),
        "Computed analytics report"
    );

    Ok(AnalyticsReport { overall, contacts })
}

/// Reject collections that violate the record invariants.
fn validate(requests: &[ReferralRequest]) -> Result<()> {
    for req in requests {
        if let Some(violation) = req.invariant_violation() {
            return Err(Error::Validation(violation));
        }
    }
    Ok(())
}
