//! Reciprocity scoring: a weighted 0-100 composite per contact.
//!
//! The weights are product-tuned heuristics carried over for compatibility.
//! They live in [`relata_core::defaults`] and flow through [`ScoringConfig`]
//! so they can be revisited without touching the formula.

use relata_core::{defaults, ReferralStats};

/// Configuration for the reciprocity score.
///
/// Defaults reproduce the shipped weighting exactly:
/// 0.30 response + 0.40 success + 0.20 gratitude + 0.10 impact.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub response_weight: f64,
    pub success_weight: f64,
    pub gratitude_weight: f64,
    pub impact_weight: f64,
    /// Lowercase substrings marking an impact note as positive.
    pub positive_keywords: Vec<String>,
    /// Impact score used when no impact notes exist.
    pub neutral_impact_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            response_weight: defaults::SCORE_WEIGHT_RESPONSE,
            success_weight: defaults::SCORE_WEIGHT_SUCCESS,
            gratitude_weight: defaults::SCORE_WEIGHT_GRATITUDE,
            impact_weight: defaults::SCORE_WEIGHT_IMPACT,
            positive_keywords: defaults::POSITIVE_IMPACT_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            neutral_impact_score: defaults::NEUTRAL_IMPACT_SCORE,
        }
    }
}

/// Score the free-text impact notes of one contact.
///
/// Empty list scores neutral rather than zero, so silence is not penalized.
/// Otherwise: percentage of notes containing a positive keyword
/// (case-insensitive).
pub fn impact_score(impacts: &[String], config: &ScoringConfig) -> f64 {
    if impacts.is_empty() {
        return config.neutral_impact_score;
    }
    let positive = impacts
        .iter()
        .filter(|note| {
            let lowered = note.to_lowercase();
            config.positive_keywords.iter().any(|kw| lowered.contains(kw))
        })
        .count();
    100.0 * positive as f64 / impacts.len() as f64
}

/// Compute the composite reciprocity score for one contact.
///
/// Returns 0 when nothing was ever sent to the contact: with no outbound
/// request there is no signal to weigh.
pub fn reciprocity_score(
    stats: &ReferralStats,
    gratitude_expressed: usize,
    impacts: &[String],
    config: &ScoringConfig,
) -> u32 {
    if stats.sent == 0 {
        return 0;
    }

    let gratitude_rate = if stats.total == 0 {
        0.0
    } else {
        gratitude_expressed as f64 / stats.total as f64 * 100.0
    };

    let score = config.response_weight * stats.response_rate
        + config.success_weight * stats.success_rate
        + config.gratitude_weight * gratitude_rate
        + config.impact_weight * impact_score(impacts, config);

    score.clamp(0.0, 100.0).round() as u32
}
