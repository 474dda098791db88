use serde::{Deserialize, Serialize};

use super::config::EvaluationConfig;
use super::ScoreResult;

/// Binary qualification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualificationStatus {
    Qualified,
    Rejected,
}

impl QualificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            QualificationStatus::Qualified => "Qualified",
            QualificationStatus::Rejected => "Rejected",
        }
    }
}

/// Inclusive threshold comparison.
pub fn decide(percentage: f64, threshold_percentage: f64) -> QualificationStatus {
    if percentage >= threshold_percentage {
        QualificationStatus::Qualified
    } else {
        QualificationStatus::Rejected
    }
}

pub(crate) struct Totals {
    pub total_score: f64,
    pub max_possible_score: f64,
    /// Unrounded share of the maximum; decisions and margins are taken from this.
    pub raw_percentage: f64,
    /// Two-decimal figure for reporting only.
    pub percentage: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum every result, failed ones included, so the maximum always equals the total weight.
pub(crate) fn aggregate(results: &[ScoreResult]) -> Totals {
    let total_score: f64 = results.iter().map(|result| result.awarded_points).sum();
    let max_possible_score: f64 = results.iter().map(|result| result.max_points).sum();
    let raw_percentage = if max_possible_score > 0.0 {
        total_score * 100.0 / max_possible_score
    } else {
        0.0
    };

    Totals {
        total_score,
        max_possible_score,
        raw_percentage,
        percentage: round2(raw_percentage),
    }
}

/// Status for a run. A position without any weight can never qualify.
pub(crate) fn qualify(totals: &Totals, threshold_percentage: f64) -> QualificationStatus {
    if totals.max_possible_score > 0.0 {
        decide(totals.raw_percentage, threshold_percentage)
    } else {
        QualificationStatus::Rejected
    }
}

fn criteria_noun(count: usize) -> &'static str {
    if count == 1 {
        "criterion"
    } else {
        "criteria"
    }
}

/// Narrative summary: headline, signed margin, strengths, and every weak criterion by name.
pub(crate) fn assess(
    results: &[ScoreResult],
    totals: &Totals,
    threshold_percentage: f64,
    status: QualificationStatus,
    config: &EvaluationConfig,
) -> String {
    if totals.max_possible_score <= 0.0 {
        return "No weighted criteria configured for this position; candidate cannot qualify."
            .to_string();
    }

    let percentage = totals.raw_percentage;
    let margin = percentage - threshold_percentage;
    let mut parts = Vec::new();

    parts.push(match status {
        QualificationStatus::Qualified if percentage >= 90.0 => {
            "Excellent candidate: exceeds requirements significantly.".to_string()
        }
        QualificationStatus::Qualified if percentage >= 80.0 => {
            "Strong candidate: meets all key requirements.".to_string()
        }
        QualificationStatus::Qualified => {
            "Qualified candidate: meets minimum requirements.".to_string()
        }
        QualificationStatus::Rejected => {
            format!("Below threshold by {:.2} percentage points.", -margin)
        }
    });

    parts.push(format!(
        "Scored {percentage:.2}% against a {threshold_percentage:.2}% threshold ({margin:+.2} points)."
    ));

    let strengths = results
        .iter()
        .filter(|result| {
            result.max_points > 0.0 && result.multiplier >= config.strong_multiplier
        })
        .count();
    if strengths > 0 {
        parts.push(format!(
            "Strengths: {strengths} {} at or above {:.0}% credit.",
            criteria_noun(strengths),
            config.strong_multiplier * 100.0
        ));
    }

    let weak: Vec<String> = results
        .iter()
        .filter(|result| result.is_weak(config.weak_ratio))
        .map(|result| {
            format!(
                "{} ({:.2}/{:.2})",
                result.criterion_name, result.awarded_points, result.max_points
            )
        })
        .collect();
    if !weak.is_empty() {
        parts.push(format!(
            "Below {:.0}% of available points: {}.",
            config.weak_ratio * 100.0,
            weak.join(", ")
        ));
    }

    let unmet_required: Vec<&str> = results
        .iter()
        .filter(|result| {
            result.required && result.max_points > 0.0 && result.awarded_points <= 0.0
        })
        .map(|result| result.criterion_name.as_str())
        .collect();
    if !unmet_required.is_empty() {
        parts.push(format!(
            "Required {} without credit: {}.",
            criteria_noun(unmet_required.len()),
            unmet_required.join(", ")
        ));
    }

    parts.join(" ")
}
