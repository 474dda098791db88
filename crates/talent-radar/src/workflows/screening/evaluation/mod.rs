mod config;
mod policy;
mod rules;

pub use config::EvaluationConfig;
pub use policy::{decide, QualificationStatus};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::criteria::{Criterion, PositionSnapshot, ScoringRule};
use super::domain::{
    CandidateValues, CriterionCategory, CriterionId, ExtractedValue, PositionDefinition,
};
use rules::RuleOutcome;

/// Why a criterion could not be scored. Always local to that criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ScoringIssue {
    #[error("invalid criterion config: {0}")]
    InvalidCriterionConfig(String),
    #[error("unsupported criterion type '{0}'")]
    UnsupportedCriterionType(String),
    #[error("value parse error: {0}")]
    ValueParseError(String),
    #[error("missing value: not found in extracted data")]
    MissingValue,
    #[error("unrecognized level '{0}'")]
    UnrecognizedLevel(String),
}

impl ScoringIssue {
    pub const fn code(&self) -> &'static str {
        match self {
            ScoringIssue::InvalidCriterionConfig(_) => "invalid_criterion_config",
            ScoringIssue::UnsupportedCriterionType(_) => "unsupported_criterion_type",
            ScoringIssue::ValueParseError(_) => "value_parse_error",
            ScoringIssue::MissingValue => "missing_value",
            ScoringIssue::UnrecognizedLevel(_) => "unrecognized_level",
        }
    }
}

/// Outcome for a single criterion, kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub criterion_id: CriterionId,
    pub criterion_name: String,
    pub category: CriterionCategory,
    pub required: bool,
    pub awarded_points: f64,
    pub max_points: f64,
    pub multiplier: f64,
    pub extracted_value: Option<ExtractedValue>,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<ScoringIssue>,
}

impl ScoreResult {
    /// Share of the available points that was awarded; zero-weight criteria report 0.
    pub fn ratio(&self) -> f64 {
        if self.max_points > 0.0 {
            self.awarded_points / self.max_points
        } else {
            0.0
        }
    }

    pub fn is_weak(&self, weak_ratio: f64) -> bool {
        self.max_points > 0.0 && self.ratio() < weak_ratio
    }
}

/// Score one criterion. Pure; never panics and never fails the batch.
pub fn evaluate_criterion(criterion: &Criterion, value: Option<&ExtractedValue>) -> ScoreResult {
    let value = value.filter(|value| !value.is_blank());

    let outcome = match (&criterion.rule, value) {
        (ScoringRule::Misconfigured { reason, .. }, _) => {
            Err(ScoringIssue::InvalidCriterionConfig(reason.clone()))
        }
        (ScoringRule::Unsupported { data_type }, _) => {
            Err(ScoringIssue::UnsupportedCriterionType(data_type.clone()))
        }
        (_, None) => Err(ScoringIssue::MissingValue),
        (ScoringRule::RangedNumber(rule), Some(value)) => rules::score_range(rule, value),
        (ScoringRule::GradedCategory(rule), Some(value)) => rules::score_category(rule, value),
        (ScoringRule::Boolean(rule), Some(value)) => rules::score_boolean(rule, value),
        (ScoringRule::TextMatch(rule), Some(value)) => rules::score_keywords(rule, value),
    };

    let weight = criterion.weight;
    let (awarded_points, multiplier, reasoning, issue) = match outcome {
        Ok(RuleOutcome {
            multiplier,
            reasoning,
        }) => {
            let multiplier = multiplier.clamp(0.0, 1.0);
            let awarded = if weight > 0.0 {
                (weight * multiplier).clamp(0.0, weight)
            } else {
                0.0
            };
            (awarded, multiplier, reasoning, None)
        }
        Err(issue) => (0.0, 0.0, issue.to_string(), Some(issue)),
    };

    debug!(
        criterion = %criterion.id,
        awarded_points,
        max_points = weight,
        issue = issue.as_ref().map(ScoringIssue::code),
        "criterion scored"
    );

    ScoreResult {
        criterion_id: criterion.id.clone(),
        criterion_name: criterion.name.clone(),
        category: criterion.category,
        required: criterion.is_required,
        awarded_points,
        max_points: weight,
        multiplier,
        extracted_value: value.cloned(),
        reasoning,
        issue,
    }
}

/// Aggregate outcome for one candidate against one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage: f64,
    pub threshold_percentage: f64,
    pub status: QualificationStatus,
    pub overall_assessment: String,
}

/// Per-criterion results (core first, display order within a group) plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub position_id: String,
    pub results: Vec<ScoreResult>,
    pub aggregate: AggregateScore,
}

impl Evaluation {
    pub fn by_category(&self) -> BTreeMap<CriterionCategory, Vec<&ScoreResult>> {
        let mut groups: BTreeMap<CriterionCategory, Vec<&ScoreResult>> = BTreeMap::new();
        for result in &self.results {
            groups.entry(result.category).or_default().push(result);
        }
        groups
    }

    pub fn result(&self, id: &CriterionId) -> Option<&ScoreResult> {
        self.results.iter().find(|result| &result.criterion_id == id)
    }

    pub fn issues(&self) -> impl Iterator<Item = (&CriterionId, &ScoringIssue)> {
        self.results.iter().filter_map(|result| {
            result
                .issue
                .as_ref()
                .map(|issue| (&result.criterion_id, issue))
        })
    }
}

/// Stateless engine applying the rubric configuration to position snapshots.
#[derive(Debug, Clone, Default)]
pub struct ScreeningEngine {
    config: EvaluationConfig,
}

impl ScreeningEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Freeze a position definition for scoring.
    pub fn snapshot(&self, position: &PositionDefinition) -> PositionSnapshot {
        PositionSnapshot::freeze(position, self.config.default_threshold_percentage)
    }

    pub fn score(&self, snapshot: &PositionSnapshot, values: &CandidateValues) -> Evaluation {
        let mut results: Vec<ScoreResult> = snapshot
            .criteria()
            .iter()
            .map(|criterion| evaluate_criterion(criterion, values.lookup(&criterion.id)))
            .collect();
        results.sort_by_key(|result| result.category);

        let threshold_percentage = snapshot.threshold_percentage();
        let totals = policy::aggregate(&results);
        let status = policy::qualify(&totals, threshold_percentage);
        let overall_assessment =
            policy::assess(&results, &totals, threshold_percentage, status, &self.config);

        info!(
            position = snapshot.position_id(),
            total_score = totals.total_score,
            max_possible_score = totals.max_possible_score,
            percentage = totals.percentage,
            status = status.label(),
            "candidate evaluated"
        );

        Evaluation {
            position_id: snapshot.position_id().to_string(),
            results,
            aggregate: AggregateScore {
                total_score: totals.total_score,
                max_possible_score: totals.max_possible_score,
                percentage: totals.percentage,
                threshold_percentage,
                status,
                overall_assessment,
            },
        }
    }
}
