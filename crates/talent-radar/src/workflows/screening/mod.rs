//! Graduated criterion scoring and qualification.
//!
//! A [`PositionDefinition`] is frozen into a [`PositionSnapshot`] once per invocation; each
//! candidate's [`CandidateValues`] are then scored criterion by criterion, aggregated into a
//! weighted percentage, compared against the position threshold and summarised in prose.
//! Scoring problems are recorded on the affected [`ScoreResult`] and never abort a run.

pub mod batch;
pub mod criteria;
pub mod domain;
pub(crate) mod evaluation;

#[cfg(test)]
mod tests;

pub use batch::{CandidateCsvImporter, CandidateEvaluation, CandidateImportError};
pub use criteria::{
    BooleanRule, CategoryRule, Criterion, CriterionConfigIssue, KeywordRule, MatchType,
    PositionSnapshot, RangeBucket, RangeRule, ScoringRule,
};
pub use domain::{
    CandidateSubmission, CandidateValues, CriterionCategory, CriterionDefinition, CriterionId,
    ExtractedValue, PositionDefinition,
};
pub use evaluation::{
    decide, evaluate_criterion, AggregateScore, Evaluation, EvaluationConfig,
    QualificationStatus, ScoreResult, ScoringIssue, ScreeningEngine,
};
