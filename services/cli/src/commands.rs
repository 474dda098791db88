use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use talent_radar::error::AppError;
use talent_radar::workflows::screening::{
    CandidateCsvImporter, CandidateEvaluation, CriterionConfigIssue, Evaluation,
    PositionSnapshot, QualificationStatus, ScreeningEngine,
};
use tracing::info;

use crate::infra::{load_candidate, load_position};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Position definition (JSON)
    #[arg(long)]
    pub(crate) position: PathBuf,
    /// Extracted candidate values (JSON object)
    #[arg(long)]
    pub(crate) candidate: PathBuf,
    /// Print the full evaluation as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Position definition (JSON)
    #[arg(long)]
    pub(crate) position: PathBuf,
    /// CSV export with a candidate_id column and one column per extraction field
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Print the batch report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Position definition (JSON)
    #[arg(long)]
    pub(crate) position: PathBuf,
    /// Print configuration issues as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(engine: &ScreeningEngine, args: ScoreArgs) -> Result<(), AppError> {
    println!("{}", score_report(engine, &args)?);
    Ok(())
}

pub(crate) fn run_batch(engine: &ScreeningEngine, args: BatchArgs) -> Result<(), AppError> {
    println!("{}", batch_report(engine, &args, Utc::now())?);
    Ok(())
}

pub(crate) fn run_validate(engine: &ScreeningEngine, args: ValidateArgs) -> Result<(), AppError> {
    println!("{}", validation_report(engine, &args)?);
    Ok(())
}

fn score_report(engine: &ScreeningEngine, args: &ScoreArgs) -> Result<String, AppError> {
    let position = load_position(&args.position)?;
    let values = load_candidate(&args.candidate)?;
    let snapshot = engine.snapshot(&position);
    let evaluation = engine.score(&snapshot, &values);

    if args.json {
        Ok(serde_json::to_string_pretty(&evaluation)?)
    } else {
        Ok(render_evaluation(&snapshot, &evaluation))
    }
}

/// Batch output; the generation stamp sits outside the evaluations themselves.
#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    position_id: &'a str,
    title: &'a str,
    threshold_percentage: f64,
    generated_at: DateTime<Utc>,
    qualified: usize,
    rejected: usize,
    candidates: &'a [CandidateEvaluation],
}

fn batch_report(
    engine: &ScreeningEngine,
    args: &BatchArgs,
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let position = load_position(&args.position)?;
    let submissions = CandidateCsvImporter::from_path(&args.candidates)?;
    let snapshot = engine.snapshot(&position);
    let evaluations = engine.score_batch(&snapshot, &submissions);

    let qualified = evaluations
        .iter()
        .filter(|candidate| {
            candidate.evaluation.aggregate.status == QualificationStatus::Qualified
        })
        .count();
    let report = BatchReport {
        position_id: snapshot.position_id(),
        title: snapshot.title(),
        threshold_percentage: snapshot.threshold_percentage(),
        generated_at,
        qualified,
        rejected: evaluations.len() - qualified,
        candidates: &evaluations,
    };
    info!(
        position = report.position_id,
        qualified = report.qualified,
        rejected = report.rejected,
        "batch report ready"
    );

    if args.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut lines = vec![
        format!("{} ({})", report.title, report.position_id),
        format!(
            "Generated {} | threshold {:.2}% | {} qualified, {} rejected",
            report.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.threshold_percentage,
            report.qualified,
            report.rejected
        ),
    ];
    lines.extend(report.candidates.iter().map(|candidate| {
        let aggregate = &candidate.evaluation.aggregate;
        format!(
            "- {}: {:.2}/{:.2} ({:.2}%) {}",
            candidate.candidate_id,
            aggregate.total_score,
            aggregate.max_possible_score,
            aggregate.percentage,
            aggregate.status.label()
        )
    }));
    Ok(lines.join("\n"))
}

fn validation_report(engine: &ScreeningEngine, args: &ValidateArgs) -> Result<String, AppError> {
    let position = load_position(&args.position)?;
    let snapshot = engine.snapshot(&position);
    let issues = snapshot.config_issues();

    if args.json {
        return Ok(serde_json::to_string_pretty(&issues)?);
    }
    Ok(render_validation(&snapshot, &issues))
}

fn render_validation(snapshot: &PositionSnapshot, issues: &[CriterionConfigIssue]) -> String {
    let mut lines = vec![format!(
        "{} ({}): {} criteria, total weight {:.2}, threshold {:.2}%",
        snapshot.title(),
        snapshot.position_id(),
        snapshot.criteria().len(),
        snapshot.total_weight(),
        snapshot.threshold_percentage()
    )];
    if issues.is_empty() {
        lines.push("All criteria can be scored.".to_string());
    } else {
        lines.push("Criteria that will score zero:".to_string());
        lines.extend(issues.iter().map(|issue| {
            format!(
                "- {} [{}] {}: {}",
                issue.criterion_name, issue.criterion_id, issue.data_type, issue.reason
            )
        }));
    }
    lines.join("\n")
}

pub(crate) fn render_evaluation(snapshot: &PositionSnapshot, evaluation: &Evaluation) -> String {
    let mut lines = vec![format!("{} ({})", snapshot.title(), snapshot.position_id())];

    for (category, results) in evaluation.by_category() {
        lines.push(String::new());
        lines.push(format!("{} criteria", category.label()));
        lines.extend(results.into_iter().map(|result| {
            format!(
                "- {}: {:.2}/{:.2} | {}",
                result.criterion_name, result.awarded_points, result.max_points, result.reasoning
            )
        }));
    }

    let aggregate = &evaluation.aggregate;
    lines.push(String::new());
    lines.push(format!(
        "Total {:.2}/{:.2} ({:.2}%) vs threshold {:.2}%: {}",
        aggregate.total_score,
        aggregate.max_possible_score,
        aggregate.percentage,
        aggregate.threshold_percentage,
        aggregate.status.label()
    ));
    lines.push(aggregate.overall_assessment.clone());
    lines.join("\n")
}
