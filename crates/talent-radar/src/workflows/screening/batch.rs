use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use super::criteria::PositionSnapshot;
use super::domain::{CandidateSubmission, CandidateValues, ExtractedValue};
use super::evaluation::{Evaluation, ScreeningEngine};

/// Evaluation of one candidate within a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub candidate_id: String,
    pub evaluation: Evaluation,
}

impl ScreeningEngine {
    /// Score many candidates against one snapshot in parallel. Output order matches input
    /// order and every evaluation is independent of the others.
    pub fn score_batch(
        &self,
        snapshot: &PositionSnapshot,
        submissions: &[CandidateSubmission],
    ) -> Vec<CandidateEvaluation> {
        let run = || {
            submissions
                .par_iter()
                .map(|submission| {
                    let span = info_span!("candidate", id = %submission.candidate_id);
                    CandidateEvaluation {
                        candidate_id: submission.candidate_id.clone(),
                        evaluation: span.in_scope(|| self.score(snapshot, &submission.values)),
                    }
                })
                .collect::<Vec<_>>()
        };

        let evaluations = match self.config().worker_threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(run),
                Err(err) => {
                    warn!(
                        threads,
                        error = %err,
                        "dedicated scoring pool unavailable, using global pool"
                    );
                    run()
                }
            },
            None => run(),
        };

        info!(
            position = snapshot.position_id(),
            candidates = evaluations.len(),
            "batch scored"
        );
        evaluations
    }
}

const CANDIDATE_ID_COLUMN: &str = "candidate_id";

#[derive(Debug)]
pub enum CandidateImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingIdColumn,
    BlankCandidateId { row: usize },
    DuplicateCandidate(String),
}

impl std::fmt::Display for CandidateImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateImportError::Io(err) => write!(f, "failed to read candidate export: {}", err),
            CandidateImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
            CandidateImportError::MissingIdColumn => {
                write!(f, "candidate CSV is missing the '{CANDIDATE_ID_COLUMN}' column")
            }
            CandidateImportError::BlankCandidateId { row } => {
                write!(f, "candidate CSV row {row} has a blank candidate id")
            }
            CandidateImportError::DuplicateCandidate(id) => {
                write!(f, "candidate '{id}' appears more than once")
            }
        }
    }
}

impl std::error::Error for CandidateImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CandidateImportError::Io(err) => Some(err),
            CandidateImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CandidateImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CandidateImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads extracted values for many candidates from a CSV export: one `candidate_id` column
/// plus one column per extraction field.
pub struct CandidateCsvImporter;

impl CandidateCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<CandidateSubmission>, CandidateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<CandidateSubmission>, CandidateImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let id_index = headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(CANDIDATE_ID_COLUMN))
            .ok_or(CandidateImportError::MissingIdColumn)?;

        let mut seen = HashSet::new();
        let mut submissions = Vec::new();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = index + 2;
            let candidate_id = record.get(id_index).unwrap_or_default().to_string();
            if candidate_id.is_empty() {
                return Err(CandidateImportError::BlankCandidateId { row });
            }
            if !seen.insert(candidate_id.clone()) {
                return Err(CandidateImportError::DuplicateCandidate(candidate_id));
            }

            let mut values = CandidateValues::new();
            for (column, (header, cell)) in headers.iter().zip(record.iter()).enumerate() {
                if column == id_index {
                    continue;
                }
                if let Some(value) = parse_cell(cell) {
                    values.insert(header, value);
                }
            }

            submissions.push(CandidateSubmission {
                candidate_id,
                values,
            });
        }

        Ok(submissions)
    }
}

fn parse_cell(cell: &str) -> Option<ExtractedValue> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if cell.eq_ignore_ascii_case("true") {
        return Some(ExtractedValue::Boolean(true));
    }
    if cell.eq_ignore_ascii_case("false") {
        return Some(ExtractedValue::Boolean(false));
    }
    if let Ok(number) = cell.parse::<f64>() {
        if number.is_finite() {
            return Some(ExtractedValue::Number(number));
        }
    }
    if cell.contains(';') {
        let items: Vec<String> = cell
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        return Some(ExtractedValue::List(items));
    }
    Some(ExtractedValue::Text(cell.to_string()))
}
