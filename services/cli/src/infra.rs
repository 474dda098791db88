use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use talent_radar::error::AppError;
use talent_radar::workflows::screening::{CandidateValues, PositionDefinition};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub(crate) fn load_position(path: &Path) -> Result<PositionDefinition, AppError> {
    read_json(path)
}

/// Candidate files are a flat object of extraction field to value.
pub(crate) fn load_candidate(path: &Path) -> Result<CandidateValues, AppError> {
    read_json(path)
}
