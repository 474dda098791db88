use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key identifying a criterion within a position (e.g. `years_experience`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(pub String);

impl CriterionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reporting group for a criterion.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    #[default]
    Core,
    Supplementary,
}

impl CriterionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            CriterionCategory::Core => "core",
            CriterionCategory::Supplementary => "supplementary",
        }
    }
}

/// Criterion record as maintained by position management.
///
/// `data_type` and `config` are kept raw here; they are only interpreted when a
/// [`PositionSnapshot`](super::PositionSnapshot) is taken, so that one malformed criterion
/// can never prevent the rest of the position from being scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionDefinition {
    pub id: CriterionId,
    pub name: String,
    #[serde(default)]
    pub category: CriterionCategory,
    pub data_type: String,
    pub weight: f64,
    #[serde(default = "empty_config")]
    pub config: serde_json::Value,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn empty_config() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Position definition handed to the engine: ordered criteria and a pass threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub threshold_percentage: Option<f64>,
    #[serde(default)]
    pub criteria: Vec<CriterionDefinition>,
}

/// Typed raw value produced by the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl ExtractedValue {
    /// `true` for values that carry no information (blank text, empty lists).
    pub fn is_blank(&self) -> bool {
        match self {
            ExtractedValue::Text(text) => text.trim().is_empty(),
            ExtractedValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
            ExtractedValue::Boolean(_) | ExtractedValue::Number(_) => false,
        }
    }
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedValue::Boolean(value) => write!(f, "{value}"),
            ExtractedValue::Number(value) => write!(f, "{value}"),
            ExtractedValue::Text(text) => f.write_str(text),
            ExtractedValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Field names the extraction prompt emits for commonly configured criterion keys.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("years_experience", "work_experience_years"),
    ("experience_years", "work_experience_years"),
    ("education", "education_level"),
    ("education_degree", "education_level"),
    ("field_of_study", "education_field"),
    ("job_title", "last_job_title"),
    ("company", "last_company"),
    ("stability", "job_stability_months"),
    ("industry", "industry_type"),
    ("responsibility", "responsibility_level"),
    ("sepidar", "sepidar_skill"),
    ("excel", "excel_skill"),
    ("office", "office_skill"),
    ("english", "english_level"),
    ("financial_reports", "financial_reports_experience"),
    ("cost_calculation", "cost_calculation_experience"),
    ("warehouse", "warehouse_experience"),
    ("organization", "organization_type"),
    ("software", "software_skills"),
];

/// Extracted values for one candidate, keyed by extraction field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateValues {
    values: BTreeMap<String, Option<ExtractedValue>>,
}

impl CandidateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ExtractedValue) {
        self.values.insert(key.into(), Some(value));
    }

    pub fn with(mut self, key: impl Into<String>, value: ExtractedValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve the value for a criterion: the exact key first, then the known extraction
    /// alias, then the first field (in key order) whose name contains the criterion key or
    /// is contained in it, ignoring case. Nulls and blank values count as absent.
    pub fn lookup(&self, id: &CriterionId) -> Option<&ExtractedValue> {
        let key = id.as_str().to_lowercase();
        self.present(id.as_str())
            .or_else(|| {
                KEY_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == key)
                    .and_then(|(_, field)| self.present(field))
            })
            .or_else(|| self.partial_match(&key))
    }

    fn partial_match(&self, key: &str) -> Option<&ExtractedValue> {
        if key.is_empty() {
            return None;
        }
        self.values.iter().find_map(|(field, value)| {
            let field = field.to_lowercase();
            if field.is_empty() || !(field.contains(key) || key.contains(field.as_str())) {
                return None;
            }
            value.as_ref().filter(|value| !value.is_blank())
        })
    }

    fn present(&self, key: &str) -> Option<&ExtractedValue> {
        self.values
            .get(key)
            .and_then(Option::as_ref)
            .filter(|value| !value.is_blank())
    }
}

impl FromIterator<(String, ExtractedValue)> for CandidateValues {
    fn from_iter<T: IntoIterator<Item = (String, ExtractedValue)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key, Some(value)))
                .collect(),
        }
    }
}

/// One candidate's extracted values tagged with an identifier for batch runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSubmission {
    pub candidate_id: String,
    pub values: CandidateValues,
}
