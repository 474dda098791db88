use serde_json::{json, Value};

use crate::workflows::screening::{
    CandidateValues, Criterion, CriterionCategory, CriterionDefinition, CriterionId,
    EvaluationConfig, ExtractedValue, PositionDefinition, ScreeningEngine,
};

pub(super) fn definition(
    id: &str,
    data_type: &str,
    weight: f64,
    config: Value,
) -> CriterionDefinition {
    CriterionDefinition {
        id: CriterionId::new(id),
        name: id.replace('_', " "),
        category: CriterionCategory::Core,
        data_type: data_type.to_string(),
        weight,
        config,
        is_required: false,
        display_order: 0,
    }
}

pub(super) fn criterion(id: &str, data_type: &str, weight: f64, config: Value) -> Criterion {
    Criterion::from_definition(&definition(id, data_type, weight, config))
}

/// Years-of-experience tiers as configured for the accounting positions, listed top-down.
pub(super) fn experience_config() -> Value {
    json!({
        "ranges": [
            {"min": 10, "max": 999, "score_multiplier": 1.0, "label": "Expert"},
            {"min": 5, "max": 9, "score_multiplier": 0.85, "label": "Senior"},
            {"min": 2, "max": 4, "score_multiplier": 0.6, "label": "Qualified"},
            {"min": 0, "max": 1, "score_multiplier": 0.15, "label": "Junior"}
        ],
        "unit": "years"
    })
}

pub(super) fn skill_levels_config() -> Value {
    json!({
        "levels": {"Advanced": 1.0, "Intermediate": 0.65, "Basic": 0.2, "None": 0.0},
        "min_required": "Intermediate"
    })
}

pub(super) fn keyword_config(match_type: &str) -> Value {
    json!({
        "required_keywords": ["Accounting", "Finance", "Excel"],
        "match_type": match_type
    })
}

pub(super) fn number(value: f64) -> ExtractedValue {
    ExtractedValue::Number(value)
}

pub(super) fn text(value: &str) -> ExtractedValue {
    ExtractedValue::Text(value.to_string())
}

pub(super) fn position(
    threshold: Option<f64>,
    criteria: Vec<CriterionDefinition>,
) -> PositionDefinition {
    PositionDefinition {
        id: "pos-accountant".to_string(),
        title: "Senior Accountant".to_string(),
        threshold_percentage: threshold,
        criteria,
    }
}

pub(super) fn engine() -> ScreeningEngine {
    ScreeningEngine::new(EvaluationConfig::default())
}

pub(super) fn values(entries: &[(&str, ExtractedValue)]) -> CandidateValues {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
