use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{CriterionCategory, CriterionDefinition, CriterionId, PositionDefinition};

/// Typed scoring strategy for a criterion, parsed once when a position snapshot is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "config", rename_all = "snake_case")]
pub enum ScoringRule {
    RangedNumber(RangeRule),
    GradedCategory(CategoryRule),
    Boolean(BooleanRule),
    TextMatch(KeywordRule),
    /// Known type whose configuration could not be parsed or validated.
    Misconfigured { data_type: String, reason: String },
    /// Type tag the engine has no scorer for.
    Unsupported { data_type: String },
}

impl ScoringRule {
    /// Parse and validate a raw `(data_type, config)` pair. Never fails: problems are folded
    /// into [`ScoringRule::Misconfigured`] or [`ScoringRule::Unsupported`].
    pub fn from_definition(data_type: &str, config: &serde_json::Value) -> Self {
        let parsed = match data_type {
            "ranged_number" => parse::<RangeRule>(config)
                .and_then(RangeRule::validated)
                .map(Self::RangedNumber),
            "graded_category" => parse::<CategoryRule>(config)
                .and_then(CategoryRule::validated)
                .map(Self::GradedCategory),
            "boolean" => parse::<BooleanRule>(config)
                .and_then(BooleanRule::validated)
                .map(Self::Boolean),
            "text_match" => parse::<KeywordRule>(config)
                .and_then(KeywordRule::validated)
                .map(Self::TextMatch),
            other => {
                return Self::Unsupported {
                    data_type: other.to_string(),
                }
            }
        };

        parsed.unwrap_or_else(|reason| Self::Misconfigured {
            data_type: data_type.to_string(),
            reason,
        })
    }

    pub fn data_type(&self) -> &str {
        match self {
            ScoringRule::RangedNumber(_) => "ranged_number",
            ScoringRule::GradedCategory(_) => "graded_category",
            ScoringRule::Boolean(_) => "boolean",
            ScoringRule::TextMatch(_) => "text_match",
            ScoringRule::Misconfigured { data_type, .. }
            | ScoringRule::Unsupported { data_type } => data_type,
        }
    }

    pub fn is_scorable(&self) -> bool {
        !matches!(
            self,
            ScoringRule::Misconfigured { .. } | ScoringRule::Unsupported { .. }
        )
    }
}

fn parse<T: serde::de::DeserializeOwned>(config: &serde_json::Value) -> Result<T, String> {
    T::deserialize(config).map_err(|err| err.to_string())
}

fn check_multiplier(what: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{what} multiplier {value} must lie within [0, 1]"))
    }
}

/// Numeric sub-range with its own multiplier. `max = None` leaves the bucket unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBucket {
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(alias = "score_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub label: String,
}

impl RangeBucket {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }

    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }
}

/// Configuration for `ranged_number` criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    #[serde(rename = "ranges", alias = "buckets")]
    pub buckets: Vec<RangeBucket>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RangeRule {
    /// Sort buckets ascending and reject empty, inverted, out-of-range or overlapping tiers.
    pub fn validated(mut self) -> Result<Self, String> {
        if self.buckets.is_empty() {
            return Err("no ranges configured".to_string());
        }

        for bucket in &self.buckets {
            if !bucket.min.is_finite() || bucket.min < 0.0 {
                return Err(format!("range '{}' has invalid min {}", bucket.label, bucket.min));
            }
            if let Some(max) = bucket.max {
                if max.is_nan() || max < bucket.min {
                    return Err(format!(
                        "range '{}' has max {} below min {}",
                        bucket.label, max, bucket.min
                    ));
                }
            }
            check_multiplier(&format!("range '{}'", bucket.label), bucket.multiplier)?;
        }

        self.buckets.sort_by(|a, b| a.min.total_cmp(&b.min));

        for pair in self.buckets.windows(2) {
            if pair[1].min <= pair[0].upper() {
                return Err(format!(
                    "ranges '{}' and '{}' overlap",
                    pair[0].label, pair[1].label
                ));
            }
        }

        Ok(self)
    }

    pub fn lowest(&self) -> Option<&RangeBucket> {
        self.buckets.first()
    }

    pub fn highest(&self) -> Option<&RangeBucket> {
        self.buckets.last()
    }
}

/// Configuration for `graded_category` criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub levels: BTreeMap<String, f64>,
    #[serde(default)]
    pub min_required: Option<String>,
}

impl CategoryRule {
    pub fn validated(self) -> Result<Self, String> {
        if self.levels.is_empty() {
            return Err("no levels configured".to_string());
        }
        for (level, multiplier) in &self.levels {
            check_multiplier(&format!("level '{level}'"), *multiplier)?;
        }
        if let Some(required) = &self.min_required {
            if !self.levels.contains_key(required) {
                return Err(format!("min_required '{required}' is not a configured level"));
            }
        }
        Ok(self)
    }

    /// Multiplier of the configured minimum level, if any.
    pub fn required_multiplier(&self) -> Option<f64> {
        self.min_required
            .as_ref()
            .and_then(|level| self.levels.get(level))
            .copied()
    }
}

/// Configuration for `boolean` criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanRule {
    #[serde(default = "full_credit")]
    pub true_value: f64,
    #[serde(default)]
    pub false_value: f64,
}

fn full_credit() -> f64 {
    1.0
}

impl Default for BooleanRule {
    fn default() -> Self {
        Self {
            true_value: 1.0,
            false_value: 0.0,
        }
    }
}

impl BooleanRule {
    pub fn validated(self) -> Result<Self, String> {
        check_multiplier("true_value", self.true_value)?;
        check_multiplier("false_value", self.false_value)?;
        Ok(self)
    }
}

/// How many required keywords must appear in the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Any,
    All,
    Proportional,
}

/// Configuration for `text_match` criteria.
///
/// Required keywords gate the credit through `match_type`. Preferred keywords only apply
/// when nothing is required and grant partial credit for any non-empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    #[serde(default)]
    pub required_keywords: Vec<String>,
    #[serde(default)]
    pub preferred_keywords: Vec<String>,
    #[serde(default)]
    pub match_type: MatchType,
}

fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

impl KeywordRule {
    pub fn validated(mut self) -> Result<Self, String> {
        self.required_keywords = clean_keywords(self.required_keywords);
        self.preferred_keywords = clean_keywords(self.preferred_keywords);
        if self.required_keywords.is_empty() && self.preferred_keywords.is_empty() {
            return Err("no required or preferred keywords configured".to_string());
        }
        Ok(self)
    }
}

/// Validated criterion, ready for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub category: CriterionCategory,
    pub weight: f64,
    pub is_required: bool,
    pub display_order: i32,
    pub rule: ScoringRule,
}

impl Criterion {
    pub fn from_definition(definition: &CriterionDefinition) -> Self {
        let weight_valid = definition.weight.is_finite() && definition.weight >= 0.0;
        let rule = if weight_valid {
            ScoringRule::from_definition(&definition.data_type, &definition.config)
        } else {
            ScoringRule::Misconfigured {
                data_type: definition.data_type.clone(),
                reason: format!("weight {} must be a non-negative number", definition.weight),
            }
        };

        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            category: definition.category,
            weight: if weight_valid { definition.weight } else { 0.0 },
            is_required: definition.is_required,
            display_order: definition.display_order,
            rule,
        }
    }
}

/// Problem found while freezing a criterion, reported by validation tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionConfigIssue {
    pub criterion_id: CriterionId,
    pub criterion_name: String,
    pub data_type: String,
    pub reason: String,
}

/// Immutable, cheaply clonable view of a position taken at invocation start.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSnapshot {
    position_id: String,
    title: String,
    threshold_percentage: f64,
    criteria: Arc<[Criterion]>,
}

impl PositionSnapshot {
    /// Freeze a position. Criteria are ordered by `display_order` (stable) and the
    /// threshold falls back to `default_threshold` and is clamped into `[0, 100]`.
    pub fn freeze(position: &PositionDefinition, default_threshold: f64) -> Self {
        let mut criteria: Vec<Criterion> = position
            .criteria
            .iter()
            .map(Criterion::from_definition)
            .collect();
        criteria.sort_by_key(|criterion| criterion.display_order);

        for criterion in &criteria {
            match &criterion.rule {
                ScoringRule::Misconfigured { data_type, reason } => warn!(
                    position = %position.id,
                    criterion = %criterion.id,
                    data_type = %data_type,
                    reason = %reason,
                    "criterion configuration rejected"
                ),
                ScoringRule::Unsupported { data_type } => warn!(
                    position = %position.id,
                    criterion = %criterion.id,
                    data_type = %data_type,
                    "unsupported criterion type"
                ),
                _ => {}
            }
        }

        let requested = position.threshold_percentage.unwrap_or(default_threshold);
        let threshold_percentage = if requested.is_nan() {
            warn!(position = %position.id, "threshold is not a number, using default");
            default_threshold.clamp(0.0, 100.0)
        } else if !(0.0..=100.0).contains(&requested) {
            let clamped = requested.clamp(0.0, 100.0);
            warn!(
                position = %position.id,
                requested,
                clamped,
                "threshold outside 0-100 clamped"
            );
            clamped
        } else {
            requested
        };

        Self {
            position_id: position.id.clone(),
            title: position.title.clone(),
            threshold_percentage,
            criteria: criteria.into(),
        }
    }

    pub fn position_id(&self) -> &str {
        &self.position_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn threshold_percentage(&self) -> f64 {
        self.threshold_percentage
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Sum of all criterion weights, i.e. the maximum achievable score.
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|criterion| criterion.weight).sum()
    }

    pub fn config_issues(&self) -> Vec<CriterionConfigIssue> {
        self.criteria
            .iter()
            .filter_map(|criterion| {
                let reason = match &criterion.rule {
                    ScoringRule::Misconfigured { reason, .. } => reason.clone(),
                    ScoringRule::Unsupported { data_type } => {
                        format!("unsupported criterion type '{data_type}'")
                    }
                    _ => return None,
                };
                Some(CriterionConfigIssue {
                    criterion_id: criterion.id.clone(),
                    criterion_name: criterion.name.clone(),
                    data_type: criterion.rule.data_type().to_string(),
                    reason,
                })
            })
            .collect()
    }
}
