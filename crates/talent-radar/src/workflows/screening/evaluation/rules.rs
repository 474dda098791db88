use super::super::criteria::{BooleanRule, CategoryRule, KeywordRule, MatchType, RangeRule};
use super::super::domain::ExtractedValue;
use super::ScoringIssue;

/// Raw result of a scorer before weighting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleOutcome {
    pub multiplier: f64,
    pub reasoning: String,
}

impl RuleOutcome {
    fn new(multiplier: f64, reasoning: String) -> Self {
        Self {
            multiplier,
            reasoning,
        }
    }
}

fn percent(multiplier: f64) -> String {
    format!("×{:.0}%", multiplier * 100.0)
}

fn numeric_value(value: &ExtractedValue) -> Result<f64, ScoringIssue> {
    let number = match value {
        ExtractedValue::Number(number) => *number,
        ExtractedValue::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            ScoringIssue::ValueParseError(format!("'{}' is not a number", text.trim()))
        })?,
        ExtractedValue::Boolean(_) | ExtractedValue::List(_) => {
            return Err(ScoringIssue::ValueParseError(format!(
                "'{value}' is not a number"
            )))
        }
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(ScoringIssue::ValueParseError(format!(
            "'{number}' is not a finite number"
        )))
    }
}

/// Graduated numeric scoring.
///
/// Values inside a bucket take its multiplier; values under the lowest bucket ramp linearly
/// from zero; values over the highest bucket are capped at its multiplier; values falling in
/// a gap between two buckets are credited at the lower neighbour.
pub(crate) fn score_range(
    rule: &RangeRule,
    value: &ExtractedValue,
) -> Result<RuleOutcome, ScoringIssue> {
    let (Some(lowest), Some(highest)) = (rule.lowest(), rule.highest()) else {
        return Err(ScoringIssue::InvalidCriterionConfig(
            "no ranges configured".to_string(),
        ));
    };

    let raw = numeric_value(value)?;
    let value = raw.max(0.0);
    let unit = rule
        .unit
        .as_deref()
        .map(|unit| format!(" {unit}"))
        .unwrap_or_default();

    if let Some(bucket) = rule.buckets.iter().find(|bucket| bucket.contains(value)) {
        return Ok(RuleOutcome::new(
            bucket.multiplier,
            format!(
                "value {value}{unit} falls in '{}' range ({})",
                bucket.label,
                percent(bucket.multiplier)
            ),
        ));
    }

    if value < lowest.min {
        // lowest.min > value >= 0 here, so the division is safe.
        let multiplier = lowest.multiplier * (value / lowest.min);
        return Ok(RuleOutcome::new(
            multiplier,
            format!(
                "value {value}{unit} below '{}' range starting at {}, graduated to {}",
                lowest.label,
                lowest.min,
                percent(multiplier)
            ),
        ));
    }

    if value > highest.upper() {
        return Ok(RuleOutcome::new(
            highest.multiplier,
            format!(
                "value {value}{unit} above '{}' range, capped at {}",
                highest.label,
                percent(highest.multiplier)
            ),
        ));
    }

    let floor = rule
        .buckets
        .iter()
        .rev()
        .find(|bucket| bucket.upper() < value)
        .unwrap_or(lowest);
    Ok(RuleOutcome::new(
        floor.multiplier,
        format!(
            "value {value}{unit} between ranges, credited at '{}' ({})",
            floor.label,
            percent(floor.multiplier)
        ),
    ))
}

/// Exact, case-sensitive level lookup. Numbers are matched by their printed form so that
/// numeric labels read from CSV still resolve.
pub(crate) fn score_category(
    rule: &CategoryRule,
    value: &ExtractedValue,
) -> Result<RuleOutcome, ScoringIssue> {
    let label = match value {
        ExtractedValue::Text(label) => label.trim().to_string(),
        ExtractedValue::Number(number) => number.to_string(),
        ExtractedValue::Boolean(_) | ExtractedValue::List(_) => {
            return Err(ScoringIssue::ValueParseError(format!(
                "'{value}' is not a level label"
            )))
        }
    };
    let label = label.as_str();

    let Some(multiplier) = rule.levels.get(label).copied() else {
        return Err(ScoringIssue::UnrecognizedLevel(label.to_string()));
    };

    let mut reasoning = format!("level '{label}' ({})", percent(multiplier));
    if let (Some(required), Some(required_multiplier)) =
        (rule.min_required.as_deref(), rule.required_multiplier())
    {
        if multiplier < required_multiplier {
            reasoning.push_str(&format!(", below minimum requirement '{required}'"));
        }
    }

    Ok(RuleOutcome::new(multiplier, reasoning))
}

const TRUTHY: &[&str] = &["true", "yes", "y", "1", "on", "بله", "دارد"];
const FALSY: &[&str] = &["false", "no", "n", "0", "off", "none", "خیر", "ندارد"];

fn boolean_value(value: &ExtractedValue) -> Result<bool, ScoringIssue> {
    match value {
        ExtractedValue::Boolean(flag) => Ok(*flag),
        ExtractedValue::Number(number) if *number == 1.0 => Ok(true),
        ExtractedValue::Number(number) if *number == 0.0 => Ok(false),
        ExtractedValue::Text(text) => {
            let normalized = text.trim().to_lowercase();
            if TRUTHY.contains(&normalized.as_str()) {
                Ok(true)
            } else if FALSY.contains(&normalized.as_str()) {
                Ok(false)
            } else {
                Err(ScoringIssue::ValueParseError(format!(
                    "'{}' is not a yes/no answer",
                    text.trim()
                )))
            }
        }
        ExtractedValue::Number(_) | ExtractedValue::List(_) => Err(
            ScoringIssue::ValueParseError(format!("'{value}' is not a yes/no answer")),
        ),
    }
}

pub(crate) fn score_boolean(
    rule: &BooleanRule,
    value: &ExtractedValue,
) -> Result<RuleOutcome, ScoringIssue> {
    let flag = boolean_value(value)?;
    let (multiplier, verdict) = if flag {
        (rule.true_value, "condition met")
    } else {
        (rule.false_value, "condition not met")
    };
    Ok(RuleOutcome::new(
        multiplier,
        format!("{verdict} ({})", percent(multiplier)),
    ))
}

/// Case-insensitive substring matching over the full text.
pub(crate) fn score_keywords(
    rule: &KeywordRule,
    value: &ExtractedValue,
) -> Result<RuleOutcome, ScoringIssue> {
    let text = match value {
        ExtractedValue::Text(text) => text.to_lowercase(),
        ExtractedValue::List(items) => items.join(" ").to_lowercase(),
        ExtractedValue::Number(number) => number.to_string(),
        ExtractedValue::Boolean(_) => {
            return Err(ScoringIssue::ValueParseError(format!(
                "'{value}' is not free text"
            )))
        }
    };

    if !rule.required_keywords.is_empty() {
        Ok(score_required_keywords(rule, &text))
    } else if !rule.preferred_keywords.is_empty() {
        Ok(score_preferred_keywords(&rule.preferred_keywords, &text))
    } else {
        Err(ScoringIssue::InvalidCriterionConfig(
            "no required or preferred keywords configured".to_string(),
        ))
    }
}

fn matched_keywords<'a>(keywords: &'a [String], text: &str) -> Vec<&'a str> {
    keywords
        .iter()
        .filter(|keyword| text.contains(&keyword.to_lowercase()))
        .map(String::as_str)
        .collect()
}

fn score_required_keywords(rule: &KeywordRule, text: &str) -> RuleOutcome {
    let total = rule.required_keywords.len();
    let matched = matched_keywords(&rule.required_keywords, text);

    let multiplier = match rule.match_type {
        MatchType::Any if !matched.is_empty() => 1.0,
        MatchType::All if matched.len() == total => 1.0,
        MatchType::Any | MatchType::All => 0.0,
        MatchType::Proportional => matched.len() as f64 / total as f64,
    };

    let reasoning = if matched.is_empty() {
        format!(
            "no required keywords matched (needed: {})",
            rule.required_keywords.join(", ")
        )
    } else {
        format!(
            "matched {} of {} required keywords: {} ({})",
            matched.len(),
            total,
            matched.join(", "),
            percent(multiplier)
        )
    };

    RuleOutcome::new(multiplier, reasoning)
}

/// Credit floor for text that mentions none of the preferred keywords.
const PREFERRED_MISS_MULTIPLIER: f64 = 0.3;

fn score_preferred_keywords(preferred: &[String], text: &str) -> RuleOutcome {
    let matched = matched_keywords(preferred, text);
    if matched.is_empty() {
        return RuleOutcome::new(
            PREFERRED_MISS_MULTIPLIER,
            format!(
                "no preferred keywords matched, minimal credit ({})",
                percent(PREFERRED_MISS_MULTIPLIER)
            ),
        );
    }

    let share = matched.len() as f64 / preferred.len() as f64;
    let multiplier = (0.5 + 0.5 * share).min(1.0);
    RuleOutcome::new(
        multiplier,
        format!(
            "matched {} of {} preferred keywords: {} ({})",
            matched.len(),
            preferred.len(),
            matched.join(", "),
            percent(multiplier)
        ),
    )
}
