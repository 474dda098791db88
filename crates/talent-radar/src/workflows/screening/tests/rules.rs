use serde_json::json;

use super::common::*;
use crate::workflows::screening::{evaluate_criterion, ExtractedValue, ScoringIssue};

#[test]
fn range_values_resolve_to_their_bucket() {
    let experience = criterion("years_experience", "ranged_number", 20.0, experience_config());

    let expectations = [
        (12.0, 20.0),
        (10.0, 20.0),
        (9.0, 17.0),
        (5.0, 17.0),
        (4.0, 12.0),
        (2.0, 12.0),
        (1.0, 3.0),
        (0.0, 3.0),
    ];
    for (years, expected) in expectations {
        let result = evaluate_criterion(&experience, Some(&number(years)));
        assert_close(result.awarded_points, expected);
        assert_eq!(result.max_points, 20.0);
        assert!(result.issue.is_none());
    }
}

#[test]
fn range_boundaries_stay_inside_the_matching_bucket() {
    let experience = criterion("years_experience", "ranged_number", 20.0, experience_config());

    let at_senior_min = evaluate_criterion(&experience, Some(&number(5.0)));
    assert!(at_senior_min.reasoning.contains("'Senior'"));

    let at_qualified_max = evaluate_criterion(&experience, Some(&number(4.0)));
    assert!(at_qualified_max.reasoning.contains("'Qualified'"));
}

#[test]
fn range_ramps_linearly_below_the_lowest_bucket() {
    let config = json!({
        "ranges": [
            {"min": 2, "max": 4, "multiplier": 0.6, "label": "Qualified"},
            {"min": 5, "multiplier": 1.0, "label": "Senior"}
        ]
    });
    let experience = criterion("years_experience", "ranged_number", 10.0, config);

    let one_year = evaluate_criterion(&experience, Some(&number(1.0)));
    assert_close(one_year.awarded_points, 3.0);
    assert_close(one_year.multiplier, 0.3);
    assert!(one_year.reasoning.contains("graduated"));

    let none = evaluate_criterion(&experience, Some(&number(0.0)));
    assert_eq!(none.awarded_points, 0.0);
}

#[test]
fn range_clamps_negative_values_and_caps_above_the_top_tier() {
    let experience = criterion("years_experience", "ranged_number", 20.0, experience_config());

    let negative = evaluate_criterion(&experience, Some(&number(-3.0)));
    assert_close(negative.awarded_points, 3.0);

    let huge = evaluate_criterion(&experience, Some(&number(1500.0)));
    assert_close(huge.awarded_points, 20.0);
    assert!(huge.reasoning.contains("capped"));

    let unbounded = criterion(
        "years_experience",
        "ranged_number",
        20.0,
        json!({"ranges": [{"min": 3, "multiplier": 0.9, "label": "Any"}]}),
    );
    let result = evaluate_criterion(&unbounded, Some(&number(1.0e9)));
    assert_close(result.awarded_points, 18.0);
}

#[test]
fn range_gap_is_credited_at_the_lower_bucket() {
    let experience = criterion("years_experience", "ranged_number", 20.0, experience_config());

    let result = evaluate_criterion(&experience, Some(&number(4.5)));

    assert_close(result.awarded_points, 12.0);
    assert!(result.reasoning.contains("between ranges"));
}

#[test]
fn range_parses_numeric_text_and_flags_the_rest() {
    let experience = criterion("years_experience", "ranged_number", 20.0, experience_config());

    let from_text = evaluate_criterion(&experience, Some(&text(" 7 ")));
    assert_close(from_text.awarded_points, 17.0);

    let words = evaluate_criterion(&experience, Some(&text("seven")));
    assert_eq!(words.awarded_points, 0.0);
    assert!(matches!(words.issue, Some(ScoringIssue::ValueParseError(_))));
    assert!(words.reasoning.starts_with("value parse error"));

    let flag = evaluate_criterion(&experience, Some(&ExtractedValue::Boolean(true)));
    assert!(matches!(flag.issue, Some(ScoringIssue::ValueParseError(_))));
}

#[test]
fn empty_ranges_are_an_invalid_config() {
    let experience = criterion("years_experience", "ranged_number", 20.0, json!({"ranges": []}));

    let result = evaluate_criterion(&experience, Some(&number(3.0)));

    assert_eq!(result.awarded_points, 0.0);
    assert_eq!(result.max_points, 20.0);
    assert!(matches!(
        result.issue,
        Some(ScoringIssue::InvalidCriterionConfig(_))
    ));
}

#[test]
fn category_uses_exact_labels() {
    let excel = criterion("excel", "graded_category", 15.0, skill_levels_config());

    let advanced = evaluate_criterion(&excel, Some(&text("Advanced")));
    assert_close(advanced.awarded_points, 15.0);

    let intermediate = evaluate_criterion(&excel, Some(&text("Intermediate")));
    assert_close(intermediate.awarded_points, 15.0 * 0.65);
    assert!(!intermediate.reasoning.contains("below minimum"));

    let lowercase = evaluate_criterion(&excel, Some(&text("advanced")));
    assert_eq!(lowercase.awarded_points, 0.0);
    assert_eq!(
        lowercase.issue,
        Some(ScoringIssue::UnrecognizedLevel("advanced".to_string()))
    );
}

#[test]
fn category_notes_levels_below_the_minimum() {
    let excel = criterion("excel", "graded_category", 15.0, skill_levels_config());

    let basic = evaluate_criterion(&excel, Some(&text("Basic")));

    assert_close(basic.awarded_points, 3.0);
    assert!(basic.reasoning.contains("below minimum requirement 'Intermediate'"));
}

#[test]
fn category_rejects_non_label_values() {
    let excel = criterion("excel", "graded_category", 15.0, skill_levels_config());

    let flag = evaluate_criterion(&excel, Some(&ExtractedValue::Boolean(true)));
    assert!(matches!(flag.issue, Some(ScoringIssue::ValueParseError(_))));

    let unknown_number = evaluate_criterion(&excel, Some(&number(3.0)));
    assert_eq!(
        unknown_number.issue,
        Some(ScoringIssue::UnrecognizedLevel("3".to_string()))
    );
}

#[test]
fn category_matches_numeric_labels_by_their_printed_form() {
    let grade = criterion(
        "responsibility",
        "graded_category",
        10.0,
        json!({"levels": {"1": 0.3, "2": 0.6, "3": 1.0}}),
    );

    let from_csv = evaluate_criterion(&grade, Some(&number(2.0)));
    assert_close(from_csv.awarded_points, 6.0);
    assert!(from_csv.issue.is_none());

    let from_json = evaluate_criterion(&grade, Some(&text("3")));
    assert_close(from_json.awarded_points, 10.0);
}

#[test]
fn boolean_defaults_award_all_or_nothing() {
    let reports = criterion("financial_reports", "boolean", 10.0, json!({}));

    let yes = evaluate_criterion(&reports, Some(&ExtractedValue::Boolean(true)));
    assert_close(yes.awarded_points, 10.0);

    let no = evaluate_criterion(&reports, Some(&ExtractedValue::Boolean(false)));
    assert_eq!(no.awarded_points, 0.0);
    assert!(no.issue.is_none());
}

#[test]
fn boolean_supports_partial_credit_and_textual_answers() {
    let warehouse = criterion(
        "warehouse",
        "boolean",
        8.0,
        json!({"true_value": 1.0, "false_value": 0.5}),
    );

    let no = evaluate_criterion(&warehouse, Some(&text("No")));
    assert_close(no.awarded_points, 4.0);

    let yes = evaluate_criterion(&warehouse, Some(&text("yes")));
    assert_close(yes.awarded_points, 8.0);

    let one = evaluate_criterion(&warehouse, Some(&number(1.0)));
    assert_close(one.awarded_points, 8.0);

    let unclear = evaluate_criterion(&warehouse, Some(&text("maybe")));
    assert_eq!(unclear.awarded_points, 0.0);
    assert!(matches!(unclear.issue, Some(ScoringIssue::ValueParseError(_))));
}

#[test]
fn boolean_missing_value_scores_zero() {
    let warehouse = criterion(
        "warehouse",
        "boolean",
        8.0,
        json!({"true_value": 1.0, "false_value": 0.5}),
    );

    let result = evaluate_criterion(&warehouse, None);

    assert_eq!(result.awarded_points, 0.0);
    assert_eq!(result.issue, Some(ScoringIssue::MissingValue));
}

#[test]
fn keywords_any_requires_a_single_match() {
    let field = criterion("field_of_study", "text_match", 12.0, keyword_config("any"));

    let hit = evaluate_criterion(&field, Some(&text("Bachelor of FINANCE")));
    assert_close(hit.awarded_points, 12.0);

    let miss = evaluate_criterion(&field, Some(&text("Mechanical engineering")));
    assert_eq!(miss.awarded_points, 0.0);
    assert!(miss.reasoning.contains("no required keywords matched"));
}

#[test]
fn keywords_all_requires_every_match() {
    let field = criterion("field_of_study", "text_match", 12.0, keyword_config("all"));

    let partial = evaluate_criterion(&field, Some(&text("accounting and finance")));
    assert_eq!(partial.awarded_points, 0.0);

    let full = evaluate_criterion(&field, Some(&text("Accounting, finance, advanced excel")));
    assert_close(full.awarded_points, 12.0);
}

#[test]
fn keywords_proportional_awards_the_matched_share() {
    let field = criterion("field_of_study", "text_match", 12.0, keyword_config("proportional"));

    let result = evaluate_criterion(&field, Some(&text("Senior accounting role; strong EXCEL")));

    assert_close(result.awarded_points, 12.0 * 2.0 / 3.0);
    assert!(result.reasoning.contains("matched 2 of 3"));
}

#[test]
fn keywords_match_against_lists() {
    let software = criterion("software", "text_match", 9.0, keyword_config("proportional"));
    let skills = ExtractedValue::List(vec!["Excel".to_string(), "Finance module".to_string()]);

    let result = evaluate_criterion(&software, Some(&skills));

    assert_close(result.awarded_points, 6.0);
}

#[test]
fn keywords_treat_blank_text_as_missing() {
    let field = criterion("field_of_study", "text_match", 12.0, keyword_config("any"));

    let blank = evaluate_criterion(&field, Some(&text("   ")));
    assert_eq!(blank.issue, Some(ScoringIssue::MissingValue));

    let flag = evaluate_criterion(&field, Some(&ExtractedValue::Boolean(true)));
    assert!(matches!(flag.issue, Some(ScoringIssue::ValueParseError(_))));
}

#[test]
fn keywords_match_numbers_as_text() {
    let graduation = criterion(
        "graduation_year",
        "text_match",
        5.0,
        json!({"required_keywords": ["2020", "2021"]}),
    );

    let hit = evaluate_criterion(&graduation, Some(&number(2020.0)));
    assert_close(hit.awarded_points, 5.0);
    assert!(hit.issue.is_none());

    let miss = evaluate_criterion(&graduation, Some(&number(2019.0)));
    assert_eq!(miss.awarded_points, 0.0);
    assert!(miss.issue.is_none());
}

#[test]
fn preferred_keywords_grant_partial_credit() {
    let industry = criterion(
        "industry",
        "text_match",
        8.0,
        json!({"preferred_keywords": ["Trading", "Import"]}),
    );

    let one = evaluate_criterion(&industry, Some(&text("Trading company")));
    assert_close(one.awarded_points, 8.0 * 0.75);
    assert!(one.reasoning.contains("matched 1 of 2 preferred keywords: Trading"));

    let both = evaluate_criterion(&industry, Some(&text("import and trading house")));
    assert_close(both.awarded_points, 8.0);

    let none = evaluate_criterion(&industry, Some(&text("Retail bakery")));
    assert_close(none.awarded_points, 8.0 * 0.3);
    assert!(none.reasoning.contains("no preferred keywords matched"));

    let missing = evaluate_criterion(&industry, None);
    assert_eq!(missing.issue, Some(ScoringIssue::MissingValue));
}

#[test]
fn required_keywords_take_precedence_over_preferred() {
    let industry = criterion(
        "industry",
        "text_match",
        8.0,
        json!({
            "required_keywords": ["Manufacturing"],
            "preferred_keywords": ["Trading"]
        }),
    );

    let result = evaluate_criterion(&industry, Some(&text("Trading company")));

    assert_eq!(result.awarded_points, 0.0);
    assert!(result.reasoning.contains("no required keywords matched"));
}

#[test]
fn unsupported_types_score_zero_without_failing() {
    let percentage = criterion("gpa", "percentage", 5.0, json!({}));

    let result = evaluate_criterion(&percentage, Some(&number(18.5)));

    assert_eq!(result.awarded_points, 0.0);
    assert_eq!(result.max_points, 5.0);
    assert_eq!(
        result.issue,
        Some(ScoringIssue::UnsupportedCriterionType("percentage".to_string()))
    );
    assert_eq!(
        result.issue.as_ref().map(ScoringIssue::code),
        Some("unsupported_criterion_type")
    );
}

#[test]
fn zero_weight_contributes_nothing() {
    let experience = criterion("years_experience", "ranged_number", 0.0, experience_config());

    let result = evaluate_criterion(&experience, Some(&number(12.0)));

    assert_eq!(result.awarded_points, 0.0);
    assert_eq!(result.max_points, 0.0);
    assert!(result.issue.is_none());
}

#[test]
fn extracted_value_is_echoed_for_audit() {
    let reports = criterion("financial_reports", "boolean", 10.0, json!({}));

    let result = evaluate_criterion(&reports, Some(&ExtractedValue::Boolean(true)));

    assert_eq!(result.extracted_value, Some(ExtractedValue::Boolean(true)));
    assert_eq!(result.criterion_name, "financial reports");
}
