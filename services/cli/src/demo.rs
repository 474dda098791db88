use clap::Args;
use serde_json::json;
use talent_radar::error::AppError;
use talent_radar::workflows::screening::{
    CandidateValues, CriterionCategory, CriterionDefinition, CriterionId, ExtractedValue,
    PositionDefinition, ScreeningEngine,
};

use crate::commands::render_evaluation;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the evaluation as JSON instead of the narrative report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(engine: &ScreeningEngine, args: DemoArgs) -> Result<(), AppError> {
    let snapshot = engine.snapshot(&senior_accountant());
    let evaluation = engine.score(&snapshot, &sample_candidate());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        println!("Candidate screening demo\n");
        println!("{}", render_evaluation(&snapshot, &evaluation));
    }
    Ok(())
}

fn criterion(
    id: &str,
    name: &str,
    category: CriterionCategory,
    data_type: &str,
    weight: f64,
    config: serde_json::Value,
) -> CriterionDefinition {
    CriterionDefinition {
        id: CriterionId::new(id),
        name: name.to_string(),
        category,
        data_type: data_type.to_string(),
        weight,
        config,
        is_required: false,
        display_order: 0,
    }
}

/// Eight criteria worth 98 points in total.
pub(crate) fn senior_accountant() -> PositionDefinition {
    use CriterionCategory::{Core, Supplementary};

    let mut criteria = vec![
        criterion(
            "years_experience",
            "Work Experience",
            Core,
            "ranged_number",
            20.0,
            json!({
                "ranges": [
                    {"min": 0, "max": 1, "multiplier": 0.15, "label": "Junior"},
                    {"min": 2, "max": 4, "multiplier": 0.6, "label": "Qualified"},
                    {"min": 5, "max": 9, "multiplier": 0.85, "label": "Senior"},
                    {"min": 10, "multiplier": 1.0, "label": "Expert"}
                ],
                "unit": "years"
            }),
        ),
        criterion(
            "education",
            "Education Level",
            Core,
            "graded_category",
            15.0,
            json!({"levels": {"PhD": 1.0, "Master": 1.0, "Bachelor": 0.9, "Diploma": 0.5}}),
        ),
        criterion(
            "english",
            "English Proficiency",
            Core,
            "graded_category",
            10.0,
            json!({"levels": {"Advanced": 1.0, "Intermediate": 0.6, "Basic": 0.2}}),
        ),
        criterion(
            "excel",
            "Excel Skills",
            Core,
            "graded_category",
            12.0,
            json!({
                "levels": {"Advanced": 1.0, "Intermediate": 0.65, "Basic": 0.2},
                "min_required": "Intermediate"
            }),
        ),
        criterion(
            "software",
            "Accounting Software",
            Core,
            "text_match",
            15.0,
            json!({"required_keywords": ["SAP", "Tally", "Excel"], "match_type": "any"}),
        ),
        criterion(
            "financial_reports",
            "Financial Reporting",
            Core,
            "boolean",
            10.0,
            json!({}),
        ),
        criterion(
            "industry",
            "Industry Background",
            Supplementary,
            "text_match",
            8.0,
            json!({"required_keywords": ["manufacturing", "production"]}),
        ),
        criterion(
            "warehouse",
            "Warehouse Accounting",
            Supplementary,
            "boolean",
            8.0,
            json!({"true_value": 1.0, "false_value": 0.5}),
        ),
    ];
    for (order, definition) in criteria.iter_mut().enumerate() {
        definition.display_order = order as i32;
    }
    criteria[0].is_required = true;

    PositionDefinition {
        id: "pos-senior-accountant".to_string(),
        title: "Senior Accountant".to_string(),
        threshold_percentage: Some(75.0),
        criteria,
    }
}

pub(crate) fn sample_candidate() -> CandidateValues {
    CandidateValues::new()
        .with("work_experience_years", ExtractedValue::Number(7.0))
        .with("education_level", ExtractedValue::Text("Bachelor".to_string()))
        .with("english_level", ExtractedValue::Text("Advanced".to_string()))
        .with("excel_skill", ExtractedValue::Text("Advanced".to_string()))
        .with(
            "software_skills",
            ExtractedValue::List(vec!["Excel".to_string(), "SAP".to_string()]),
        )
        .with("financial_reports_experience", ExtractedValue::Boolean(true))
        .with(
            "industry_type",
            ExtractedValue::Text("Food production plant".to_string()),
        )
        .with("warehouse_experience", ExtractedValue::Boolean(false))
}
