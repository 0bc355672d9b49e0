//! Prompt Builder: turns survey answers and program metadata into LLM prompts.
//!
//! Pure string assembly: no I/O, no error conditions. Missing data renders as `-`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::assessment::models::{AssessmentResult, InstitutionInfo, RecommendationSet};
use crate::assessment::prompts::{
    ASK_PROMPT_TEMPLATE, RECOMMENDATIONS_PROMPT_TEMPLATE, REPORT_PROMPT_TEMPLATE, REQUIRED_KPIS,
};
use crate::llm_client::prompts::{
    fill_template, COMPLIANCE_SCALE, MISSING_DATA_INSTRUCTION, MISSING_PLACEHOLDER,
    PERFORMANCE_SCALE,
};

/// All results that share one category, in input order.
#[derive(Debug, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub results: Vec<&'a AssessmentResult>,
}

/// Serializes groups as a JSON object keyed by category, keeping group order.
struct GroupedResults<'a>(&'a [CategoryGroup<'a>]);

impl Serialize for GroupedResults<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in self.0 {
            map.serialize_entry(group.category, &group.results)?;
        }
        map.end()
    }
}

/// Groups results by category. Categories keep first-seen order and results
/// keep their input order within a category.
pub fn group_by_category(results: &[AssessmentResult]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for result in results {
        match groups.iter_mut().find(|g| g.category == result.category) {
            Some(group) => group.results.push(result),
            None => groups.push(CategoryGroup {
                category: &result.category,
                results: vec![result],
            }),
        }
    }

    groups
}

pub fn build_recommendations_prompt(results: &[AssessmentResult]) -> String {
    let groups = group_by_category(results);
    let results_json = pretty_json(&GroupedResults(&groups));

    fill_template(
        RECOMMENDATIONS_PROMPT_TEMPLATE,
        &[("scale", PERFORMANCE_SCALE), ("results_json", &results_json)],
    )
}

pub fn build_report_prompt(
    info: &InstitutionInfo,
    results: &[AssessmentResult],
    recommendations: &RecommendationSet,
) -> String {
    let general_information = info
        .general_information()
        .iter()
        .map(|(label, value)| format!("- {label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");

    let results_json = pretty_json(&results);
    let recommendations_json = pretty_json(recommendations);
    let required_kpis = required_kpis_block();

    fill_template(
        REPORT_PROMPT_TEMPLATE,
        &[
            ("general_information", &general_information),
            ("scale", COMPLIANCE_SCALE),
            ("results_json", &results_json),
            ("recommendations_json", &recommendations_json),
            ("required_kpis", &required_kpis),
            ("missing_data_instruction", MISSING_DATA_INSTRUCTION),
        ],
    )
}

pub fn build_question_prompt(question: &str) -> String {
    fill_template(ASK_PROMPT_TEMPLATE, &[("question", question.trim())])
}

fn required_kpis_block() -> String {
    REQUIRED_KPIS
        .iter()
        .map(|(standard, kpis)| {
            let bullets = kpis
                .iter()
                .map(|kpi| format!("• {kpi}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{standard}:\n{bullets}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| MISSING_PLACEHOLDER.to_string())
}
