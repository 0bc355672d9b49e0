use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::llm_client::prompts::MISSING_PLACEHOLDER;

/// Lowest and highest score on the compliance scale.
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 4;

/// A single answered question from the self-assessment survey.
///
/// Fields beyond `category`, `score` and `notes` (question id, question text, ...)
/// are kept in `extra` and echoed back into prompts untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub category: String,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssessmentResult {
    pub fn check_score(&self) -> Result<(), String> {
        if (MIN_SCORE..=MAX_SCORE).contains(&self.score) {
            Ok(())
        } else {
            Err(format!(
                "score for category '{}' must be between {MIN_SCORE} and {MAX_SCORE}, got {}",
                self.category, self.score
            ))
        }
    }
}

/// Program metadata supplied by the client. Every field is optional and may be
/// a string or a number on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionInfo {
    pub institution_name: Option<Value>,
    pub program_name: Option<Value>,
    pub year_established: Option<Value>,
    pub total_graduates: Option<Value>,
    pub first_graduating_batch: Option<Value>,
    pub current_students: Option<Value>,
    pub faculty_members: Option<Value>,
    pub program_tracks: Option<Value>,
    pub credit_hours: Option<Value>,
}

impl InstitutionInfo {
    pub fn institution_name(&self) -> String {
        display_field(self.institution_name.as_ref())
    }

    pub fn program_name(&self) -> String {
        display_field(self.program_name.as_ref())
    }

    /// Labelled general-information rows in report order, placeholders filled in.
    pub fn general_information(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Institution Name", self.institution_name()),
            ("Program Name", self.program_name()),
            ("Year Established", display_field(self.year_established.as_ref())),
            ("Total Number of Graduates", display_field(self.total_graduates.as_ref())),
            (
                "First Graduating Batch",
                display_field(self.first_graduating_batch.as_ref()),
            ),
            ("Current Number of Students", display_field(self.current_students.as_ref())),
            ("Number of Faculty Members", display_field(self.faculty_members.as_ref())),
            ("Program Tracks", display_field(self.program_tracks.as_ref())),
            ("Total Credit Hours", display_field(self.credit_hours.as_ref())),
        ]
    }
}

/// Renders a loosely-typed field for display. Missing, null and blank values
/// become the `-` placeholder.
pub fn display_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| display_field(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        _ => MISSING_PLACEHOLDER.to_string(),
    }
}

/// Recommendations for one assessment category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecommendations {
    pub category: String,
    pub items: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The structured output of the recommendations endpoint.
///
/// Unknown keys are carried in `extra` so a validated set serializes back to
/// exactly what the provider returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationSet {
    pub recommendations: Vec<CategoryRecommendations>,
    pub evidence: Vec<String>,
    pub kpis: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assessment_result_keeps_extra_fields() {
        let result: AssessmentResult = serde_json::from_value(json!({
            "category": "Teaching",
            "score": 3,
            "question": "Course learning outcomes are assessed",
            "questionId": "T-04"
        }))
        .unwrap();
        assert_eq!(result.category, "Teaching");
        assert_eq!(result.score, 3);
        assert_eq!(result.notes, None);
        assert_eq!(result.extra["questionId"], "T-04");

        let back = serde_json::to_value(&result).unwrap();
        assert_eq!(back["question"], "Course learning outcomes are assessed");
        assert!(back.get("notes").is_none());
    }

    #[test]
    fn test_check_score_accepts_scale_bounds() {
        for score in 1..=4 {
            let result = AssessmentResult {
                category: "Students".into(),
                score,
                notes: None,
                extra: Map::new(),
            };
            assert!(result.check_score().is_ok());
        }
    }

    #[test]
    fn test_check_score_rejects_out_of_range() {
        let result = AssessmentResult {
            category: "Faculty".into(),
            score: 5,
            notes: Some("overrated".into()),
            extra: Map::new(),
        };
        let err = result.check_score().unwrap_err();
        assert!(err.contains("Faculty"));
        assert!(err.contains("got 5"));
    }

    #[test]
    fn test_missing_institution_fields_render_placeholder() {
        let info = InstitutionInfo::default();
        assert_eq!(info.institution_name(), "-");
        assert_eq!(info.program_name(), "-");
        assert!(info.general_information().iter().all(|(_, v)| v == "-"));
        assert_eq!(info.general_information().len(), 9);
    }

    #[test]
    fn test_institution_info_accepts_numbers_and_strings() {
        let info: InstitutionInfo = serde_json::from_value(json!({
            "institutionName": "Prince Sultan University",
            "programName": "  ",
            "yearEstablished": 1999,
            "programTracks": ["Software", "Networks"],
            "creditHours": null
        }))
        .unwrap();
        let rows = info.general_information();
        assert_eq!(rows[0], ("Institution Name", "Prince Sultan University".to_string()));
        assert_eq!(rows[1].1, "-");
        assert_eq!(rows[2].1, "1999");
        assert_eq!(rows[7].1, "Software, Networks");
        assert_eq!(rows[8].1, "-");
    }

    #[test]
    fn test_display_field_empty_array_is_placeholder() {
        assert_eq!(display_field(Some(&json!([]))), "-");
        assert_eq!(display_field(Some(&Value::Null)), "-");
        assert_eq!(display_field(None), "-");
    }

    #[test]
    fn test_recommendation_set_defaults_when_absent() {
        let set: RecommendationSet = serde_json::from_value(json!({})).unwrap();
        assert_eq!(set, RecommendationSet::default());
    }
}
