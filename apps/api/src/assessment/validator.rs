//! Response Validator: the only gate between raw provider text and the
//! RecommendationSet handed back to clients.
//!
//! JSON mode makes the provider emit *some* JSON object, not necessarily ours.
//! Nothing here coerces or repairs: the text either matches the shape or the
//! whole request fails.

use serde_json::Value;
use thiserror::Error;

use crate::assessment::models::RecommendationSet;

/// Top-level keys every RecommendationSet must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["recommendations", "evidence", "kpis"];

#[derive(Debug, Error)]
pub enum RecommendationError {
    /// The text is not JSON at all.
    #[error("response is not valid JSON: {source}")]
    Malformed {
        source: serde_json::Error,
        raw: String,
    },

    /// The text is JSON but not a RecommendationSet.
    #[error("{0}")]
    Schema(String),
}

/// Parses and validates provider output as a RecommendationSet.
pub fn validate_recommendations(text: &str) -> Result<RecommendationSet, RecommendationError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| RecommendationError::Malformed {
            source,
            raw: text.to_string(),
        })?;

    check_shape(&value)?;

    serde_json::from_value(value).map_err(|e| RecommendationError::Schema(e.to_string()))
}

fn check_shape(value: &Value) -> Result<(), RecommendationError> {
    let object = value
        .as_object()
        .ok_or_else(|| schema("response is not a JSON object"))?;

    for key in REQUIRED_KEYS {
        match object.get(key) {
            None => return Err(schema(format!("missing required key '{key}'"))),
            Some(field) if !field.is_array() => {
                return Err(schema(format!("'{key}' must be an array")))
            }
            Some(_) => {}
        }
    }

    let recommendations = object["recommendations"].as_array().into_iter().flatten();
    for (index, entry) in recommendations.enumerate() {
        let entry = entry
            .as_object()
            .ok_or_else(|| schema(format!("recommendation {index} is not an object")))?;

        if !entry.contains_key("category") || !entry.contains_key("items") {
            return Err(schema(format!(
                "recommendation {index} must have 'category' and 'items'"
            )));
        }
        if !entry["items"].is_array() {
            return Err(schema(format!("recommendation {index} 'items' must be an array")));
        }
    }

    Ok(())
}

fn schema(detail: impl Into<String>) -> RecommendationError {
    RecommendationError::Schema(detail.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_SET: &str = r#"{
        "recommendations": [
            {"category": "Teaching and Learning", "items": ["Adopt a course assessment cycle", "Map CLOs to PLOs"]},
            {"category": "Faculty", "items": ["Fund conference travel"], "priority": "high"}
        ],
        "evidence": ["Annual program report", "Course files"],
        "kpis": ["Course completion rate (Target: 90%)"],
        "summary": "Moderate compliance overall"
    }"#;

    fn assert_schema(text: &str, fragment: &str) {
        match validate_recommendations(text) {
            Err(RecommendationError::Schema(detail)) => {
                assert!(detail.contains(fragment), "unexpected detail: {detail}")
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_set_is_returned_unchanged() {
        let text = r#"{"recommendations": [{"category": "A", "items": ["x"]}], "evidence": [], "kpis": []}"#;
        let set = validate_recommendations(text).unwrap();
        assert_eq!(set.recommendations.len(), 1);
        assert_eq!(set.recommendations[0].category, "A");
        assert_eq!(set.recommendations[0].items, vec!["x".to_string()]);
        assert!(set.evidence.is_empty());
        assert!(set.kpis.is_empty());

        let original: Value = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_value(&set).unwrap(), original);
    }

    #[test]
    fn test_extra_keys_survive_validation() {
        let set = validate_recommendations(FULL_SET).unwrap();
        let original: Value = serde_json::from_str(FULL_SET).unwrap();
        assert_eq!(serde_json::to_value(&set).unwrap(), original);
        assert_eq!(set.extra["summary"], "Moderate compliance overall");
        assert_eq!(set.recommendations[1].extra["priority"], "high");
    }

    #[test]
    fn test_extra_keys_keep_provider_order() {
        let text = r#"{"recommendations":[],"evidence":[],"kpis":[],"zeta":1,"alpha":2}"#;
        let set = validate_recommendations(text).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), text);
    }

    #[test]
    fn test_unparseable_text_is_malformed() {
        let err = validate_recommendations("Here are your recommendations: ...").unwrap_err();
        match err {
            RecommendationError::Malformed { raw, .. } => {
                assert_eq!(raw, "Here are your recommendations: ...")
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_fenced_json_is_not_repaired() {
        let text = "```json\n{\"recommendations\": [], \"evidence\": [], \"kpis\": []}\n```";
        assert!(matches!(
            validate_recommendations(text),
            Err(RecommendationError::Malformed { .. })
        ));
    }

    #[test]
    fn test_empty_text_is_malformed() {
        assert!(matches!(
            validate_recommendations(""),
            Err(RecommendationError::Malformed { .. })
        ));
    }

    #[test]
    fn test_non_object_is_schema_violation() {
        assert_schema(r#"["recommendations", "evidence", "kpis"]"#, "not a JSON object");
    }

    #[test]
    fn test_each_missing_key_is_schema_violation() {
        for missing in REQUIRED_KEYS {
            let mut value: Value =
                serde_json::from_str(r#"{"recommendations": [], "evidence": [], "kpis": []}"#)
                    .unwrap();
            value.as_object_mut().unwrap().remove(missing);
            assert_schema(&value.to_string(), &format!("missing required key '{missing}'"));
        }
    }

    #[test]
    fn test_non_array_field_is_schema_violation() {
        assert_schema(
            r#"{"recommendations": [], "evidence": "Course files", "kpis": []}"#,
            "'evidence' must be an array",
        );
        assert_schema(
            r#"{"recommendations": {}, "evidence": [], "kpis": []}"#,
            "'recommendations' must be an array",
        );
    }

    #[test]
    fn test_recommendation_missing_items_is_schema_violation() {
        assert_schema(
            r#"{"recommendations": [{"category": "A"}], "evidence": [], "kpis": []}"#,
            "recommendation 0 must have 'category' and 'items'",
        );
    }

    #[test]
    fn test_recommendation_not_object_is_schema_violation() {
        assert_schema(
            r#"{"recommendations": [{"category": "A", "items": []}, "B"], "evidence": [], "kpis": []}"#,
            "recommendation 1 is not an object",
        );
    }

    #[test]
    fn test_recommendation_items_not_array_is_schema_violation() {
        assert_schema(
            r#"{"recommendations": [{"category": "A", "items": "x"}], "evidence": [], "kpis": []}"#,
            "'items' must be an array",
        );
    }

    #[test]
    fn test_non_string_item_is_schema_violation() {
        let text = r#"{"recommendations": [{"category": "A", "items": [1]}], "evidence": [], "kpis": []}"#;
        assert!(matches!(
            validate_recommendations(text),
            Err(RecommendationError::Schema(_))
        ));
    }
}
