//! Turning free-form model output into a validated nutrition estimate.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use super::error::AnalyzeError;

/// Model estimate for one photographed dish.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodAnalysis {
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Greedy `{ ... }` span across newlines: first opening brace to last closing brace.
pub fn extract_json_object(text: &str) -> Option<&str> {
    lazy_static! {
        static ref OBJECT_RE: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
    }
    OBJECT_RE.find(text).map(|m| m.as_str())
}

pub fn parse_analysis(text: &str) -> Result<FoodAnalysis, AnalyzeError> {
    let json = extract_json_object(text.trim()).ok_or(AnalyzeError::NoJsonObject)?;
    let value: Value = serde_json::from_str(json)?;
    validate(&value)
}

fn validate(value: &Value) -> Result<FoodAnalysis, AnalyzeError> {
    let root = value
        .as_object()
        .ok_or_else(|| AnalyzeError::Schema("expected an object".into()))?;

    let name = match root.get("name") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(AnalyzeError::Schema("name: expected string".into())),
    };
    let calories = nullable_number(root, "calories", "calories")?;

    let macros = match root.get("macros") {
        Some(Value::Object(m)) => m,
        _ => return Err(AnalyzeError::Schema("macros: expected object".into())),
    };

    Ok(FoodAnalysis {
        name,
        calories,
        protein: nullable_number(macros, "protein", "macros.protein")?,
        carbs: nullable_number(macros, "carbs", "macros.carbs")?,
        fat: nullable_number(macros, "fat", "macros.fat")?,
    })
}

// key must be present; null is allowed
fn nullable_number(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<f64>, AnalyzeError> {
    match obj.get(key) {
        Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| AnalyzeError::Schema(format!("{path}: number out of range"))),
        _ => Err(AnalyzeError::Schema(format!("{path}: expected number or null"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_wrapped_in_prose_and_fences() {
        let text = "Sure! Here you go:\n```json\n{\n  \"name\": \"Caesar salad\",\n  \"calories\": 350,\n  \"macros\": { \"protein\": 12.5, \"carbs\": 18, \"fat\": 25 }\n}\n```\nEnjoy.";
        let a = parse_analysis(text).unwrap();
        assert_eq!(a.name, "Caesar salad");
        assert_eq!(a.calories, Some(350.0));
        assert_eq!(a.protein, Some(12.5));
        assert_eq!(a.carbs, Some(18.0));
        assert_eq!(a.fat, Some(25.0));
    }

    #[test]
    fn nulls_are_accepted() {
        let text = r#"{"name":"Mystery stew","calories":null,"macros":{"protein":null,"carbs":40,"fat":null}}"#;
        let a = parse_analysis(text).unwrap();
        assert_eq!(a.calories, None);
        assert_eq!(a.protein, None);
        assert_eq!(a.carbs, Some(40.0));
    }

    #[test]
    fn text_without_braces_is_rejected() {
        let err = parse_analysis("I cannot identify this food.").unwrap_err();
        assert!(matches!(err, AnalyzeError::NoJsonObject));
    }

    #[test]
    fn broken_json_is_rejected() {
        let err = parse_analysis("{ name: pizza }").unwrap_err();
        assert!(matches!(err, AnalyzeError::MalformedJson(_)));
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        let cases = [
            (r#"{"calories":1,"macros":{"protein":1,"carbs":1,"fat":1}}"#, "name"),
            (r#"{"name":"x","calories":"200","macros":{"protein":1,"carbs":1,"fat":1}}"#, "calories"),
            (r#"{"name":"x","calories":200}"#, "macros"),
            (r#"{"name":"x","calories":200,"macros":{"protein":1,"carbs":1}}"#, "macros.fat"),
            (r#"{"name":"x","macros":{"protein":1,"carbs":1,"fat":1}}"#, "calories"),
        ];
        for (text, field) in cases {
            match parse_analysis(text) {
                Err(AnalyzeError::Schema(msg)) => assert!(msg.starts_with(field), "{msg}"),
                other => panic!("expected schema error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn extraction_spans_first_to_last_brace() {
        assert_eq!(extract_json_object("a {b} c {d} e"), Some("{b} c {d}"));
        assert_eq!(extract_json_object("no object"), None);
    }
}
