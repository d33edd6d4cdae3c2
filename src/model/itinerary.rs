use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, PlannerResult};

/// One suggested activity from the planning endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub name: String,
    #[serde(default)]
    pub budget: f64,
    /// Free-text rationale. Despite the name it is rarely a number.
    #[serde(default, deserialize_with = "text_or_number")]
    pub justification_score: String,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected text for justification_score, got {}",
            other
        ))),
    }
}

/// Normalizes a `/planmytrip` body into itinerary items.
///
/// The backend sometimes sends the array itself and sometimes a JSON
/// string that encodes it (possibly still inside a markdown code fence).
/// Both produce identical items; any other shape is a decode failure.
pub fn decode_itinerary(body: Value) -> PlannerResult<Vec<ItineraryItem>> {
    match body {
        Value::Array(_) => serde_json::from_value(body)
            .map_err(|e| PlannerError::Decode(format!("itinerary: {}", e))),
        Value::String(text) => {
            let inner = strip_code_fence(&text);
            let parsed: Value = serde_json::from_str(inner)
                .map_err(|e| PlannerError::Decode(format!("itinerary string: {}", e)))?;
            if !parsed.is_array() {
                return Err(PlannerError::Decode(
                    "itinerary string does not hold an array".into(),
                ));
            }
            serde_json::from_value(parsed)
                .map_err(|e| PlannerError::Decode(format!("itinerary: {}", e)))
        }
        other => Err(PlannerError::Decode(format!(
            "itinerary must be an array or a JSON string, got {}",
            value_kind(&other)
        ))),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_structured_bodies_decode_identically() {
        let structured = json!([{"name": "A", "budget": 10, "justification_score": "x"}]);
        let encoded = Value::String(r#"[{"name":"A","budget":10,"justification_score":"x"}]"#.into());
        let a = decode_itinerary(structured).unwrap();
        let b = decode_itinerary(encoded).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].name, "A");
        assert_eq!(a[0].budget, 10.0);
        assert_eq!(a[0].justification_score, "x");
    }

    #[test]
    fn fenced_string_is_unwrapped() {
        let body = Value::String("```json\n[{\"name\":\"Picnic\",\"budget\":0,\"justification_score\":\"free\"}]\n```".into());
        let items = decode_itinerary(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Picnic");
    }

    #[test]
    fn numeric_justification_is_kept_as_text() {
        let items = decode_itinerary(json!([{"name": "Zoo", "budget": 5.5, "justification_score": 8}])).unwrap();
        assert_eq!(items[0].justification_score, "8");
    }

    #[test]
    fn object_body_is_a_decode_failure() {
        let err = decode_itinerary(json!({"response": "sorry"})).unwrap_err();
        assert!(matches!(err, PlannerError::Decode(_)));
    }

    #[test]
    fn string_holding_an_object_is_a_decode_failure() {
        let err = decode_itinerary(Value::String(r#"{"name":"A"}"#.into())).unwrap_err();
        assert!(matches!(err, PlannerError::Decode(_)));
    }

    #[test]
    fn unparseable_string_is_a_decode_failure() {
        let err = decode_itinerary(Value::String("Here are three ideas".into())).unwrap_err();
        assert!(matches!(err, PlannerError::Decode(_)));
    }
}
