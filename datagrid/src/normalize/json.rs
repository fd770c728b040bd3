//! Small helpers for reading loosely typed JSON input.

use serde_json::Value as Json;

/// Type name used in configuration error messages.
pub(crate) fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

/// Read a data attribute string the way markup attributes are read:
/// `"true"`/`"false"` become booleans, numeric text becomes a number,
/// `"null"` and the empty string become null, anything else stays text.
pub(crate) fn attribute_value(text: &str) -> Json {
    match text {
        "true" => Json::Bool(true),
        "false" => Json::Bool(false),
        "" | "null" => Json::Null,
        _ => {
            if let Ok(i) = text.parse::<i64>() {
                return Json::from(i);
            }
            match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Json::from(f),
                _ => Json::String(text.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_value() {
        assert_eq!(attribute_value("true"), Json::Bool(true));
        assert_eq!(attribute_value("120"), Json::from(120));
        assert_eq!(attribute_value(""), Json::Null);
        assert_eq!(attribute_value("left"), Json::String("left".into()));
    }
}
