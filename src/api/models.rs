use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRequest {
    pub url: String,
}

/// Parsed recipe data as exchanged on `/api/v1/parse`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub author: String,
}

impl Recipe {
    /// Reads a response body without validating its shape.
    ///
    /// Missing or mistyped fields come back empty so the panels fall back to
    /// their placeholders.
    pub fn from_value(value: &Value) -> Self {
        Recipe {
            ingredients: text_list(value.get("ingredients")),
            steps: text_list(value.get("steps")),
            author: value.get("author").and_then(scalar_text).unwrap_or_default(),
        }
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
