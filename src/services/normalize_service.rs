use crate::models::question::{McqItem, QuizResult, TrueFalseItem};
use serde_json::Value as JsonValue;

/// Outcome of reading one generator reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    BackendError { message: String, details: JsonValue },
    Fallback { raw: String },
    Populated(QuizResult),
}

pub struct NormalizeService;

impl NormalizeService {
    pub fn normalize(data: &JsonValue) -> Normalized {
        if let Some(message) = data.get("error").and_then(Self::error_message) {
            return Normalized::BackendError {
                message,
                details: data.clone(),
            };
        }

        let mcqs = Self::items(data, "mcqs");
        let true_false = Self::items(data, "true_false");

        if mcqs.is_empty() && true_false.is_empty() {
            let raw = data
                .get("raw")
                .and_then(|r| r.as_str())
                .unwrap_or("")
                .to_string();
            return Normalized::Fallback { raw };
        }

        Normalized::Populated(QuizResult {
            mcqs: mcqs.iter().map(Self::coerce_mcq).collect(),
            true_false: true_false.iter().map(Self::coerce_true_false).collect(),
        })
    }

    /// Mirrors JS truthiness: null, false, "" and 0 mean "no error".
    fn error_message(v: &JsonValue) -> Option<String> {
        match v {
            JsonValue::Null | JsonValue::Bool(false) => None,
            JsonValue::String(s) if s.is_empty() => None,
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }

    fn items<'a>(data: &'a JsonValue, key: &str) -> &'a [JsonValue] {
        match data.get(key) {
            Some(JsonValue::Array(arr)) => arr.as_slice(),
            Some(JsonValue::Null) | None => &[],
            Some(other) => {
                tracing::warn!(field = key, value = %other, "Ignoring non-array question list");
                &[]
            }
        }
    }

    fn coerce_mcq(v: &JsonValue) -> McqItem {
        let options = v.get("options").and_then(|o| o.as_array());
        let option = |idx: usize| {
            options
                .and_then(|arr| arr.get(idx))
                .map(Self::text)
                .unwrap_or_default()
        };

        McqItem {
            question: Self::field(v, "question"),
            options: [option(0), option(1), option(2), option(3)],
            answer: Self::field(v, "answer"),
        }
    }

    fn coerce_true_false(v: &JsonValue) -> TrueFalseItem {
        TrueFalseItem {
            question: Self::field(v, "question"),
            answer: Self::field(v, "answer"),
        }
    }

    fn field(v: &JsonValue, key: &str) -> String {
        v.get(key).map(Self::text).unwrap_or_default()
    }

    fn text(v: &JsonValue) -> String {
        match v {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }
}
