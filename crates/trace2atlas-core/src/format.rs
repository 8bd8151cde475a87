//! Input format detection for top-level trace documents.

use serde_json::Value as JsonValue;

use crate::error::{ConvertError, Result};
use crate::field_names::{jaeger, otlp};

/// Supported trace export shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Jaeger JSON: `{"spans": [{"operationName": ...}]}`
    Jaeger,
    /// OTLP JSON: `{"resourceSpans": [...]}`
    Otlp,
}

impl InputFormat {
    /// Inspect the top-level shape of a parsed document and pick the
    /// matching adapter.
    ///
    /// Detection is purely structural: an object with a `resourceSpans`
    /// key is OTLP; otherwise an object with a non-empty `spans` array
    /// whose first element carries `operationName` is Jaeger. Anything
    /// else is rejected outright, distinct from a JSON parse error.
    pub fn detect(doc: &JsonValue) -> Result<InputFormat> {
        let Some(map) = doc.as_object() else {
            return Err(ConvertError::UnrecognizedFormat);
        };

        if map.contains_key(otlp::RESOURCE_SPANS) {
            return Ok(InputFormat::Otlp);
        }

        let first_span = map
            .get(jaeger::SPANS)
            .and_then(JsonValue::as_array)
            .and_then(|spans| spans.first());
        match first_span {
            Some(JsonValue::Object(span)) if span.contains_key(jaeger::OPERATION_NAME) => {
                Ok(InputFormat::Jaeger)
            }
            _ => Err(ConvertError::UnrecognizedFormat),
        }
    }
}
