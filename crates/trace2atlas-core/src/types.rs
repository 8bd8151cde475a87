//! Normalized trace model shared by the Jaeger and OTLP adapters.
//!
//! These types are the output side of the conversion: the input side stays
//! untyped (`serde_json::Value`) because both wire formats are too loose to
//! deserialize into fixed structs without rejecting real-world exports.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Service name used when a span carries no discoverable service identity.
pub const UNKNOWN_SERVICE: &str = "unknown-service";

/// Scalar attribute value in the normalized output.
///
/// Wire formats carry typed values (OTLP) or free-form JSON (Jaeger tags);
/// both coerce into this explicit set. `Map` exists for the reserved
/// `response.body` attribute, which holds a nested mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Best-effort conversion from untyped JSON.
    ///
    /// Null and arrays have no place in the normalized model and map to
    /// `None`, which callers treat as "attribute not written".
    pub fn from_json(value: &JsonValue) -> Option<AttrValue> {
        match value {
            JsonValue::String(s) => Some(AttrValue::String(s.clone())),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(AttrValue::Int(i))
                } else {
                    n.as_f64().map(AttrValue::Float)
                }
            }
            JsonValue::Bool(b) => Some(AttrValue::Bool(*b)),
            JsonValue::Object(map) => {
                let converted = map
                    .iter()
                    .filter_map(|(k, v)| AttrValue::from_json(v).map(|v| (k.clone(), v)))
                    .collect();
                Some(AttrValue::Map(converted))
            }
            JsonValue::Null | JsonValue::Array(_) => None,
        }
    }
}

/// A single normalized span: the internal output unit.
///
/// `end_nanos >= start_nanos` is expected but not enforced; garbage input
/// timestamps pass through rather than aborting the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSpan {
    /// Resolved operation identifier, matched downstream against contracts.
    pub name: String,
    /// Originating service, or [`UNKNOWN_SERVICE`].
    pub service: String,
    /// Start timestamp, nanoseconds since Unix epoch.
    pub start_nanos: u64,
    /// End timestamp, nanoseconds since Unix epoch.
    pub end_nanos: u64,
    /// Normalized attributes; may contain the reserved `response.body` key.
    pub attributes: BTreeMap<String, AttrValue>,
}

/// The internal output envelope, spans in input encounter order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceDocument {
    pub spans: Vec<NormalizedSpan>,
}

/// Read a JSON value as a non-negative integer, tolerating the
/// string-encoded numbers OTLP JSON uses for 64-bit fields.
///
/// Anything that does not parse cleanly yields `default` instead of an
/// error; timestamp fields degrade, they never abort a conversion.
pub(crate) fn lenient_u64(value: Option<&JsonValue>, default: u64) -> u64 {
    match value {
        Some(JsonValue::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(default),
        Some(JsonValue::String(s)) => s.trim().parse::<u64>().unwrap_or(default),
        _ => default,
    }
}
