//! OTLP JSON adapter and attribute coercion.
//!
//! OTLP nests spans under resource and scope groupings and types every
//! attribute value as a single-variant object (`{"intValue": "3"}`). The
//! adapter flattens the nesting, coerces typed values to plain scalars,
//! and normalizes the HTTP status attribute.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::field_names::{otlp, semconv};
use crate::types::{lenient_u64, AttrValue, NormalizedSpan, TraceDocument, UNKNOWN_SERVICE};

/// Convert an OTLP-shaped document into the internal representation.
///
/// Span names are taken as-is; OTLP exporters already emit operation
/// identifiers, so no derivation or mapping runs here. Spans come out in
/// input encounter order across all resource and scope groupings.
pub fn to_internal(doc: &JsonValue) -> TraceDocument {
    let mut spans_out = Vec::new();

    for resource_spans in iter_array(doc.get(otlp::RESOURCE_SPANS)) {
        let service = resource_service_name(resource_spans);
        for scope_spans in iter_array(resource_spans.get(otlp::SCOPE_SPANS)) {
            for span in iter_array(scope_spans.get(otlp::SPANS)) {
                spans_out.push(convert_span(span, service));
            }
        }
    }

    TraceDocument { spans: spans_out }
}

fn convert_span(span: &JsonValue, service: &str) -> NormalizedSpan {
    let name = span
        .get(otlp::NAME)
        .and_then(JsonValue::as_str)
        .unwrap_or("")
        .to_string();

    let start_nanos = lenient_u64(span.get(otlp::START_TIME_UNIX_NANO), 0);
    let end_nanos = lenient_u64(span.get(otlp::END_TIME_UNIX_NANO), start_nanos);

    let mut attributes = BTreeMap::new();
    for attr in iter_array(span.get(otlp::ATTRIBUTES)) {
        let Some(key) = attr.get(otlp::KEY).and_then(JsonValue::as_str) else {
            continue;
        };
        let Some(value) = attr.get(otlp::VALUE).and_then(coerce_attr_value) else {
            continue;
        };
        attributes.insert(key.to_string(), value);
    }

    // Some exporters put the status under response.status; mirror it into
    // the semantic-convention key without removing the original.
    if !attributes.contains_key(semconv::HTTP_STATUS_CODE) {
        if let Some(status) = attributes.get(semconv::RESPONSE_STATUS).cloned() {
            attributes.insert(semconv::HTTP_STATUS_CODE.to_string(), status);
        }
    }

    NormalizedSpan {
        name,
        service: service.to_string(),
        start_nanos,
        end_nanos,
        attributes,
    }
}

/// First `resource.attributes` entry with key `service.name` and a
/// non-empty `stringValue` wins; otherwise the sentinel.
fn resource_service_name(resource_spans: &JsonValue) -> &str {
    let attributes = resource_spans
        .get(otlp::RESOURCE)
        .and_then(|r| r.get(otlp::ATTRIBUTES));
    for attr in iter_array(attributes) {
        if attr.get(otlp::KEY).and_then(JsonValue::as_str) != Some(semconv::SERVICE_NAME) {
            continue;
        }
        let value = attr
            .get(otlp::VALUE)
            .and_then(|v| v.get(otlp::STRING_VALUE))
            .and_then(JsonValue::as_str);
        if let Some(name) = value.filter(|s| !s.is_empty()) {
            return name;
        }
    }
    UNKNOWN_SERVICE
}

/// Coerce an OTLP typed value object to a normalized scalar.
///
/// Variants are tried in a fixed priority order (string, int, double,
/// bool); the first key present decides the target type. OTLP JSON encodes
/// 64-bit numbers as strings, so `intValue`/`doubleValue` parse string
/// payloads; a payload that does not parse falls back to the raw value
/// unmodified rather than failing the span.
pub(crate) fn coerce_attr_value(value: &JsonValue) -> Option<AttrValue> {
    let variants = value.as_object()?;

    if let Some(raw) = variants.get(otlp::STRING_VALUE) {
        return AttrValue::from_json(raw);
    }
    if let Some(raw) = variants.get(otlp::INT_VALUE) {
        let parsed = match raw {
            JsonValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(AttrValue::Int),
            JsonValue::String(s) => s.trim().parse::<i64>().ok().map(AttrValue::Int),
            _ => None,
        };
        return parsed.or_else(|| AttrValue::from_json(raw));
    }
    if let Some(raw) = variants.get(otlp::DOUBLE_VALUE) {
        let parsed = match raw {
            JsonValue::Number(n) => n.as_f64().map(AttrValue::Float),
            JsonValue::String(s) => s.trim().parse::<f64>().ok().map(AttrValue::Float),
            _ => None,
        };
        return parsed.or_else(|| AttrValue::from_json(raw));
    }
    if let Some(raw) = variants.get(otlp::BOOL_VALUE) {
        return raw
            .as_bool()
            .map(AttrValue::Bool)
            .or_else(|| AttrValue::from_json(raw));
    }

    None
}

fn iter_array<'a>(value: Option<&'a JsonValue>) -> impl Iterator<Item = &'a JsonValue> {
    value
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}
