//! Jaeger JSON adapter.
//!
//! Walks the flat `spans[]` array of a Jaeger export, resolving each span's
//! service, operation identifier, nanosecond timestamps, and attributes.
//! Jaeger timestamps are microseconds; everything is scaled to nanoseconds
//! on the way through.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::body::extract_response_body;
use crate::field_names::{jaeger, semconv};
use crate::opname::{self, MappingOptions};
use crate::types::{lenient_u64, AttrValue, NormalizedSpan, TraceDocument, UNKNOWN_SERVICE};

/// Convert a Jaeger-shaped document into the internal representation.
///
/// Per-span field problems degrade to defaults; this function itself never
/// fails. Spans come out in input encounter order.
pub fn to_internal(doc: &JsonValue, mapping: &MappingOptions) -> TraceDocument {
    let spans = doc
        .get(jaeger::SPANS)
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let spans_out = spans.iter().map(|span| convert_span(span, mapping)).collect();
    TraceDocument { spans: spans_out }
}

fn convert_span(span: &JsonValue, mapping: &MappingOptions) -> NormalizedSpan {
    let service = resolve_service(span);
    let op_name = span
        .get(jaeger::OPERATION_NAME)
        .and_then(JsonValue::as_str)
        .unwrap_or("");

    let (method, mut path) = opname::split_operation(op_name);

    let tags = span.get(jaeger::TAGS).and_then(JsonValue::as_object);

    // The operation string is the preferred path source; the http.url tag
    // is a fallback when the span was named some other way.
    if path.is_empty() {
        if let Some(url) = tags
            .and_then(|t| t.get(semconv::HTTP_URL))
            .and_then(JsonValue::as_str)
        {
            path = path_from_url(url);
            debug!(url, path = %path, "derived path from http.url tag");
        }
    }

    let name = opname::resolve(service, &method, &path, mapping);

    let start_us = lenient_u64(span.get(jaeger::START_TIME), 0);
    let dur_us = lenient_u64(span.get(jaeger::DURATION), 0);
    let start_nanos = start_us.saturating_mul(1000);
    let end_nanos = if dur_us != 0 {
        start_us.saturating_add(dur_us).saturating_mul(1000)
    } else {
        start_nanos
    };

    let mut attributes = BTreeMap::new();
    if let Some(status) = tags
        .and_then(|t| t.get(semconv::HTTP_STATUS_CODE))
        .and_then(AttrValue::from_json)
    {
        attributes.insert(semconv::HTTP_STATUS_CODE.to_string(), status);
    }

    let logs = span
        .get(jaeger::LOGS)
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if let Some(body) = extract_response_body(logs) {
        attributes.insert(semconv::RESPONSE_BODY.to_string(), body);
    }

    NormalizedSpan {
        name,
        service: service.to_string(),
        start_nanos,
        end_nanos,
        attributes,
    }
}

/// First non-empty of `process.serviceName`, `process.service`, sentinel.
fn resolve_service(span: &JsonValue) -> &str {
    let process = span.get(jaeger::PROCESS).and_then(JsonValue::as_object);
    process
        .and_then(|p| p.get(jaeger::SERVICE_NAME))
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            process
                .and_then(|p| p.get(jaeger::SERVICE))
                .and_then(JsonValue::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(UNKNOWN_SERVICE)
}

/// Extract a URL's path part: everything after the first `://`, then after
/// the first following `/`, prefixed with `/`. A url without either
/// separator passes through wholesale, matching the lenient behavior the
/// rest of the pipeline expects.
fn path_from_url(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let tail = rest.split_once('/').map_or(rest, |(_, tail)| tail);
    format!("/{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(doc: JsonValue) -> TraceDocument {
        to_internal(&doc, &MappingOptions::default())
    }

    #[test]
    fn microseconds_scale_to_nanoseconds() {
        let doc = json!({"spans": [{
            "operationName": "GET /catalogue",
            "process": {"serviceName": "catalogue"},
            "startTime": 1000,
            "duration": 500,
        }]});

        let out = convert(doc);
        assert_eq!(out.spans.len(), 1);
        assert_eq!(out.spans[0].start_nanos, 1_000_000);
        assert_eq!(out.spans[0].end_nanos, 1_500_000);
    }

    #[test]
    fn zero_duration_means_end_equals_start() {
        let doc = json!({"spans": [{
            "operationName": "GET /catalogue",
            "startTime": 1000,
        }]});

        let out = convert(doc);
        assert_eq!(out.spans[0].start_nanos, 1_000_000);
        assert_eq!(out.spans[0].end_nanos, 1_000_000);
    }

    #[test]
    fn non_numeric_timestamps_default_to_zero() {
        let doc = json!({"spans": [{
            "operationName": "GET /catalogue",
            "startTime": "garbage",
            "duration": {"oops": 1},
        }]});

        let out = convert(doc);
        assert_eq!(out.spans[0].start_nanos, 0);
        assert_eq!(out.spans[0].end_nanos, 0);
    }

    #[test]
    fn end_never_precedes_start_for_valid_durations() {
        let doc = json!({"spans": [
            {"operationName": "GET /a", "startTime": 10, "duration": 0},
            {"operationName": "GET /b", "startTime": 10, "duration": 3},
        ]});

        for span in convert(doc).spans {
            assert!(span.end_nanos >= span.start_nanos);
        }
    }

    #[test]
    fn service_fallback_chain() {
        let doc = json!({"spans": [
            {"operationName": "GET /a", "process": {"serviceName": "svc-a"}},
            {"operationName": "GET /b", "process": {"serviceName": "", "service": "svc-b"}},
            {"operationName": "GET /c", "process": {}},
            {"operationName": "GET /d"},
        ]});

        let services: Vec<String> = convert(doc).spans.into_iter().map(|s| s.service).collect();
        assert_eq!(services, ["svc-a", "svc-b", UNKNOWN_SERVICE, UNKNOWN_SERVICE]);
    }

    #[test]
    fn operation_string_drives_the_name() {
        let doc = json!({"spans": [{
            "operationName": "POST /carts/{id}",
            "process": {"serviceName": "cart"},
        }]});

        assert_eq!(convert(doc).spans[0].name, "createCarts");
    }

    #[test]
    fn http_url_tag_is_the_path_fallback() {
        // operationName has no method/path shape, so the url tag supplies it
        let doc = json!({"spans": [{
            "operationName": "catalogue-lookup",
            "process": {"serviceName": "catalogue"},
            "tags": {"http.url": "http://catalogue/catalogue"},
        }]});

        // No method survives the split, so the name is the bare camelized
        // segment
        assert_eq!(convert(doc).spans[0].name, "Catalogue");
    }

    #[test]
    fn path_from_url_handles_degenerate_inputs() {
        assert_eq!(path_from_url("http://host/a/b"), "/a/b");
        assert_eq!(path_from_url("http://host/"), "/");
        assert_eq!(path_from_url("host/a"), "/a");
        assert_eq!(path_from_url("bare"), "/bare");
    }

    #[test]
    fn status_code_tag_is_copied_verbatim() {
        let doc = json!({"spans": [{
            "operationName": "GET /catalogue",
            "tags": {"http.status_code": 200, "http.method": "GET"},
        }]});

        let attrs = &convert(doc).spans[0].attributes;
        assert_eq!(attrs.get("http.status_code"), Some(&AttrValue::Int(200)));
        // Other tags are not carried over
        assert!(!attrs.contains_key("http.method"));
    }

    #[test]
    fn log_events_become_response_body() {
        let doc = json!({"spans": [{
            "operationName": "POST /orders",
            "process": {"serviceName": "orders"},
            "logs": [{"fields": {"event": "order.created", "order_id": "ord-1"}}],
        }]});

        let attrs = &convert(doc).spans[0].attributes;
        let Some(AttrValue::Map(body)) = attrs.get("response.body") else {
            panic!("expected response.body map");
        };
        assert_eq!(body.get("id"), Some(&AttrValue::String("ord-1".to_string())));
    }

    #[test]
    fn spans_preserve_input_order() {
        let doc = json!({"spans": [
            {"operationName": "GET /a"},
            {"operationName": "GET /b"},
            {"operationName": "GET /a"},
        ]});

        let names: Vec<String> = convert(doc).spans.into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["getA", "getB", "getA"]);
    }

    #[test]
    fn demo_mapping_applies_per_span() {
        let doc = json!({"spans": [{
            "operationName": "POST /paymentAuth",
            "process": {"serviceName": "payment"},
        }]});

        let mapping = MappingOptions {
            demo: true,
            ..Default::default()
        };
        let out = to_internal(&doc, &mapping);
        assert_eq!(out.spans[0].name, "authorizePayment");
    }
}
