//! Field name constants for the supported trace export shapes.
//!
//! Two wire formats flow through the converter, each with its own naming
//! convention:
//!
//! - **Jaeger JSON** (camelCase, flat tags map, microsecond timestamps)
//! - **OTLP JSON** (camelCase, nested resource/scope groupings, typed
//!   attribute values, nanosecond timestamps)
//!
//! Attribute keys shared with OpenTelemetry semantic conventions live in
//! [`semconv`], together with the converter's own reserved output keys.

/// Jaeger JSON export field names.
pub mod jaeger {
    /// Top-level span array
    pub const SPANS: &str = "spans";
    /// Span operation name, e.g. `"GET /catalogue"`
    pub const OPERATION_NAME: &str = "operationName";
    /// Per-span process descriptor
    pub const PROCESS: &str = "process";
    /// Service name inside the process descriptor
    pub const SERVICE_NAME: &str = "serviceName";
    /// Legacy service name field, read as a fallback
    pub const SERVICE: &str = "service";
    /// Span start, microseconds since Unix epoch
    pub const START_TIME: &str = "startTime";
    /// Span duration, microseconds
    pub const DURATION: &str = "duration";
    /// Flat tag map
    pub const TAGS: &str = "tags";
    /// Span log records
    pub const LOGS: &str = "logs";
    /// Field map inside a log record
    pub const FIELDS: &str = "fields";
    /// Event discriminator inside a log record's fields
    pub const EVENT: &str = "event";
}

/// OTLP JSON export field names (canonical camelCase).
pub mod otlp {
    /// Top-level resource grouping array
    pub const RESOURCE_SPANS: &str = "resourceSpans";
    /// Scope grouping array under a resource
    pub const SCOPE_SPANS: &str = "scopeSpans";
    /// Span array under a scope
    pub const SPANS: &str = "spans";
    /// Resource descriptor
    pub const RESOURCE: &str = "resource";
    /// Attribute list (resource or span level)
    pub const ATTRIBUTES: &str = "attributes";
    /// Attribute key
    pub const KEY: &str = "key";
    /// Attribute typed value container
    pub const VALUE: &str = "value";
    /// Span name
    pub const NAME: &str = "name";
    /// Span start, nanoseconds since Unix epoch
    pub const START_TIME_UNIX_NANO: &str = "startTimeUnixNano";
    /// Span end, nanoseconds since Unix epoch
    pub const END_TIME_UNIX_NANO: &str = "endTimeUnixNano";

    // AnyValue variant keys, in coercion priority order
    pub const STRING_VALUE: &str = "stringValue";
    pub const INT_VALUE: &str = "intValue";
    pub const DOUBLE_VALUE: &str = "doubleValue";
    pub const BOOL_VALUE: &str = "boolValue";
}

/// Semantic-convention attribute keys and reserved output keys.
pub mod semconv {
    /// Resource attribute identifying the emitting service
    pub const SERVICE_NAME: &str = "service.name";
    /// HTTP response status code
    pub const HTTP_STATUS_CODE: &str = "http.status_code";
    /// Full request URL (Jaeger tag)
    pub const HTTP_URL: &str = "http.url";
    /// Non-standard status key some exporters emit instead of
    /// `http.status_code`
    pub const RESPONSE_STATUS: &str = "response.status";
    /// Reserved output key holding the reconstructed response body
    pub const RESPONSE_BODY: &str = "response.body";
}
