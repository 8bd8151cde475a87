//! Error types for trace conversion.

use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Field-level problems (unparsable timestamps, malformed attribute values,
/// unreadable mapping files) are recovered in place with defaults and never
/// reach this enum; only a document matching neither known shape is fatal.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Top-level document matches neither known trace export shape.
    #[error("unrecognized input format: expected OTLP resourceSpans or Jaeger spans[].operationName")]
    UnrecognizedFormat,
}

/// Result type alias for ConvertError
pub type Result<T> = std::result::Result<T, ConvertError>;
