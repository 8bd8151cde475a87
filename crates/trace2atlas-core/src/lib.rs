// trace2atlas-core - Trace normalization logic
//
// This crate contains the PURE conversion logic for normalizing Jaeger
// and OTLP JSON trace exports into the internal trace representation.
// No I/O, no process concerns; deterministic for the same input.

use serde_json::Value as JsonValue;

pub mod body;
pub mod error;
pub mod field_names;
pub mod format;
pub mod jaeger;
pub mod opname;
pub mod otlp;
pub mod types;

// Re-export commonly used types
pub use error::ConvertError;
pub use format::InputFormat;
pub use opname::MappingOptions;
pub use types::{AttrValue, NormalizedSpan, TraceDocument, UNKNOWN_SERVICE};

/// Normalize a parsed trace export document into the internal representation.
///
/// Detects the input shape and routes to the matching adapter. Mapping
/// options only affect Jaeger input; OTLP span names are taken as-is.
///
/// # Errors
/// [`ConvertError::UnrecognizedFormat`] when the document matches neither
/// known shape. Per-span and per-field problems inside a recognized
/// document degrade to defaults instead of erroring; either the whole
/// document converts or nothing does.
pub fn convert(doc: &JsonValue, mapping: &MappingOptions) -> Result<TraceDocument, ConvertError> {
    match InputFormat::detect(doc)? {
        InputFormat::Otlp => Ok(otlp::to_internal(doc)),
        InputFormat::Jaeger => Ok(jaeger::to_internal(doc, mapping)),
    }
}
