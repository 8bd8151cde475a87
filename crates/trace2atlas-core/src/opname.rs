//! Operation-name derivation and override mapping.
//!
//! Span names arrive as free-form HTTP operation strings (`"POST /orders"`)
//! and leave as stable operation identifiers (`"createOrder"`). Derivation
//! is a heuristic over method + path; an optional override table (built-in
//! demo table or user-supplied) replaces the heuristic result for exact
//! `"<service> <METHOD> <path>"` matches.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Built-in override table for the Sock Shop demo endpoints, matching the
/// operation names declared in the demo service contracts.
static DEMO_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("catalogue GET /catalogue", "getCatalogue"),
        ("cart POST /carts/{id}", "addToCart"),
        ("orders POST /orders", "createOrder"),
        ("payment POST /paymentAuth", "authorizePayment"),
        ("shipping POST /shipping", "createShipment"),
    ])
});

/// Which override tables to consult after derivation.
#[derive(Debug, Clone, Default)]
pub struct MappingOptions {
    /// Apply the built-in demo table.
    pub demo: bool,
    /// User-supplied `"<service> <METHOD> <path>" -> name` overrides,
    /// applied after the demo table when both are set.
    pub custom: HashMap<String, String>,
}

/// Resolve the operation identifier for one span.
///
/// Pure two-stage function: derive a candidate from method + path, then
/// let the requested override tables replace it. A missing table entry
/// leaves the candidate unchanged.
pub fn resolve(service: &str, method: &str, path: &str, mapping: &MappingOptions) -> String {
    let mut name = derive_name(method, path);
    if mapping.demo {
        name = apply_demo_mapping(service, method, path, name);
    }
    if !mapping.custom.is_empty() {
        name = apply_custom_mapping(&mapping.custom, service, method, path, name);
    }
    name
}

/// Derive a candidate operation name from an HTTP method and URL path.
///
/// The last path segment that is neither empty nor a `{placeholder}` is
/// camelized and prefixed with a verb for the method; unknown methods use
/// their lowercase form as the prefix verbatim.
pub fn derive_name(method: &str, path: &str) -> String {
    let method = method.trim().to_uppercase();
    let path = path.trim();
    if path.is_empty() {
        if method.is_empty() {
            return "op".to_string();
        }
        return method.to_lowercase();
    }

    let last = path
        .split('/')
        .filter(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .last()
        .unwrap_or("op");
    let base = camelize(last);

    let verb = match method.as_str() {
        "GET" => "get".to_string(),
        "POST" => "create".to_string(),
        "PUT" => "update".to_string(),
        "PATCH" => "patch".to_string(),
        "DELETE" => "delete".to_string(),
        other => other.to_lowercase(),
    };
    format!("{verb}{base}")
}

/// Split a Jaeger operation string into `(method, path)`.
///
/// Only `"<alpha-method> <path>"` qualifies; anything else yields two
/// empty strings and derivation falls back to the `http.url` tag.
pub fn split_operation(op_name: &str) -> (String, String) {
    match op_name.split_once(' ') {
        Some((method, path))
            if !method.is_empty() && method.chars().all(char::is_alphabetic) =>
        {
            (method.to_string(), path.to_string())
        }
        _ => (String::new(), String::new()),
    }
}

/// Look up the built-in demo table; the service is lowercased to match the
/// table's keys.
fn apply_demo_mapping(service: &str, method: &str, path: &str, candidate: String) -> String {
    let key = format!(
        "{} {} {}",
        service.trim().to_lowercase(),
        method.trim().to_uppercase(),
        path.trim()
    );
    match DEMO_MAPPING.get(key.trim()) {
        Some(name) => (*name).to_string(),
        None => candidate,
    }
}

/// Look up a user-supplied table; the service keeps its case.
fn apply_custom_mapping(
    mapping: &HashMap<String, String>,
    service: &str,
    method: &str,
    path: &str,
    candidate: String,
) -> String {
    let key = format!(
        "{} {} {}",
        service.trim(),
        method.trim().to_uppercase(),
        path.trim()
    );
    mapping.get(&key).cloned().unwrap_or(candidate)
}

fn camelize(segment: &str) -> String {
    let cleaned: String = segment.chars().filter(|c| c.is_alphanumeric()).collect();
    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
