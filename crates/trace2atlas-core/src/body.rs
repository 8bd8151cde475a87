//! Best-effort response body reconstruction from span log events.
//!
//! Services in the demo application log structured events when they mutate
//! state; the original response bodies are not recorded anywhere in the
//! trace. For the event kinds we know, specific log fields are projected
//! into a minimal `response.body` mapping so the downstream contract check
//! has something to match against.

use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};

use crate::field_names::jaeger;
use crate::types::AttrValue;

/// Log event kinds with a known response-body projection.
///
/// Unknown kinds fall through without error; the table here must stay in
/// sync with the demo services' log statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    OrderCreated,
    PaymentAuthorized,
    ShipmentCreated,
    ItemAdded,
}

impl EventKind {
    fn from_event(event: &str) -> Option<EventKind> {
        match event {
            "order.created" => Some(EventKind::OrderCreated),
            "payment.authorized" => Some(EventKind::PaymentAuthorized),
            "shipment.created" => Some(EventKind::ShipmentCreated),
            "item.added" => Some(EventKind::ItemAdded),
            _ => None,
        }
    }

    /// Project this event's fields into the accumulating body.
    fn project(self, fields: &Map<String, JsonValue>, body: &mut BTreeMap<String, AttrValue>) {
        match self {
            EventKind::OrderCreated => {
                // First order id wins if several order.created events exist
                if !body.contains_key("id") {
                    project_field(fields, "order_id", "id", body);
                }
            }
            EventKind::PaymentAuthorized => {
                body.insert("authorised".to_string(), AttrValue::Bool(true));
                project_field(fields, "authorization_id", "authorizationID", body);
            }
            EventKind::ShipmentCreated => {
                project_field(fields, "tracking_number", "trackingNumber", body);
            }
            EventKind::ItemAdded => {
                project_field(fields, "item_id", "itemID", body);
                project_field(fields, "quantity", "quantity", body);
            }
        }
    }
}

/// Scan a span's log records and reconstruct a response body, if any of
/// the known event kinds appear. An empty accumulated body yields `None`;
/// an empty mapping is never emitted.
pub fn extract_response_body(logs: &[JsonValue]) -> Option<AttrValue> {
    let mut body = BTreeMap::new();
    for log in logs {
        let Some(fields) = log.get(jaeger::FIELDS).and_then(JsonValue::as_object) else {
            continue;
        };
        let event = fields
            .get(jaeger::EVENT)
            .and_then(JsonValue::as_str)
            .unwrap_or("");
        if let Some(kind) = EventKind::from_event(event) {
            kind.project(fields, &mut body);
        }
    }

    if body.is_empty() {
        None
    } else {
        Some(AttrValue::Map(body))
    }
}

/// Copy one log field into the body under `out_key`, skipping fields that
/// are absent or have no scalar representation.
fn project_field(
    fields: &Map<String, JsonValue>,
    field: &str,
    out_key: &str,
    body: &mut BTreeMap<String, AttrValue>,
) {
    if let Some(value) = fields.get(field).and_then(AttrValue::from_json) {
        body.insert(out_key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_map(logs: &[JsonValue]) -> BTreeMap<String, AttrValue> {
        match extract_response_body(logs) {
            Some(AttrValue::Map(map)) => map,
            other => panic!("expected body map, got {other:?}"),
        }
    }

    #[test]
    fn order_created_projects_order_id() {
        let logs = vec![json!({"fields": {"event": "order.created", "order_id": "ord-1"}})];
        let body = body_map(&logs);
        assert_eq!(body.get("id"), Some(&AttrValue::String("ord-1".to_string())));
    }

    #[test]
    fn first_order_id_wins() {
        let logs = vec![
            json!({"fields": {"event": "order.created", "order_id": "ord-1"}}),
            json!({"fields": {"event": "order.created", "order_id": "ord-2"}}),
        ];
        let body = body_map(&logs);
        assert_eq!(body.get("id"), Some(&AttrValue::String("ord-1".to_string())));
    }

    #[test]
    fn payment_authorized_sets_flag_even_without_id() {
        let logs = vec![json!({"fields": {"event": "payment.authorized"}})];
        let body = body_map(&logs);
        assert_eq!(body.get("authorised"), Some(&AttrValue::Bool(true)));
        assert!(!body.contains_key("authorizationID"));
    }

    #[test]
    fn payment_authorized_projects_authorization_id() {
        let logs = vec![json!({
            "fields": {"event": "payment.authorized", "authorization_id": "auth-7"}
        })];
        let body = body_map(&logs);
        assert_eq!(
            body.get("authorizationID"),
            Some(&AttrValue::String("auth-7".to_string()))
        );
    }

    #[test]
    fn item_added_projects_both_fields() {
        let logs = vec![json!({
            "fields": {"event": "item.added", "item_id": "sku-3", "quantity": 2}
        })];
        let body = body_map(&logs);
        assert_eq!(body.get("itemID"), Some(&AttrValue::String("sku-3".to_string())));
        assert_eq!(body.get("quantity"), Some(&AttrValue::Int(2)));
    }

    #[test]
    fn shipment_created_projects_tracking_number() {
        let logs = vec![json!({
            "fields": {"event": "shipment.created", "tracking_number": "trk-9"}
        })];
        let body = body_map(&logs);
        assert_eq!(
            body.get("trackingNumber"),
            Some(&AttrValue::String("trk-9".to_string()))
        );
    }

    #[test]
    fn unknown_events_produce_no_body() {
        let logs = vec![
            json!({"fields": {"event": "cache.miss", "key": "user:1"}}),
            json!({"fields": {"other": 1}}),
            json!({"not_fields": {}}),
        ];
        assert_eq!(extract_response_body(&logs), None);
    }

    #[test]
    fn empty_logs_produce_no_body() {
        assert_eq!(extract_response_body(&[]), None);
    }

    #[test]
    fn matching_event_with_missing_field_stays_absent() {
        let logs = vec![json!({"fields": {"event": "shipment.created"}})];
        assert_eq!(extract_response_body(&logs), None);
    }
}
