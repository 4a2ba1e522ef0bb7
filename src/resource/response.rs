//! Response-shape normalization
//!
//! The bot API answers list endpoints in three shapes: a bare array, an
//! object wrapping the records in a `data` field, or a single object. The
//! union is decoded once here instead of branching in every handler.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse {
    /// Bare JSON array of records.
    Bare(Vec<Value>),
    /// Records wrapped in a `data` envelope (paginated endpoints).
    Enveloped(Vec<Value>),
    /// A single record.
    Single(Value),
}

impl ListResponse {
    pub fn decode(response: Value) -> Self {
        match response {
            Value::Array(items) => ListResponse::Bare(items),
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => ListResponse::Enveloped(items),
                Some(other) => {
                    // A non-array `data` field is payload, not an envelope.
                    map.insert("data".to_string(), other);
                    ListResponse::Single(Value::Object(map))
                }
                None => ListResponse::Single(Value::Object(map)),
            },
            other => ListResponse::Single(other),
        }
    }

    /// Flatten into the record list; a single object becomes a one-element
    /// list, preserving remote order otherwise.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            ListResponse::Bare(items) | ListResponse::Enveloped(items) => items,
            ListResponse::Single(value) => vec![value],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_bare_arrays() {
        let decoded = ListResponse::decode(json!([{ "id": 1 }, { "id": 2 }]));
        assert_eq!(
            decoded,
            ListResponse::Bare(vec![json!({ "id": 1 }), json!({ "id": 2 })])
        );
    }

    #[test]
    fn decodes_data_envelopes() {
        let decoded = ListResponse::decode(json!({ "data": [{ "id": 1 }], "total": 1 }));
        assert_eq!(decoded, ListResponse::Enveloped(vec![json!({ "id": 1 })]));
    }

    #[test]
    fn lone_objects_become_single() {
        let decoded = ListResponse::decode(json!({ "id": 7, "name": "Ana" }));
        assert_eq!(
            decoded.into_items(),
            vec![json!({ "id": 7, "name": "Ana" })]
        );
    }

    #[test]
    fn scalar_data_field_is_not_an_envelope() {
        let decoded = ListResponse::decode(json!({ "data": "opaque", "id": 3 }));
        assert_eq!(
            decoded.into_items(),
            vec![json!({ "data": "opaque", "id": 3 })]
        );
    }

    #[test]
    fn envelope_preserves_remote_order() {
        let decoded = ListResponse::decode(json!({ "data": [{ "id": 2 }, { "id": 1 }] }));
        assert_eq!(
            decoded.into_items(),
            vec![json!({ "id": 2 }), json!({ "id": 1 })]
        );
    }
}
