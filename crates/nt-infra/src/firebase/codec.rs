//! Firestore typed value codec.
//!
//! Firestore wraps every value in a single-key object naming its type
//! (`{"stringValue": "x"}`). Integers travel as decimal strings.

use serde_json::{json, Map, Number, Value};

use nt_core::ports::{Document, DocumentStoreError};

pub fn encode_fields(document: &Document) -> Value {
    let fields: Map<String, Value> = document
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    Value::Object(fields)
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Decode the `fields` object of a Firestore document. A missing `fields`
/// (empty document) decodes to an empty map.
pub fn decode_fields(fields: Option<&Value>) -> Result<Document, DocumentStoreError> {
    let Some(fields) = fields else {
        return Ok(Document::new());
    };
    let fields = fields
        .as_object()
        .ok_or_else(|| malformed("fields is not an object"))?;

    fields
        .iter()
        .map(|(key, value)| -> Result<(String, Value), DocumentStoreError> {
            Ok((key.clone(), decode_value(value)?))
        })
        .collect()
}

fn decode_value(value: &Value) -> Result<Value, DocumentStoreError> {
    let typed = value
        .as_object()
        .ok_or_else(|| malformed("typed value is not an object"))?;
    let (kind, inner) = typed
        .iter()
        .next()
        .ok_or_else(|| malformed("typed value is empty"))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| malformed("booleanValue")),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| malformed("integerValue"))
        }
        "doubleValue" => {
            let parsed = match inner {
                Value::Number(n) => n.as_f64(),
                // NaN and Infinity arrive as strings.
                Value::String(s) => s.parse::<f64>().ok(),
                _ => None,
            };
            parsed
                .map(|f| Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null))
                .ok_or_else(|| malformed("doubleValue"))
        }
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| malformed(kind)),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => decode_fields(inner.get("fields")).map(Value::Object),
        other => Err(malformed(&format!("unsupported value type {other}"))),
    }
}

fn malformed(what: &str) -> DocumentStoreError {
    DocumentStoreError::Malformed(format!("firestore value: {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn settings_document_encodes_to_typed_values() {
        let encoded = encode_fields(&doc(json!({
            "height": 180.5,
            "age": 30,
            "activity": "moderate",
            "uid": "u-1",
        })));

        assert_eq!(
            encoded,
            json!({
                "height": { "doubleValue": 180.5 },
                "age": { "integerValue": "30" },
                "activity": { "stringValue": "moderate" },
                "uid": { "stringValue": "u-1" },
            })
        );
    }

    #[test]
    fn decodes_values_written_by_other_clients() {
        let decoded = decode_fields(Some(&json!({
            "createdAt": { "timestampValue": "2024-05-01T10:00:00Z" },
            "weightKg": { "integerValue": "70" },
            "tags": { "arrayValue": { "values": [{ "stringValue": "a" }] } },
            "empty": { "arrayValue": {} },
            "nested": { "mapValue": { "fields": { "ok": { "booleanValue": true } } } },
            "nothing": { "nullValue": null },
        })))
        .unwrap();

        assert_eq!(
            Value::Object(decoded),
            json!({
                "createdAt": "2024-05-01T10:00:00Z",
                "weightKg": 70,
                "tags": ["a"],
                "empty": [],
                "nested": { "ok": true },
                "nothing": null,
            })
        );
    }

    #[test]
    fn missing_fields_is_an_empty_document() {
        assert!(decode_fields(None).unwrap().is_empty());
    }

    #[test]
    fn bad_integer_is_malformed() {
        let err = decode_fields(Some(&json!({ "age": { "integerValue": "x" } }))).unwrap_err();
        assert!(matches!(err, DocumentStoreError::Malformed(_)));
    }
}
