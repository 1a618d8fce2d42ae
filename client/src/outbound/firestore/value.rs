//! Tagged wire-value codec for the document store.
//!
//! Every field travels wrapped in a type tag (`stringValue`,
//! `integerValue`-as-string, `doubleValue`, `booleanValue`, `nullValue`,
//! `arrayValue.values`, `mapValue.fields`). [`WireValue`] is the closed sum
//! over those tags with explicit encode/decode, so adding a tag breaks every
//! match that needs updating. Decoding collapses both numeric tags back into
//! plain JSON numbers.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::domain::ports::Fields;

/// One tagged value on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    String(String),
    /// Integral number; travels as a decimal string.
    Integer(i64),
    /// Fractional number; travels as a JSON number.
    Double(f64),
    Boolean(bool),
    Array(Vec<WireValue>),
    Map(BTreeMap<String, WireValue>),
}

/// Decode failures for tagged wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("wire value decode failed: {message}")]
pub struct WireDecodeError {
    message: String,
}

impl WireDecodeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl WireValue {
    /// Lift a plain JSON value into the tagged model.
    ///
    /// Integral numbers become [`WireValue::Integer`]; everything else
    /// fractional becomes [`WireValue::Double`].
    pub fn from_plain(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Boolean(*flag),
            Value::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .unwrap_or_else(|| Self::Double(number.as_f64().unwrap_or_default())),
            Value::String(text) => Self::String(text.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from_plain).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .iter()
                    .map(|(key, item)| (key.clone(), Self::from_plain(item)))
                    .collect(),
            ),
        }
    }

    /// Collapse the tagged model back into a plain JSON value.
    pub fn into_plain(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::String(text) => Value::String(text),
            Self::Integer(number) => Value::from(number),
            Self::Double(number) => Value::from(number),
            Self::Boolean(flag) => Value::Bool(flag),
            Self::Array(items) => {
                Value::Array(items.into_iter().map(Self::into_plain).collect())
            }
            Self::Map(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, item.into_plain()))
                    .collect(),
            ),
        }
    }

    /// Encode into the tagged JSON representation sent over the wire.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Null => json!({ "nullValue": null }),
            Self::String(text) => json!({ "stringValue": text }),
            Self::Integer(number) => json!({ "integerValue": number.to_string() }),
            Self::Double(number) => json!({ "doubleValue": number }),
            Self::Boolean(flag) => json!({ "booleanValue": flag }),
            Self::Array(items) => {
                let values: Vec<Value> = items.iter().map(Self::to_wire).collect();
                json!({ "arrayValue": { "values": values } })
            }
            Self::Map(entries) => {
                let fields: Map<String, Value> = entries
                    .iter()
                    .map(|(key, item)| (key.clone(), item.to_wire()))
                    .collect();
                json!({ "mapValue": { "fields": fields } })
            }
        }
    }

    /// Decode one tagged JSON value.
    ///
    /// An `arrayValue` without `values` is the empty array; a `mapValue`
    /// without `fields` is the empty map. `integerValue` accepts both the
    /// canonical string form and a bare number.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-object value, an unrecognised tag, or a
    /// payload that does not match its tag.
    pub fn from_wire(raw: &Value) -> Result<Self, WireDecodeError> {
        let tagged = raw
            .as_object()
            .ok_or_else(|| WireDecodeError::new("expected a tagged object"))?;

        if let Some(text) = tagged.get("stringValue") {
            return text
                .as_str()
                .map(|s| Self::String(s.to_owned()))
                .ok_or_else(|| WireDecodeError::new("stringValue payload is not a string"));
        }
        if let Some(number) = tagged.get("integerValue") {
            return decode_integer(number);
        }
        if let Some(number) = tagged.get("doubleValue") {
            return number
                .as_f64()
                .map(Self::Double)
                .ok_or_else(|| WireDecodeError::new("doubleValue payload is not a number"));
        }
        if let Some(flag) = tagged.get("booleanValue") {
            return flag
                .as_bool()
                .map(Self::Boolean)
                .ok_or_else(|| WireDecodeError::new("booleanValue payload is not a boolean"));
        }
        if tagged.contains_key("nullValue") {
            return Ok(Self::Null);
        }
        if let Some(array) = tagged.get("arrayValue") {
            let items = array
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(Self::from_wire).collect())
                .unwrap_or_else(|| Ok(Vec::new()))?;
            return Ok(Self::Array(items));
        }
        if let Some(map) = tagged.get("mapValue") {
            let fields = map
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_wire_entries)
                .unwrap_or_else(|| Ok(BTreeMap::new()))?;
            return Ok(Self::Map(fields));
        }

        Err(WireDecodeError::new(format!(
            "unrecognised wire value tags: {:?}",
            tagged.keys().collect::<Vec<_>>()
        )))
    }
}

fn decode_integer(payload: &Value) -> Result<WireValue, WireDecodeError> {
    match payload {
        Value::String(text) => text
            .parse::<i64>()
            .map(WireValue::Integer)
            .map_err(|error| WireDecodeError::new(format!("integerValue {text:?}: {error}"))),
        Value::Number(number) => number
            .as_i64()
            .map(WireValue::Integer)
            .ok_or_else(|| WireDecodeError::new("integerValue number is out of range")),
        _ => Err(WireDecodeError::new(
            "integerValue payload is neither string nor number",
        )),
    }
}

fn decode_wire_entries(
    fields: &Map<String, Value>,
) -> Result<BTreeMap<String, WireValue>, WireDecodeError> {
    fields
        .iter()
        .map(|(key, item)| WireValue::from_wire(item).map(|value| (key.clone(), value)))
        .collect()
}

/// Encode a plain field map into a `{ "fields": { ... } }` document body.
pub fn encode_document(fields: &Fields) -> Value {
    let tagged: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), WireValue::from_plain(value).to_wire()))
        .collect();
    json!({ "fields": tagged })
}

/// Decode a tagged `fields` map into a plain field map.
///
/// # Errors
///
/// Returns an error when any field carries an unrecognised or malformed tag.
pub fn decode_fields(tagged: &Map<String, Value>) -> Result<Fields, WireDecodeError> {
    tagged
        .iter()
        .map(|(key, item)| {
            WireValue::from_wire(item).map(|value| (key.clone(), value.into_plain()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn round_trip(plain: Value) -> Value {
        let wire = WireValue::from_plain(&plain).to_wire();
        WireValue::from_wire(&wire)
            .expect("wire value decodes")
            .into_plain()
    }

    #[rstest]
    #[case::string(json!("xin chào"))]
    #[case::integer(json!(42))]
    #[case::negative_integer(json!(-7))]
    #[case::double(json!(3.5))]
    #[case::boolean(json!(true))]
    #[case::null(json!(null))]
    #[case::array(json!(["a", 1, false]))]
    #[case::object(json!({"note": "ok", "count": 2}))]
    #[case::nested_two_levels(json!({
        "user": {"id": 9, "tags": ["kitchen", {"weight": 0.5}]},
        "flags": [null, true],
    }))]
    fn plain_values_survive_the_wire(#[case] plain: Value) {
        assert_eq!(round_trip(plain.clone()), plain);
    }

    #[test]
    fn integers_and_doubles_take_different_tags() {
        assert_eq!(
            WireValue::from_plain(&json!(5)).to_wire(),
            json!({ "integerValue": "5" }),
            "integral numbers travel as strings"
        );
        assert_eq!(
            WireValue::from_plain(&json!(5.5)).to_wire(),
            json!({ "doubleValue": 5.5 }),
            "fractional numbers travel as numbers"
        );
    }

    #[test]
    fn integer_value_accepts_bare_numbers() {
        let decoded = WireValue::from_wire(&json!({ "integerValue": 12 }))
            .expect("numeric integerValue decodes");
        assert_eq!(decoded, WireValue::Integer(12));
    }

    #[test]
    fn empty_array_value_decodes_without_values_key() {
        let decoded =
            WireValue::from_wire(&json!({ "arrayValue": {} })).expect("empty array decodes");
        assert_eq!(decoded, WireValue::Array(Vec::new()));
    }

    #[test]
    fn unknown_tag_is_a_decode_error() {
        let error = WireValue::from_wire(&json!({ "timestampValue": "2026-08-30" }))
            .expect_err("unknown tag must not decode");
        assert!(
            error.to_string().contains("unrecognised"),
            "error names the problem: {error}"
        );
    }

    #[test]
    fn malformed_integer_string_is_a_decode_error() {
        WireValue::from_wire(&json!({ "integerValue": "not-a-number" }))
            .expect_err("malformed integer must not decode");
    }

    #[test]
    fn document_body_wraps_fields() {
        let mut fields = Fields::new();
        fields.insert("id".to_owned(), json!(4));
        fields.insert("username".to_owned(), json!("nhabep"));

        let body = encode_document(&fields);
        assert_eq!(
            body,
            json!({
                "fields": {
                    "id": { "integerValue": "4" },
                    "username": { "stringValue": "nhabep" },
                }
            })
        );

        let tagged = body
            .get("fields")
            .and_then(Value::as_object)
            .expect("body holds fields");
        assert_eq!(decode_fields(tagged).expect("fields decode"), fields);
    }
}
