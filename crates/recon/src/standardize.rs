//! Raw record decoding: one JSON object per line into a canonical [`Record`].
//!
//! Only `id`, `type` and `name` are required. Every other recognized field
//! falls back to its empty default when absent or `null`; unrecognized keys
//! are ignored.

use serde_json::{Map, Value};

use crate::error::XrefError;
use crate::model::{Address, Alias, IdNumber, Record};

pub type RawRecord = Map<String, Value>;

/// Decode one input line into a raw record map.
pub fn decode_line(line: &str) -> Result<RawRecord, XrefError> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| XrefError::Decode(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(XrefError::Decode(format!(
            "expected a JSON object, found {}",
            describe(&other)
        ))),
    }
}

/// Decode and standardize one input line.
pub fn parse_record(line: &str) -> Result<Record, XrefError> {
    standardize(&decode_line(line)?)
}

/// Convert a raw record map into the canonical [`Record`] shape.
pub fn standardize(raw: &RawRecord) -> Result<Record, XrefError> {
    let id = coerce_id(required(raw, "id")?)?;
    let kind = coerce_scalar("type", required(raw, "type")?)?;
    let name = coerce_scalar("name", required(raw, "name")?)?;

    Ok(Record {
        id,
        kind,
        name,
        aliases: object_list(raw, "aliases", standardize_alias)?,
        nationality: string_list(raw, "nationality")?,
        addresses: object_list(raw, "addresses", standardize_address)?,
        id_numbers: object_list(raw, "id_numbers", standardize_id_number)?,
        place_of_birth: optional_scalar(raw, "place_of_birth")?,
        position: optional_scalar(raw, "position")?,
        reported_dates_of_birth: string_list(raw, "reported_dates_of_birth")?,
    })
}

fn standardize_alias(raw: &RawRecord) -> Result<Alias, XrefError> {
    Ok(Alias {
        value: optional_scalar(raw, "value")?,
        kind: optional_scalar(raw, "type")?,
    })
}

fn standardize_address(raw: &RawRecord) -> Result<Address, XrefError> {
    Ok(Address {
        value: optional_scalar(raw, "value")?,
        country: optional_scalar(raw, "country")?,
        postal_code: optional_scalar(raw, "postal_code")?,
    })
}

fn standardize_id_number(raw: &RawRecord) -> Result<IdNumber, XrefError> {
    Ok(IdNumber {
        value: optional_scalar(raw, "value")?,
        comment: optional_scalar(raw, "comment")?,
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Present and non-null.
fn field<'a>(raw: &'a RawRecord, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

fn required<'a>(raw: &'a RawRecord, key: &'static str) -> Result<&'a Value, XrefError> {
    field(raw, key).ok_or(XrefError::MissingRequiredField { field: key })
}

fn coerce_id(value: &Value) -> Result<i64, XrefError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| XrefError::TypeCoercion {
        field: "id".into(),
        expected: "integer",
        found: describe(value),
    })
}

fn coerce_scalar(field: &str, value: &Value) -> Result<String, XrefError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(XrefError::TypeCoercion {
            field: field.into(),
            expected: "string",
            found: describe(other),
        }),
    }
}

fn optional_scalar(raw: &RawRecord, key: &str) -> Result<Option<String>, XrefError> {
    field(raw, key).map(|v| coerce_scalar(key, v)).transpose()
}

fn list<'a>(raw: &'a RawRecord, key: &str) -> Result<&'a [Value], XrefError> {
    match field(raw, key) {
        None => Ok(&[] as &[Value]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(XrefError::TypeCoercion {
            field: key.into(),
            expected: "list",
            found: describe(other),
        }),
    }
}

fn string_list(raw: &RawRecord, key: &str) -> Result<Vec<String>, XrefError> {
    list(raw, key)?
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| coerce_scalar(key, v))
        .collect()
}

fn object_list<T>(
    raw: &RawRecord,
    key: &str,
    element: fn(&RawRecord) -> Result<T, XrefError>,
) -> Result<Vec<T>, XrefError> {
    list(raw, key)?
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| match v {
            Value::Object(map) => element(map),
            other => Err(XrefError::TypeCoercion {
                field: key.into(),
                expected: "list of objects",
                found: describe(other),
            }),
        })
        .collect()
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "list".into(),
        Value::Object(_) => "object".into(),
    }
}
