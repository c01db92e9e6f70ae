//! Type conversion between JSON documents and Tabula's internal types.

use serde_json::{Map, Number, Value as Json};
use tabula_core::{Row, Value};
use tabula_storage::ingest::Record;

/// Converts a JSON value to a cell.
///
/// - null, boolean and string map directly
/// - integers that fit `i64` become `Int64`; other numbers `Float64`
/// - arrays and objects are kept as their JSON text
pub fn json_to_value(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map_or(Value::Null, Value::Float64),
        },
        Json::String(s) => Value::String(s.clone()),
        nested @ (Json::Array(_) | Json::Object(_)) => Value::String(nested.to_string()),
    }
}

/// Converts a cell to a JSON value. Non-finite floats become null.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Int64(n) => Json::Number((*n).into()),
        Value::Float64(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
    }
}

/// Converts a row to a JSON object keyed by column name, in column order.
pub fn row_to_json(columns: &[String], row: &Row) -> Map<String, Json> {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| (col.clone(), value_to_json(row.get_or_null(i))))
        .collect()
}

/// Converts a parsed JSON record to key/value pairs, keeping key order.
pub fn json_to_record(object: &Map<String, Json>) -> Record {
    object
        .iter()
        .map(|(k, v)| (k.clone(), json_to_value(v)))
        .collect()
}
