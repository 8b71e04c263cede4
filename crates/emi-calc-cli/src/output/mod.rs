pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar for a single cell.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// True for a non-empty array whose elements are all objects (a row set).
pub(crate) fn is_row_set(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if !arr.is_empty() && arr.iter().all(Value::is_object))
}

/// Flatten nested objects into dotted `field`/`value` pairs.
///
/// Row sets are skipped; callers render them as their own tables.
pub(crate) fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, out);
            }
        }
        v if is_row_set(v) => {}
        v => out.push((prefix.to_string(), cell(v))),
    }
}

/// Named row sets inside an object, in field order.
pub(crate) fn row_sets(value: &Value) -> Vec<(&str, &[Value])> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, val)| match val {
                Value::Array(arr) if is_row_set(val) => Some((key.as_str(), arr.as_slice())),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
