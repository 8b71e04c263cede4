use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, flatten, row_sets};

/// Format output as tables using the tabled crate.
///
/// Scalars (including nested ones, by dotted path) go in a Field/Value table;
/// each embedded row set such as `schedule` or `quotes` gets its own table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_object(value),
        },
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", cell(value)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(_) => print_object(result),
        Value::Array(arr) => print_rows(arr),
        other => println!("{}", cell(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_object(value: &Value) {
    let mut pairs = Vec::new();
    flatten("", value, &mut pairs);
    if !pairs.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &pairs {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, rows) in row_sets(value) {
        println!("\n{}:", name);
        print_rows(rows);
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", cell(item));
        }
        return;
    };

    // Columns come from the first row, flattened the same way as scalars
    let mut header_pairs = Vec::new();
    flatten("", &Value::Object(first.clone()), &mut header_pairs);
    let headers: Vec<String> = header_pairs.into_iter().map(|(k, _)| k).collect();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in arr {
        let mut pairs = Vec::new();
        flatten("", item, &mut pairs);
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                pairs
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}
