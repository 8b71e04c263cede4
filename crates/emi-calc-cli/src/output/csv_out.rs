use serde_json::Value;
use std::io;

use super::{cell, flatten, row_sets};

type StdoutCsv<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// A result carrying a row set (`schedule`, `quotes`) is written as that
/// table; anything else becomes two-column `field,value` CSV.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Array(arr) => write_rows(&mut wtr, arr),
        Value::Object(_) => match row_sets(body).first() {
            Some((_, rows)) => write_rows(&mut wtr, rows),
            None => write_fields(&mut wtr, body),
        },
        _ => {
            let _ = wtr.write_record([cell(body)]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields(wtr: &mut StdoutCsv<'_>, value: &Value) {
    let mut pairs = Vec::new();
    flatten("", value, &mut pairs);
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in pairs {
        let _ = wtr.write_record([key, val]);
    }
}

fn write_rows(wtr: &mut StdoutCsv<'_>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([cell(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
