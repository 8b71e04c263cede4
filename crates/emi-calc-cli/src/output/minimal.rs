use serde_json::Value;

use super::cell;

/// Headline figure for each command, in priority order
const PRIORITY_KEYS: [&str; 5] = ["best_bank", "emi", "total_amount", "apr", "bank_name"];

/// Print just the key answer value from the output.
///
/// Looks for a headline field first, then falls back to the first field.
/// A bare row set (the schedule) prints one line per row.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    println!("{}", cell(val));
                    return;
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, cell(val));
            }
        }
        Value::Array(rows) => {
            for row in rows {
                match row.as_object() {
                    Some(map) => {
                        let fields: Vec<String> = map.values().map(cell).collect();
                        println!("{}", fields.join(" "));
                    }
                    None => println!("{}", cell(row)),
                }
            }
        }
        other => println!("{}", cell(other)),
    }
}
