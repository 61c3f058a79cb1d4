use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, row_cells, row_headers, ROW_KEYS};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go into a Field/Value table, nested objects (summary,
/// savings) get a table each, and row arrays (the payment schedule, directive
/// lists) are rendered one row per element.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_result_tables(result, map);
            } else {
                print_field_table(map);
            }
        }
        Value::Array(arr) => print_row_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !scalars.is_empty() {
        print_field_table(&scalars);
    }

    for (key, val) in result {
        if let Value::Object(nested) = val {
            println!("\n{}:", heading(key));
            print_field_table(nested);
        }
    }

    for key in ROW_KEYS.iter().chain(["skipped_directives"].iter()) {
        if let Some(Value::Array(rows)) = result.get(*key) {
            println!("\n{}:", heading(key));
            print_row_table(rows);
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn heading(key: &str) -> String {
    let mut words = key.split('_');
    let first = words
        .next()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .unwrap_or_default();
    std::iter::once(first)
        .chain(words.map(str::to_string))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_scalar(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_row_table(rows: &[Value]) {
    if rows.is_empty() {
        println!("(none)");
        return;
    }

    if let Some(headers) = row_headers(rows) {
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for map in rows.iter().filter_map(Value::as_object) {
            builder.push_record(row_cells(&headers, map));
        }

        println!("{}", Table::from(builder));
    } else {
        for item in rows {
            println!("{}", format_scalar(item));
        }
    }
}
