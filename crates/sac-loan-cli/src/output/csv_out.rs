use serde_json::Value;
use std::io;

use super::{format_scalar, row_cells, row_headers, ROW_KEYS};

/// Write output as CSV to stdout.
///
/// When the result carries row data (the payment schedule, or the directive
/// lists of a validation run) those rows are written one per line; otherwise
/// the result is written as field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            let rows = ROW_KEYS
                .iter()
                .find_map(|key| result.get(*key).and_then(Value::as_array))
                .filter(|rows| !rows.is_empty());

            if let Some(rows) = rows {
                write_rows(&mut wtr, rows);
            } else if let Value::Object(fields) = result {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
                }
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_scalar(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if let Some(headers) = row_headers(rows) {
        let _ = wtr.write_record(&headers);

        for map in rows.iter().filter_map(Value::as_object) {
            let _ = wtr.write_record(row_cells(&headers, map));
        }
    } else {
        for item in rows {
            let _ = wtr.write_record([&format_scalar(item)]);
        }
    }
}
