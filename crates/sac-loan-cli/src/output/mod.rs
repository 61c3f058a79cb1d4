pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Result keys holding row data, in the order formatters look for them.
pub(crate) const ROW_KEYS: [&str; 3] = ["payment_schedule", "valid", "skipped"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar JSON value for a table cell or CSV field.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Column headers for a list of object rows: every key that appears in any
/// row, in first-seen order. `None` when no element is an object.
pub(crate) fn row_headers(rows: &[Value]) -> Option<Vec<String>> {
    let mut headers: Vec<String> = Vec::new();
    let mut any_object = false;
    for map in rows.iter().filter_map(Value::as_object) {
        any_object = true;
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    any_object.then_some(headers)
}

/// One row's cells in header order; missing keys render empty.
pub(crate) fn row_cells(headers: &[String], map: &Map<String, Value>) -> Vec<String> {
    headers
        .iter()
        .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_headers_cover_every_directive_kind() {
        let rows = vec![
            json!({ "type": "one_time", "amount": "100", "month": 1 }),
            json!({ "type": "growing", "initial_amount": "50", "growth_rate": "0.1",
                    "start_month": 2, "cadence": "monthly" }),
        ];
        let headers = row_headers(&rows).unwrap();
        for key in ["type", "amount", "month", "initial_amount", "growth_rate", "cadence"] {
            assert!(headers.iter().any(|h| h == key), "missing {key}");
        }

        let cells = row_cells(&headers, rows[0].as_object().unwrap());
        let growth = headers.iter().position(|h| h == "growth_rate").unwrap();
        assert_eq!(cells[growth], "");
    }

    #[test]
    fn test_row_headers_none_for_scalar_rows() {
        assert_eq!(row_headers(&[json!(1), json!("a")]), None);
    }
}
