use serde_json::Value;

use super::format_scalar;

/// JSON pointers into the result object, in priority order.
const KEY_ANSWERS: [&str; 4] = [
    "/summary/total_payment",
    "/summary/loan_term_actual",
    "/valid_count",
    "/skipped_count",
];

/// Print just the key answer value from the output.
///
/// The first key answer present wins; otherwise the first scalar field of the
/// result is printed with its name.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for pointer in KEY_ANSWERS {
        if let Some(val) = result_obj.pointer(pointer) {
            if !val.is_null() {
                println!("{}", format_scalar(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().find(|(_, v)| !v.is_array() && !v.is_object()) {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}
