use serde_json::Value;
use std::io;

/// Schedule row fields, in column order.
const ROW_COLUMNS: &[&str] = &[
    "month",
    "payment",
    "principal",
    "interest",
    "extra_payment",
    "balance",
    "total_paid",
];

/// Write output as CSV to stdout. A result carrying a schedule becomes the
/// month-by-month rows; anything else becomes field/value records of its
/// scalar fields. Raw decimal strings, no currency formatting.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(rows)) = map.get("schedule") {
                write_schedule_csv(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    // nested summaries are not representable in flat CSV
                    if matches!(val, Value::Object(_) | Value::Array(_)) {
                        continue;
                    }
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            write_schedule_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    let _ = wtr.write_record(ROW_COLUMNS);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = ROW_COLUMNS
                .iter()
                .map(|col| {
                    map.get(*col)
                        .map(format_csv_value)
                        .unwrap_or_default()
                })
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
