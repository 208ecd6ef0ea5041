use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use super::currency;

/// Per-month money fields, rendered with paise.
const PRECISE_MONEY_KEYS: &[&str] = &[
    "emi",
    "payment",
    "principal",
    "interest",
    "extra_payment",
    "balance",
    "total_paid",
];

/// Aggregate money fields, rendered as whole rupees.
const WHOLE_MONEY_KEYS: &[&str] = &[
    "total_payment",
    "total_interest",
    "interest_saved",
    "total_extra_scheduled",
    "total_extra_applied",
];

/// Headline fields of a loan summary, in display order.
const SUMMARY_KEYS: &[&str] = &["emi", "total_payment", "total_interest", "actual_months"];

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

/// Format output as tables, with schedule-aware rendering.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => print_schedule_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        // Comparison: baseline and accelerated summaries, then the savings
        Value::Object(map) if map.contains_key("baseline") && map.contains_key("with_extras") => {
            println!("Baseline (no extras):");
            if let Some(Value::Object(baseline)) = map.get("baseline") {
                print_fields(baseline, SUMMARY_KEYS);
            }
            println!("\nWith extra payments:");
            if let Some(Value::Object(accelerated)) = map.get("with_extras") {
                print_fields(accelerated, SUMMARY_KEYS);
            }
            println!("\nSavings:");
            print_fields(
                map,
                &[
                    "interest_saved",
                    "months_saved",
                    "years_saved",
                    "months_saved_remainder",
                    "total_extra_scheduled",
                    "total_extra_applied",
                ],
            );
        }
        // Loan summary: headline figures, then the month-by-month rows
        Value::Object(map) if map.contains_key("schedule") => {
            print_fields(map, SUMMARY_KEYS);
            if let Some(Value::Array(rows)) = map.get("schedule") {
                if !rows.is_empty() {
                    println!();
                    print_schedule_rows(rows);
                }
            }
        }
        Value::Object(_) => print_flat_object(result),
        _ => println!("{}", format_value(result)),
    }

    // Warnings and methodology epilogue
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

fn print_fields(map: &serde_json::Map<String, Value>, keys: &[&str]) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for key in keys {
        if let Some(val) = map.get(*key) {
            builder.push_record([*key, &format_field(key, val)]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_field(key, val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_schedule_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty schedule)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Month",
        "Payment",
        "Principal",
        "Interest",
        "Extra",
        "Balance",
        "Total Paid",
    ]);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = ROW_COLUMNS
                .iter()
                .map(|col| {
                    map.get(*col)
                        .map(|v| format_field(col, v))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}

fn format_field(key: &str, value: &Value) -> String {
    if PRECISE_MONEY_KEYS.contains(&key) {
        if let Some(amount) = as_decimal(value) {
            return currency::format_inr_precise(amount);
        }
    }
    if WHOLE_MONEY_KEYS.contains(&key) {
        if let Some(amount) = as_decimal(value) {
            return currency::format_inr(amount);
        }
    }
    format_value(value)
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
