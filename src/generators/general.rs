use crate::stats::compute_stats;
use crate::types::{Record, RecordSet};
use crate::util::{clean_numeric_str, format_int, format_number, is_cell_empty};
use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Date layouts the type sniffer tries, most common first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// General profile: inferred column types, completeness, unique counts, and
/// duplicate-row detection. Serves as the fallback for every domain without
/// a dedicated generator.
pub fn generate(set: &RecordSet, file_name: &str) -> Map<String, Value> {
    let total_cells = set.len() * set.columns.len();
    let mut filled_cells = 0usize;

    let column_profile: Vec<Value> = set
        .columns
        .iter()
        .map(|column| {
            let filled = set
                .records
                .iter()
                .filter(|record| !is_cell_empty(record.get(column.as_str())))
                .count();
            filled_cells += filled;
            let completeness = if set.is_empty() {
                0.0
            } else {
                filled as f64 / set.len() as f64 * 100.0
            };
            let unique: HashSet<String> = set
                .records
                .iter()
                .filter_map(|record| record.get(column.as_str()))
                .filter(|value| !is_cell_empty(Some(value)))
                .map(|value| value.to_string())
                .collect();
            json!({
                "column": column,
                "inferred_type": infer_column_type(&set.records, column),
                "completeness_pct": completeness,
                "unique_values": unique.len(),
            })
        })
        .collect();

    let completeness_pct = if total_cells == 0 {
        0.0
    } else {
        filled_cells as f64 / total_cells as f64 * 100.0
    };
    let duplicate_rows = count_duplicate_rows(&set.records);

    let executive_summary = format!(
        "{} contains {} records across {} columns. Overall data completeness \
         is {}%, with {} duplicate rows detected.",
        file_name,
        format_int(set.len() as i64),
        format_int(set.columns.len() as i64),
        format_number(completeness_pct, 2),
        format_int(duplicate_rows as i64),
    );

    let mut recommendations = vec![
        "Review the inferred column types against the intended schema.".to_string(),
    ];
    if completeness_pct < 70.0 {
        recommendations.push(
            "More than 30% of cells are empty; fill gaps before drawing conclusions."
                .to_string(),
        );
    }
    if duplicate_rows > 0 {
        recommendations.push(format!(
            "{} duplicate rows found; deduplicate before aggregation.",
            format_int(duplicate_rows as i64)
        ));
    }

    let stats = compute_stats(&set.records, &set.columns);

    let mut sections = Map::new();
    sections.insert("executive_summary".to_string(), json!(executive_summary));
    sections.insert("column_profile".to_string(), json!(column_profile));
    sections.insert(
        "data_quality".to_string(),
        json!({
            "completeness_pct": completeness_pct,
            "total_cells": total_cells,
            "filled_cells": filled_cells,
            "duplicate_rows": duplicate_rows,
        }),
    );
    sections.insert("recommendations".to_string(), json!(recommendations));
    sections.insert(
        "column_stats".to_string(),
        serde_json::to_value(&stats).unwrap_or(Value::Null),
    );
    sections
}

/// Infer a column's data type from its first non-empty value: boolean,
/// then date (known layouts), then numeric, then text. Columns with no
/// non-empty value at all are "empty".
pub fn infer_column_type(records: &[Record], column: &str) -> &'static str {
    let sample = records
        .iter()
        .filter_map(|record| record.get(column))
        .find(|value| !is_cell_empty(Some(value)));
    match sample {
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "numeric",
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if DATE_FORMATS
                .iter()
                .any(|layout| NaiveDate::parse_from_str(trimmed, layout).is_ok())
            {
                "date"
            } else if clean_numeric_str(trimmed).is_some() {
                "numeric"
            } else {
                "text"
            }
        }
        _ => "empty",
    }
}

/// Exact duplicate count via a set of canonically-serialized records. The
/// BTreeMap key order makes serialization stable, so structurally identical
/// rows collide.
fn count_duplicate_rows(records: &[Record]) -> usize {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut duplicates = 0usize;
    for record in records {
        let Ok(serialized) = serde_json::to_string(record) else {
            continue;
        };
        if !seen.insert(serialized) {
            duplicates += 1;
        }
    }
    duplicates
}
