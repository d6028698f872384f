use super::{sum_columns, trend_halves, NO_TREND};
use crate::relevance::relevant_columns;
use crate::stats::compute_stats;
use crate::types::{DomainTag, Record, RecordSet};
use crate::util::{coerce_numeric, format_int, format_number};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

/// How many entries the product/customer rankings keep.
const TOP_N: usize = 5;

/// Relative change beyond which the two-half sales signal counts as a trend.
const TREND_THRESHOLD: f64 = 0.10;

/// Sales report: volume headline metrics, top product/customer rankings, a
/// thresholded two-half trend, and recommendations.
pub fn generate(set: &RecordSet, file_name: &str) -> Map<String, Value> {
    let roles = relevant_columns(&set.columns, DomainTag::Sales);
    let sales_columns = roles.get("sales_columns").cloned().unwrap_or_default();
    let quantity_columns = roles.get("quantity_columns").cloned().unwrap_or_default();
    let customer_columns = roles.get("customer_columns").cloned().unwrap_or_default();
    let product_columns = roles.get("product_columns").cloned().unwrap_or_default();

    let total_sales = if sales_columns.is_empty() {
        None
    } else {
        Some(sum_columns(&set.records, &sales_columns))
    };
    let total_quantity = if quantity_columns.is_empty() {
        None
    } else {
        Some(sum_columns(&set.records, &quantity_columns).0)
    };
    let average_sale = match total_sales {
        Some((sum, count)) if count > 0 => Some(sum / count as f64),
        _ => None,
    };

    // Two-half trend with a 10% relative-change threshold.
    let halves = trend_halves(&set.records, &sales_columns);
    let trend = if halves.first_count == 0 && halves.second_count == 0 {
        NO_TREND
    } else if halves.first_sum.abs() < f64::EPSILON {
        match halves.second_sum.partial_cmp(&0.0).unwrap_or(Ordering::Equal) {
            Ordering::Greater => "upward",
            Ordering::Less => "downward",
            Ordering::Equal => "stable",
        }
    } else {
        let change = (halves.second_sum - halves.first_sum) / halves.first_sum.abs();
        if change > TREND_THRESHOLD {
            "upward"
        } else if change < -TREND_THRESHOLD {
            "downward"
        } else {
            "stable"
        }
    };

    let top_products = rank_by_group(&set.records, &product_columns, &sales_columns);
    let top_customers = rank_by_group(&set.records, &customer_columns, &sales_columns);

    let executive_summary = match total_sales {
        Some((sum, _)) => format!(
            "{} covers {} records with total sales of {}. The sales trend \
             between the first and second half of the data is {}.",
            file_name,
            format_int(set.len() as i64),
            format_number(sum, 2),
            trend,
        ),
        None => format!(
            "{} covers {} records, but no sales amount columns could be \
             identified; volume metrics are not available.",
            file_name,
            format_int(set.len() as i64),
        ),
    };

    let mut recommendations = vec![
        "Compare top-product concentration against the full catalog regularly.".to_string(),
        "Keep sales amount and quantity columns consistently populated.".to_string(),
    ];
    if trend == "downward" {
        recommendations.push(
            "Sales declined more than 10% between halves of the period; investigate the drop."
                .to_string(),
        );
    }
    if total_sales.is_none() {
        recommendations.push(
            "Name at least one amount-like column so sales metrics can be computed.".to_string(),
        );
    }
    if !top_products.is_empty() && top_products.len() < TOP_N {
        recommendations.push(
            "Product variety is narrow; ranking covers the entire catalog.".to_string(),
        );
    }

    let stats = compute_stats(&set.records, &set.columns);

    let mut sections = Map::new();
    sections.insert("executive_summary".to_string(), json!(executive_summary));
    sections.insert(
        "breakdown".to_string(),
        json!({
            "total_sales": total_sales.map(|(sum, _)| json!(sum)).unwrap_or(json!("N/A")),
            "total_quantity": total_quantity.map(|q| json!(q)).unwrap_or(json!("N/A")),
            "average_sale": average_sale.map(|a| json!(a)).unwrap_or(json!("N/A")),
            "sales_columns": sales_columns,
            "quantity_columns": quantity_columns,
            "trend": trend,
        }),
    );
    sections.insert("top_products".to_string(), json!(top_products));
    sections.insert("top_customers".to_string(), json!(top_customers));
    sections.insert("recommendations".to_string(), json!(recommendations));
    sections.insert(
        "column_stats".to_string(),
        serde_json::to_value(&stats).unwrap_or(Value::Null),
    );
    sections
}

/// Group records by the first group column's display value and rank groups
/// by summed sales (falling back to record counts when no sales column is
/// identifiable). Empty when no group column exists.
fn rank_by_group(
    records: &[Record],
    group_columns: &[String],
    sales_columns: &[String],
) -> Vec<Value> {
    let Some(group_column) = group_columns.first() else {
        return Vec::new();
    };
    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();
    for record in records {
        let Some(key) = record.get(group_column).and_then(display_value) else {
            continue;
        };
        let amount = sales_columns
            .first()
            .and_then(|c| record.get(c))
            .and_then(coerce_numeric)
            .unwrap_or(0.0);
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }
    let mut ranked: Vec<(String, f64, usize)> = groups
        .into_iter()
        .map(|(name, (total, orders))| (name, total, orders))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
        .into_iter()
        .take(TOP_N)
        .enumerate()
        .map(|(idx, (name, total, orders))| {
            json!({
                "rank": idx + 1,
                "name": name,
                "total": total,
                "records": orders,
            })
        })
        .collect()
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sales_set(amounts: &[f64]) -> RecordSet {
        let records = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                record(&[
                    ("sale_amount", json!(amount)),
                    ("product", json!(format!("widget-{}", i % 3))),
                    ("customer", json!(format!("acct-{}", i % 2))),
                    ("quantity", json!(2)),
                ])
            })
            .collect();
        RecordSet::new(
            records,
            vec![
                "sale_amount".to_string(),
                "product".to_string(),
                "customer".to_string(),
                "quantity".to_string(),
            ],
        )
    }

    #[test]
    fn totals_and_average() {
        let sections = generate(&sales_set(&[100.0, 200.0, 300.0, 400.0]), "sales.csv");
        let breakdown = &sections["breakdown"];
        assert_eq!(breakdown["total_sales"], json!(1000.0));
        assert_eq!(breakdown["total_quantity"], json!(8.0));
        assert_eq!(breakdown["average_sale"], json!(250.0));
    }

    #[test]
    fn ten_percent_threshold_separates_stable_from_upward() {
        // Halves 100 vs 105: +5%, inside the threshold.
        let sections = generate(&sales_set(&[100.0, 105.0]), "sales.csv");
        assert_eq!(sections["breakdown"]["trend"], json!("stable"));

        // Halves 100 vs 150: +50%.
        let sections = generate(&sales_set(&[100.0, 150.0]), "sales.csv");
        assert_eq!(sections["breakdown"]["trend"], json!("upward"));

        // Halves 200 vs 100: -50%.
        let sections = generate(&sales_set(&[200.0, 100.0]), "sales.csv");
        assert_eq!(sections["breakdown"]["trend"], json!("downward"));
    }

    #[test]
    fn downward_trend_adds_recommendation() {
        let sections = generate(&sales_set(&[200.0, 100.0]), "sales.csv");
        let recommendations: Vec<String> =
            serde_json::from_value(sections["recommendations"].clone()).unwrap();
        assert!(recommendations.iter().any(|r| r.contains("investigate the drop")));
    }

    #[test]
    fn rankings_are_summed_and_truncated() {
        let records = vec![
            record(&[("sale_amount", json!(10)), ("product", json!("a"))]),
            record(&[("sale_amount", json!(30)), ("product", json!("b"))]),
            record(&[("sale_amount", json!(5)), ("product", json!("a"))]),
        ];
        let set = RecordSet::new(
            records,
            vec!["sale_amount".to_string(), "product".to_string()],
        );
        let sections = generate(&set, "sales.csv");
        let top = sections["top_products"].as_array().unwrap();
        assert_eq!(top[0]["name"], json!("b"));
        assert_eq!(top[0]["total"], json!(30.0));
        assert_eq!(top[1]["name"], json!("a"));
        assert_eq!(top[1]["total"], json!(15.0));
        assert_eq!(top[1]["records"], json!(2));
    }

    #[test]
    fn missing_sales_columns_report_not_identifiable() {
        let set = RecordSet::new(
            vec![record(&[("order_note", json!("rush"))])],
            vec!["order_note".to_string()],
        );
        let sections = generate(&set, "notes.csv");
        assert_eq!(sections["breakdown"]["total_sales"], json!("N/A"));
        assert_eq!(sections["breakdown"]["trend"], json!(NO_TREND));
        assert!(sections["top_products"].as_array().unwrap().is_empty());
    }
}
