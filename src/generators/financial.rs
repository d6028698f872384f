use super::{sum_columns, trend_halves, NO_TREND};
use crate::relevance::relevant_columns;
use crate::stats::compute_stats;
use crate::types::{DomainTag, RecordSet};
use crate::util::{format_int, format_number};
use serde_json::{json, Map, Value};

/// Record counts below this are flagged as a small-sample risk.
const SMALL_SAMPLE: usize = 10;

/// Financial report: revenue/expense/profit headline metrics, a two-half
/// revenue trend, recommendations, and risk/opportunity lists.
pub fn generate(set: &RecordSet, file_name: &str) -> Map<String, Value> {
    let roles = relevant_columns(&set.columns, DomainTag::Financial);
    let revenue_columns = roles.get("revenue_columns").cloned().unwrap_or_default();
    let expense_columns = roles.get("expense_columns").cloned().unwrap_or_default();

    // Empty role subsets mean "not identifiable", never zero.
    let total_revenue = if revenue_columns.is_empty() {
        None
    } else {
        Some(sum_columns(&set.records, &revenue_columns).0)
    };
    let total_expenses = if expense_columns.is_empty() {
        None
    } else {
        Some(sum_columns(&set.records, &expense_columns).0)
    };

    // Profitability needs both sides identified; a missing expense role is
    // "not identifiable", never zero expenses.
    let net_profit = match (total_revenue, total_expenses) {
        (Some(rev), Some(exp)) => Some(rev - exp),
        _ => None,
    };
    let profit_margin = match (total_revenue, net_profit) {
        (Some(rev), Some(net)) => Some(if rev > 0.0 { net / rev * 100.0 } else { 0.0 }),
        _ => None,
    };

    // Revenue trend: strict inequality on the half-sums.
    let halves = trend_halves(&set.records, &revenue_columns);
    let trend = if halves.first_count == 0 && halves.second_count == 0 {
        NO_TREND
    } else if halves.second_sum > halves.first_sum {
        "upward"
    } else if halves.second_sum < halves.first_sum {
        "downward"
    } else {
        "stable"
    };

    let executive_summary = match (total_revenue, total_expenses) {
        (Some(rev), Some(exp)) => format!(
            "{} covers {} records with total revenue of {} against {} in expenses, \
             yielding a net profit of {} ({}% margin). Revenue trend across the \
             period is {}.",
            file_name,
            format_int(set.len() as i64),
            format_number(rev, 2),
            format_number(exp, 2),
            format_number(rev - exp, 2),
            format_number(profit_margin.unwrap_or(0.0), 2),
            trend,
        ),
        (Some(rev), None) => format!(
            "{} covers {} records with total revenue of {}. No expense columns \
             could be identified, so profitability was not assessed.",
            file_name,
            format_int(set.len() as i64),
            format_number(rev, 2),
        ),
        _ => format!(
            "{} covers {} records, but no revenue columns could be identified; \
             financial headline metrics are not available.",
            file_name,
            format_int(set.len() as i64),
        ),
    };

    let mut recommendations = vec![
        "Review expense categories quarterly to catch cost drift early.".to_string(),
        "Track revenue and expenses at a consistent granularity.".to_string(),
    ];
    if profit_margin.is_some_and(|m| m < 10.0) {
        recommendations.push(
            "Profit margin is under 10%; prioritize cost reduction before growth spending."
                .to_string(),
        );
    }
    if total_revenue.is_none() {
        recommendations.push(
            "Name at least one revenue-like column so financial metrics can be computed."
                .to_string(),
        );
    }

    let mut risks: Vec<String> = Vec::new();
    if let Some(net) = net_profit {
        if net < 0.0 {
            risks.push("Expenses exceed revenue; the period is operating at a loss.".to_string());
        } else if profit_margin.is_some_and(|m| m < 10.0) {
            risks.push("Profit margin is thin; a small cost increase erases it.".to_string());
        }
    }
    if set.len() < SMALL_SAMPLE {
        risks.push(format!(
            "Only {} records in the file; aggregate figures may not be representative.",
            set.len()
        ));
    }

    let mut opportunities = vec![
        "Benchmark the profit margin against industry peers.".to_string(),
    ];
    if profit_margin.is_some_and(|m| m >= 20.0) {
        opportunities
            .push("Margin above 20% leaves room to reinvest in growth.".to_string());
    }
    if trend == "upward" {
        opportunities.push(
            "Revenue is trending upward in the second half of the period; consider scaling."
                .to_string(),
        );
    }

    let stats = compute_stats(&set.records, &set.columns);

    let mut sections = Map::new();
    sections.insert("executive_summary".to_string(), json!(executive_summary));
    sections.insert(
        "breakdown".to_string(),
        json!({
            "total_revenue": metric_value(total_revenue),
            "total_expenses": metric_value(total_expenses),
            "net_profit": metric_value(net_profit),
            "profit_margin_pct": metric_value(profit_margin),
            "revenue_columns": revenue_columns,
            "expense_columns": expense_columns,
            "trend": trend,
        }),
    );
    sections.insert("recommendations".to_string(), json!(recommendations));
    sections.insert("risks".to_string(), json!(risks));
    sections.insert("opportunities".to_string(), json!(opportunities));
    sections.insert(
        "column_stats".to_string(),
        serde_json::to_value(&stats).unwrap_or(Value::Null),
    );
    sections
}

/// Unidentifiable metrics render as "N/A", never as zero.
fn metric_value(metric: Option<f64>) -> Value {
    match metric {
        Some(v) => json!(v),
        None => json!("N/A"),
    }
}
