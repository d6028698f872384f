//! Per-domain report generators.
//!
//! Financial and sales data get dedicated generators; inventory, customer,
//! marketing, and operational data currently route to the general profile
//! generator. That routing is an explicit limitation kept visible below:
//! adding a dedicated generator for one of those domains is a one-arm
//! change.

mod financial;
mod general;
mod sales;

use crate::types::{DomainTag, Record, RecordSet};
use crate::util::coerce_numeric;
use serde_json::{Map, Value};

pub use general::infer_column_type;

/// Produce the domain-specific section map for one record set. Pure: no
/// generator panics or emits NaN/infinity for any input.
pub fn generate_sections(
    domain: DomainTag,
    set: &RecordSet,
    file_name: &str,
) -> Map<String, Value> {
    match domain {
        DomainTag::Financial => financial::generate(set, file_name),
        DomainTag::Sales => sales::generate(set, file_name),
        // No dedicated generators yet for these four domains.
        DomainTag::Inventory
        | DomainTag::Customer
        | DomainTag::Marketing
        | DomainTag::Operational => general::generate(set, file_name),
        DomainTag::General | DomainTag::Error => general::generate(set, file_name),
    }
}

/// Sum the coercible values of the given columns across all records,
/// together with how many cells actually contributed. The same cleaning
/// rule as the statistics engine applies (strip `,` `$` `%`), so both
/// paths agree on what counts as numeric.
pub(crate) fn sum_columns(records: &[Record], columns: &[String]) -> (f64, usize) {
    let mut sum = 0.0;
    let mut count = 0usize;
    for record in records {
        for column in columns {
            if let Some(n) = record.get(column).and_then(coerce_numeric) {
                sum += n;
                count += 1;
            }
        }
    }
    (sum, count)
}

/// Two-half trend signal over one metric: sums for the first and second
/// halves of the record sequence (split at floor(n/2)) plus contributing
/// cell counts. Empty halves are how generators detect "no trend
/// identifiable".
pub(crate) struct TrendHalves {
    pub first_sum: f64,
    pub first_count: usize,
    pub second_sum: f64,
    pub second_count: usize,
}

pub(crate) fn trend_halves(records: &[Record], columns: &[String]) -> TrendHalves {
    let mid = records.len() / 2;
    let (first_sum, first_count) = sum_columns(&records[..mid], columns);
    let (second_sum, second_count) = sum_columns(&records[mid..], columns);
    TrendHalves {
        first_sum,
        first_count,
        second_sum,
        second_count,
    }
}

pub(crate) const NO_TREND: &str = "no trend identifiable";

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

    #[test]
    fn sum_columns_applies_shared_cleaning_rule() {
        let records = vec![
            record(&[("rev", json!("$1,000")), ("rev2", json!(250))]),
            record(&[("rev", json!("oops"))]),
        ];
        let columns = vec!["rev".to_string(), "rev2".to_string()];
        let (sum, count) = sum_columns(&records, &columns);
        assert_eq!(sum, 1250.0);
        assert_eq!(count, 2);
    }

    #[test]
    fn trend_halves_split_at_floor_midpoint() {
        let records: Vec<Record> = [1, 2, 3, 4, 5]
            .iter()
            .map(|v| record(&[("v", json!(v))]))
            .collect();
        let halves = trend_halves(&records, &["v".to_string()]);
        // floor(5/2) = 2: first half [1, 2], second half [3, 4, 5].
        assert_eq!(halves.first_sum, 3.0);
        assert_eq!(halves.first_count, 2);
        assert_eq!(halves.second_sum, 12.0);
        assert_eq!(halves.second_count, 3);
    }

    #[test]
    fn routed_domains_use_the_general_generator() {
        let set = RecordSet::from_records(vec![record(&[("stock", json!(5))])]);
        let sections = generate_sections(DomainTag::Inventory, &set, "stock.csv");
        // The general profile emits a data_quality section; the dedicated
        // generators do not.
        assert!(sections.contains_key("data_quality"));
    }
}
