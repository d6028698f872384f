use crate::types::DomainTag;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};

/// A named semantic column category and the terms that identify it.
type RoleSpec = (&'static str, &'static [&'static str]);

/// Static role tables, one per domain that has a defined relevance pattern.
/// `General` and `Error` deliberately have none: the general generator
/// profiles every column, and the confidence scorer gives no relevance
/// credit without a pattern.
static ROLE_PATTERNS: Lazy<HashMap<DomainTag, Vec<RoleSpec>>> = Lazy::new(|| {
    let mut table: HashMap<DomainTag, Vec<RoleSpec>> = HashMap::new();
    table.insert(
        DomainTag::Financial,
        vec![
            ("revenue_columns", &["revenue", "income", "sales", "earnings"]),
            ("expense_columns", &["expense", "cost", "expenditure", "spend"]),
            ("profit_columns", &["profit", "margin", "net"]),
        ],
    );
    table.insert(
        DomainTag::Sales,
        vec![
            ("sales_columns", &["sale", "revenue", "amount", "total"]),
            ("quantity_columns", &["quantity", "qty", "units", "count"]),
            ("customer_columns", &["customer", "client", "buyer"]),
            ("product_columns", &["product", "item", "sku"]),
        ],
    );
    table.insert(
        DomainTag::Inventory,
        vec![
            ("stock_columns", &["stock", "inventory", "quantity", "units"]),
            ("product_columns", &["product", "item", "sku"]),
            ("supplier_columns", &["supplier", "vendor"]),
        ],
    );
    table.insert(
        DomainTag::Customer,
        vec![
            ("id_columns", &["id", "customer", "account"]),
            ("name_columns", &["name"]),
            ("contact_columns", &["email", "phone", "contact"]),
            ("segment_columns", &["segment", "tier", "type"]),
        ],
    );
    table.insert(
        DomainTag::Marketing,
        vec![
            ("campaign_columns", &["campaign", "channel", "source"]),
            ("spend_columns", &["spend", "cost", "budget"]),
            (
                "performance_columns",
                &["clicks", "impressions", "conversions", "ctr"],
            ),
        ],
    );
    table.insert(
        DomainTag::Operational,
        vec![
            ("date_columns", &["date", "time", "timestamp"]),
            ("status_columns", &["status", "state"]),
            ("duration_columns", &["duration", "hours", "minutes"]),
        ],
    );
    table
});

/// Whether a domain has a defined relevance pattern at all.
pub fn has_role_patterns(domain: DomainTag) -> bool {
    ROLE_PATTERNS.contains_key(&domain)
}

/// Map each of the domain's roles to the columns whose names match one of
/// the role's terms (case-insensitive substring).
///
/// Every role of the domain appears in the result; a role with no matching
/// column maps to an empty vec, which generators must read as "data not
/// identifiable", never as zero. One column may satisfy several roles. A
/// domain without a role table yields an empty map.
pub fn relevant_columns(columns: &[String], domain: DomainTag) -> BTreeMap<String, Vec<String>> {
    let mut result = BTreeMap::new();
    let Some(roles) = ROLE_PATTERNS.get(&domain) else {
        return result;
    };
    for (role, terms) in roles {
        let matched: Vec<String> = columns
            .iter()
            .filter(|column| {
                let lower = column.to_lowercase();
                terms.iter().any(|term| lower.contains(term))
            })
            .cloned()
            .collect();
        result.insert((*role).to_string(), matched);
    }
    result
}

/// Count of distinct columns matched by any role of the domain. Feeds the
/// relevance term of the confidence score.
pub fn relevant_column_count(columns: &[String], domain: DomainTag) -> usize {
    let roles = relevant_columns(columns, domain);
    let mut seen: Vec<&String> = Vec::new();
    for matched in roles.values() {
        for column in matched {
            if !seen.contains(&column) {
                seen.push(column);
            }
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn financial_roles_match_by_substring() {
        let columns = cols(&["Total Revenue", "Operating_Cost", "notes"]);
        let roles = relevant_columns(&columns, DomainTag::Financial);
        assert_eq!(roles["revenue_columns"], vec!["Total Revenue"]);
        assert_eq!(roles["expense_columns"], vec!["Operating_Cost"]);
        // Role with no match is present but empty.
        assert!(roles["profit_columns"].is_empty());
    }

    #[test]
    fn a_column_may_fill_multiple_roles() {
        let columns = cols(&["sales_quantity"]);
        let roles = relevant_columns(&columns, DomainTag::Sales);
        assert_eq!(roles["sales_columns"], vec!["sales_quantity"]);
        assert_eq!(roles["quantity_columns"], vec!["sales_quantity"]);
        // ...but the distinct count stays 1.
        assert_eq!(relevant_column_count(&columns, DomainTag::Sales), 1);
    }

    #[test]
    fn general_has_no_pattern() {
        let columns = cols(&["revenue", "cost"]);
        assert!(!has_role_patterns(DomainTag::General));
        assert!(relevant_columns(&columns, DomainTag::General).is_empty());
        assert_eq!(relevant_column_count(&columns, DomainTag::General), 0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let columns = cols(&["CUSTOMER_EMAIL"]);
        let roles = relevant_columns(&columns, DomainTag::Customer);
        assert_eq!(roles["contact_columns"], vec!["CUSTOMER_EMAIL"]);
        assert_eq!(roles["id_columns"], vec!["CUSTOMER_EMAIL"]);
    }
}
