use crate::types::{DomainTag, Record};

/// How many leading records contribute their serialized content to the
/// classification blob.
const SAMPLE_RECORDS: usize = 5;

/// Fixed keyword vocabularies, evaluated strictly in this order. Domains
/// with frequently overlapping vocabulary (financial, sales) come first, so
/// ambiguous data skews toward the more commercially common reading. Ties
/// are resolved by position, never by match count.
const VOCABULARIES: &[(DomainTag, &[&str])] = &[
    (
        DomainTag::Financial,
        &[
            "revenue",
            "income",
            "profit",
            "expense",
            "cost",
            "balance",
            "asset",
            "liability",
            "equity",
            "cash",
            "flow",
            "budget",
        ],
    ),
    (
        DomainTag::Sales,
        &[
            "sale",
            "sales",
            "order",
            "quantity",
            "price",
            "product",
            "customer",
            "transaction",
            "purchase",
            "deal",
            "discount",
            "unit",
        ],
    ),
    (
        DomainTag::Inventory,
        &[
            "inventory",
            "stock",
            "sku",
            "warehouse",
            "supplier",
            "reorder",
            "shipment",
            "item",
            "units",
            "backorder",
            "bin",
            "lot",
        ],
    ),
    (
        DomainTag::Customer,
        &[
            "customer",
            "client",
            "contact",
            "email",
            "phone",
            "address",
            "segment",
            "subscriber",
            "account",
            "loyalty",
            "churn",
            "signup",
        ],
    ),
    (
        DomainTag::Marketing,
        &[
            "campaign",
            "impressions",
            "clicks",
            "conversion",
            "ctr",
            "spend",
            "channel",
            "audience",
            "engagement",
            "reach",
            "lead",
            "creative",
        ],
    ),
    (
        DomainTag::Operational,
        &[
            "status",
            "task",
            "process",
            "duration",
            "shift",
            "incident",
            "downtime",
            "throughput",
            "schedule",
            "operator",
            "maintenance",
            "workflow",
        ],
    ),
];

/// Classify a record set into a business domain.
///
/// Builds one lowercase blob from the joined column names plus the
/// serialized content of the first five records, then returns the first
/// vocabulary with at least one substring hit. No hit in any vocabulary
/// falls back to `General`. Deterministic: identical input always yields
/// the same tag.
pub fn detect_domain(records: &[Record], columns: &[String]) -> DomainTag {
    let mut blob = columns.join(" ").to_lowercase();
    for record in records.iter().take(SAMPLE_RECORDS) {
        if let Ok(serialized) = serde_json::to_string(record) {
            blob.push(' ');
            blob.push_str(&serialized.to_lowercase());
        }
    }

    for (tag, terms) in VOCABULARIES {
        if terms.iter().any(|term| blob.contains(term)) {
            return *tag;
        }
    }
    DomainTag::General
}
