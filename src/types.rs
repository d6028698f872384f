use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One parsed row: column name -> loosely-typed cell value.
///
/// A `BTreeMap` keeps key order canonical, so serializing a record always
/// yields the same string for structurally identical rows. Duplicate-row
/// detection relies on that.
pub type Record = BTreeMap<String, Value>;

/// One file's parsed rows plus its distinct column-name list.
///
/// Columns are the union of keys observed across records, in first-seen
/// order. Never mutated after construction; one `RecordSet` feeds exactly
/// one report.
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub records: Vec<Record>,
    pub columns: Vec<String>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>, columns: Vec<String>) -> Self {
        Self { records, columns }
    }

    /// Build a `RecordSet` from bare records, deriving the column list as
    /// the union of keys in encounter order. Decoders that know the real
    /// header order should call `new` instead.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { records, columns }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Aggregate statistics for the numerically-coercible values of one column.
///
/// `count` may be smaller than the record count (non-numeric and missing
/// cells are excluded). An entry only exists when `count >= 1`, and
/// `average == sum / count` exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub sum: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Business-domain label attached to a report. Closed set; `General` is the
/// classification fallback, `Error` marks unprocessable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    Financial,
    Sales,
    Inventory,
    Customer,
    Marketing,
    Operational,
    General,
    Error,
}

impl DomainTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainTag::Financial => "financial",
            DomainTag::Sales => "sales",
            DomainTag::Inventory => "inventory",
            DomainTag::Customer => "customer",
            DomainTag::Marketing => "marketing",
            DomainTag::Operational => "operational",
            DomainTag::General => "general",
            DomainTag::Error => "error",
        }
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "financial" => Ok(DomainTag::Financial),
            "sales" => Ok(DomainTag::Sales),
            "inventory" => Ok(DomainTag::Inventory),
            "customer" => Ok(DomainTag::Customer),
            "marketing" => Ok(DomainTag::Marketing),
            "operational" => Ok(DomainTag::Operational),
            "general" => Ok(DomainTag::General),
            other => Err(format!("unknown domain tag: {}", other)),
        }
    }
}

/// Four-tier quality label. Variant order is worst-to-best so the derived
/// `Ord` matches "higher is better".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityLabel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QualityLabel::Poor => "Poor",
            QualityLabel::Fair => "Fair",
            QualityLabel::Good => "Good",
            QualityLabel::Excellent => "Excellent",
        };
        f.write_str(s)
    }
}

/// Headline figures shown at the top of every report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_records: usize,
    pub total_columns: usize,
    pub domain: DomainTag,
    pub headline: String,
}

/// Scoring and provenance block attached to every report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub confidence: f64,
    pub processing_time_ms: u64,
    pub quality: QualityLabel,
    pub suggestions: Vec<String>,
}

/// The terminal artifact of one pipeline run: exactly one per input file,
/// immutable once assembled, read-only for any presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub report_type: DomainTag,
    pub sections: serde_json::Map<String, Value>,
    pub summary: ReportSummary,
    pub row_count: usize,
    pub column_count: usize,
    pub metadata: ReportMetadata,
}
