use crate::relevance::{has_role_patterns, relevant_column_count};
use crate::types::{DomainTag, QualityLabel, Record};
use crate::util::is_cell_empty;

/// Heuristic trustworthiness score for a classification + report, in [0, 1].
///
/// Additive: base 0.5, +0.2 when the set holds more than 100 records, +0.1
/// more beyond 1000, and up to +0.3 proportional to the share of columns
/// matched by the domain's relevance roles. Domains without a role table
/// (general, error) earn no relevance credit. Deterministic, not a
/// probability.
pub fn confidence(records: &[Record], columns: &[String], domain: DomainTag) -> f64 {
    let mut score = 0.5;
    if records.len() > 100 {
        score += 0.2;
    }
    if records.len() > 1000 {
        score += 0.1;
    }
    if has_role_patterns(domain) && !columns.is_empty() {
        let matched = relevant_column_count(columns, domain) as f64;
        score += 0.3 * matched / columns.len() as f64;
    }
    score.clamp(0.0, 1.0)
}

/// Completeness ratio: filled cells / (records x columns). Zero when there
/// are no cells at all.
pub fn completeness_ratio(records: &[Record], columns: &[String]) -> f64 {
    let total = records.len() * columns.len();
    if total == 0 {
        return 0.0;
    }
    let filled = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .filter(|column| !is_cell_empty(record.get(column.as_str())))
                .count()
        })
        .sum::<usize>();
    filled as f64 / total as f64
}

/// Four-tier quality label from the overall filled-cell ratio: >= 90%
/// Excellent, >= 70% Good, >= 50% Fair, otherwise Poor. Independent of the
/// margin/size risk heuristic inside the financial generator; the two are
/// not meant to agree.
pub fn quality(records: &[Record], columns: &[String]) -> QualityLabel {
    let ratio = completeness_ratio(records, columns);
    if ratio >= 0.9 {
        QualityLabel::Excellent
    } else if ratio >= 0.7 {
        QualityLabel::Good
    } else if ratio >= 0.5 {
        QualityLabel::Fair
    } else {
        QualityLabel::Poor
    }
}
