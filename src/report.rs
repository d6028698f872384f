use crate::classify::detect_domain;
use crate::error::{ReportError, Result};
use crate::generators::generate_sections;
use crate::scoring::{completeness_ratio, confidence, quality};
use crate::types::{
    DomainTag, QualityLabel, RecordSet, Report, ReportMetadata, ReportSummary,
};
use crate::util::format_int;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One file's input to the batch entry point: the file name plus the decode
/// collaborator's outcome. A failed decode still yields a report.
pub struct FileInput {
    pub file_name: String,
    pub outcome: Result<RecordSet>,
}

/// Build one report for one file's record set.
///
/// Zero records short-circuit into an error report without invoking any
/// generator. Otherwise: classify (or honor the caller's preferred tag),
/// generate sections, score confidence and quality, and package. The
/// processing-time measurement spans classification through generation.
/// The set's column list drives column counts and completeness, so a
/// header column whose cells are all empty still weighs in.
pub fn generate_report(
    set: RecordSet,
    file_name: &str,
    preferred_domain: Option<DomainTag>,
) -> Report {
    if set.is_empty() {
        warn!(file = file_name, "no usable records, emitting error report");
        return error_report(file_name, "file contained no usable records");
    }

    let started = Instant::now();

    let domain = match preferred_domain {
        // `Error` is reserved for the assembler's own fallback.
        Some(tag) if tag != DomainTag::Error => tag,
        _ => detect_domain(&set.records, &set.columns),
    };
    debug!(file = file_name, domain = %domain, "classified record set");

    let sections = generate_sections(domain, &set, file_name);

    let confidence_score = confidence(&set.records, &set.columns, domain);
    let quality_label = quality(&set.records, &set.columns);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let headline = format!(
        "Classified as {} data ({} records, confidence {:.0}%)",
        domain,
        format_int(set.len() as i64),
        confidence_score * 100.0,
    );
    let suggestions = build_suggestions(&set, domain, confidence_score, quality_label);

    info!(
        file = file_name,
        domain = %domain,
        records = set.len(),
        confidence = confidence_score,
        quality = %quality_label,
        elapsed_ms,
        "report generated"
    );

    Report {
        id: Uuid::new_v4(),
        file_name: file_name.to_string(),
        generated_at: Utc::now(),
        report_type: domain,
        sections,
        summary: ReportSummary {
            total_records: set.len(),
            total_columns: set.columns.len(),
            domain,
            headline,
        },
        row_count: set.len(),
        column_count: set.columns.len(),
        metadata: ReportMetadata {
            confidence: confidence_score,
            processing_time_ms: elapsed_ms,
            quality: quality_label,
            suggestions,
        },
    }
}

/// Batch entry point: one report per input file, always.
///
/// A file whose decode failed gets an error report carrying the failure
/// message; sibling files are unaffected. The only hard failure is an empty
/// batch.
pub fn generate_reports(
    files: Vec<FileInput>,
    preferred_domain: Option<DomainTag>,
) -> Result<Vec<Report>> {
    if files.is_empty() {
        return Err(ReportError::EmptyBatch);
    }
    let reports = files
        .into_iter()
        .map(|file| match file.outcome {
            Ok(set) => generate_report(set, &file.file_name, preferred_domain),
            Err(e) => {
                warn!(file = %file.file_name, error = %e, "decode failed");
                error_report(&file.file_name, &e.to_string())
            }
        })
        .collect();
    Ok(reports)
}

/// Fallback artifact for unprocessable input: error domain, an `error`
/// section plus a matching narrative, confidence 0, quality Poor.
pub fn error_report(file_name: &str, message: &str) -> Report {
    let narrative = format!("Could not analyze {}: {}", file_name, message);
    let mut sections = Map::new();
    sections.insert("error".to_string(), json!(message));
    sections.insert("executive_summary".to_string(), json!(narrative));

    Report {
        id: Uuid::new_v4(),
        file_name: file_name.to_string(),
        generated_at: Utc::now(),
        report_type: DomainTag::Error,
        sections,
        summary: ReportSummary {
            total_records: 0,
            total_columns: 0,
            domain: DomainTag::Error,
            headline: narrative,
        },
        row_count: 0,
        column_count: 0,
        metadata: ReportMetadata {
            confidence: 0.0,
            processing_time_ms: 0,
            quality: QualityLabel::Poor,
            suggestions: vec![
                "Check that the file has a header row and at least one data row.".to_string(),
            ],
        },
    }
}

fn build_suggestions(
    set: &RecordSet,
    domain: DomainTag,
    confidence_score: f64,
    quality_label: QualityLabel,
) -> Vec<String> {
    let mut suggestions = Vec::new();
    if quality_label <= QualityLabel::Fair {
        let filled_pct = completeness_ratio(&set.records, &set.columns) * 100.0;
        suggestions.push(format!(
            "Only {:.0}% of cells are filled; completing the data will improve every metric.",
            filled_pct
        ));
    }
    if confidence_score < 0.6 {
        suggestions.push(
            "Classification confidence is low; rename columns to standard business terms."
                .to_string(),
        );
    }
    if matches!(
        domain,
        DomainTag::Inventory | DomainTag::Customer | DomainTag::Marketing | DomainTag::Operational
    ) {
        suggestions.push(format!(
            "Dedicated {} analysis is not available yet; a general profile was generated.",
            domain
        ));
    }
    suggestions
}

/// Convenience serialization of a report's terminal JSON form.
pub fn report_to_json(report: &Report) -> Result<Value> {
    Ok(serde_json::to_value(report)?)
}
