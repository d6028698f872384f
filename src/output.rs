use crate::error::Result;
use crate::types::Report;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

/// One row of the console batch summary.
#[derive(Debug, Clone, Tabled)]
pub struct ReportSummaryRow {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Domain")]
    pub domain: String,
    #[tabled(rename = "Records")]
    pub records: usize,
    #[tabled(rename = "Columns")]
    pub columns: usize,
    #[tabled(rename = "Confidence")]
    pub confidence: String,
    #[tabled(rename = "Quality")]
    pub quality: String,
}

impl ReportSummaryRow {
    pub fn from_report(report: &Report) -> Self {
        Self {
            file: report.file_name.clone(),
            domain: report.report_type.to_string(),
            records: report.row_count,
            columns: report.column_count,
            confidence: format!("{:.2}", report.metadata.confidence),
            quality: report.metadata.quality.to_string(),
        }
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Persist one report as `<stem>_report.json` under the output directory,
/// returning the path written.
pub fn write_report(output_dir: &Path, report: &Report) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let stem = Path::new(&report.file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let path = output_dir.join(format!("{}_report.json", stem));
    write_json(&path, report)?;
    Ok(path)
}

/// Print the batch summary as a markdown table.
pub fn preview_reports(reports: &[Report]) {
    let rows: Vec<ReportSummaryRow> = reports.iter().map(ReportSummaryRow::from_report).collect();
    if rows.is_empty() {
        println!("(no reports)\n");
        return;
    }
    let table_str = Table::new(rows).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
