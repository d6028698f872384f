// Batch CLI: decode each input file, run the analysis pipeline, write one
// JSON report per file, and print a summary table.
use clap::Parser;
use sheet_insights::report::{generate_reports, FileInput};
use sheet_insights::types::DomainTag;
use sheet_insights::{loader, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sheet_insights",
    about = "Classify tabular data files by business domain and generate analytical reports"
)]
struct Args {
    /// Input files (.csv or .tsv)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory the JSON reports are written to
    #[arg(long, default_value = "reports")]
    output_dir: PathBuf,

    /// Force a domain instead of auto-classifying
    /// (financial, sales, inventory, customer, marketing, operational, general)
    #[arg(long, default_value = "auto")]
    domain: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let preferred_domain = match args.domain.as_str() {
        "auto" => None,
        other => match other.parse::<DomainTag>() {
            Ok(tag) => Some(tag),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let inputs: Vec<FileInput> = args
        .files
        .iter()
        .map(|path| FileInput {
            file_name: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unnamed")
                .to_string(),
            outcome: loader::load_file(path),
        })
        .collect();

    let reports = match generate_reports(inputs, preferred_domain) {
        Ok(reports) => reports,
        Err(e) => {
            error!("batch failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for report in &reports {
        match output::write_report(&args.output_dir, report) {
            Ok(path) => println!("{} -> {}", report.summary.headline, path.display()),
            Err(e) => {
                error!(file = %report.file_name, "write failed: {}", e);
                continue;
            }
        }
    }
    println!();
    output::preview_reports(&reports);

    ExitCode::SUCCESS
}
