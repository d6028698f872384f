// File decoding: bytes in, a record set out.
//
// This is the pipeline's external collaborator boundary. The analysis core
// only depends on the `decode` contract (records plus the header column
// list, or a decode failure); the concrete implementation here handles
// delimited text.
use crate::error::{ReportError, Result};
use crate::types::{Record, RecordSet};
use csv::ReaderBuilder;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Decode a file's bytes into a record set according to its extension.
///
/// `csv` and `tsv` are supported; anything else fails with
/// `UnsupportedFormat`. Malformed content fails with `Parse`. The column
/// list comes from the header row in file order, so a column whose cells
/// are all empty still exists and still counts toward completeness. Rows
/// shorter than the header simply omit the trailing keys; cells are typed
/// best-effort (number, boolean, string), and empty cells become absent
/// keys rather than empty strings.
pub fn decode(bytes: &[u8], extension: &str) -> Result<RecordSet> {
    let delimiter = match extension.to_lowercase().as_str() {
        "csv" => b',',
        "tsv" => b'\t',
        other => return Err(ReportError::UnsupportedFormat(other.to_string())),
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns: Vec<String> = headers.iter().filter(|h| !h.is_empty()).cloned().collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = Record::new();
        for (header, field) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            record.insert(header.clone(), type_cell(field));
        }
        records.push(record);
    }
    debug!(rows = records.len(), columns = columns.len(), "decoded file");
    Ok(RecordSet::new(records, columns))
}

/// Read and decode one file from disk, keying the format off its extension.
pub fn load_file(path: &Path) -> Result<RecordSet> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();
    let bytes = std::fs::read(path)?;
    decode(&bytes, &extension)
}

/// Give a raw field its natural scalar type. Bare numbers become numbers
/// and `true`/`false` become booleans; everything else stays a string
/// (including currency/percent forms, which the coercion utility handles
/// later).
fn type_cell(field: &str) -> Value {
    if let Ok(b) = field.to_lowercase().parse::<bool>() {
        return Value::Bool(b);
    }
    if let Ok(n) = field.parse::<f64>() {
        if n.is_finite() {
            if let Some(number) = serde_json::Number::from_f64(n) {
                return Value::Number(number);
            }
        }
    }
    Value::String(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn decodes_csv_with_typed_cells() {
        let bytes = b"revenue,active,note\n$1000,true,launch\n250.5,false,\n";
        let set = decode(bytes, "csv").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[0]["revenue"], json!("$1000"));
        assert_eq!(set.records[0]["active"], json!(true));
        assert_eq!(set.records[1]["revenue"], json!(250.5));
        // Empty cell is absent, not an empty string.
        assert!(!set.records[1].contains_key("note"));
    }

    #[test]
    fn columns_keep_header_order() {
        // Header order is not alphabetical; the column list must follow the
        // file, not the record maps' key order.
        let bytes = b"revenue,expense,active\n100,40,true\n";
        let set = decode(bytes, "csv").unwrap();
        assert_eq!(set.columns, vec!["revenue", "expense", "active"]);
    }

    #[test]
    fn fully_empty_column_survives_decoding() {
        let bytes = b"a,b\n1,\n2,\n";
        let set = decode(bytes, "csv").unwrap();
        assert_eq!(set.columns, vec!["a", "b"]);
        assert!(set.records.iter().all(|r| !r.contains_key("b")));
    }

    #[test]
    fn decodes_tsv() {
        let bytes = b"a\tb\n1\t2\n";
        let set = decode(bytes, "tsv").unwrap();
        assert_eq!(set.records[0]["a"], json!(1.0));
        assert_eq!(set.records[0]["b"], json!(2.0));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = decode(b"whatever", "xlsx");
        assert!(matches!(result, Err(ReportError::UnsupportedFormat(ext)) if ext == "xlsx"));
    }

    #[test]
    fn short_rows_omit_trailing_keys() {
        let bytes = b"a,b,c\n1,2\n";
        let set = decode(bytes, "csv").unwrap();
        assert_eq!(set.records[0].len(), 2);
        assert!(!set.records[0].contains_key("c"));
        assert_eq!(set.columns.len(), 3);
    }

    #[test]
    fn load_file_round_trip() {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        writeln!(file, "sku,stock").unwrap();
        writeln!(file, "AB-1,42").unwrap();
        file.flush().unwrap();

        let set = load_file(file.path()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0]["sku"], json!("AB-1"));
        assert_eq!(set.records[0]["stock"], json!(42.0));
    }

    #[test]
    fn unsupported_suffix_is_rejected_after_read() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        writeln!(file, "plain text").unwrap();
        file.flush().unwrap();

        let result = load_file(file.path());
        assert!(matches!(result, Err(ReportError::UnsupportedFormat(ext)) if ext == "txt"));
    }
}
