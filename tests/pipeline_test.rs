// End-to-end pipeline tests: bytes in, reports out.
use serde_json::json;
use sheet_insights::report::{generate_report, generate_reports, FileInput};
use sheet_insights::types::{DomainTag, QualityLabel, RecordSet};
use sheet_insights::{loader, ReportError};

fn decode_csv(bytes: &[u8]) -> RecordSet {
    loader::decode(bytes, "csv").unwrap()
}

#[test]
fn financial_csv_produces_financial_report() {
    let csv = b"revenue,expense\n\"$1,000\",400\n\"$2,000\",600\n";
    let set = decode_csv(csv);
    let report = generate_report(set, "ledger.csv", None);

    assert_eq!(report.report_type, DomainTag::Financial);
    assert_eq!(report.summary.total_records, 2);
    assert_eq!(report.summary.total_columns, 2);

    let breakdown = &report.sections["breakdown"];
    assert_eq!(breakdown["total_revenue"], json!(3000.0));
    assert_eq!(breakdown["total_expenses"], json!(1000.0));
    assert_eq!(breakdown["net_profit"], json!(2000.0));
    let margin = breakdown["profit_margin_pct"].as_f64().unwrap();
    assert!((margin - 66.67).abs() < 0.01);

    // Sections every financial report carries.
    for key in [
        "executive_summary",
        "recommendations",
        "risks",
        "opportunities",
        "column_stats",
    ] {
        assert!(report.sections.contains_key(key), "missing section {}", key);
    }
}

#[test]
fn decoded_column_order_follows_the_header() {
    let set = decode_csv(b"revenue,expense\n100,40\n");
    assert_eq!(set.columns, vec!["revenue", "expense"]);

    let report = generate_report(set, "ledger.csv", None);
    assert_eq!(report.column_count, 2);
    let stats = &report.sections["column_stats"];
    assert!(stats.get("revenue").is_some());
    assert!(stats.get("expense").is_some());
}

#[test]
fn all_empty_column_still_counts_toward_quality() {
    // Column "b" is entirely empty: half the cells are missing, so the
    // quality tier must be Fair, and the column must not vanish.
    let mut csv = String::from("a,b\n");
    for i in 0..10 {
        csv.push_str(&format!("{},\n", i));
    }
    let set = decode_csv(csv.as_bytes());
    assert_eq!(set.columns, vec!["a", "b"]);

    let report = generate_report(set, "half.csv", None);
    assert_eq!(report.summary.total_columns, 2);
    assert_eq!(report.column_count, 2);
    assert_eq!(report.metadata.quality, QualityLabel::Fair);
}

#[test]
fn empty_file_produces_error_report() {
    let set = decode_csv(b"a,b,c\n");
    assert!(set.is_empty());
    let report = generate_report(set, "empty.csv", None);

    assert_eq!(report.report_type, DomainTag::Error);
    assert_eq!(report.summary.total_records, 0);
    assert_eq!(report.metadata.confidence, 0.0);
    assert_eq!(report.metadata.quality, QualityLabel::Poor);
    // The error message and its matching narrative, nothing else.
    assert_eq!(report.sections.len(), 2);
    assert!(report.sections.contains_key("error"));
    assert!(report.sections["executive_summary"]
        .as_str()
        .unwrap()
        .contains("empty.csv"));
}

#[test]
fn mostly_filled_large_file_is_excellent_and_confident() {
    // 150 records, ~95% of cells filled.
    let mut csv = String::from("revenue,expense\n");
    for i in 0..150 {
        if i % 20 == 0 {
            csv.push_str(&format!("{},\n", 100 + i));
        } else {
            csv.push_str(&format!("{},{}\n", 100 + i, 40 + i));
        }
    }
    let set = decode_csv(csv.as_bytes());
    let report = generate_report(set, "big.csv", None);

    assert_eq!(report.metadata.quality, QualityLabel::Excellent);
    // Base 0.5 plus 0.2 for more than 100 records, before relevance credit.
    assert!(report.metadata.confidence >= 0.7);
    assert!(report.metadata.confidence <= 1.0);
}

#[test]
fn batch_of_three_with_one_failure_yields_three_reports() {
    let inputs = vec![
        FileInput {
            file_name: "sales.csv".to_string(),
            outcome: Ok(decode_csv(
                b"product,sale_amount\nwidget,100\ngadget,250\nwidget,75\n",
            )),
        },
        FileInput {
            file_name: "binary.xlsx".to_string(),
            outcome: loader::decode(b"\x50\x4b\x03\x04", "xlsx"),
        },
        FileInput {
            file_name: "plain.csv".to_string(),
            outcome: Ok(decode_csv(b"foo,bar\n1,2\n")),
        },
    ];
    let reports = generate_reports(inputs, None).unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].report_type, DomainTag::Sales);
    assert_eq!(reports[1].report_type, DomainTag::Error);
    assert_eq!(reports[2].report_type, DomainTag::General);

    let top = reports[0].sections["top_products"].as_array().unwrap();
    assert_eq!(top[0]["name"], json!("gadget"));
    assert_eq!(top[1]["name"], json!("widget"));
    assert_eq!(top[1]["total"], json!(175.0));
}

#[test]
fn empty_batch_fails_outright() {
    assert!(matches!(
        generate_reports(Vec::new(), None),
        Err(ReportError::EmptyBatch)
    ));
}

#[test]
fn reports_serialize_with_stable_shape() {
    let set = decode_csv(b"campaign,clicks,spend\nspring,120,300\nfall,80,150\n");
    let report = generate_report(set, "ads.csv", None);
    assert_eq!(report.report_type, DomainTag::Marketing);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["report_type"], "marketing");
    assert_eq!(value["summary"]["domain"], "marketing");
    assert!(value["metadata"]["confidence"].as_f64().unwrap() <= 1.0);
    assert!(value["sections"]["data_quality"]["completeness_pct"]
        .as_f64()
        .is_some());
}
