use clap::Parser;
use pretty_assertions::assert_eq;
use sales_insight::data::LoaderError;
use sales_insight::stats::{MonthlyTotal, ProductTotal};
use sales_insight::{run, CliConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SALES_CSV: &str = "\
Date,Product Name,Quantity Sold,Sale Price,Region
2024-01-03,Laptop,2,1200,North
2024-01-15,Mouse,10,25.5,North
2024-01-20,Keyboard,3,45,South
2024-02-02,Laptop,1,1150,South
2024-02-10,Monitor,2,300,
2024-02-11,Monitor,2,300,East
2024-02-28,Mouse,4,25,East
2024-03-05,Cable,abc,5,West
not-a-date,Laptop,1,1200,West
2024-03-09,Webcam,1,,West
2024-03-12,Headset,1,80,West
";

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn offline_config(output_dir: &Path, extra: &[&str]) -> CliConfig {
    let out = output_dir.to_str().unwrap();
    let args = ["sales-insight", "--no-charts", "--no-open", "--output-dir", out];
    CliConfig::try_parse_from(args.iter().chain(extra.iter())).unwrap()
}

fn product(name: &str, total: f64) -> ProductTotal {
    ProductTotal {
        product: name.to_string(),
        total,
    }
}

#[test]
fn test_end_to_end_text_report() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "sales.csv", SALES_CSV);
    let config = offline_config(&dir.path().join("charts"), &[]);

    let mut out = Vec::new();
    let outcome = run(&config, &input, &mut out).unwrap();
    let summary = outcome.summary;

    // 11 rows: 2 with empty cells, 2 with bad date/quantity
    assert_eq!(summary.cleaning.rows_read, 11);
    assert_eq!(summary.cleaning.dropped_missing, 2);
    assert_eq!(summary.cleaning.dropped_invalid, 2);
    assert_eq!(summary.cleaning.rows_kept, 7);
    assert!(summary.cleaning.total_sale_derived);

    // 2400 + 255 + 135 + 1150 + 600 + 100 + 80
    assert_eq!(summary.total_sales, 4720.0);
    assert_eq!(summary.average_sale, Some(4720.0 / 7.0));
    assert_eq!(
        summary.top_products,
        vec![
            product("Laptop", 3550.0),
            product("Monitor", 600.0),
            product("Mouse", 355.0),
            product("Keyboard", 135.0),
            product("Headset", 80.0),
        ]
    );
    assert_eq!(
        summary.monthly_sales,
        vec![
            MonthlyTotal {
                month: "2024-01".to_string(),
                total: 2790.0
            },
            MonthlyTotal {
                month: "2024-02".to_string(),
                total: 1850.0
            },
            MonthlyTotal {
                month: "2024-03".to_string(),
                total: 80.0
            },
        ]
    );
    assert_eq!(summary.statistics.units_sold, 23.0);

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with(
        "Total Sales: $4,720.00\nAverage Sales per Transaction: $674.29\nTop 5 Products by Sales:\n"
    ));
    assert!(text.contains("Laptop         $3,550.00"));
    assert!(!text.contains("Chart saved"));
    assert_eq!(outcome.charts.paths().count(), 0);
    assert!(!dir.path().join("charts").exists());
}

#[test]
fn test_charts_are_written_and_listed() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "sales.csv", SALES_CSV);
    let charts_dir = dir.path().join("charts");
    let config = CliConfig::try_parse_from([
        "sales-insight",
        "--no-open",
        "--width",
        "400",
        "--height",
        "300",
        "--output-dir",
        charts_dir.to_str().unwrap(),
    ])
    .unwrap();

    let mut out = Vec::new();
    let outcome = run(&config, &input, &mut out).unwrap();

    let top = charts_dir.join("top_products.png");
    let trend = charts_dir.join("sales_trends.png");
    assert_eq!(outcome.charts.top_products.as_ref(), Some(&top));
    assert_eq!(outcome.charts.sales_trends.as_ref(), Some(&trend));
    assert!(fs::metadata(&top).unwrap().len() > 0);
    assert!(fs::metadata(&trend).unwrap().len() > 0);

    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with(&format!(
        "Chart saved: {}\nChart saved: {}\n",
        top.display(),
        trend.display()
    )));
}

#[test]
fn test_source_total_sale_is_used_as_given() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(
        &dir,
        "with_totals.csv",
        "Date,Product Name,Quantity Sold,Sale Price,Total Sale\n\
         01/15/2024,Chair,2,50,90\n\
         01/16/2024,Desk,1,200,200\n",
    );
    let config = offline_config(dir.path(), &["--top", "1"]);

    let mut out = Vec::new();
    let summary = run(&config, &input, &mut out).unwrap().summary;

    assert!(!summary.cleaning.total_sale_derived);
    assert_eq!(summary.total_sales, 290.0);
    assert_eq!(summary.top_products, vec![product("Desk", 200.0)]);
}

#[test]
fn test_json_output_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "sales.csv", SALES_CSV);
    let config = offline_config(dir.path(), &["--json"]);

    let mut out = Vec::new();
    run(&config, &input, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["total_sales"], 4720.0);
    assert_eq!(value["top_products"][0]["product"], "Laptop");
    assert_eq!(value["monthly_sales"].as_array().unwrap().len(), 3);
    assert_eq!(value["cleaning"]["rows_kept"], 7);
}

#[test]
fn test_all_rows_invalid_still_reports() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(
        &dir,
        "bad.csv",
        "Date,Product Name,Quantity Sold,Sale Price\n\
         yesterday,Chair,two,50\n",
    );
    let config = offline_config(dir.path(), &[]);

    let mut out = Vec::new();
    let summary = run(&config, &input, &mut out).unwrap().summary;

    assert_eq!(summary.total_sales, 0.0);
    assert_eq!(summary.average_sale, None);
    assert!(summary.top_products.is_empty());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total Sales: $0.00"));
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(dir.path(), &[]);

    let mut out = Vec::new();
    let err = run(&config, &dir.path().join("missing.csv"), &mut out).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LoaderError>(),
        Some(LoaderError::NotFound(_))
    ));
    assert!(out.is_empty());
}

#[test]
fn test_missing_column_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "partial.csv", "Date,Product Name\n2024-01-01,Chair\n");
    let config = offline_config(dir.path(), &[]);

    let mut out = Vec::new();
    let err = run(&config, &input, &mut out).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LoaderError>(),
        Some(LoaderError::MissingColumn(c)) if c == "Quantity Sold"
    ));
}
