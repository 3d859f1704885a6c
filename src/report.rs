//! Console Report Module
//! Formats the sales summary for the terminal, as text or JSON.

use crate::stats::SalesSummary;
use std::io::{self, Write};

/// Format an amount as dollars with thousands separators and two decimals.
///
/// `1234567.891` becomes `$1,234,567.89`; negative amounts keep their sign
/// in front of the dollar symbol.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" is printed without a sign
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Print totals, the average sale and the top products table.
pub fn write_report<W: Write>(out: &mut W, summary: &SalesSummary) -> io::Result<()> {
    writeln!(out, "Total Sales: {}", format_currency(summary.total_sales))?;
    writeln!(
        out,
        "Average Sales per Transaction: {}",
        summary
            .average_sale
            .map(format_currency)
            .unwrap_or_else(|| "n/a".to_string())
    )?;
    writeln!(
        out,
        "Top {} Products by Sales:",
        summary.top_products.len()
    )?;

    if summary.top_products.is_empty() {
        writeln!(out, "  (no sales after cleaning)")?;
        return Ok(());
    }

    let amounts: Vec<String> = summary
        .top_products
        .iter()
        .map(|p| format_currency(p.total))
        .collect();
    let name_width = summary
        .top_products
        .iter()
        .map(|p| p.product.chars().count())
        .max()
        .unwrap_or(0)
        .max("Product Name".len());
    let amount_width = amounts
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("Total Sale".len());

    writeln!(
        out,
        "{:<name_width$}  {:>amount_width$}",
        "Product Name", "Total Sale"
    )?;
    for (product, amount) in summary.top_products.iter().zip(&amounts) {
        writeln!(
            out,
            "{:<name_width$}  {:>amount_width$}",
            product.product, amount
        )?;
    }

    Ok(())
}

/// Print the whole summary as pretty JSON.
pub fn write_json<W: Write>(out: &mut W, summary: &SalesSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CleaningStats;
    use crate::stats::{MonthlyTotal, ProductTotal, SaleStatistics};
    use pretty_assertions::assert_eq;

    fn summary(products: &[(&str, f64)]) -> SalesSummary {
        SalesSummary {
            total_sales: products.iter().map(|p| p.1).sum(),
            average_sale: (!products.is_empty())
                .then(|| products.iter().map(|p| p.1).sum::<f64>() / products.len() as f64),
            top_products: products
                .iter()
                .map(|(name, total)| ProductTotal {
                    product: name.to_string(),
                    total: *total,
                })
                .collect(),
            monthly_sales: vec![MonthlyTotal {
                month: "2024-01".to_string(),
                total: 1.0,
            }],
            statistics: SaleStatistics {
                transactions: products.len(),
                units_sold: 0.0,
                min: None,
                max: None,
                median: None,
                std_dev: None,
            },
            cleaning: CleaningStats::default(),
        }
    }

    #[test]
    fn formats_currency_with_separators() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(7.5), "$7.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-4321.0), "-$4,321.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(f64::NAN), "n/a");
    }

    #[test]
    fn writes_text_report() {
        let mut out = Vec::new();
        write_report(&mut out, &summary(&[("Laptop", 2400.0), ("Mouse", 75.5)])).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Total Sales: $2,475.50\n\
             Average Sales per Transaction: $1,237.75\n\
             Top 2 Products by Sales:\n\
             Product Name  Total Sale\n\
             Laptop         $2,400.00\n\
             Mouse             $75.50\n"
        );
    }

    #[test]
    fn writes_placeholder_for_empty_data() {
        let mut out = Vec::new();
        write_report(&mut out, &summary(&[])).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Average Sales per Transaction: n/a"));
        assert!(text.contains("(no sales after cleaning)"));
    }

    #[test]
    fn writes_json_summary() {
        let mut out = Vec::new();
        write_json(&mut out, &summary(&[("Laptop", 10.0)])).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_sales"], 10.0);
        assert_eq!(value["top_products"][0]["product"], "Laptop");
        assert_eq!(value["monthly_sales"][0]["month"], "2024-01");
        assert_eq!(value["cleaning"]["rows_kept"], 0);
    }
}
