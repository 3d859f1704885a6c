//! Sales Cleaner Module
//! Handles null dropping, type coercion and the derived Total Sale column.

use super::{DATE, MONTH, PRODUCT_NAME, QUANTITY_SOLD, SALE_PRICE, TOTAL_SALE};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Days between 0001-01-01 and the Unix epoch, the origin of Polars dates.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Row accounting for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    pub rows_read: usize,
    pub dropped_missing: usize,
    pub dropped_invalid: usize,
    pub rows_kept: usize,
    pub total_sale_derived: bool,
}

/// Cleaned sales table.
///
/// Columns: `Date` (date), `Month` (`YYYY-MM`), `Product Name`,
/// `Quantity Sold`, `Sale Price`, `Total Sale` (all numeric columns f64).
/// No cell is null.
#[derive(Debug, Clone)]
pub struct CleanedSales {
    pub frame: DataFrame,
    pub stats: CleaningStats,
}

/// Handles data cleaning and coercion operations.
pub struct SalesCleaner;

impl SalesCleaner {
    /// Clean a freshly loaded sales table.
    ///
    /// Rows with a null in any column are dropped first; cells that fail
    /// coercion then become nulls and their rows are dropped as well.
    pub fn clean(df: &DataFrame) -> Result<CleanedSales, CleanError> {
        let rows_read = df.height();
        let complete = df.drop_nulls::<String>(None)?;
        let dropped_missing = rows_read - complete.height();

        let derive_total = !complete
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == TOTAL_SALE);

        let date_ca = complete.column(DATE)?.str()?;
        let product_ca = complete.column(PRODUCT_NAME)?.str()?;
        let quantity_ca = complete.column(QUANTITY_SOLD)?.str()?;
        let price_ca = complete.column(SALE_PRICE)?.str()?;
        let total_ca = if derive_total {
            None
        } else {
            Some(complete.column(TOTAL_SALE)?.str()?)
        };

        let mut days: Vec<i32> = Vec::new();
        let mut months: Vec<String> = Vec::new();
        let mut products: Vec<String> = Vec::new();
        let mut quantities: Vec<f64> = Vec::new();
        let mut prices: Vec<f64> = Vec::new();
        let mut totals: Vec<f64> = Vec::new();

        for i in 0..complete.height() {
            let date = date_ca.get(i).and_then(Self::coerce_date);
            let product = product_ca.get(i).and_then(Self::coerce_text);
            let quantity = quantity_ca.get(i).and_then(Self::coerce_number);
            let price = price_ca.get(i).and_then(Self::coerce_number);

            let (Some(date), Some(product), Some(quantity), Some(price)) =
                (date, product, quantity, price)
            else {
                continue;
            };

            let total = match total_ca {
                Some(ca) => ca.get(i).and_then(Self::coerce_number),
                None => Some(quantity * price),
            };
            let Some(total) = total.filter(|t| t.is_finite()) else {
                continue;
            };

            days.push(date.num_days_from_ce() - EPOCH_DAYS_FROM_CE);
            months.push(Self::month_key(date));
            products.push(product);
            quantities.push(quantity);
            prices.push(price);
            totals.push(total);
        }

        let rows_kept = totals.len();
        let stats = CleaningStats {
            rows_read,
            dropped_missing,
            dropped_invalid: complete.height() - rows_kept,
            rows_kept,
            total_sale_derived: derive_total,
        };

        let frame = DataFrame::new(vec![
            Column::new(DATE.into(), days).cast(&DataType::Date)?,
            Column::new(MONTH.into(), months),
            Column::new(PRODUCT_NAME.into(), products),
            Column::new(QUANTITY_SOLD.into(), quantities),
            Column::new(SALE_PRICE.into(), prices),
            Column::new(TOTAL_SALE.into(), totals),
        ])?;

        tracing::info!(
            rows_read = stats.rows_read,
            dropped_missing = stats.dropped_missing,
            dropped_invalid = stats.dropped_invalid,
            rows_kept = stats.rows_kept,
            derived_total = stats.total_sale_derived,
            "cleaned sales data"
        );

        Ok(CleanedSales { frame, stats })
    }

    /// Parse a date cell, accepting plain dates and timestamps.
    pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    /// Parse a numeric cell. Non-finite values count as unparsable.
    pub fn coerce_number(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn coerce_text(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// `YYYY-MM` period key; sorts chronologically as text.
    pub fn month_key(date: NaiveDate) -> String {
        format!("{:04}-{:02}", date.year(), date.month())
    }
}
