//! Sales Calculator Module
//! Handles totals, top-N product ranking, monthly rollups and descriptive stats.

use crate::data::{CleanedSales, CleaningStats, MONTH, PRODUCT_NAME, QUANTITY_SOLD, TOTAL_SALE};
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};
use thiserror::Error;

/// Number of products shown in the ranking unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Top-N must be at least 1")]
    InvalidTopN,
}

/// Summed Total Sale for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotal {
    pub product: String,
    pub total: f64,
}

/// Summed Total Sale for one `YYYY-MM` period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

/// Distribution of Total Sale per transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleStatistics {
    pub transactions: usize,
    pub units_sold: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

/// Everything the report and the charts need from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_sales: f64,
    pub average_sale: Option<f64>,
    pub top_products: Vec<ProductTotal>,
    pub monthly_sales: Vec<MonthlyTotal>,
    pub statistics: SaleStatistics,
    pub cleaning: CleaningStats,
}

/// Handles aggregation over a cleaned sales table.
pub struct SalesAnalyzer;

impl SalesAnalyzer {
    /// Sum of Total Sale; zero for an empty table.
    pub fn total_sales(df: &DataFrame) -> Result<f64, AnalysisError> {
        Ok(df.column(TOTAL_SALE)?.f64()?.sum().unwrap_or(0.0))
    }

    /// Mean Total Sale per transaction; `None` for an empty table.
    pub fn average_sale(df: &DataFrame) -> Result<Option<f64>, AnalysisError> {
        Ok(df.column(TOTAL_SALE)?.f64()?.mean())
    }

    /// Products with the highest summed Total Sale, best first.
    ///
    /// Equal totals are ordered by product name.
    pub fn top_products(df: &DataFrame, n: usize) -> Result<Vec<ProductTotal>, AnalysisError> {
        if n == 0 {
            return Err(AnalysisError::InvalidTopN);
        }

        let ranked = df
            .clone()
            .lazy()
            .group_by([col(PRODUCT_NAME)])
            .agg([col(TOTAL_SALE).sum()])
            .sort_by_exprs(
                [col(TOTAL_SALE), col(PRODUCT_NAME)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(n as IdxSize)
            .collect()?;

        let names = ranked.column(PRODUCT_NAME)?.str()?;
        let totals = ranked.column(TOTAL_SALE)?.f64()?;

        Ok(names
            .into_iter()
            .zip(totals)
            .filter_map(|(name, total)| {
                Some(ProductTotal {
                    product: name?.to_string(),
                    total: total?,
                })
            })
            .collect())
    }

    /// Total Sale per calendar month in chronological order.
    pub fn monthly_sales(df: &DataFrame) -> Result<Vec<MonthlyTotal>, AnalysisError> {
        let rolled = df
            .clone()
            .lazy()
            .group_by([col(MONTH)])
            .agg([col(TOTAL_SALE).sum()])
            .sort([MONTH], SortMultipleOptions::default())
            .collect()?;

        let months = rolled.column(MONTH)?.str()?;
        let totals = rolled.column(TOTAL_SALE)?.f64()?;

        Ok(months
            .into_iter()
            .zip(totals)
            .filter_map(|(month, total)| {
                Some(MonthlyTotal {
                    month: month?.to_string(),
                    total: total?,
                })
            })
            .collect())
    }

    /// Descriptive statistics of Total Sale per transaction.
    pub fn sale_statistics(df: &DataFrame) -> Result<SaleStatistics, AnalysisError> {
        let values: Vec<f64> = df.column(TOTAL_SALE)?.f64()?.into_iter().flatten().collect();
        let units_sold = df.column(QUANTITY_SOLD)?.f64()?.sum().unwrap_or(0.0);
        let transactions = values.len();

        if transactions == 0 {
            return Ok(SaleStatistics {
                transactions,
                units_sold,
                min: None,
                max: None,
                median: None,
                std_dev: None,
            });
        }

        let mut data = Data::new(values);
        let finite = |v: f64| v.is_finite().then_some(v);

        Ok(SaleStatistics {
            transactions,
            units_sold,
            min: finite(data.min()),
            max: finite(data.max()),
            median: finite(data.median()),
            // Sample deviation is undefined for a single transaction
            std_dev: data.std_dev().and_then(finite),
        })
    }

    /// Compute every figure for the report and charts.
    pub fn summarize(cleaned: &CleanedSales, top_n: usize) -> Result<SalesSummary, AnalysisError> {
        let df = &cleaned.frame;
        let summary = SalesSummary {
            total_sales: Self::total_sales(df)?,
            average_sale: Self::average_sale(df)?,
            top_products: Self::top_products(df, top_n)?,
            monthly_sales: Self::monthly_sales(df)?,
            statistics: Self::sale_statistics(df)?,
            cleaning: cleaned.stats,
        };

        tracing::debug!(
            products = summary.top_products.len(),
            months = summary.monthly_sales.len(),
            total = summary.total_sales,
            "summarized sales"
        );

        Ok(summary)
    }
}
