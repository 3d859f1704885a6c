//! Stats module - Sales aggregation and descriptive statistics

mod calculator;

pub use calculator::{
    AnalysisError, MonthlyTotal, ProductTotal, SaleStatistics, SalesAnalyzer, SalesSummary,
    DEFAULT_TOP_N,
};
