//! Sales Insight - CSV Sales Cleaning, Summary Statistics & Charts
//!
//! Loads a sales record file, drops incomplete and malformed rows, derives
//! Total Sale where needed, then reports totals, the top products and a
//! monthly sales trend.

pub mod app;
pub mod charts;
pub mod config;
pub mod data;
pub mod logger;
pub mod report;
pub mod stats;

pub use app::{run, RunOutcome};
pub use config::CliConfig;
