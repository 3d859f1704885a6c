//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::{CleanError, CleanedSales, CleaningStats, SalesCleaner};
pub use loader::{LoaderError, SalesLoader};

/// Column holding the transaction date.
pub const DATE: &str = "Date";
/// Column holding the product name.
pub const PRODUCT_NAME: &str = "Product Name";
/// Column holding the number of units sold.
pub const QUANTITY_SOLD: &str = "Quantity Sold";
/// Column holding the unit price.
pub const SALE_PRICE: &str = "Sale Price";
/// Column holding quantity times price, derived when the source lacks it.
pub const TOTAL_SALE: &str = "Total Sale";
/// Derived `YYYY-MM` period column used for time rollups.
pub const MONTH: &str = "Month";

/// Cell values read as missing, matching the usual spreadsheet/pandas markers.
/// Empty cells are always missing.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Columns a sales file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE, PRODUCT_NAME, QUANTITY_SOLD, SALE_PRICE];
