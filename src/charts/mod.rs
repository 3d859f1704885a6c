//! Charts module - Chart rendering and display

mod renderer;
mod viewer;

pub use renderer::{ChartError, ChartRenderer, RenderedCharts, SALES_TRENDS_FILE, TOP_PRODUCTS_FILE};
pub use viewer::open_charts;
