//! Static Chart Renderer
//! Writes the sales charts as PNG images with plotters.
//!
//! Charts:
//! 1. Top products: vertical bars, one per product, best first
//! 2. Sales trends: monthly totals as a line with point markers

use crate::stats::{MonthlyTotal, ProductTotal, SalesSummary};
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Colors
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const TREND_GREEN: RGBColor = RGBColor(0, 128, 0);
const GRID: RGBColor = RGBColor(220, 220, 220);

const FONT: &str = "sans-serif";
const CAPTION_SIZE: f64 = 28.0;
const DESC_SIZE: f64 = 18.0;
const LABEL_SIZE: f64 = 13.0;

/// Longest product name drawn under a bar before it is shortened.
const MAX_LABEL_CHARS: usize = 14;
/// Month labels beyond this count are thinned out.
const MAX_MONTH_LABELS: usize = 12;

pub const TOP_PRODUCTS_FILE: &str = "top_products.png";
pub const SALES_TRENDS_FILE: &str = "sales_trends.png";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to render {chart}: {message}")]
    Render { chart: &'static str, message: String },
}

/// Paths of the images produced by [`ChartRenderer::render_all`].
///
/// A chart with no data is skipped and left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedCharts {
    pub top_products: Option<PathBuf>,
    pub sales_trends: Option<PathBuf>,
}

impl RenderedCharts {
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.top_products.iter().chain(self.sales_trends.iter())
    }
}

/// Renders sales charts at a fixed pixel size.
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    width: u32,
    height: u32,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        // 10x6 inch figure at 100 DPI
        Self::new(1000, 600)
    }
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render both charts into `out_dir`, in parallel.
    pub fn render_all(
        &self,
        summary: &SalesSummary,
        out_dir: &Path,
    ) -> Result<RenderedCharts, ChartError> {
        std::fs::create_dir_all(out_dir).map_err(|source| ChartError::OutputDir {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let top_path = out_dir.join(TOP_PRODUCTS_FILE);
        let trend_path = out_dir.join(SALES_TRENDS_FILE);

        let (top, trend) = rayon::join(
            || -> Result<Option<PathBuf>, ChartError> {
                if summary.top_products.is_empty() {
                    tracing::warn!("no products to chart, skipping top products chart");
                    return Ok(None);
                }
                self.render_top_products(&summary.top_products, &top_path)?;
                Ok(Some(top_path.clone()))
            },
            || -> Result<Option<PathBuf>, ChartError> {
                if summary.monthly_sales.is_empty() {
                    tracing::warn!("no monthly totals to chart, skipping sales trends chart");
                    return Ok(None);
                }
                self.render_sales_trends(&summary.monthly_sales, &trend_path)?;
                Ok(Some(trend_path.clone()))
            },
        );

        Ok(RenderedCharts {
            top_products: top?,
            sales_trends: trend?,
        })
    }

    /// Bar chart of the best selling products.
    pub fn render_top_products(
        &self,
        products: &[ProductTotal],
        path: &Path,
    ) -> Result<(), ChartError> {
        self.draw_top_products(products, path)
            .map_err(|e| ChartError::Render {
                chart: "top products chart",
                message: e.to_string(),
            })?;
        tracing::info!(path = %path.display(), bars = products.len(), "rendered top products chart");
        Ok(())
    }

    /// Line chart of monthly sales totals.
    pub fn render_sales_trends(
        &self,
        months: &[MonthlyTotal],
        path: &Path,
    ) -> Result<(), ChartError> {
        self.draw_sales_trends(months, path)
            .map_err(|e| ChartError::Render {
                chart: "sales trends chart",
                message: e.to_string(),
            })?;
        tracing::info!(path = %path.display(), points = months.len(), "rendered sales trends chart");
        Ok(())
    }

    fn draw_top_products(
        &self,
        products: &[ProductTotal],
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        // Segmented ranges are inclusive: 0..=last gives one slot per bar
        let last_bar = (products.len() as u32).saturating_sub(1);
        let y_range = Self::value_range(products.iter().map(|p| p.total));
        let title = format!("Top {} Products by Sales", products.len());

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d((0u32..last_bar).into_segmented(), y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(GRID)
            .x_desc("Product Name")
            .y_desc("Total Sales ($)")
            .axis_desc_style((FONT, DESC_SIZE))
            .label_style((FONT, LABEL_SIZE))
            .x_labels(products.len())
            .x_label_formatter(&|value| match value {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => products
                    .get(*i as usize)
                    .map(|p| Self::shorten_label(&p.product, MAX_LABEL_CHARS))
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .y_label_formatter(&|v| Self::axis_amount(*v))
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(SKY_BLUE.filled())
                .margin(12)
                .data(products.iter().enumerate().map(|(i, p)| (i as u32, p.total))),
        )?;

        root.present()?;
        Ok(())
    }

    fn draw_sales_trends(
        &self,
        months: &[MonthlyTotal],
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let points = months.len();
        let x_range = -0.5f64..(points as f64 - 0.5);
        let y_range = Self::value_range(months.iter().map(|m| m.total));

        let mut chart = ChartBuilder::on(&root)
            .caption("Sales Trends Over Time", (FONT, CAPTION_SIZE))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(100)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .light_line_style(GRID)
            .x_desc("Month")
            .y_desc("Total Sales ($)")
            .axis_desc_style((FONT, DESC_SIZE))
            .label_style((FONT, LABEL_SIZE))
            .x_labels(points.min(MAX_MONTH_LABELS))
            .x_label_formatter(&|x| Self::month_label(months, *x))
            .y_label_formatter(&|v| Self::axis_amount(*v))
            .draw()?;

        let series = months
            .iter()
            .enumerate()
            .map(|(i, m)| (i as f64, m.total));

        chart.draw_series(LineSeries::new(series.clone(), TREND_GREEN.stroke_width(2)))?;
        chart.draw_series(series.map(|point| Circle::new(point, 4, TREND_GREEN.filled())))?;

        root.present()?;
        Ok(())
    }

    /// Y axis range covering every value and zero, with headroom on top.
    fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
        let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo == hi {
            return 0.0..1.0;
        }
        let pad = (hi - lo) * 0.1;
        let bottom = if lo < 0.0 { lo - pad } else { 0.0 };
        bottom..hi + pad
    }

    /// Month label for an x axis tick; ticks between points stay blank.
    fn month_label(months: &[MonthlyTotal], x: f64) -> String {
        let nearest = x.round();
        if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        months
            .get(nearest as usize)
            .map(|m| m.month.clone())
            .unwrap_or_default()
    }

    fn shorten_label(label: &str, max_chars: usize) -> String {
        if label.chars().count() <= max_chars {
            return label.to_string();
        }
        let kept: String = label.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }

    fn axis_amount(value: f64) -> String {
        let magnitude = value.abs();
        let sign = if value < 0.0 { "-" } else { "" };
        if magnitude >= 1_000_000.0 {
            format!("{sign}${:.1}M", magnitude / 1_000_000.0)
        } else if magnitude >= 1_000.0 {
            format!("{sign}${:.1}K", magnitude / 1_000.0)
        } else {
            format!("{sign}${magnitude:.0}")
        }
    }
}
