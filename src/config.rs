//! Command line configuration.

use crate::stats::DEFAULT_TOP_N;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

const MIN_CHART_SIDE: u32 = 200;
const MAX_CHART_SIDE: u32 = 8000;

pub const PATH_PROMPT: &str = "Enter the path to the sales data CSV file: ";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("--top must be at least 1")]
    InvalidTop,
    #[error("Chart size {width}x{height} must be between 200 and 8000 pixels per side")]
    InvalidChartSize { width: u32, height: u32 },
    #[error("No input file given")]
    EmptyPath,
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-insight",
    version,
    about = "Clean a sales CSV, print summary statistics and render sales charts"
)]
pub struct CliConfig {
    /// Sales CSV file; prompted for when omitted
    pub file: Option<PathBuf>,

    /// Number of products in the ranking
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Directory the chart images are written to
    #[arg(long, env = "SALES_INSIGHT_OUTPUT_DIR", default_value = "charts")]
    pub output_dir: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Keep rendered charts closed instead of opening them in the image viewer
    #[arg(long)]
    pub no_open: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top == 0 {
            return Err(ConfigError::InvalidTop);
        }
        let side_ok = |side: u32| (MIN_CHART_SIDE..=MAX_CHART_SIDE).contains(&side);
        if !side_ok(self.width) || !side_ok(self.height) {
            return Err(ConfigError::InvalidChartSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// The input file from the command line, or asked for on stdin.
    pub fn resolve_input(&self) -> Result<PathBuf, ConfigError> {
        match &self.file {
            Some(path) => Ok(path.clone()),
            None => prompt_for_path(&mut io::stdin().lock(), &mut io::stdout()),
        }
    }
}

/// Ask for the input path. Surrounding whitespace and quotes are stripped.
pub fn prompt_for_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, ConfigError> {
    write!(output, "{PATH_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let path = line.trim().trim_matches(|c: char| c == '"' || c == '\'');
    if path.is_empty() {
        return Err(ConfigError::EmptyPath);
    }
    Ok(PathBuf::from(path))
}
