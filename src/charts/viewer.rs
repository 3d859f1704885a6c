//! Opens rendered charts with the platform's default image viewer.

use super::RenderedCharts;

/// Open every rendered chart. Returns how many viewers were launched.
///
/// A chart that cannot be opened is only logged; the images stay on disk.
pub fn open_charts(charts: &RenderedCharts) -> usize {
    let mut opened = 0;
    for path in charts.paths() {
        match open::that(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "opened chart");
                opened += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not open chart");
            }
        }
    }
    opened
}
