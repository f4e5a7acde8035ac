//! Report rendering.
//!
//! # Module Structure
//!
//! - `console` - titled sections with percentages, for terminals
//! - `json` - pretty-printed JSON, for tooling

mod console;
mod json;

pub use console::ConsoleReport;
pub use json::JsonReport;

use std::io::{self, Write};

use archmetrics_core::{Analysis, MetricRegistry, ReportFormat};

/// Write `analysis` to `out` in the requested format.
pub fn render(
    format: ReportFormat,
    analysis: &Analysis,
    registry: &MetricRegistry,
    precision: usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    match format {
        ReportFormat::Console => ConsoleReport::new(analysis, registry, precision).write_to(out),
        ReportFormat::Json => JsonReport::new(analysis).write_to(out),
    }
}
