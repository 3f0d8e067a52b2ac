pub mod report;

use anyhow::{Context, Result};
use sr_core::config::{Config, ReportFormat};
use sr_core::reader::read_series;
use sr_core::SrDetector;
use std::path::Path;
use tracing::info;

/// Read the series at `input`, detect its levels and render the report
/// described by `config.report`.
pub fn run_detection<P: AsRef<Path>>(config: &Config, input: P) -> Result<String> {
    let input = input.as_ref();
    let detector = SrDetector::new(config.detector.clone()).context("invalid detector settings")?;

    info!("Reading price series from {}", input.display());
    let series = read_series(input, &config.input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let trace = detector.trace(&series);
    let date_format = &config.report.date_format;

    let mut output = String::new();
    if config.report.show_stages && config.report.format == ReportFormat::Text {
        output.push_str(&report::render_stages(&trace, date_format));
    }

    let detection = trace.into_detection();
    match config.report.format {
        ReportFormat::Text => output.push_str(&report::render_levels(&detection, date_format)),
        ReportFormat::Json => {
            output.push_str(&detection.to_json_pretty()?);
            output.push('\n');
        }
    }

    Ok(output)
}
