//! Timestamps command handler

use anyhow::Result;
use serde::Serialize;

use ctxsmith::chunking::timestamp::{
    calculate_timestamp_metrics, extract_timestamps_from_content, TimestampExtraction,
    TimestampMetrics,
};

use super::read_input;

#[derive(Serialize)]
struct TimestampReport {
    #[serde(flatten)]
    extraction: TimestampExtraction,
    metrics: TimestampMetrics,
}

/// Print extracted segments and their metrics as JSON.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &str) -> Result<()> {
    let text = read_input(file)?;
    let extraction = extract_timestamps_from_content(&text);
    let metrics = calculate_timestamp_metrics(&extraction.segments);
    let report = TimestampReport {
        extraction,
        metrics,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
