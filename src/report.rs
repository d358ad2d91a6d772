//! JSON export of the structured case records
//!
//! Console rendering lives in the CLI; the core only emits the record
//! sequence.

use crate::error::Result;
use crate::models::RunSummary;
use std::path::Path;
use tracing::info;

/// Exports a run summary as a pretty-printed JSON file
pub fn export_json(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(output_path, json)?;
    info!("JSON results saved to {}", output_path.display());
    Ok(())
}
