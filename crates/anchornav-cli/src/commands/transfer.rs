//! Export and import handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use anchornav_cli::output::{print_json, OutputFormat};
use anchornav_lib::WaypointRecord;

use super::open_session;

pub fn handle_export(store: Option<&Path>) -> Result<()> {
    let session = open_session(store)?;
    print_json(&session.export())
}

pub fn handle_import(store: Option<&Path>, format: OutputFormat, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read records from {}", file.display()))?;
    let records: Vec<WaypointRecord> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse records in {}", file.display()))?;

    let mut session = open_session(store)?;
    session.replace_all(&records)?;

    if format.is_json() {
        return print_json(&json!({ "imported": records.len() }));
    }
    println!("Imported {} waypoints", records.len());
    Ok(())
}

pub fn handle_import_anchors(store: Option<&Path>, format: OutputFormat, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read anchor parameters from {}", file.display()))?;

    let mut session = open_session(store)?;
    let outcome = session.import_legacy(text.lines())?;

    if format.is_json() {
        return print_json(&json!({
            "imported": outcome.imported,
            "skipped": outcome.skipped,
        }));
    }
    println!(
        "Imported {} anchors ({} skipped)",
        outcome.imported.len(),
        outcome.skipped
    );
    Ok(())
}
