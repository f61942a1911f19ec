//! Path command handler.

use std::path::Path;

use anyhow::Result;

use anchornav_cli::output::{print_json, OutputFormat};
use anchornav_lib::PathRenderMode;

use super::open_session;
use crate::PathArgs;

/// Resolve both endpoints and print the fewest-hop path between them.
///
/// An unreachable destination is reported on stdout and is not a failure.
pub fn handle_path(store: Option<&Path>, format: OutputFormat, args: &PathArgs) -> Result<()> {
    let session = open_session(store)?;
    let summary = session.find_path_by_name(&args.from, &args.to)?;

    if format.is_json() {
        return print_json(&summary);
    }
    let mode = if args.compact {
        PathRenderMode::Compact
    } else {
        PathRenderMode::PlainText
    };
    print!("{}", summary.render(mode));
    Ok(())
}
