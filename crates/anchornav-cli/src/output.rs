//! Output formatting for command results.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use anchornav_lib::NavigationGraph;

/// Output formats supported by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// One line per waypoint: name, coordinates, and neighbour ids.
pub fn format_waypoint_table(graph: &NavigationGraph) -> String {
    if graph.is_empty() {
        return "No waypoints placed.\n".to_string();
    }

    let mut buffer = String::new();
    for waypoint in graph.waypoints() {
        let neighbours = graph
            .neighbours(waypoint.id)
            .map(|ids| {
                ids.iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        let position = waypoint.position;
        buffer.push_str(&format!(
            "{:<24} ({:.6}, {:.6}, {:.6})  -> [{}]\n",
            waypoint.to_string(),
            position.x,
            position.y,
            position.z,
            neighbours
        ));
    }
    buffer.push_str(&format!(
        "{} waypoints, {} edges\n",
        graph.len(),
        graph.edge_count()
    ));
    buffer
}
