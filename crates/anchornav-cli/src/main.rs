use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use anchornav_cli::output::OutputFormat;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Place AR waypoints and find paths between them")]
struct Cli {
    /// Override the waypoint store file or directory.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place a named destination.
    Destination(DestinationArgs),
    /// Place an unnamed walkable point.
    Walkable(PositionArgs),
    /// Connect two waypoints (ids or destination labels).
    Connect {
        a: String,
        b: String,
    },
    /// List every waypoint with its neighbours.
    List,
    /// Find the path with the fewest hops between two waypoints.
    Path(PathArgs),
    /// Remove every waypoint.
    Clear,
    /// Print all waypoint records as JSON.
    Export,
    /// Replace the store contents with JSON records read from a file.
    Import {
        file: PathBuf,
    },
    /// Place walkable waypoints from legacy anchor parameter lines.
    ImportAnchors {
        file: PathBuf,
    },
}

/// Coordinates of a new waypoint.
#[derive(Args, Debug, Clone, Copy)]
pub struct PositionArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub x: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub y: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub z: f64,
}

#[derive(Args, Debug, Clone)]
pub struct DestinationArgs {
    /// Name shown for the destination.
    #[arg(long)]
    pub label: String,
    #[command(flatten)]
    pub position: PositionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Starting waypoint id or label.
    #[arg(long = "from")]
    pub from: String,
    /// Destination waypoint id or label.
    #[arg(long = "to")]
    pub to: String,
    /// Print the path on a single line.
    #[arg(long)]
    pub compact: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let store = cli.store.as_deref();
    let format = cli.format;

    match cli.command {
        Command::Destination(args) => commands::waypoints::handle_destination(store, format, &args),
        Command::Walkable(args) => commands::waypoints::handle_walkable(store, format, &args),
        Command::Connect { a, b } => commands::waypoints::handle_connect(store, format, &a, &b),
        Command::List => commands::waypoints::handle_list(store, format),
        Command::Path(args) => commands::path::handle_path(store, format, &args),
        Command::Clear => commands::waypoints::handle_clear(store, format),
        Command::Export => commands::transfer::handle_export(store),
        Command::Import { file } => commands::transfer::handle_import(store, format, &file),
        Command::ImportAnchors { file } => {
            commands::transfer::handle_import_anchors(store, format, &file)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
