//! Handlers for placing, connecting, listing, and clearing waypoints.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use anchornav_cli::output::{format_waypoint_table, print_json, OutputFormat};
use anchornav_lib::Position;

use super::open_session;
use crate::{DestinationArgs, PositionArgs};

fn position(args: &PositionArgs) -> Position {
    Position::new(args.x, args.y, args.z)
}

pub fn handle_destination(
    store: Option<&Path>,
    format: OutputFormat,
    args: &DestinationArgs,
) -> Result<()> {
    let mut session = open_session(store)?;
    let id = session.place_destination(position(&args.position), &args.label)?;
    let waypoint = session.graph().waypoint(id)?;

    if format.is_json() {
        return print_json(waypoint);
    }
    println!("Placed destination {waypoint}");
    Ok(())
}

pub fn handle_walkable(store: Option<&Path>, format: OutputFormat, args: &PositionArgs) -> Result<()> {
    let mut session = open_session(store)?;
    let id = session.place_walkable(position(args))?;
    let waypoint = session.graph().waypoint(id)?;

    if format.is_json() {
        return print_json(waypoint);
    }
    println!("Placed {waypoint}");
    Ok(())
}

pub fn handle_connect(store: Option<&Path>, format: OutputFormat, a: &str, b: &str) -> Result<()> {
    let mut session = open_session(store)?;
    let a = session.graph().resolve(a)?;
    let b = session.graph().resolve(b)?;
    let inserted = session.connect(a, b)?;

    if format.is_json() {
        return print_json(&json!({ "a": a, "b": b, "inserted": inserted }));
    }
    if inserted {
        println!("Connected {a} and {b}");
    } else {
        println!("Waypoints {a} and {b} are already connected");
    }
    Ok(())
}

pub fn handle_list(store: Option<&Path>, format: OutputFormat) -> Result<()> {
    let session = open_session(store)?;
    if format.is_json() {
        return print_json(&session.export());
    }
    print!("{}", format_waypoint_table(session.graph()));
    Ok(())
}

pub fn handle_clear(store: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut session = open_session(store)?;
    let removed = session.clear()?;

    if format.is_json() {
        return print_json(&json!({ "removed": removed }));
    }
    println!("Removed {removed} waypoints");
    Ok(())
}
