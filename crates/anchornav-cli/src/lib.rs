//! anchornav CLI library.
//!
//! This crate provides the output helpers shared by the `anchornav`
//! subcommands.

pub mod output;
