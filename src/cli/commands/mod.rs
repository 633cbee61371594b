//! CLI command handlers for `grade-report`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod report;
pub mod send;
