//! Shared library for `grade-report`
//! Contains the grading model, report renderers and mail delivery used by the CLI

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
