//! Core grading functionality: models, metrics, loading, reporting and delivery

pub mod loader;
pub mod mail;
pub mod metrics;
pub mod models;
pub mod report;

/// Returns the current version of the `grade-report` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
