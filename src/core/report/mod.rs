//! Report generation module for student progress
//!
//! This module renders a student's per-course progression, attendance and
//! transcripts, followed by the overall GPA and a flat per-assignment table,
//! in plaintext or Markdown.

pub mod formats;

use crate::core::metrics::{CourseProgress, OverallSummary};
use crate::core::models::{Course, SortOrder, Student};
use std::path::Path;

pub use formats::{MarkdownReporter, ReportFormat, TextReporter};

/// Errors raised while writing a report
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// The report could not be written to disk
    #[error("Failed to write report to {path}: {source}")]
    Write {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Data context for report generation
///
/// Borrows the student and holds everything derived from it, so every
/// renderer reads the same numbers.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Student being reported on
    pub student: &'a Student,
    /// Transcript ordering
    pub order: SortOrder,
    /// Per-course results, parallel to `student.courses()`
    pub progress: Vec<CourseProgress>,
    /// Overall GPA and detail rows
    pub summary: OverallSummary,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context, computing all metrics for the student
    #[must_use]
    pub fn new(student: &'a Student, order: SortOrder) -> Self {
        let progress = student
            .courses()
            .iter()
            .map(CourseProgress::from_course)
            .collect();

        Self {
            student,
            order,
            progress,
            summary: OverallSummary::from_student(student),
        }
    }

    /// Courses paired with their computed results, in insertion order
    pub fn courses(&self) -> impl Iterator<Item = (&'a Course, &CourseProgress)> + '_ {
        self.student.courses().iter().zip(self.progress.iter())
    }

    /// Number of courses in the report
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.progress.len()
    }
}

/// Substitute `{{key}}` placeholders in one pass over the template
///
/// Values are inserted verbatim and never scanned again, so names that
/// contain placeholder syntax come through unchanged. Unknown placeholders
/// are left as written.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let filled = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });

        match filled {
            Some((end, value)) => {
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError> {
        let content = self.render(ctx);
        std::fs::write(output_path, content).map_err(|source| ReportError::Write {
            path: output_path.display().to_string(),
            source,
        })
    }

    /// Generate report content as a string
    fn render(&self, ctx: &ReportContext) -> String;
}
