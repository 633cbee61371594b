//! Plaintext report generator
//!
//! Produces the document that is printed to the terminal and emailed to
//! parents: one block per course with a grid transcript table, then the
//! overall figures and a flat per-assignment grid table.

use crate::core::metrics::{CourseProgress, TranscriptEntry};
use crate::core::models::Course;
use crate::core::report::{fill_template, ReportContext, ReportGenerator};
use std::fmt::Write;
use tabled::settings::style::{HorizontalLine, Style};
use tabled::Table;

/// Embedded plaintext report template
const TEXT_TEMPLATE: &str = include_str!("../templates/report.txt");

/// Width of the rule closing each course block
const COURSE_RULE_WIDTH: usize = 60;

/// Plaintext report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new plaintext reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the full document
    ///
    /// The document ends at the last row of the detail table.
    #[must_use]
    pub fn render_document(&self, ctx: &ReportContext) -> String {
        let courses: String = ctx
            .courses()
            .map(|(course, progress)| Self::course_block(ctx, course, progress))
            .collect();
        let gpa = format!("{:.2}", ctx.summary.gpa);
        let overall_average = format!("{:.2}", ctx.summary.overall_average);
        let detail_table = grid(&ctx.summary.detail);

        let template = TEXT_TEMPLATE.trim_end_matches('\n');
        fill_template(
            template,
            &[
                ("student_name", ctx.student.name.as_str()),
                ("student_email", ctx.student.email.as_str()),
                ("courses", courses.as_str()),
                ("gpa", gpa.as_str()),
                ("overall_average", overall_average.as_str()),
                ("detail_table", detail_table.as_str()),
            ],
        )
    }

    /// Render one course block, starting with a blank line
    fn course_block(ctx: &ReportContext, course: &Course, progress: &CourseProgress) -> String {
        let mut block = String::new();
        let progression = &progress.progression;

        let _ = writeln!(block, "\nCourse: {}", course.name);
        let _ = writeln!(
            block,
            "Formative Group Total: {:.2}%",
            progression.formative_total
        );
        let _ = writeln!(
            block,
            "Summative Group Total: {:.2}%",
            progression.summative_total
        );
        let _ = writeln!(
            block,
            "Passed: {}",
            if progression.passed { "Yes" } else { "No" }
        );

        if progress.resubmissions.is_empty() {
            block.push_str("No Resubmissions Needed.\n");
        } else {
            let _ = writeln!(
                block,
                "Eligible for Resubmission: {}",
                progress.resubmissions.join(", ")
            );
        }

        let _ = writeln!(block, "Attendance: {:.2}%", progress.attendance);
        if progress.attendance_in_good_standing() {
            block.push_str("Attendance is in good standing (100%).\n");
        } else {
            block.push_str(
                "Warning: Attendance is below 100%. The student should attend more classes.\n",
            );
        }

        block.push_str("\nTranscript Breakdown:\n");
        let rows: Vec<TranscriptEntry> = course
            .transcript(ctx.order)
            .into_iter()
            .map(TranscriptEntry::from)
            .collect();
        block.push_str(&grid(&rows));
        block.push('\n');
        block.push_str(&"-".repeat(COURSE_RULE_WIDTH));
        block.push('\n');

        block
    }
}

/// Render rows as an ASCII grid table with a `=` rule under the header
fn grid<T: tabled::Tabled>(rows: &[T]) -> String {
    let style = Style::ascii().horizontals([(1, HorizontalLine::full('=', '+', '+', '+'))]);
    Table::new(rows).with(style).to_string()
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> String {
        self.render_document(ctx)
    }
}
