//! Markdown report generator
//!
//! Generates the student report in Markdown with pipe tables. These reports
//! render well in GitHub, GitLab, and VS Code.

use crate::core::metrics::{CourseProgress, TranscriptEntry};
use crate::core::models::Course;
use crate::core::report::{fill_template, ReportContext, ReportGenerator};
use std::fmt::Write;
use tabled::{settings::Style, Table};

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let courses: String = ctx
            .courses()
            .map(|(course, progress)| Self::generate_course_section(ctx, course, progress))
            .collect();
        let sort_order = ctx.order.to_string();
        let gpa = format!("{:.2}", ctx.summary.gpa);
        let overall_average = format!("{:.2}", ctx.summary.overall_average);

        let detail_table = if ctx.summary.detail.is_empty() {
            "_No graded assignments._".to_string()
        } else {
            Table::new(&ctx.summary.detail)
                .with(Style::markdown())
                .to_string()
        };

        fill_template(
            MARKDOWN_TEMPLATE,
            &[
                ("student_name", ctx.student.name.as_str()),
                ("student_email", ctx.student.email.as_str()),
                ("sort_order", sort_order.as_str()),
                ("courses", courses.as_str()),
                ("gpa", gpa.as_str()),
                ("overall_average", overall_average.as_str()),
                ("detail_table", detail_table.as_str()),
            ],
        )
    }

    /// Generate the section for a single course
    fn generate_course_section(
        ctx: &ReportContext,
        course: &Course,
        progress: &CourseProgress,
    ) -> String {
        let mut section = String::new();
        let progression = &progress.progression;

        let _ = writeln!(section, "## {}\n", course.name);
        let _ = writeln!(
            section,
            "- **Formative Group Total:** {:.2}%",
            progression.formative_total
        );
        let _ = writeln!(
            section,
            "- **Summative Group Total:** {:.2}%",
            progression.summative_total
        );
        let _ = writeln!(
            section,
            "- **Passed:** {}",
            if progression.passed { "Yes" } else { "No" }
        );

        let resubmissions = if progress.resubmissions.is_empty() {
            "none".to_string()
        } else {
            progress.resubmissions.join(", ")
        };
        let _ = writeln!(section, "- **Eligible for Resubmission:** {resubmissions}");

        let standing = if progress.attendance_in_good_standing() {
            "good standing"
        } else {
            "⚠️ below 100%"
        };
        let _ = writeln!(
            section,
            "- **Attendance:** {:.2}% ({standing})\n",
            progress.attendance
        );

        section.push_str("### Transcript Breakdown\n\n");
        let rows: Vec<TranscriptEntry> = course
            .transcript(ctx.order)
            .into_iter()
            .map(TranscriptEntry::from)
            .collect();
        if rows.is_empty() {
            section.push_str("_No assignments recorded._\n\n");
        } else {
            let _ = writeln!(section, "{}\n", Table::new(&rows).with(Style::markdown()));
        }

        section
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> String {
        self.render_template(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Assignment, SortOrder, Student};

    #[test]
    fn test_markdown_sections() {
        let mut course = Course::new("Introduction to IT Tools and Linux", 10);
        course.add_assignment(Assignment::new("Discussion Board", 100.0, 20.0, "Formative"));
        course.add_assignment(Assignment::new("Shell, processes and signals", 100.0, 25.0, "Summative"));

        let mut student = Student::new("Sample Student", "sample@example.com");
        student.add_course(course);

        let ctx = ReportContext::new(&student, SortOrder::Descending);
        let report = MarkdownReporter::new().render(&ctx);

        assert!(report.starts_with("# Report for Sample Student\n"));
        assert!(report.contains("## Introduction to IT Tools and Linux\n"));
        assert!(report.contains("- **Eligible for Resubmission:** none\n"));
        assert!(report.contains("- **Attendance:** 0.00% (⚠️ below 100%)"));
        assert!(report.contains("| Assignment"));
        assert!(report.contains("- **Overall GPA:** 100.00%"));
        assert!(report.contains("- **Transcript order:** descending"));
    }

    #[test]
    fn test_markdown_empty_student() {
        let student = Student::new("Nobody", "nobody@example.com");
        let ctx = ReportContext::new(&student, SortOrder::Ascending);
        let report = MarkdownReporter::new().render(&ctx);

        assert!(report.contains("_No graded assignments._"));
    }

    #[test]
    fn test_markdown_keeps_placeholder_text_in_names() {
        let mut course = Course::new("Intro {{gpa}}", 2);
        course.add_assignment(Assignment::new("Essay {{student_email}}", 40.0, 10.0, "Formative"));

        let mut student = Student::new("Kid {{courses}}", "kid@example.com");
        student.add_course(course);

        let ctx = ReportContext::new(&student, SortOrder::Ascending);
        let report = MarkdownReporter::new().render(&ctx);

        assert!(report.starts_with("# Report for Kid {{courses}}\n"));
        assert!(report.contains("## Intro {{gpa}}\n"));
        assert!(report.contains("- **Eligible for Resubmission:** Essay {{student_email}}\n"));
        assert!(report.contains("- **Overall GPA:** 40.00%"));
    }
}
