//! Progression policy and report metrics

use crate::core::models::{Assignment, Course, Progression, Student};
use tabled::Tabled;

/// Minimum formative group percentage needed to pass a course
pub const FORMATIVE_PASS_THRESHOLD: f64 = 30.0;

/// Minimum summative group percentage needed to pass a course
pub const SUMMATIVE_PASS_THRESHOLD: f64 = 20.0;

/// Formative assignments scoring below this may be resubmitted
pub const RESUBMISSION_THRESHOLD: f64 = 50.0;

/// Attendance percentage required for good standing
pub const FULL_ATTENDANCE: f64 = 100.0;

/// Per-course results shown in a report block
#[derive(Debug, Clone, PartialEq)]
pub struct CourseProgress {
    /// Course name
    pub course_name: String,
    /// Group totals and pass/fail
    pub progression: Progression,
    /// Formative assignments eligible for resubmission
    pub resubmissions: Vec<String>,
    /// Attendance percentage against configured sessions
    pub attendance: f64,
}

impl CourseProgress {
    /// Compute all per-course results
    #[must_use]
    pub fn from_course(course: &Course) -> Self {
        Self {
            course_name: course.name.clone(),
            progression: course.progression(),
            resubmissions: course
                .resubmission_candidates()
                .into_iter()
                .map(str::to_string)
                .collect(),
            attendance: course.attendance_percentage(),
        }
    }

    /// Good standing only at exactly full attendance; above or below is flagged
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn attendance_in_good_standing(&self) -> bool {
        self.attendance == FULL_ATTENDANCE
    }
}

/// Overall figures for the report footer and detail table
#[derive(Debug, Clone, PartialEq)]
pub struct OverallSummary {
    /// Weighted-score percentage from [`Student::gpa`]
    pub gpa: f64,
    /// Same quantity, accumulated while building the detail table
    pub overall_average: f64,
    /// One row per assignment across every course
    pub detail: Vec<DetailEntry>,
}

impl OverallSummary {
    /// Compute overall figures for a student
    ///
    /// `gpa` and `overall_average` are identical by construction. Both are
    /// kept because the report shows both lines.
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        let mut detail = Vec::new();
        let mut total_weighted_score = 0.0;
        let mut total_weight = 0.0;

        for course in student.courses() {
            for assignment in course.assignments() {
                detail.push(DetailEntry::new(&course.name, assignment));
                total_weighted_score += assignment.weighted_score();
                total_weight += assignment.weight();
            }
        }

        let overall_average = if total_weight == 0.0 {
            0.0
        } else {
            total_weighted_score / total_weight * 100.0
        };

        Self {
            gpa: student.gpa(),
            overall_average,
            detail,
        }
    }
}

/// Format a percentage-valued cell using the shortest float representation
fn percent_cell(value: f64) -> String {
    format!("{value}%")
}

/// Row of a course transcript table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct TranscriptEntry {
    #[tabled(rename = "Assignment")]
    /// Assignment title
    pub assignment: String,
    #[tabled(rename = "Type")]
    /// Assignment type label
    pub kind: String,
    #[tabled(rename = "Score (%)")]
    /// Score cell (e.g., `40.59%`)
    pub score: String,
    #[tabled(rename = "Weight (%)")]
    /// Weight cell (e.g., `20%`)
    pub weight: String,
}

impl From<&Assignment> for TranscriptEntry {
    fn from(assignment: &Assignment) -> Self {
        Self {
            assignment: assignment.name().to_string(),
            kind: assignment.assignment_type().to_string(),
            score: percent_cell(assignment.score()),
            weight: percent_cell(assignment.weight()),
        }
    }
}

/// Row of the flat per-assignment detail table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct DetailEntry {
    #[tabled(rename = "Course")]
    /// Course name
    pub course: String,
    #[tabled(rename = "Assignment")]
    /// Assignment title
    pub assignment: String,
    #[tabled(rename = "Score")]
    /// Score cell
    pub score: String,
    #[tabled(rename = "Weight")]
    /// Weight cell
    pub weight: String,
    #[tabled(rename = "Weighted Score")]
    /// Weighted score cell, two decimals
    pub weighted_score: String,
}

impl DetailEntry {
    /// Build a detail row for one assignment of a course
    #[must_use]
    pub fn new(course_name: &str, assignment: &Assignment) -> Self {
        Self {
            course: course_name.to_string(),
            assignment: assignment.name().to_string(),
            score: percent_cell(assignment.score()),
            weight: percent_cell(assignment.weight()),
            weighted_score: format!("{:.2}%", assignment.weighted_score()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        let mut course = Course::new("Introduction to Programming and Databases", 7);
        course.add_assignment(Assignment::new("Python - Hello, World", 100.0, 10.0, "Formative"));
        course.add_assignment(Assignment::new("Python - Inheritance", 40.59, 20.0, "Formative"));
        course.add_assignment(Assignment::new("Python - Data Structures", 100.0, 30.0, "Summative"));
        for day in 16..23 {
            course.mark_attendance(format!("Sep {day}"), "Present");
        }

        let mut other = Course::new("Self-Leadership and Team Dynamics", 7);
        other.add_assignment(Assignment::new("Enneagram Test", 80.0, 10.0, "Formative"));

        let mut student = Student::new("Sample Student", "sample@example.com");
        student.add_course(course);
        student.add_course(other);
        student
    }

    #[test]
    fn test_course_progress() {
        let student = sample_student();
        let progress = CourseProgress::from_course(&student.courses()[0]);

        assert_eq!(progress.course_name, "Introduction to Programming and Databases");
        assert!(progress.progression.passed);
        assert_eq!(progress.resubmissions, vec!["Python - Inheritance".to_string()]);
        assert!(progress.attendance_in_good_standing());
    }

    #[test]
    fn test_attendance_standing_requires_exact_hundred() {
        let student = sample_student();
        let progress = CourseProgress::from_course(&student.courses()[1]);
        assert!(!progress.attendance_in_good_standing());

        let over = CourseProgress {
            attendance: 150.0,
            ..progress
        };
        assert!(!over.attendance_in_good_standing());
    }

    #[test]
    fn test_overall_average_matches_gpa() {
        let summary = OverallSummary::from_student(&sample_student());

        assert!((summary.gpa - summary.overall_average).abs() < 1e-12);
        // (10 + 8.118 + 30 + 8) / 70 * 100
        assert!((summary.gpa - 80.168_571).abs() < 1e-4);
        assert_eq!(summary.detail.len(), 4);
    }

    #[test]
    fn test_overall_summary_empty() {
        let summary = OverallSummary::from_student(&Student::new("Nobody", "n@example.com"));
        assert!(summary.gpa.abs() < f64::EPSILON);
        assert!(summary.overall_average.abs() < f64::EPSILON);
        assert!(summary.detail.is_empty());
    }

    #[test]
    fn test_cells_use_shortest_float_form() {
        let assignment = Assignment::new("Python - Inheritance", 40.59, 20.0, "Formative");

        let row = TranscriptEntry::from(&assignment);
        assert_eq!(row.score, "40.59%");
        assert_eq!(row.weight, "20%");
        assert_eq!(row.kind, "Formative");

        let detail = DetailEntry::new("Programming", &assignment);
        assert_eq!(detail.weighted_score, "8.12%");
    }
}
