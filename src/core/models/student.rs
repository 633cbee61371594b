//! Student model

use super::{Course, SortOrder};
use crate::core::mail::{DeliveryStatus, EmailSender, OutgoingEmail};
use crate::core::report::{ReportContext, TextReporter};
use crate::{debug, info};

/// A student and the courses they are enrolled in
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Full name
    pub name: String,

    /// Student email address (shown in the report header)
    pub email: String,

    /// Enrolled courses, in insertion order
    courses: Vec<Course>,
}

impl Student {
    /// Create a new student with no courses
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            courses: Vec::new(),
        }
    }

    /// Enrolled courses in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Enroll the student in a course
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    /// Overall weighted-score percentage across every course and assignment
    ///
    /// Returns 0 when the total weight is 0.
    #[must_use]
    pub fn gpa(&self) -> f64 {
        let (weighted, weight) = self
            .courses
            .iter()
            .flat_map(Course::assignments)
            .fold((0.0, 0.0), |(weighted, weight), a| {
                (weighted + a.weighted_score(), weight + a.weight())
            });

        if weight == 0.0 {
            0.0
        } else {
            weighted / weight * 100.0
        }
    }

    /// Render the plaintext progress report
    #[must_use]
    pub fn report(&self, order: SortOrder) -> String {
        let ctx = ReportContext::new(self, order);
        TextReporter::new().render_document(&ctx)
    }

    /// Render the report and hand it to an email sender
    ///
    /// Transport failures are logged and returned as
    /// [`DeliveryStatus::Failed`]; they are never retried.
    pub fn send_report<S: EmailSender + ?Sized>(
        &self,
        sender: &S,
        parent_email: &str,
        sender_email: &str,
        order: SortOrder,
    ) -> DeliveryStatus {
        let email = OutgoingEmail {
            from: sender_email.to_string(),
            to: parent_email.to_string(),
            subject: format!("Student Report for {}", self.name),
            body: self.report(order),
        };

        debug!(
            "Sending report for {} from {sender_email} to {parent_email}",
            self.name
        );

        match sender.send(&email) {
            Ok(()) => {
                info!("Report sent to {parent_email}");
                DeliveryStatus::Sent
            }
            Err(e) => {
                debug!("Delivery to {parent_email} failed: {e}");
                DeliveryStatus::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Assignment;

    #[test]
    fn test_student_creation() {
        let student = Student::new("Test Student", "test@example.com");
        assert_eq!(student.name, "Test Student");
        assert_eq!(student.email, "test@example.com");
        assert!(student.courses().is_empty());
    }

    #[test]
    fn test_gpa_without_assignments() {
        let mut student = Student::new("Empty", "empty@example.com");
        student.add_course(Course::new("Nothing Graded", 3));
        assert!(student.gpa().abs() < f64::EPSILON);
    }

    #[test]
    fn test_gpa_spans_courses() {
        let mut first = Course::new("First", 1);
        first.add_assignment(Assignment::new("A", 100.0, 10.0, "Formative"));
        let mut second = Course::new("Second", 1);
        second.add_assignment(Assignment::new("B", 50.0, 30.0, "Summative"));

        let mut student = Student::new("Two Courses", "two@example.com");
        student.add_course(first);
        student.add_course(second);

        // (10 + 15) / 40 * 100
        assert!((student.gpa() - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_includes_unrecognised_types() {
        let mut course = Course::new("Projects", 1);
        course.add_assignment(Assignment::new("Capstone", 80.0, 50.0, "Project"));

        let mut student = Student::new("Builder", "builder@example.com");
        student.add_course(course);

        assert!((student.gpa() - 80.0).abs() < 1e-9);
    }
}
