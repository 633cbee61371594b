//! TOML loader for student records

use crate::core::models::{Assignment, AttendanceRecord, Course, Student};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Errors raised while loading a student record
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The file could not be read
    #[error("Could not read {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The contents are not a valid student record
    #[error("Invalid student record: {0}")]
    Parse(#[from] toml::de::Error),
}

/// `[student]` table
#[derive(Debug, Deserialize)]
struct StudentHeader {
    name: String,
    email: String,
}

/// One `[[courses]]` entry
#[derive(Debug, Deserialize)]
struct CourseEntry {
    name: String,
    total_sessions: u32,
    #[serde(default)]
    assignments: Vec<Assignment>,
    #[serde(default)]
    attendance: Vec<AttendanceRecord>,
}

/// Whole-file layout
#[derive(Debug, Deserialize)]
struct StudentFile {
    student: StudentHeader,
    #[serde(default)]
    courses: Vec<CourseEntry>,
}

/// Parse a student record from a TOML string
///
/// Courses, assignments and attendance are added in file order. Scores,
/// weights, types and statuses are taken as written.
///
/// # Errors
/// Returns an error if the TOML is malformed or missing required fields
pub fn parse_student_toml(content: &str) -> Result<Student, LoadError> {
    let file: StudentFile = toml::from_str(content)?;

    let mut student = Student::new(file.student.name, file.student.email);
    for entry in file.courses {
        let mut course = Course::new(entry.name, entry.total_sessions);
        for assignment in entry.assignments {
            course.add_assignment(assignment);
        }
        for record in entry.attendance {
            course.mark_attendance(record.date, record.status);
        }
        student.add_course(course);
    }

    Ok(student)
}

/// Parse a student record file
///
/// # Arguments
/// * `path` - Path to the TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn parse_student_file<P: AsRef<Path>>(path: P) -> Result<Student, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_student_toml(&content)
}
