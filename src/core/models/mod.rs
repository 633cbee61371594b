//! Data models for `grade-report`

pub mod assignment;
pub mod attendance;
pub mod course;
pub mod student;

pub use assignment::{Assignment, AssignmentType};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use course::{Course, GroupTotals, Progression, SortOrder};
pub use student::Student;
