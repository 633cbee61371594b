//! Attendance log entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome recorded for a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    /// Student attended
    Present,
    /// Student missed the session
    Absent,
    /// Any other status string (kept as given)
    Other(String),
}

impl AttendanceStatus {
    /// Status as written in data files
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Other(status) => status,
        }
    }
}

impl From<&str> for AttendanceStatus {
    fn from(status: &str) -> Self {
        match status {
            "Present" => Self::Present,
            "Absent" => Self::Absent,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AttendanceStatus {
    fn from(status: String) -> Self {
        Self::from(status.as_str())
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One marked session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Free-form session date (e.g., "Sep 16")
    pub date: String,
    /// Recorded status
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Create a new attendance record
    #[must_use]
    pub fn new(date: impl Into<String>, status: impl Into<AttendanceStatus>) -> Self {
        Self {
            date: date.into(),
            status: status.into(),
        }
    }

    /// Whether this record counts towards attendance
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(AttendanceStatus::from("Present"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::from("Absent"), AttendanceStatus::Absent);
        assert_eq!(
            AttendanceStatus::from("Late"),
            AttendanceStatus::Other("Late".to_string())
        );
    }

    #[test]
    fn test_only_exact_present_counts() {
        assert!(AttendanceRecord::new("Sep 16", "Present").is_present());
        assert!(!AttendanceRecord::new("Sep 16", "present").is_present());
        assert!(!AttendanceRecord::new("Sep 17", "Absent").is_present());
    }
}
