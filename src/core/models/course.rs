//! Course model

use super::{Assignment, AssignmentType, AttendanceRecord, AttendanceStatus};
use crate::core::metrics::{
    FORMATIVE_PASS_THRESHOLD, RESUBMISSION_THRESHOLD, SUMMATIVE_PASS_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to a transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Lowest score first
    #[default]
    Ascending,
    /// Highest score first
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("Unknown sort order: {s}")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// Summed weight and weighted score for one assignment type
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupTotals {
    /// Sum of weights (percentage points)
    pub weight: f64,
    /// Sum of weighted scores
    pub weighted_score: f64,
}

impl GroupTotals {
    /// Weighted score as a percentage of the group weight, or 0 for an empty group
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.weight == 0.0 {
            0.0
        } else {
            self.weighted_score / self.weight * 100.0
        }
    }
}

/// Pass/fail outcome for a course
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    /// Formative group percentage
    pub formative_total: f64,
    /// Summative group percentage
    pub summative_total: f64,
    /// Both groups met their threshold
    pub passed: bool,
}

/// A course taken by a student
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Course name (e.g., "Introduction to Programming and Databases")
    pub name: String,

    /// Number of mandatory sessions, used as the attendance divisor
    pub total_sessions: u32,

    /// Graded work, in insertion order
    assignments: Vec<Assignment>,

    /// Append-only attendance log
    attendance: Vec<AttendanceRecord>,
}

impl Course {
    /// Create a new course with no assignments or attendance
    ///
    /// # Arguments
    /// * `name` - Course name
    /// * `total_sessions` - Number of mandatory sessions
    #[must_use]
    pub fn new(name: impl Into<String>, total_sessions: u32) -> Self {
        Self {
            name: name.into(),
            total_sessions,
            assignments: Vec::new(),
            attendance: Vec::new(),
        }
    }

    /// Assignments in insertion order
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Attendance records in the order they were marked
    #[must_use]
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// Append an assignment (duplicate names are allowed)
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Append an attendance record
    ///
    /// Dates are not deduplicated and statuses are not validated.
    pub fn mark_attendance(&mut self, date: impl Into<String>, status: impl Into<AttendanceStatus>) {
        self.attendance.push(AttendanceRecord::new(date, status));
    }

    /// Percentage of configured sessions marked `Present`
    ///
    /// The divisor is `total_sessions`, not the number of recorded entries, so
    /// the result exceeds 100 when more sessions are marked present than
    /// configured. Returns 0 when `total_sessions` is 0.
    #[must_use]
    pub fn attendance_percentage(&self) -> f64 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        let present = self.attendance.iter().filter(|r| r.is_present()).count();
        #[allow(clippy::cast_precision_loss)]
        let present = present as f64;
        present / f64::from(self.total_sessions) * 100.0
    }

    /// Sum weight and weighted score over assignments of one type
    #[must_use]
    pub fn group_totals(&self, assignment_type: &AssignmentType) -> GroupTotals {
        self.assignments
            .iter()
            .filter(|a| a.assignment_type() == assignment_type)
            .fold(GroupTotals::default(), |mut totals, a| {
                totals.weight += a.weight();
                totals.weighted_score += a.weighted_score();
                totals
            })
    }

    /// Determine whether the course is passed
    ///
    /// Formative work must reach 30% and summative work 20% of their group
    /// weight. An empty group counts as 0%.
    #[must_use]
    pub fn progression(&self) -> Progression {
        let formative_total = self.group_totals(&AssignmentType::Formative).percentage();
        let summative_total = self.group_totals(&AssignmentType::Summative).percentage();

        Progression {
            formative_total,
            summative_total,
            passed: formative_total >= FORMATIVE_PASS_THRESHOLD
                && summative_total >= SUMMATIVE_PASS_THRESHOLD,
        }
    }

    /// Names of formative assignments scoring below 50
    #[must_use]
    pub fn resubmission_candidates(&self) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| {
                *a.assignment_type() == AssignmentType::Formative
                    && a.score() < RESUBMISSION_THRESHOLD
            })
            .map(Assignment::name)
            .collect()
    }

    /// Assignments ordered by score
    ///
    /// The sort is stable in both directions: equal scores keep their
    /// insertion order.
    #[must_use]
    pub fn transcript(&self, order: SortOrder) -> Vec<&Assignment> {
        let mut sorted: Vec<&Assignment> = self.assignments.iter().collect();
        match order {
            SortOrder::Ascending => sorted.sort_by(|a, b| a.score().total_cmp(&b.score())),
            SortOrder::Descending => sorted.sort_by(|a, b| b.score().total_cmp(&a.score())),
        }
        sorted
    }
}
