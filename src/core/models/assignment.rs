//! Assignment model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Assessment category of an assignment
///
/// Formative and summative work are graded against separate progression
/// thresholds. Any other label is kept verbatim so it still counts towards
/// the overall GPA.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssignmentType {
    /// Low-stakes, resubmittable work
    Formative,
    /// Graded end-of-unit work
    Summative,
    /// Any unrecognised label
    Other(String),
}

impl AssignmentType {
    /// Label as it appears in reports and data files
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Formative => "Formative",
            Self::Summative => "Summative",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for AssignmentType {
    fn from(label: &str) -> Self {
        match label {
            "Formative" => Self::Formative,
            "Summative" => Self::Summative,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AssignmentType {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<AssignmentType> for String {
    fn from(kind: AssignmentType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single graded piece of work in a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    name: String,

    /// Percentage score; expected 0-100 but not checked
    score: f64,

    /// Weight in percentage points
    weight: f64,

    #[serde(rename = "type")]
    assignment_type: AssignmentType,
}

impl Assignment {
    /// Create a new assignment
    ///
    /// # Arguments
    /// * `name` - Assignment title
    /// * `score` - Percentage score
    /// * `weight` - Weight in percentage points
    /// * `assignment_type` - Formative, summative or another label
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        score: f64,
        weight: f64,
        assignment_type: impl Into<AssignmentType>,
    ) -> Self {
        Self {
            name: name.into(),
            score,
            weight,
            assignment_type: assignment_type.into(),
        }
    }

    /// Assignment title
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Percentage score
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Weight in percentage points
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Assessment category
    #[must_use]
    pub const fn assignment_type(&self) -> &AssignmentType {
        &self.assignment_type
    }

    /// Contribution of this assignment to a weighted total
    ///
    /// `score * weight / 100`. Out-of-range inputs are not rejected.
    #[must_use]
    pub fn weighted_score(&self) -> f64 {
        self.score * self.weight / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_score() {
        let assignment = Assignment::new("Python - Inheritance", 40.59, 20.0, "Formative");
        assert!((assignment.weighted_score() - 8.118).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_score_accepts_out_of_range_values() {
        let assignment = Assignment::new("Bonus", 120.0, -10.0, "Summative");
        assert!((assignment.weighted_score() + 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!(AssignmentType::from("Formative"), AssignmentType::Formative);
        assert_eq!(AssignmentType::from("Summative"), AssignmentType::Summative);
        assert_eq!(
            AssignmentType::from("formative"),
            AssignmentType::Other("formative".to_string())
        );
    }

    #[test]
    fn test_type_display_round_trips_label() {
        let other = AssignmentType::from("Project");
        assert_eq!(other.to_string(), "Project");
        assert_eq!(AssignmentType::Summative.to_string(), "Summative");
    }
}
