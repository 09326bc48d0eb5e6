//! Markbook read models returned by the lookup collaborators.
//!
//! Both types serialise to camelCase JSON, e.g.
//! `{"id":1,"displayName":"Ada Lovelace"}` and
//! `{"studentId":1,"course":"Mathematics","score":92}`.

use serde::{Deserialize, Serialize};

/// A student known to the markbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Student identifier.
    pub id: i64,
    /// Name shown to staff.
    pub display_name: String,
}

impl Student {
    /// Construct a student record.
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// A single mark awarded to a student for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    /// Identifier of the student the mark belongs to.
    pub student_id: i64,
    /// Course title.
    pub course: String,
    /// Percentage score, 0 to 100.
    pub score: u8,
}

impl Mark {
    /// Construct a mark record.
    pub fn new(student_id: i64, course: impl Into<String>, score: u8) -> Self {
        Self {
            student_id,
            course: course.into(),
            score,
        }
    }
}
