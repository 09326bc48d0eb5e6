//! Driving port listing the marks recorded for a student.

use async_trait::async_trait;

use crate::domain::{LookupContext, Mark};

use super::LookupError;

/// Port for reading a student's marks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarksQuery: Send + Sync {
    /// Return every mark recorded for `student_id`, ordered by course.
    ///
    /// A known student without marks yields an empty list. An unknown student
    /// yields [`LookupError::NotFound`].
    async fn marks_for_student(
        &self,
        ctx: &LookupContext,
        student_id: i64,
    ) -> Result<Vec<Mark>, LookupError>;
}

const FIXTURE_MARKS: [(i64, &str, u8); 3] = [
    (1, "Mathematics", 92),
    (1, "Physics", 85),
    (2, "Logic", 97),
];

const FIXTURE_STUDENT_IDS: [i64; 3] = [1, 2, 3];

/// In-memory marks fixture matching [`super::FixtureStudentDirectory`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMarksQuery;

#[async_trait]
impl MarksQuery for FixtureMarksQuery {
    async fn marks_for_student(
        &self,
        ctx: &LookupContext,
        student_id: i64,
    ) -> Result<Vec<Mark>, LookupError> {
        ctx.check()?;
        if !FIXTURE_STUDENT_IDS.contains(&student_id) {
            return Err(LookupError::not_found(student_id));
        }
        let mut marks: Vec<Mark> = FIXTURE_MARKS
            .iter()
            .filter(|(id, _, _)| *id == student_id)
            .map(|(id, course, score)| Mark::new(*id, *course, *score))
            .collect();
        marks.sort_by(|a, b| a.course.cmp(&b.course));
        Ok(marks)
    }
}
