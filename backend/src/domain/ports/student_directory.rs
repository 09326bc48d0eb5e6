//! Driving port for fetching a single student by identifier.
//!
//! The HTTP adapter binds [`StudentDirectory::student_by_id`] to
//! `GET /api/v1/students/{id}`. Production deployments back this port with a
//! datastore; tests and local runs use [`FixtureStudentDirectory`].

use async_trait::async_trait;

use crate::domain::{LookupContext, Student};

use super::LookupError;

/// Port for resolving students by their numeric identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Return the student identified by `id`.
    ///
    /// Implementations report a missing student as [`LookupError::NotFound`]
    /// and should return early once `ctx` signals cancellation.
    async fn student_by_id(&self, ctx: &LookupContext, id: i64) -> Result<Student, LookupError>;
}

const FIXTURE_STUDENTS: [(i64, &str); 3] = [
    (1, "Ada Lovelace"),
    (2, "Alan Turing"),
    (3, "Grace Hopper"),
];

/// In-memory directory seeded with a fixed roster.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentDirectory;

#[async_trait]
impl StudentDirectory for FixtureStudentDirectory {
    async fn student_by_id(&self, ctx: &LookupContext, id: i64) -> Result<Student, LookupError> {
        ctx.check()?;
        FIXTURE_STUDENTS
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(id, name)| Student::new(*id, *name))
            .ok_or_else(|| LookupError::not_found(id))
    }
}
