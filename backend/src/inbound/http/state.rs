//! Shared HTTP adapter state.
//!
//! Handlers only see domain ports through this bundle, so tests can swap in
//! fixtures or mocks without touching the route table.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureMarksQuery, FixtureStudentDirectory, MarksQuery, StudentDirectory,
};

use super::lookup::LookupSettings;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Student lookups.
    pub students: Arc<dyn StudentDirectory>,
    /// Mark lookups.
    pub marks: Arc<dyn MarksQuery>,
    /// Settings shared by every lookup route.
    pub lookup: LookupSettings,
}

impl HttpState {
    /// Construct state from explicit ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use markbook::domain::ports::{FixtureMarksQuery, FixtureStudentDirectory};
    /// use markbook::inbound::http::lookup::LookupSettings;
    /// use markbook::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureStudentDirectory),
    ///     Arc::new(FixtureMarksQuery),
    ///     LookupSettings::default(),
    /// );
    /// let _students = state.students.clone();
    /// ```
    pub fn new(
        students: Arc<dyn StudentDirectory>,
        marks: Arc<dyn MarksQuery>,
        lookup: LookupSettings,
    ) -> Self {
        Self {
            students,
            marks,
            lookup,
        }
    }

    /// State backed by the in-memory fixtures.
    pub fn fixtures(lookup: LookupSettings) -> Self {
        Self::new(
            Arc::new(FixtureStudentDirectory),
            Arc::new(FixtureMarksQuery),
            lookup,
        )
    }
}
