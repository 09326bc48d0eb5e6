//! Domain ports for the lookup collaborators consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod lookup_error;
mod marks_query;
mod student_directory;

pub use lookup_error::LookupError;
#[cfg(test)]
pub use marks_query::MockMarksQuery;
pub use marks_query::{FixtureMarksQuery, MarksQuery};
#[cfg(test)]
pub use student_directory::MockStudentDirectory;
pub use student_directory::{FixtureStudentDirectory, StudentDirectory};
