//! Transport-agnostic markbook domain.
//!
//! Public surface:
//! - [`LookupContext`]: request-scoped execution context for lookups.
//! - [`Student`] and [`Mark`]: read models returned by collaborators.
//! - [`ports`]: collaborator traits and their in-memory fixtures.

pub mod context;
pub mod markbook;
pub mod ports;

pub use self::context::LookupContext;
pub use self::markbook::{Mark, Student};
pub use self::ports::LookupError;

/// Header carrying the per-request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
