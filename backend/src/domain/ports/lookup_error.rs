//! Failure type shared by every identifier-keyed lookup port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by lookup collaborators.
    ///
    /// The HTTP adapter does not distinguish between variants: every one of
    /// them is reported to clients as a generic lookup failure and only the
    /// variant's text reaches the logs.
    pub enum LookupError {
        /// No entity exists for the identifier.
        NotFound { id: i64 } => "no entity with id {id}",
        /// The backing store could not answer.
        Unavailable { message: String } => "lookup backend unavailable: {message}",
        /// The originating request was cancelled.
        Cancelled => "lookup cancelled with its request",
        /// The request deadline passed before the lookup finished.
        DeadlineExceeded => "lookup deadline exceeded",
    }
}
