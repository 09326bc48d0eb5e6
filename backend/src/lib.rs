//! Markbook HTTP service library.
//!
//! Domain ports live in [`domain`]; the actix-web adapter that binds them to
//! JSON routes lives in [`inbound::http`].

pub mod domain;
pub mod inbound;
pub mod middleware;

pub use middleware::Trace;
