//! HTTP inbound adapter: the lookup adapter, response encoder and the route
//! table that binds them to domain ports.

pub mod envelope;
pub mod error;
pub mod health;
pub mod lookup;
pub mod routes;
pub mod state;

pub use error::{ErrorBody, HandlerError};
