//! Server configuration loaded via OrthoConfig.
//!
//! Settings come from `MARKBOOK_*` environment variables, an optional
//! configuration file and command-line flags. [`ServerSettings::into_config`]
//! validates them into a [`ServerConfig`].

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use actix_web::http::StatusCode;
use markbook::inbound::http::lookup::LookupSettings;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOOKUP_FAILURE_STATUS: u16 = 500;

/// Raw settings as supplied by the operator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKBOOK")]
pub struct ServerSettings {
    /// Interface address to bind.
    #[ortho_config(default = DEFAULT_HOST.to_owned())]
    pub host: String,
    /// TCP port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Status reported when a lookup collaborator fails.
    #[ortho_config(default = DEFAULT_LOOKUP_FAILURE_STATUS)]
    pub lookup_failure_status: u16,
    /// Deadline in milliseconds forwarded to lookup collaborators.
    pub lookup_deadline_ms: Option<u64>,
}

/// Errors raised while validating [`ServerSettings`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid host '{value}': expected an IP address")]
    InvalidHost { value: String },
    #[error("invalid lookup failure status {value}: expected 400..=599")]
    InvalidLookupStatus { value: u16 },
    #[error("lookup deadline must be greater than zero")]
    ZeroDeadline,
}

/// Validated server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) lookup: LookupSettings,
}

impl ServerConfig {
    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Settings applied to every lookup route.
    #[must_use]
    pub fn lookup(&self) -> LookupSettings {
        self.lookup
    }
}

impl ServerSettings {
    /// Validate the raw settings.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the host is not an IP address, the
    /// failure status is not an error status, or the deadline is zero.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost { value: self.host })?;
        let bind_addr = SocketAddr::new(ip, self.port);

        let code = self.lookup_failure_status;
        let status = StatusCode::from_u16(code)
            .ok()
            .filter(|status| status.is_client_error() || status.is_server_error())
            .ok_or(ConfigError::InvalidLookupStatus { value: code })?;
        let mut lookup = LookupSettings::default().with_failure_status(status);

        match self.lookup_deadline_ms {
            Some(0) => return Err(ConfigError::ZeroDeadline),
            Some(ms) => lookup = lookup.with_deadline(Duration::from_millis(ms)),
            None => {}
        }

        Ok(ServerConfig { bind_addr, lookup })
    }
}
