//! Listener and static-site settings parsed from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Front-end bundle served at `/` when set.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `PORT`, `BIND_ADDR` and `STATIC_DIR`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `BIND_ADDR` is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `BIND_ADDR` is set but does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: IpAddr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "BIND_ADDR", value: raw })?,
            None => DEFAULT_BIND_ADDR,
        };
        let static_dir = lookup("STATIC_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { bind_addr, port, static_dir })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
