//! Server settings loaded via OrthoConfig.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::{HashCost, PasswordHashError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting server settings.
#[derive(Debug, thiserror::Error)]
pub enum ServerSettingsError {
    #[error("invalid listen address {host:?}: expected an IP address")]
    InvalidHost { host: String },
    #[error("request timeout must be positive")]
    ZeroRequestTimeout,
    #[error("pool size must be positive")]
    ZeroPoolSize,
    #[error(transparent)]
    HashCost(#[from] PasswordHashError),
}

/// HTTP listener and request budget settings.
///
/// Read from `FITNESS_HOST`, `FITNESS_PORT`, `FITNESS_REQUEST_TIMEOUT_MS`,
/// `FITNESS_POOL_MAX_SIZE` and `FITNESS_HASH_COST`, from the matching keys of
/// a configuration file, or from `--port` style flags.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FITNESS")]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Deadline budget for each request, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    pub pool_max_size: Option<u32>,
    /// Argon2 iteration count for new password hashes.
    pub hash_cost: Option<u32>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| ServerSettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    pub fn request_timeout(&self) -> Result<Duration, ServerSettingsError> {
        match self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS) {
            0 => Err(ServerSettingsError::ZeroRequestTimeout),
            ms => Ok(Duration::from_millis(ms)),
        }
    }

    pub fn pool_max_size(&self) -> Result<u32, ServerSettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(ServerSettingsError::ZeroPoolSize),
            size => Ok(size),
        }
    }

    pub fn hash_cost(&self) -> Result<HashCost, ServerSettingsError> {
        match self.hash_cost {
            Some(cost) => Ok(HashCost::new(cost)?),
            None => Ok(HashCost::default()),
        }
    }
}
