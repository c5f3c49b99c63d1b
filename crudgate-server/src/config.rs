//! Gateway configuration
//!
//! The binary fills this from command-line flags, each with an environment
//! fallback (`CRUDGATE_*`, `DATABASE_URL`); `.env` is loaded first.

use std::net::SocketAddr;
use std::time::Duration;

use crate::db::PoolConfig;
use crate::proxy::{DEFAULT_PROXY_TIMEOUT, DEFAULT_SAY_URL};

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default end-to-end request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address '{addr}': {source}")]
    InvalidBindAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("max connections must be at least 1")]
    ZeroConnections,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("request timeout must be longer than the {0}")]
    RequestTimeoutTooShort(&'static str),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Interface to bind (default: 127.0.0.1)
    pub host: String,

    /// Port to bind (default: 3000)
    pub port: u16,

    /// Database URL and pool bounds
    pub pool: PoolConfig,

    /// Text-generation endpoint proxied by `GET /say`
    pub say_url: String,

    /// Timeout for the outbound proxy call
    pub proxy_timeout: Duration,

    /// Allow any origin (default: true). When false, only localhost origins.
    pub cors_permissive: bool,

    /// Upper bound on a whole request, including pool waits
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            pool: PoolConfig::default(),
            say_url: DEFAULT_SAY_URL.to_string(),
            proxy_timeout: DEFAULT_PROXY_TIMEOUT,
            cors_permissive: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidBindAddress { addr, source })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.pool.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        if self.pool.acquire_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("acquire timeout"));
        }
        if self.proxy_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("proxy timeout"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("request timeout"));
        }
        // A pool or upstream timeout must answer before the request is cut off
        if self.request_timeout <= self.pool.acquire_timeout {
            return Err(ConfigError::RequestTimeoutTooShort("acquire timeout"));
        }
        if self.request_timeout <= self.proxy_timeout {
            return Err(ConfigError::RequestTimeoutTooShort("proxy timeout"));
        }
        Ok(())
    }
}
