//! Adapter configuration.

use thiserror::Error;

/// Default cap on request bodies read by the direct HTTP transport.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Which transport delivers requests to the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Local HTTP listener.
    LocalServer,
    /// Load-balancer events through the serverless runtime.
    #[default]
    Event,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Configuration for the adapter process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Transport selection.
    pub mode: RunMode,
    /// Maximum request body size in bytes. Longer bodies are truncated.
    pub max_body_bytes: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mode: RunMode::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AdapterConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the transport.
    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the request body cap in bytes.
    pub fn max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Recognized keys: `LOCAL_DEV` (`"true"` selects the local server),
    /// `HOST`, `PORT`, `MAX_BODY_BYTES`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if get("LOCAL_DEV").as_deref() == Some("true") {
            config.mode = RunMode::LocalServer;
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(max) = get("MAX_BODY_BYTES") {
            config.max_body_bytes = max.parse().map_err(|_| ConfigError::InvalidValue {
                key: "MAX_BODY_BYTES",
                value: max.clone(),
            })?;
        }

        Ok(config)
    }
}
