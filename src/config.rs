use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Username accepted by the token issuer
    #[serde(default)]
    pub auth_username: String,

    /// Password accepted by the token issuer
    #[serde(default)]
    pub auth_password: String,

    /// Shared secret used to sign and verify bearer tokens
    #[serde(default)]
    pub token_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            auth_username: String::new(),
            auth_password: String::new(),
            token_secret: String::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("tally").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("TALLY_SERVER").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        // Fall back to demo credentials if none configured (for development)
        if config.auth_username.is_empty() || config.auth_password.is_empty() {
            tracing::warn!("No credentials configured, using demo user 'demo'/'demo-pass'");
            config.auth_username = "demo".to_string();
            config.auth_password = "demo-pass".to_string();
        }
        if config.token_secret.is_empty() {
            tracing::warn!("No token secret configured, using demo signing secret");
            config.token_secret = "demo-signing-secret".to_string();
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
