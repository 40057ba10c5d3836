use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Environment variable that overrides the listen port on its own.
pub const PORT_ENV: &str = "PORT";

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

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log filter directive (`info`, `calcapi=debug,info`, ...)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones
    #[serde(default = "default_true")]
    pub log_json: bool,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Serve the interactive API documentation under `/api-docs`
    #[serde(default = "default_true")]
    pub docs_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            log_json: default_true(),
            metrics_enabled: default_true(),
            docs_enabled: default_true(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config files and environment variables.
    ///
    /// Later sources win: defaults, then an optional `server.{toml,yaml,json}`,
    /// then `CALC_SERVER__*` variables, then a bare `PORT`.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("CALC_SERVER").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV} must be a port number, got {port:?}"))?;
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        addr_str
            .parse()
            .with_context(|| format!("invalid bind address {addr_str:?}"))
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL advertised in the API documentation
    pub fn public_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching process environment variables must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn load_with_port(port: Option<&str>) -> anyhow::Result<ServerConfig> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match port {
            Some(port) => std::env::set_var(PORT_ENV, port),
            None => std::env::remove_var(PORT_ENV),
        }
        let loaded = ServerConfig::load();
        std::env::remove_var(PORT_ENV);
        loaded
    }

    #[test]
    fn test_load_reads_port_variable() {
        let cfg = load_with_port(Some("8081")).unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.public_url(), "http://localhost:8081");
    }

    #[test]
    fn test_load_defaults_to_port_3000() {
        let cfg = load_with_port(None).unwrap();
        assert_eq!(cfg.port, 3000);
    }

    #[test]
    fn test_load_rejects_non_numeric_port() {
        let err = load_with_port(Some("abc")).unwrap_err();
        assert!(err.to_string().contains("PORT must be a port number"));
    }

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.enable_cors);
        assert!(cfg.log_json);
        assert!(cfg.metrics_enabled);
        assert!(cfg.docs_enabled);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_bad_bind_addr_is_an_error() {
        let cfg = ServerConfig {
            bind_addr: "not an address".to_string(),
            ..ServerConfig::default()
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let cfg: ServerConfig = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
        assert_eq!(cfg.public_url(), "http://localhost:8080");
    }
}
