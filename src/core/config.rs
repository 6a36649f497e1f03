//! Configuration management for the MCP server.
//!
//! Configuration is read once at startup from environment variables (and an
//! optional `.env` file), validated, then shared read-only as `Arc<Config>`.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default per-request timeout for YApi calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// YApi connection settings.
    pub yapi: YapiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL`, defaulting to `info`.
    pub fn from_env() -> Self {
        let level = std::env::var("MCP_LOG_LEVEL")
            .ok()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        Self { level }
    }
}

/// YApi server address and login cookies.
#[derive(Clone, Serialize, Deserialize)]
pub struct YapiConfig {
    /// Base URL of the YApi server, e.g. `https://yapi.example.com`.
    pub base_url: String,

    /// `_yapi_token` cookie.
    pub token: String,

    /// `_yapi_uid` cookie.
    pub uid: String,

    /// `ZYBIPSCAS` cookie, only needed behind CAS single sign-on.
    pub cas: Option<String>,

    /// Deadline applied to every outbound request.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for YapiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YapiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("uid", &self.uid)
            .field("cas", &self.cas.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for YapiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            uid: String::new(),
            cas: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl YapiConfig {
    /// Value of the `Cookie` header sent with every request.
    pub fn cookie_header(&self) -> String {
        let mut cookies = vec![
            format!("_yapi_token={}", self.token),
            format!("_yapi_uid={}", self.uid),
        ];
        if let Some(cas) = &self.cas {
            cookies.push(format!("ZYBIPSCAS={}", cas));
        }
        cookies.join("; ")
    }

    /// Check the settings and normalize the base URL (no trailing slash).
    pub fn validate(&mut self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("YAPI_SERVER_URL is not a valid URL: {}", e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            s => {
                return Err(Error::config(format!(
                    "YAPI_SERVER_URL has unsupported scheme '{}', expected http or https",
                    s
                )));
            }
        }
        if parsed.host_str().is_none() {
            return Err(Error::config("YAPI_SERVER_URL must include a host"));
        }

        if self.token.trim().is_empty() {
            return Err(Error::config("YAPI_TOKEN must not be empty"));
        }
        if self.uid.trim().is_empty() {
            return Err(Error::config("YAPI_UID must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("YAPI_TIMEOUT_SECS must be greater than zero"));
        }

        self.base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "yapi-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            yapi: YapiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// YApi settings use the `YAPI_` prefix (`YAPI_SERVER_URL`, `YAPI_TOKEN`,
    /// `YAPI_UID`, `YAPI_CAS`, `YAPI_TIMEOUT_SECS`); server settings use `MCP_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();
        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("YAPI_SERVER_URL") {
            config.yapi.base_url = url;
        }
        if let Ok(token) = std::env::var("YAPI_TOKEN") {
            config.yapi.token = token;
        }
        if let Ok(uid) = std::env::var("YAPI_UID") {
            config.yapi.uid = uid;
        }

        match std::env::var("YAPI_CAS") {
            Ok(cas) if !cas.trim().is_empty() => {
                config.yapi.cas = Some(cas);
                info!("CAS session cookie loaded from environment");
            }
            _ => config.yapi.cas = None,
        }

        if let Ok(timeout) = std::env::var("YAPI_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.yapi.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid YAPI_TIMEOUT_SECS '{}', using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Validate the settings that have no usable default.
    pub fn validate(&mut self) -> Result<()> {
        self.yapi.validate()
    }
}
