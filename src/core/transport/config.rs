//! Transport selection from the environment.
//!
//! | variable        | used by    | default     |
//! |-----------------|------------|-------------|
//! | `MCP_TRANSPORT` | all        | first built |
//! | `MCP_HOST`      | tcp, http  | `127.0.0.1` |
//! | `MCP_PORT`      | tcp, http  | 3000 / 8080 |
//! | `MCP_HTTP_PATH` | http       | `/mcp`      |
//! | `MCP_HTTP_CORS` | http       | `true`      |

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(any(feature = "tcp", feature = "http"))]
const DEFAULT_HOST: &str = "127.0.0.1";

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3000;

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 8080;

#[cfg(feature = "http")]
const DEFAULT_RPC_PATH: &str = "/mcp";

/// The transport to serve on, with its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    #[cfg(feature = "stdio")]
    Stdio,

    #[cfg(feature = "tcp")]
    Tcp(ListenAddr),

    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// Address a listening transport binds to.
#[cfg(any(feature = "tcp", feature = "http"))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenAddr {
    pub host: String,
    pub port: u16,
}

#[cfg(any(feature = "tcp", feature = "http"))]
impl ListenAddr {
    fn from_env(default_port: u16) -> Self {
        let host = std::env::var("MCP_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match std::env::var("MCP_PORT") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid MCP_PORT '{}', using {}", raw, default_port);
                default_port
            }),
            Err(_) => default_port,
        };

        Self { host, port }
    }
}

#[cfg(any(feature = "tcp", feature = "http"))]
impl std::fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// HTTP transport settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub listen: ListenAddr,

    /// Route that accepts JSON-RPC posts.
    pub rpc_path: String,

    /// Allow cross-origin requests from browser clients.
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: ListenAddr {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_HTTP_PORT,
            },
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    fn from_env() -> Self {
        let mut rpc_path = std::env::var("MCP_HTTP_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RPC_PATH.to_string());
        if !rpc_path.starts_with('/') {
            rpc_path.insert(0, '/');
        }

        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "off"))
            .unwrap_or(true);

        Self {
            listen: ListenAddr::from_env(DEFAULT_HTTP_PORT),
            rpc_path,
            enable_cors,
        }
    }
}

impl Default for TransportConfig {
    /// The first compiled-in transport, in the order stdio, tcp, http.
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        return Self::Stdio;

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        return Self::Tcp(ListenAddr {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_TCP_PORT,
        });

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        return Self::Http(HttpConfig::default());
    }
}

impl TransportConfig {
    /// Read `MCP_TRANSPORT` and the settings of the chosen transport.
    ///
    /// A transport that is unknown or not compiled in falls back to the default.
    pub fn from_env() -> Self {
        let requested = std::env::var("MCP_TRANSPORT").unwrap_or_default();

        match requested.trim().to_ascii_lowercase().as_str() {
            "" => Self::default(),
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(ListenAddr::from_env(DEFAULT_TCP_PORT)),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            other => {
                let fallback = Self::default();
                warn!(
                    "Transport '{}' is not available in this build, using {}",
                    other,
                    fallback.description()
                );
                fallback
            }
        }
    }

    /// Human-readable form for logs.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "stdio".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(addr) => format!("tcp://{}", addr),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("http://{}{}", cfg.listen, cfg.rpc_path),
        }
    }
}
