use serde::{Deserialize, Serialize};

/// Root configuration — maps to `pagia.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PagiaConfig {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

// ── Provider ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model identifier, e.g. "gemini-1.5-flash".
    pub model: String,
    /// API key. When absent, `GEMINI_API_KEY` fills it in at load time.
    pub api_key: Option<String>,
    /// System prompt prepended to every generation request.
    pub system_prompt: Option<String>,
    /// Temperature passed through to the provider unvalidated; the
    /// provider rejects out-of-range values.
    pub temperature: f32,
    /// Maximum tokens per response, also pass-through.
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".into(),
            api_key: None,
            system_prompt: None,
            temperature: 0.7,
            max_tokens: 8192,
        }
    }
}

// ── Server ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host the workflow API binds to.
    pub host: String,
    /// Port the workflow API listens on. `PAGIA_PORT` overrides this.
    pub port: u16,
    /// Enable permissive CORS on the API routes.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3001,
            cors: false,
        }
    }
}

impl ServerConfig {
    /// The socket address string the server binds to.
    pub fn listen(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Session ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session id used when none is given on the command line.
    pub default_session: String,
    /// Maximum conversation turns kept in history. 0 = unlimited.
    pub max_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_session: "default".into(),
            max_history: 0,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    pub level: String,
    /// Output format: "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
