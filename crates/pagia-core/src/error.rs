use thiserror::Error;

/// Unified error type for the entire PAGIA workspace.
#[derive(Error, Debug)]
pub enum PagiaError {
    // ── Provider errors ────────────────────────────────────────
    /// Any failure in the outbound text-generation call. Invalid
    /// credentials, unsupported models, transport failures, and
    /// rate limiting all collapse into this one condition; the
    /// message is kept for display only.
    #[error("generation failed: {0}")]
    Provider(String),

    // ── Skill errors ───────────────────────────────────────────
    #[error("skill '{name}' not found. Available skills: {}", .available.join(", "))]
    SkillNotFound { name: String, available: Vec<String> },

    // ── Command errors ─────────────────────────────────────────
    #[error("command failed: {0}")]
    Command(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Server errors ──────────────────────────────────────────
    #[error("server error: {0}")]
    Server(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PagiaError>;
