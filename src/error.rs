use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `Storysmith`.
///
/// Every failure is session-fatal: nothing is retried and no output file is
/// written. Provider implementations keep using `anyhow::Result` internally;
/// the session layer wraps their failures into [`LlmError`].
#[derive(Debug, Error)]
pub enum StoryError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Operator input ──────────────────────────────────────────────────
    #[error("input: {0}")]
    Input(#[from] InputError),

    // ── Persistence ─────────────────────────────────────────────────────
    #[error("output: {0}")]
    Output(#[from] OutputError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} authentication failed")]
    Auth { provider: String },

    #[error("provider {provider} credentials not set. Set {env_var} or api_key in config.toml")]
    MissingCredentials {
        provider: String,
        env_var: &'static str,
    },

    #[error("provider {provider} returned an empty reply")]
    EmptyResponse { provider: String },
}

impl LlmError {
    /// Wrap an adapter failure, keeping the full context chain in the message.
    pub fn request(provider: &str, error: &anyhow::Error) -> Self {
        Self::Request {
            provider: provider.to_string(),
            message: format!("{error:#}"),
        }
    }
}

// ─── Operator input errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input stream closed while waiting for {0}")]
    Closed(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Persistence errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, StoryError>;
