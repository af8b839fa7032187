#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Agent auth failed: {0}")]
    AgentAuth(String),

    #[error("Agent session invalid: {0}")]
    AgentSession(String),

    #[error("Agent backend error: {0}")]
    AgentBackend(String),

    #[error("Agent backend timed out after {0}s")]
    Timeout(u64),

    #[error("Video platform error: {0}")]
    Video(String),

    #[error("Bot verification error: {0}")]
    Verify(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;

impl axum::response::IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            RelayError::Video(_) | RelayError::Verify(_) => StatusCode::BAD_GATEWAY,
            RelayError::AgentSession(_) => StatusCode::GONE,
            RelayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
