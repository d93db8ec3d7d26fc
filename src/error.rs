use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend answered with a non-2xx HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend answered 200 but reported failure in its envelope
    /// (Subsonic `status=failed`). Carries the server-supplied message.
    #[error("server error {code}: {message}")]
    Protocol { code: u32, message: String },

    /// Write attempted against a read-only backend. Raised before any
    /// network request is issued, so the UI can hide retry affordances.
    #[error("{0} is not supported by this source")]
    Unsupported(&'static str),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("AppError", 2)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl AppError {
    pub fn kind(&self) -> &str {
        match self {
            AppError::Transport(_) => "transport",
            AppError::Json(_) => "json",
            AppError::Io(_) => "io",
            AppError::Api { .. } => "api",
            AppError::Protocol { .. } => "protocol",
            AppError::Unsupported(_) => "unsupported",
            AppError::Cache(_) => "cache",
            AppError::Config(_) => "config",
            AppError::NotFound(_) => "not_found",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
