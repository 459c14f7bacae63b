#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {message}")]
    Api { status: Option<u16>, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status attached to an API failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}
