/// Errors that can occur in Sift operations.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid question bank: {0}")]
    Bank(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),
}

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
