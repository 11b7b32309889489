use thiserror::Error;

/// Fatal errors. Only an unreadable source, a broken config, or a failed
/// output write terminates a run; everything data-shaped is a
/// [`Diagnostic`](crate::diagnostics::Diagnostic) instead.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet read failed: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
