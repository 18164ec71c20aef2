#[derive(Debug, thiserror::Error)]
pub enum FeesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Invalid amount in field '{field}': {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("Task join error: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FeesError>;
