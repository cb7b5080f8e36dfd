use crate::providers::ProviderId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{provider} response has no '{key}' collection")]
    MissingEnvelope {
        provider: ProviderId,
        key: &'static str,
    },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("SuperJob requires an API key (set SUPERJOB_API_KEY)")]
    MissingApiKey,
}
