use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
    #[error("unreachable URL: {0}")]
    Network(String),
    #[error("unreachable URL: remote answered HTTP {0}")]
    Status(u16),
    #[error("client setup failed: {0}")]
    Client(String),
}
