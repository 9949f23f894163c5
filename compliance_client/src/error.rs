use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ComplianceClientError {
    #[error("Cannot read run configuration {path:?}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Run configuration is not valid JSON: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Submission response is not valid JSON: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("Submission response has no \"timestamp\" field")]
    MissingRunIdentifier,

    #[error("Invalid run identifier: {0}")]
    InvalidRunIdentifier(String),

    #[error("{operation} failed with HTTP status {status}")]
    HttpStatus { operation: &'static str, status: StatusCode },

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Parse Error: {0}")]
    ParseError(#[from] url::ParseError),

    #[error("ReqwestMiddleware Error: {0}")]
    ReqwestMiddlewareError(#[from] reqwest_middleware::Error),

    #[error("Reqwest Error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Notification channel error: {0}")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),
}

pub type Result<T> = std::result::Result<T, ComplianceClientError>;
