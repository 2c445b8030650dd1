use colored::*;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Struct that's used to deserialize Bacalhau API errors
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "RequestID", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(rename = "Code", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "Component", skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.component, &self.code) {
            (Some(component), Some(code)) => write!(f, "[{}/{}] {}", component, code, self.message),
            (None, Some(code)) => write!(f, "[{}] {}", code, self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Failures while converting a model to or from its canonical mapping
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{model}: field type mismatch: {source}")]
    TypeMismatch {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{model}: expected a JSON object, found {found}")]
    NotAnObject {
        model: &'static str,
        found: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {error}")]
    Api { status: StatusCode, error: ApiError },

    #[error("Unexpected response body ({source}): {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unable to read config at '{path}': {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config at '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Server returned the page token '{0}' twice")]
    RepeatedPageToken(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Decodes a non-successful response body. When the body carries no Bacalhau error message,
/// e.g. plain text or the error document of a proxy, the raw body becomes the message.
pub fn api_error(status: StatusCode, body: String) -> Error {
    let mut error = serde_json::from_str::<ApiError>(&body).unwrap_or_default();
    if error.message.is_empty() {
        error.message = body;
    }
    error.status.get_or_insert(status.as_u16());
    Error::Api { status, error }
}

/// Prints an error to stderr.
///
/// # Arguments
///
/// * `error` - Anything that can be displayed, usually an `anyhow::Error` with context
pub fn print_error(error: impl fmt::Display) {
    eprintln!("{} {}", "❌".red(), error.to_string().red().bold());
}
