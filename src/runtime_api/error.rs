//! Error handling for the runtime API client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered with a non-success status.
    #[error("{status} {status_text}\n{body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never got a response (connection refused, reset, DNS...).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body does not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    pub async fn from_response(response: reqwest::Response) -> RequestError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        RequestError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
