use crate::logging::LogLevel;
use crate::runtime_api::error::RequestError;

#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_request_error(&self, error: &RequestError) -> LogLevel {
        match (error, error.status()) {
            // Runtime busy or restarting; the user can simply retry
            (_, Some(500..=599)) => LogLevel::Warn,

            // The request itself was wrong (unknown patch, bad payload...)
            (_, Some(_)) => LogLevel::Error,

            // Usually temporary
            (RequestError::Transport(_), None) => LogLevel::Warn,

            // Client and server disagree on the data model
            _ => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> RequestError {
        RequestError::Http {
            status,
            status_text: String::new(),
            body: String::new(),
        }
    }

    #[test]
    fn server_errors_are_warnings_and_client_errors_are_errors() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_request_error(&http(500)), LogLevel::Warn);
        assert_eq!(classifier.classify_request_error(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify_request_error(&http(404)), LogLevel::Error);
        assert_eq!(classifier.classify_request_error(&http(429)), LogLevel::Error);
    }

    #[test]
    fn decode_errors_are_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(
            ErrorClassifier::new().classify_request_error(&RequestError::Decode(err)),
            LogLevel::Error
        );
    }
}
