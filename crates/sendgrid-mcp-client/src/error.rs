//! Error types for SendGrid API operations.

use serde::Deserialize;

/// Result type alias for SendGrid API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// One entry of the `errors` array SendGrid returns with failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorItem {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Offending request field, if any.
    #[serde(default)]
    pub field: Option<String>,
    /// Link to documentation about the error.
    #[serde(default)]
    pub help: Option<String>,
}

/// Error body returned by SendGrid for non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Structured error list.
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
    /// Top-level message some endpoints return instead of an error list.
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Decodes an error body, tolerating empty or non-JSON payloads.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

/// SendGrid client error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the SendGrid API.
    #[error("SendGrid API returned status {status}{}", describe(.body))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Decoded error body.
        body: ApiErrorBody,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

fn describe(body: &ApiErrorBody) -> String {
    let messages: Vec<&str> = body
        .errors
        .iter()
        .filter_map(|e| e.message.as_deref())
        .collect();
    if !messages.is_empty() {
        format!(": {}", messages.join(", "))
    } else if let Some(message) = &body.message {
        format!(": {message}")
    } else {
        String::new()
    }
}

impl Error {
    /// Creates an API error from a status code and raw response body.
    #[must_use]
    pub fn api(status: u16, body: &[u8]) -> Self {
        Self::Api {
            status,
            body: ApiErrorBody::from_slice(body),
        }
    }

    /// HTTP status code of the failed response, if the error came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the provider answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Messages from the provider's structured error list, in order.
    ///
    /// Empty when the error did not come with a structured list.
    #[must_use]
    pub fn api_messages(&self) -> Vec<&str> {
        match self {
            Self::Api { body, .. } => body
                .errors
                .iter()
                .filter_map(|e| e.message.as_deref())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Message of the first entry in the provider's error list, if that
    /// entry has one.
    #[must_use]
    pub fn first_api_message(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => body.errors.first().and_then(|e| e.message.as_deref()),
            _ => None,
        }
    }

    /// Top-level `message` field of the provider's error body.
    #[must_use]
    pub fn body_message(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => body.message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_with_error_list() {
        let err = Error::api(
            400,
            br#"{"errors":[{"message":"bad from","field":"from"},{"message":"bad to"}]}"#,
        );
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
        assert_eq!(err.api_messages(), vec!["bad from", "bad to"]);
        assert_eq!(err.first_api_message(), Some("bad from"));
        assert_eq!(
            err.to_string(),
            "SendGrid API returned status 400: bad from, bad to"
        );
    }

    #[test]
    fn test_api_error_with_top_level_message() {
        let err = Error::api(401, br#"{"message":"unauthorized"}"#);
        assert!(err.api_messages().is_empty());
        assert_eq!(err.body_message(), Some("unauthorized"));
        assert_eq!(err.to_string(), "SendGrid API returned status 401: unauthorized");
    }

    #[test]
    fn test_api_error_with_garbage_body() {
        let err = Error::api(404, b"<html>not found</html>");
        assert!(err.is_not_found());
        assert!(err.api_messages().is_empty());
        assert_eq!(err.to_string(), "SendGrid API returned status 404");
    }

    #[test]
    fn test_non_api_error_has_no_status() {
        let err = Error::InvalidConfig("missing key".into());
        assert_eq!(err.status(), None);
        assert!(err.api_messages().is_empty());
        assert!(err.body_message().is_none());
        assert!(err.first_api_message().is_none());
    }

    #[test]
    fn test_first_api_message_without_message() {
        let err = Error::api(400, br#"{"errors":[{"field":"to"},{"message":"later"}]}"#);
        assert_eq!(err.first_api_message(), None);
        assert_eq!(err.api_messages(), vec!["later"]);
    }
}
