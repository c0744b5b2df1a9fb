//! Error types for the tool layer.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can end a tool call.
#[derive(Debug, Error)]
pub enum Error {
    /// SendGrid call failed.
    #[error("SendGrid error: {0}")]
    Client(#[from] sendgrid_mcp_client::Error),

    /// A required argument is missing or empty.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The argument bag does not match the tool's input schema.
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        /// Tool name.
        tool: String,
        /// Decode failure.
        source: serde_json::Error,
    },

    /// No tool with this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool result could not be serialized.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// True for failures caused by the caller's request rather than SendGrid.
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidArguments { .. } | Self::UnknownTool(_)
        )
    }

    /// Caller-facing message.
    ///
    /// Provider errors carrying a structured error list are reported as
    /// `SendGrid API Error: <m1>, <m2>`.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(e) => {
                let messages = e.api_messages();
                if messages.is_empty() {
                    e.to_string()
                } else {
                    format!("SendGrid API Error: {}", messages.join(", "))
                }
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_lists_messages() {
        let err = Error::from(sendgrid_mcp_client::Error::api(
            400,
            br#"{"errors":[{"message":"one"},{"message":"two"}]}"#,
        ));
        assert_eq!(err.user_message(), "SendGrid API Error: one, two");
        assert!(!err.is_invalid_request());
    }

    #[test]
    fn test_provider_error_without_list() {
        let err = Error::from(sendgrid_mcp_client::Error::api(500, b""));
        assert_eq!(err.user_message(), "SendGrid error: SendGrid API returned status 500");
    }

    #[test]
    fn test_request_errors() {
        let err = Error::UnknownTool("nope".into());
        assert!(err.is_invalid_request());
        assert_eq!(err.user_message(), "Unknown tool: nope");

        let err = Error::from(ValidationError::EmptyRecipient);
        assert!(err.is_invalid_request());
        assert_eq!(err.user_message(), "recipient is required");
    }
}
