//! Sending mail, with failures reported as data.

use serde::Serialize;
use tracing::{info, warn};

use sendgrid_mcp_client::{Mail, SendGridApi};

const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Outcome of a send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// SendGrid accepted the message.
    Sent {
        /// Caller-facing message.
        message: String,
        /// HTTP status SendGrid answered with.
        status_code: Option<u16>,
    },
    /// The send failed.
    Failed {
        /// Caller-facing message.
        message: String,
        /// HTTP status, if the failure came from a response.
        status_code: Option<u16>,
    },
}

impl SendOutcome {
    /// True for [`SendOutcome::Sent`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// JSON envelope returned by `send_email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendResult {
    /// Whether SendGrid accepted the message.
    pub success: bool,
    /// Caller-facing message.
    pub message: String,
    /// HTTP status code.
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<SendOutcome> for SendResult {
    fn from(outcome: SendOutcome) -> Self {
        match outcome {
            SendOutcome::Sent {
                message,
                status_code,
            } => Self {
                success: true,
                message,
                status_code,
            },
            SendOutcome::Failed {
                message,
                status_code,
            } => Self {
                success: false,
                message,
                status_code,
            },
        }
    }
}

/// Most specific message available for a failed send: the first entry of the
/// provider's error list, then the body's `message`, then the error text.
#[must_use]
pub fn failure_message(error: &sendgrid_mcp_client::Error) -> String {
    if let Some(first) = error.first_api_message().filter(|m| !m.is_empty()) {
        return first.to_string();
    }
    if let Some(message) = error.body_message().filter(|m| !m.is_empty()) {
        return message.to_string();
    }
    let text = error.to_string();
    if text.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text
    }
}

/// Sends a message. Never fails: provider errors become
/// [`SendOutcome::Failed`].
pub async fn send_email<A: SendGridApi>(api: &A, mail: &Mail) -> SendOutcome {
    match api.send_mail(mail).await {
        Ok(receipt) => {
            info!(
                status = receipt.status_code,
                message_id = receipt.message_id.as_deref().unwrap_or("-"),
                "Email accepted"
            );
            SendOutcome::Sent {
                message: format!("Email sent successfully to {}", mail.to),
                status_code: Some(receipt.status_code),
            }
        }
        Err(e) => {
            warn!(error = %e, "Email send failed");
            SendOutcome::Failed {
                message: format!("Failed to send email: {}", failure_message(&e)),
                status_code: e.status(),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sendgrid_mcp_client::Error;
    use serde_json::json;

    #[test]
    fn test_failure_message_prefers_error_list() {
        let err = Error::api(
            400,
            br#"{"errors":[{"message":"The from address does not match a verified Sender Identity."}],"message":"ignored"}"#,
        );
        assert_eq!(
            failure_message(&err),
            "The from address does not match a verified Sender Identity."
        );
    }

    #[test]
    fn test_failure_message_falls_back_to_body_message() {
        let err = Error::api(401, br#"{"errors":[{"field":"x"}],"message":"bad key"}"#);
        assert_eq!(failure_message(&err), "bad key");
    }

    #[test]
    fn test_failure_message_uses_only_first_list_entry() {
        let err = Error::api(
            400,
            br#"{"errors":[{"field":"to"},{"message":"second entry"}],"message":"top level"}"#,
        );
        assert_eq!(failure_message(&err), "top level");

        let err = Error::api(
            400,
            br#"{"errors":[{"message":""},{"message":"second entry"}],"message":"top level"}"#,
        );
        assert_eq!(failure_message(&err), "top level");
    }

    #[test]
    fn test_failure_message_falls_back_to_error_text() {
        let err = Error::api(502, b"");
        assert_eq!(failure_message(&err), "SendGrid API returned status 502");

        let err = Error::InvalidConfig("no key".into());
        assert_eq!(failure_message(&err), "Invalid configuration: no key");
    }

    #[test]
    fn test_result_envelope() {
        let sent = SendResult::from(SendOutcome::Sent {
            message: "Email sent successfully to a@b.c".into(),
            status_code: Some(202),
        });
        assert_eq!(
            serde_json::to_value(&sent).unwrap(),
            json!({"success": true, "message": "Email sent successfully to a@b.c", "statusCode": 202})
        );

        let failed = SendResult::from(SendOutcome::Failed {
            message: "Failed to send email: boom".into(),
            status_code: None,
        });
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "message": "Failed to send email: boom"})
        );
    }
}
