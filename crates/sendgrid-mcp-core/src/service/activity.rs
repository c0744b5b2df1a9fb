//! Email Activity lookups for a recipient.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sendgrid_mcp_client::{ActivityMessage, SendGridApi};

use crate::error::Result;
use crate::validation::{ValidationError, require};

/// Arguments of `get_email_activity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityQuery {
    /// Recipient address.
    #[serde(default)]
    pub recipient: String,
    /// Optional subject filter.
    #[serde(default)]
    pub subject: Option<String>,
}

/// Simplified view of one activity message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailActivitySummary {
    /// SendGrid message ID.
    pub id: String,
    /// Recipient address.
    pub to: String,
    /// Subject line, empty if unknown.
    pub subject: String,
    /// Delivery status, `unknown` if missing.
    pub status: String,
    /// Last event timestamp.
    pub last_event_time: Option<String>,
}

impl From<ActivityMessage> for EmailActivitySummary {
    fn from(message: ActivityMessage) -> Self {
        Self {
            id: message.msg_id.unwrap_or_default(),
            to: message.to_email.unwrap_or_default(),
            subject: message.subject.unwrap_or_default(),
            status: message.status.unwrap_or_else(|| "unknown".to_string()),
            last_event_time: message.last_event_time,
        }
    }
}

impl EmailActivitySummary {
    /// Has both an ID and a recipient.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        !self.id.is_empty() && !self.to.is_empty()
    }
}

/// Builds the Email Activity filter expression.
///
/// Quotes inside `recipient` or `subject` are not escaped.
#[must_use]
pub fn build_query(recipient: &str, subject: Option<&str>) -> String {
    let mut query = format!("to_email=\"{recipient}\"");
    if let Some(subject) = subject.filter(|s| !s.is_empty()) {
        query.push_str(&format!(" AND subject=\"{subject}\""));
    }
    query
}

/// Maps raw messages to summaries, dropping those without ID or recipient.
#[must_use]
pub fn summarize(messages: Vec<ActivityMessage>) -> Vec<EmailActivitySummary> {
    messages
        .into_iter()
        .map(EmailActivitySummary::from)
        .filter(EmailActivitySummary::is_usable)
        .collect()
}

/// Recent activity for a recipient, optionally filtered by subject.
///
/// # Errors
///
/// Returns a validation error for an empty recipient (no request is made),
/// or the provider error.
pub async fn get_email_activity<A: SendGridApi>(
    api: &A,
    query: &ActivityQuery,
) -> Result<Vec<EmailActivitySummary>> {
    let recipient = require(&query.recipient, ValidationError::EmptyRecipient)?;
    let filter = build_query(recipient, query.subject.as_deref());

    let response = api.messages(&filter).await?;
    let total = response.messages.len();
    let summaries = summarize(response.messages);
    debug!(total, kept = summaries.len(), "Email activity fetched");

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn message(id: Option<&str>, to: Option<&str>) -> ActivityMessage {
        ActivityMessage {
            msg_id: id.map(str::to_owned),
            to_email: to.map(str::to_owned),
            ..ActivityMessage::default()
        }
    }

    #[test]
    fn test_build_query() {
        assert_eq!(build_query("a@b.c", None), r#"to_email="a@b.c""#);
        assert_eq!(build_query("a@b.c", Some("")), r#"to_email="a@b.c""#);
        assert_eq!(
            build_query("a@b.c", Some("Welcome")),
            r#"to_email="a@b.c" AND subject="Welcome""#
        );
    }

    #[test]
    fn test_build_query_does_not_escape() {
        assert_eq!(
            build_query("a@b.c", Some(r#"say "hi""#)),
            r#"to_email="a@b.c" AND subject="say "hi"""#
        );
    }

    #[test]
    fn test_summary_defaults() {
        let summary = EmailActivitySummary::from(message(Some("m1"), Some("a@b.c")));
        assert_eq!(summary.id, "m1");
        assert_eq!(summary.subject, "");
        assert_eq!(summary.status, "unknown");
        assert!(summary.last_event_time.is_none());
    }

    #[test]
    fn test_summarize_drops_unusable() {
        let messages = vec![
            message(Some("m1"), Some("a@b.c")),
            message(None, Some("a@b.c")),
            message(Some("m3"), None),
            message(Some(""), Some("a@b.c")),
            message(Some("m5"), Some("a@b.c")),
        ];
        let ids: Vec<String> = summarize(messages).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["m1", "m5"]);
    }

    proptest! {
        #[test]
        fn prop_summaries_are_usable_and_bounded(
            raw in proptest::collection::vec(
                (proptest::option::of("[a-z0-9]{0,4}"), proptest::option::of("[a-z@.]{0,6}")),
                0..20,
            )
        ) {
            let messages: Vec<ActivityMessage> = raw
                .iter()
                .map(|(id, to)| message(id.as_deref(), to.as_deref()))
                .collect();
            let input_len = messages.len();
            let summaries = summarize(messages);
            prop_assert!(summaries.len() <= input_len);
            prop_assert!(summaries.iter().all(|s| !s.id.is_empty() && !s.to.is_empty()));
        }
    }
}
