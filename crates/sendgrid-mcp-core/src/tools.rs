//! Tool catalogue and dispatch.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use sendgrid_mcp_client::{Mail, SendGridApi, StatsQuery};

use crate::error::{Error, Result};
use crate::service::{self, ActivityQuery, SendResult};

/// The tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// `send_email`.
    SendEmail,
    /// `get_stats`.
    GetStats,
    /// `get_email_activity`.
    GetEmailActivity,
    /// `get_suppression_status`.
    GetSuppressionStatus,
}

impl Tool {
    /// All tools, in listing order.
    pub const ALL: [Self; 4] = [
        Self::SendEmail,
        Self::GetStats,
        Self::GetEmailActivity,
        Self::GetSuppressionStatus,
    ];

    /// Wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SendEmail => "send_email",
            Self::GetStats => "get_stats",
            Self::GetEmailActivity => "get_email_activity",
            Self::GetSuppressionStatus => "get_suppression_status",
        }
    }

    /// Looks a tool up by wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    const fn description(self) -> &'static str {
        match self {
            Self::SendEmail => "Send an email using SendGrid",
            Self::GetStats => "Get SendGrid email statistics for a given date range",
            Self::GetEmailActivity => {
                "Retrieve recent email activity for a SendGrid recipient, optionally filtered by subject"
            }
            Self::GetSuppressionStatus => {
                "Check if an email address is currently suppressed due to a bounce or block. \
                 Returns suppression details including reason, status code, and timestamp."
            }
        }
    }

    fn input_schema(self) -> Value {
        match self {
            Self::SendEmail => json!({
                "type": "object",
                "properties": {
                    "to": { "type": "string", "description": "Recipient email address" },
                    "from": {
                        "type": "string",
                        "description": "Sender email address (must be verified with SendGrid)"
                    },
                    "subject": { "type": "string", "description": "Email subject line" },
                    "text": { "type": "string", "description": "Plain text content of the email" },
                    "html": { "type": "string", "description": "HTML content of the email (optional)" },
                    "template_id": { "type": "string", "description": "SendGrid template ID (optional)" },
                    "dynamic_template_data": {
                        "type": "object",
                        "description": "Dynamic data for template variables (optional)"
                    }
                },
                "required": ["to", "from", "subject", "text"]
            }),
            Self::GetStats => json!({
                "type": "object",
                "properties": {
                    "start_date": { "type": "string", "description": "Start date in YYYY-MM-DD format" },
                    "end_date": {
                        "type": "string",
                        "description": "End date in YYYY-MM-DD format (optional)"
                    },
                    "aggregated_by": {
                        "type": "string",
                        "enum": ["day", "week", "month"],
                        "description": "Aggregate level for the statistics (optional)"
                    }
                },
                "required": ["start_date"]
            }),
            Self::GetEmailActivity => json!({
                "type": "object",
                "properties": {
                    "recipient": { "type": "string", "description": "Recipient email address to query" },
                    "subject": { "type": "string", "description": "Optional subject filter" }
                },
                "required": ["recipient"]
            }),
            Self::GetSuppressionStatus => json!({
                "type": "object",
                "properties": {
                    "email": {
                        "type": "string",
                        "description": "Email address to check for bounce or block suppression"
                    }
                },
                "required": ["email"]
            }),
        }
    }

    /// Descriptor for `tools/list`.
    #[must_use]
    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool descriptor as listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Wire name.
    pub name: &'static str,
    /// What the tool does.
    pub description: &'static str,
    /// JSON schema of the arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Descriptors of every tool.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

/// One block of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResponse {
    /// Output blocks.
    pub content: Vec<Content>,
}

impl ToolResponse {
    /// Wraps a value as one pretty-printed JSON text block.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn json<T: Serialize>(data: &T) -> Result<Self> {
        Ok(Self {
            content: vec![Content::Text {
                text: serde_json::to_string_pretty(data)?,
            }],
        })
    }

    /// Text of the first block.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|Content::Text { text }| text.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct SuppressionArgs {
    #[serde(default)]
    email: String,
}

fn parse_args<T: DeserializeOwned>(tool: Tool, arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|source| Error::InvalidArguments {
        tool: tool.name().to_string(),
        source,
    })
}

/// Runs a tool by name.
///
/// # Errors
///
/// Returns [`Error::UnknownTool`] for an unrecognized name,
/// [`Error::InvalidArguments`] when the arguments do not decode, and the
/// operation's own error otherwise. `send_email` failures are reported inside
/// the response, not as errors.
pub async fn call_tool<A: SendGridApi>(api: &A, name: &str, arguments: Value) -> Result<ToolResponse> {
    let tool = Tool::from_name(name).ok_or_else(|| Error::UnknownTool(name.to_string()))?;
    info!(tool = tool.name(), "Tool call");

    match tool {
        Tool::SendEmail => {
            let mail: Mail = parse_args(tool, arguments)?;
            let result = SendResult::from(service::send_email(api, &mail).await);
            ToolResponse::json(&result)
        }
        Tool::GetStats => {
            let query: StatsQuery = parse_args(tool, arguments)?;
            let stats = service::get_stats(api, &query).await?;
            ToolResponse::json(&stats)
        }
        Tool::GetEmailActivity => {
            let query: ActivityQuery = parse_args(tool, arguments)?;
            let activity = service::get_email_activity(api, &query).await?;
            ToolResponse::json(&activity)
        }
        Tool::GetSuppressionStatus => {
            let args: SuppressionArgs = parse_args(tool, arguments)?;
            let status = service::get_suppression_status(api, &args.email).await?;
            ToolResponse::json(&status)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("delete_everything"), None);
    }

    #[test]
    fn test_definitions() {
        let definitions = serde_json::to_value(tool_definitions()).unwrap();
        let names: Vec<&str> = definitions
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["send_email", "get_stats", "get_email_activity", "get_suppression_status"]
        );

        assert_eq!(
            definitions[0]["inputSchema"]["required"],
            json!(["to", "from", "subject", "text"])
        );
        assert_eq!(definitions[1]["inputSchema"]["required"], json!(["start_date"]));
        assert_eq!(
            definitions[1]["inputSchema"]["properties"]["aggregated_by"]["enum"],
            json!(["day", "week", "month"])
        );
        assert_eq!(definitions[2]["inputSchema"]["required"], json!(["recipient"]));
        assert_eq!(definitions[3]["inputSchema"]["required"], json!(["email"]));
    }

    #[test]
    fn test_response_wraps_pretty_json() {
        let response = ToolResponse::json(&json!({"a": 1})).unwrap();
        assert_eq!(response.text(), Some("{\n  \"a\": 1\n}"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"content": [{"type": "text", "text": "{\n  \"a\": 1\n}"}]})
        );
    }

    #[test]
    fn test_parse_args_reports_tool() {
        let err = parse_args::<StatsQuery>(Tool::GetStats, json!({"end_date": "2024-01-01"}))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { ref tool, .. } if tool == "get_stats"));
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_parse_args_accepts_null() {
        let query: ActivityQuery = parse_args(Tool::GetEmailActivity, Value::Null).unwrap();
        assert_eq!(query, ActivityQuery::default());
    }
}
