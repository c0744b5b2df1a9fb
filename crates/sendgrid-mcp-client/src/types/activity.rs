//! Email Activity (`/v3/messages`) types.

use serde::{Deserialize, Serialize};

/// A single message returned by the Email Activity API.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivityMessage {
    /// SendGrid message ID.
    #[serde(default)]
    pub msg_id: Option<String>,
    /// Recipient address.
    #[serde(default)]
    pub to_email: Option<String>,
    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// Delivery status (`delivered`, `not_delivered`, `processing`).
    #[serde(default)]
    pub status: Option<String>,
    /// Timestamp of the most recent event.
    #[serde(default)]
    pub last_event_time: Option<String>,
}

/// Response of `GET /v3/messages`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivityResponse {
    /// Matching messages. Missing on the wire means none.
    #[serde(default)]
    pub messages: Vec<ActivityMessage>,
}
