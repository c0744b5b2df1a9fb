//! Bounce and block suppression lookups.
//!
//! SendGrid answers `GET /v3/suppression/{bounces,blocks}/{email}` with a
//! 404, an empty array, an array of records, or a bare record depending on
//! account state. The raw body is decoded once into [`SuppressionBody`] and
//! [`normalize`] turns the lookup outcome into `Option<SuppressionRecord>`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::SendGridApi;
use crate::error::Result;

/// Which suppression list to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionKind {
    /// Delivery failure.
    Bounce,
    /// Rejected by the receiving server.
    Block,
}

impl SuppressionKind {
    /// Endpoint root for this list.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Bounce => "/v3/suppression/bounces",
            Self::Block => "/v3/suppression/blocks",
        }
    }

    /// Capitalized name for messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bounce => "Bounce",
            Self::Block => "Block",
        }
    }
}

impl std::fmt::Display for SuppressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bounce => write!(f, "bounce"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// A bounce or block entry.
///
/// Decoding is lenient: a field of the wrong type is dropped, never the
/// whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuppressionRecord {
    /// Suppressed address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Unix timestamp (seconds) of the suppression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Provider's reason text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// SMTP enhanced status code, e.g. `5.1.1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The provider body carried a `reason`, `status` or `created` key,
    /// possibly `null` or of an unexpected type.
    #[serde(skip)]
    pub has_detail_keys: bool,
}

const DETAIL_KEYS: [&str; 3] = ["reason", "status", "created"];

impl SuppressionRecord {
    /// A record that only names the address.
    #[must_use]
    pub fn bare(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Extracts a record from any JSON value.
    ///
    /// Objects yield their fields; anything else is a record without detail.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        Self {
            email: map.get("email").and_then(Value::as_str).map(str::to_owned),
            created: map.get("created").and_then(unix_seconds),
            reason: map.get("reason").and_then(text),
            status: map.get("status").and_then(text),
            has_detail_keys: DETAIL_KEYS.iter().any(|key| map.contains_key(*key)),
        }
    }

    /// True when any of `reason`, `status` or `created` is present.
    ///
    /// Presence counts, not content: an empty `status` or a `null` reason
    /// is still detail.
    #[must_use]
    pub const fn is_detailed(&self) -> bool {
        self.has_detail_keys
            || self.reason.is_some()
            || self.status.is_some()
            || self.created.is_some()
    }
}

impl<'de> Deserialize<'de> for SuppressionRecord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_json(&value))
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn unix_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < 9.0e15)
                    .map(|f| f.trunc() as i64)
            }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decoded shape of a suppression lookup body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressionBody {
    /// `[]`: suppressed, but the provider has no detail.
    EmptyList,
    /// A bare object.
    SingleRecord(SuppressionRecord),
    /// A non-empty array of records.
    RecordList(Vec<SuppressionRecord>),
    /// Anything else.
    Unrecognized,
}

impl SuppressionBody {
    /// Classifies a JSON body by shape.
    ///
    /// Objects and arrays are never rejected for their field types; see
    /// [`SuppressionRecord::from_json`].
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => match items.first() {
                None => Self::EmptyList,
                Some(Value::Null) => Self::Unrecognized,
                Some(_) => Self::RecordList(items.iter().map(SuppressionRecord::from_json).collect()),
            },
            value @ Value::Object(_) => Self::SingleRecord(SuppressionRecord::from_json(&value)),
            _ => Self::Unrecognized,
        }
    }

    /// Classifies a raw response body. An empty body is [`Self::Unrecognized`].
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Unrecognized;
        }
        serde_json::from_slice(bytes).map_or(Self::Unrecognized, Self::from_value)
    }
}

/// Turns a lookup outcome into a record, or `None` when not suppressed.
///
/// # Errors
///
/// Returns the lookup error unchanged unless it is a 404.
pub fn normalize(email: &str, outcome: Result<SuppressionBody>) -> Result<Option<SuppressionRecord>> {
    let body = match outcome {
        Ok(body) => body,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => return Err(e),
    };

    Ok(match body {
        SuppressionBody::EmptyList => Some(SuppressionRecord::bare(email)),
        SuppressionBody::RecordList(records) => records.into_iter().next(),
        SuppressionBody::SingleRecord(record) => Some(record),
        SuppressionBody::Unrecognized => None,
    })
}

/// Looks up one suppression list for an address.
///
/// # Errors
///
/// Returns an error if the provider call fails with anything but a 404.
pub async fn lookup<A: SendGridApi>(
    api: &A,
    kind: SuppressionKind,
    email: &str,
) -> Result<Option<SuppressionRecord>> {
    normalize(email, api.suppression(kind, email).await)
}

/// Bounce record for an address, if any.
///
/// # Errors
///
/// See [`lookup`].
pub async fn get_bounce<A: SendGridApi>(api: &A, email: &str) -> Result<Option<SuppressionRecord>> {
    lookup(api, SuppressionKind::Bounce, email).await
}

/// Block record for an address, if any.
///
/// # Errors
///
/// See [`lookup`].
pub async fn get_block<A: SendGridApi>(api: &A, email: &str) -> Result<Option<SuppressionRecord>> {
    lookup(api, SuppressionKind::Block, email).await
}
