//! Suppression status: bounce and block lists merged into one report.

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use tracing::debug;

use sendgrid_mcp_client::suppression::{get_block, get_bounce};
use sendgrid_mcp_client::{SendGridApi, SuppressionKind, SuppressionRecord};

use crate::error::Result;
use crate::validation::{ValidationError, require};

/// Note attached when neither list has the address.
pub const NOT_SUPPRESSED_NOTE: &str = "No bounce or block suppression found";

/// Suppression state of one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuppressionStatusReport {
    /// Address the report is about.
    pub email: String,
    /// Whether any suppression exists.
    pub suppressed: bool,
    /// Which list the reported record came from.
    #[serde(rename = "type")]
    pub kind: Option<SuppressionKind>,
    /// Provider's reason text.
    pub reason: Option<String>,
    /// SMTP enhanced status code.
    pub status: Option<String>,
    /// `created` as ISO-8601 UTC.
    pub created: Option<String>,
    /// `created` as unix seconds.
    pub created_timestamp: Option<i64>,
    /// Explanation when the report carries no detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SuppressionStatusReport {
    /// Report for an address on neither list.
    #[must_use]
    pub fn not_suppressed(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            suppressed: false,
            kind: None,
            reason: None,
            status: None,
            created: None,
            created_timestamp: None,
            note: Some(NOT_SUPPRESSED_NOTE.to_string()),
        }
    }
}

/// Picks the record to report: detailed block, then detailed bounce, then
/// whichever exists, block first.
#[must_use]
pub fn select_record(
    bounce: Option<SuppressionRecord>,
    block: Option<SuppressionRecord>,
) -> Option<(SuppressionKind, SuppressionRecord)> {
    match (bounce, block) {
        (_, Some(block)) if block.is_detailed() => Some((SuppressionKind::Block, block)),
        (Some(bounce), _) if bounce.is_detailed() => Some((SuppressionKind::Bounce, bounce)),
        (_, Some(block)) => Some((SuppressionKind::Block, block)),
        (Some(bounce), None) => Some((SuppressionKind::Bounce, bounce)),
        (None, None) => None,
    }
}

/// Formats unix seconds as `2021-01-01T00:00:00.000Z`.
///
/// Returns `None` for timestamps chrono cannot represent.
#[must_use]
pub fn format_created(seconds: i64) -> Option<String> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn missing_detail_note(kind: SuppressionKind) -> String {
    format!(
        "{} suppression exists but detailed information (reason, status, timestamp) is not available. \
         This may occur if the suppression data is incomplete in SendGrid or if the API key lacks sufficient permissions.",
        kind.label()
    )
}

/// Builds the report from both lookups.
#[must_use]
pub fn build_report(
    email: &str,
    bounce: Option<SuppressionRecord>,
    block: Option<SuppressionRecord>,
) -> SuppressionStatusReport {
    let Some((kind, record)) = select_record(bounce, block) else {
        return SuppressionStatusReport::not_suppressed(email);
    };

    let note = (!record.is_detailed()).then(|| missing_detail_note(kind));
    let email = record
        .email
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| email.to_string());

    SuppressionStatusReport {
        email,
        suppressed: true,
        kind: Some(kind),
        reason: record.reason,
        status: record.status,
        created: record.created.and_then(format_created),
        created_timestamp: record.created,
        note,
    }
}

/// Checks the bounce and block lists for an address.
///
/// Both lookups run concurrently; either failing fails the whole call.
///
/// # Errors
///
/// Returns a validation error for an empty address, or the first provider
/// error other than a 404.
pub async fn get_suppression_status<A: SendGridApi>(
    api: &A,
    email: &str,
) -> Result<SuppressionStatusReport> {
    let email = require(email, ValidationError::EmptyEmail)?;

    let (bounce, block) = tokio::join!(get_bounce(api, email), get_block(api, email));
    let (bounce, block) = (bounce?, block?);
    debug!(
        bounce = bounce.is_some(),
        block = block.is_some(),
        "Suppression lookups finished"
    );

    Ok(build_report(email, bounce, block))
}
