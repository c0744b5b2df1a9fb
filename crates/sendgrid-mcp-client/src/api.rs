//! The seam between tool logic and the SendGrid HTTP API.

use std::future::Future;

use crate::error::Result;
use crate::suppression::{SuppressionBody, SuppressionKind};
use crate::types::{ActivityResponse, DailyStats, Mail, MailReceipt, StatsQuery};

/// The SendGrid v3 operations the MCP tools need.
///
/// [`crate::SendGridClient`] implements this over HTTP; tests implement it
/// with canned responses.
pub trait SendGridApi: Send + Sync {
    /// `POST /v3/mail/send`.
    fn send_mail(&self, mail: &Mail) -> impl Future<Output = Result<MailReceipt>> + Send;

    /// `GET /v3/stats`.
    fn stats(&self, query: &StatsQuery) -> impl Future<Output = Result<Vec<DailyStats>>> + Send;

    /// `GET /v3/messages?query=...`.
    fn messages(&self, query: &str) -> impl Future<Output = Result<ActivityResponse>> + Send;

    /// `GET /v3/suppression/{bounces,blocks}/{email}`, body undecided.
    fn suppression(
        &self,
        kind: SuppressionKind,
        email: &str,
    ) -> impl Future<Output = Result<SuppressionBody>> + Send;
}
