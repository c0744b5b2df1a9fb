//! Test double for the SendGrid API.

use sendgrid_mcp_client::{
    ActivityResponse, DailyStats, Error, Mail, MailReceipt, Result, SendGridApi, StatsQuery,
    SuppressionBody, SuppressionKind,
};

/// Answers every lookup with "not suppressed", accepts every message, and
/// rejects stats requests with a 401.
pub struct StubApi;

impl SendGridApi for StubApi {
    async fn send_mail(&self, _mail: &Mail) -> Result<MailReceipt> {
        Ok(MailReceipt {
            status_code: 202,
            message_id: None,
        })
    }

    async fn stats(&self, _query: &StatsQuery) -> Result<Vec<DailyStats>> {
        Err(Error::api(
            401,
            br#"{"errors":[{"field":null,"message":"authorization required"}]}"#,
        ))
    }

    async fn messages(&self, _query: &str) -> Result<ActivityResponse> {
        Ok(ActivityResponse::default())
    }

    async fn suppression(&self, _kind: SuppressionKind, _email: &str) -> Result<SuppressionBody> {
        Err(Error::api(404, b""))
    }
}
