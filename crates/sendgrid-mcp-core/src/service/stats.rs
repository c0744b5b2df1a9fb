//! Global email statistics.

use sendgrid_mcp_client::{DailyStats, SendGridApi, StatsQuery};

use crate::error::Result;

/// Statistics for a date range, as SendGrid reports them.
///
/// # Errors
///
/// Returns the provider error.
pub async fn get_stats<A: SendGridApi>(api: &A, query: &StatsQuery) -> Result<Vec<DailyStats>> {
    Ok(api.stats(query).await?)
}
