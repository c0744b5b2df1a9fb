//! Global statistics (`/v3/stats`) types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Aggregation level for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// One entry per day.
    Day,
    /// One entry per week.
    Week,
    /// One entry per month.
    Month,
}

impl Aggregation {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Query for `GET /v3/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatsQuery {
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// End date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Aggregation level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregated_by: Option<Aggregation>,
}

impl StatsQuery {
    /// Creates a query starting at the given date.
    #[must_use]
    pub fn new(start_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: None,
            aggregated_by: None,
        }
    }

    /// Sets the end date.
    #[must_use]
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Sets the aggregation level.
    #[must_use]
    pub const fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregated_by = Some(aggregation);
        self
    }

    /// Query-string pairs; unset options are left out.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("start_date", self.start_date.as_str())];
        if let Some(end_date) = &self.end_date {
            pairs.push(("end_date", end_date.as_str()));
        }
        if let Some(aggregation) = self.aggregated_by {
            pairs.push(("aggregated_by", aggregation.as_str()));
        }
        pairs
    }
}

/// Metrics for one date bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[allow(missing_docs)]
pub struct Metrics {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub opens: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub bounces: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub spam_reports: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub unique_opens: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub unique_clicks: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub blocks: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub delivered: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce_drops: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferred: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_emails: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spam_report_drops: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribe_drops: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribes: Option<u64>,
    /// Metrics not modelled above, passed through as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Option::<u64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Wrapper around the metrics of one stat source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatBlock {
    /// Metrics.
    #[serde(default)]
    pub metrics: Metrics,
    /// Other block fields (`type`, `name`, ...), passed through as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Statistics for one date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyStats {
    /// Bucket date, `YYYY-MM-DD`.
    pub date: String,
    /// Stat blocks for the date.
    #[serde(default)]
    pub stats: Vec<StatBlock>,
    /// Other fields, passed through as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_unset() {
        let query = StatsQuery::new("2024-01-01");
        assert_eq!(query.to_pairs(), vec![("start_date", "2024-01-01")]);

        let query = StatsQuery::new("2024-01-01")
            .with_end_date("2024-01-31")
            .with_aggregation(Aggregation::Week);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("start_date", "2024-01-01"),
                ("end_date", "2024-01-31"),
                ("aggregated_by", "week"),
            ]
        );
    }

    #[test]
    fn test_aggregation_rejects_unknown_value() {
        let result: Result<StatsQuery, _> =
            serde_json::from_str(r#"{"start_date":"2024-01-01","aggregated_by":"year"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_daily_stats_deserialization() {
        let json = r#"[{
            "date": "2024-01-01",
            "stats": [{"metrics": {"opens": 3, "delivered": 10, "processed": 11}}]
        }]"#;
        let stats: Vec<DailyStats> = serde_json::from_str(json).unwrap();
        assert_eq!(stats[0].date, "2024-01-01");
        let metrics = &stats[0].stats[0].metrics;
        assert_eq!(metrics.opens, 3);
        assert_eq!(metrics.clicks, 0);
        assert_eq!(metrics.processed, Some(11));
        assert!(metrics.deferred.is_none());

        let out = serde_json::to_value(metrics).unwrap();
        assert!(out.get("deferred").is_none());
        assert_eq!(out["clicks"], 0);
    }

    #[test]
    fn test_metrics_pass_through_unknown_and_null() {
        let json = r#"[{
            "date": "2024-01-01",
            "stats": [{
                "type": "global",
                "metrics": {"opens": null, "delivered": 4, "processed": null, "blocked_spam": 2}
            }]
        }]"#;
        let stats: Vec<DailyStats> = serde_json::from_str(json).unwrap();
        let block = &stats[0].stats[0];
        assert_eq!(block.metrics.opens, 0);
        assert_eq!(block.metrics.delivered, 4);
        assert_eq!(block.metrics.processed, None);
        assert_eq!(block.metrics.extra["blocked_spam"], 2);
        assert_eq!(block.extra["type"], "global");

        let out = serde_json::to_value(&stats).unwrap();
        assert_eq!(out[0]["stats"][0]["metrics"]["blocked_spam"], 2);
        assert_eq!(out[0]["stats"][0]["type"], "global");
    }
}
