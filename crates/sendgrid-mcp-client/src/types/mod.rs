//! Wire types for the SendGrid v3 endpoints this crate talks to.

mod activity;
mod mail;
mod stats;

pub use activity::{ActivityMessage, ActivityResponse};
pub use mail::{Mail, MailReceipt};
pub use stats::{Aggregation, DailyStats, Metrics, StatBlock, StatsQuery};
