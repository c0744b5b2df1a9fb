//! Tool operations.
//!
//! Each function takes any [`sendgrid_mcp_client::SendGridApi`] so the same
//! logic runs against the HTTP client and against test doubles.

pub mod activity;
pub mod send;
pub mod stats;
pub mod suppression;

pub use activity::{ActivityQuery, EmailActivitySummary, get_email_activity};
pub use send::{SendOutcome, SendResult, send_email};
pub use stats::get_stats;
pub use suppression::{SuppressionStatusReport, get_suppression_status};
