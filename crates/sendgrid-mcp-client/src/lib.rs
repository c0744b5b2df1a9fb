//! # sendgrid-mcp-client
//!
//! Typed client for the slice of the SendGrid v3 REST API used by the
//! SendGrid MCP server.
//!
//! ## Endpoints
//!
//! - `POST /v3/mail/send` - send a message
//! - `GET /v3/stats` - global statistics
//! - `GET /v3/messages` - Email Activity search
//! - `GET /v3/suppression/bounces/{email}` and `/blocks/{email}` - suppression lookups
//!
//! ## Quick Start
//!
//! ```ignore
//! use sendgrid_mcp_client::{SendGridClient, suppression};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SendGridClient::new(std::env::var("SENDGRID_API_KEY")?)?;
//!
//!     match suppression::get_bounce(&client, "user@example.com").await? {
//!         Some(record) => println!("bounced: {:?}", record.reason),
//!         None => println!("not bounced"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! Tool logic is written against the [`SendGridApi`] trait, so tests can
//! substitute canned responses for the HTTP client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod api;
mod client;
mod error;
pub mod suppression;
pub mod types;

pub use api::SendGridApi;
pub use client::{DEFAULT_BASE_URL, SendGridClient};
pub use error::{ApiErrorBody, ApiErrorItem, Error, Result};
pub use suppression::{SuppressionBody, SuppressionKind, SuppressionRecord};
pub use types::{
    ActivityMessage, ActivityResponse, Aggregation, DailyStats, Mail, MailReceipt, Metrics,
    StatBlock, StatsQuery,
};
