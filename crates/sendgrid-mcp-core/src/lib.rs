//! # sendgrid-mcp-core
//!
//! Tool logic for the SendGrid MCP server.
//!
//! This crate provides:
//! - **Suppression status** - bounce and block lookups merged into one report
//! - **Email activity** - recipient search with malformed entries dropped
//! - **Send email** - send results reported as data, never as errors
//! - **Statistics** - date-range stats pass-through
//! - **Tool catalogue** - descriptors and name-based dispatch

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod service;
pub mod tools;
mod validation;

pub use error::{Error, Result};
pub use service::{
    ActivityQuery, EmailActivitySummary, SendOutcome, SendResult, SuppressionStatusReport,
    get_email_activity, get_stats, get_suppression_status, send_email,
};
pub use tools::{Content, Tool, ToolDefinition, ToolResponse, call_tool, tool_definitions};
pub use validation::ValidationError;
