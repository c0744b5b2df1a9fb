//! Example: check one address against the bounce and block lists
//!
//! ## Prerequisites
//!
//! ```bash
//! export SENDGRID_API_KEY="SG.xxxxx"
//! ```
//!
//! ## Running
//!
//! ```bash
//! cargo run --example suppression_lookup -- user@example.com
//! ```

use sendgrid_mcp_client::{SendGridClient, suppression};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = env::var("SENDGRID_API_KEY")?;
    let email = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: suppression_lookup <email>"))?;

    let client = SendGridClient::new(api_key)?;

    let (bounce, block) = tokio::join!(
        suppression::get_bounce(&client, &email),
        suppression::get_block(&client, &email),
    );

    println!("Bounce: {:?}", bounce?);
    println!("Block:  {:?}", block?);
    Ok(())
}
