//! HTTP implementation of [`SendGridApi`].

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::SendGridApi;
use crate::error::{Error, Result};
use crate::suppression::{SuppressionBody, SuppressionKind};
use crate::types::{ActivityResponse, DailyStats, Mail, MailReceipt, StatsQuery};

/// Default SendGrid API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// SendGrid v3 REST client.
///
/// Holds one `reqwest::Client`, so clones share a connection pool.
#[derive(Clone)]
pub struct SendGridClient {
    api_key: String,
    base_url: Url,
    http_client: Client,
}

impl std::fmt::Debug for SendGridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SendGridClient {
    /// Creates a client for the public SendGrid API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("API key must not be empty".into()));
        }

        Ok(Self {
            api_key,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            http_client: Client::new(),
        })
    }

    /// Points the client at another origin (a proxy or a regional host).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or cannot carry a path.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base URL {url} cannot carry a path"
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Origin requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// URL of the suppression entry for one address, the address escaped as
    /// a single path segment.
    fn suppression_url(&self, kind: SuppressionKind, email: &str) -> Result<Url> {
        let mut url = self.endpoint(kind.endpoint())?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidConfig(format!("base URL {} cannot carry a path", self.base_url)))?
            .push(email);
        Ok(url)
    }

    async fn get(&self, url: Url, query: &[(&str, &str)]) -> Result<Response> {
        debug!(url = %url.path(), "SendGrid GET");
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;
        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        let response = self.get(url, query).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Turns non-2xx responses into [`Error::Api`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await?;
    debug!(status = status.as_u16(), "SendGrid request failed");
    Err(Error::api(status.as_u16(), &body))
}

impl SendGridApi for SendGridClient {
    async fn send_mail(&self, mail: &Mail) -> Result<MailReceipt> {
        let url = self.endpoint("/v3/mail/send")?;
        debug!(url = %url.path(), "SendGrid POST");

        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&mail.to_payload())
            .send()
            .await?;
        let response = check_status(response).await?;

        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(MailReceipt {
            status_code: response.status().as_u16(),
            message_id,
        })
    }

    async fn stats(&self, query: &StatsQuery) -> Result<Vec<DailyStats>> {
        let url = self.endpoint("/v3/stats")?;
        self.get_json(url, &query.to_pairs()).await
    }

    async fn messages(&self, query: &str) -> Result<ActivityResponse> {
        let url = self.endpoint("/v3/messages")?;
        self.get_json(url, &[("query", query)]).await
    }

    async fn suppression(&self, kind: SuppressionKind, email: &str) -> Result<SuppressionBody> {
        let url = self.suppression_url(kind, email)?;
        let response = self.get(url, &[]).await?;
        let bytes = response.bytes().await?;
        Ok(SuppressionBody::from_slice(&bytes))
    }
}
