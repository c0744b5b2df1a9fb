//! Mail Send (`/v3/mail/send`) types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single-recipient message to send through SendGrid.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Mail {
    /// Recipient address.
    pub to: String,
    /// Sender address (must be a verified sender).
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub text: String,
    /// HTML body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Dynamic template ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Values for the template's handlebars variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_template_data: Option<Map<String, Value>>,
}

impl Mail {
    /// Creates a plain text message.
    #[must_use]
    pub fn new(
        to: impl Into<String>,
        from: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            subject: subject.into(),
            text: text.into(),
            html: None,
            template_id: None,
            dynamic_template_data: None,
        }
    }

    /// Adds an HTML alternative.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Uses a dynamic template.
    #[must_use]
    pub fn with_template(mut self, template_id: impl Into<String>, data: Map<String, Value>) -> Self {
        self.template_id = Some(template_id.into());
        self.dynamic_template_data = Some(data);
        self
    }

    /// Builds the v3 mail-send request body.
    #[must_use]
    pub fn to_payload(&self) -> MailSendPayload<'_> {
        let mut content = vec![Content {
            kind: "text/plain",
            value: &self.text,
        }];
        if let Some(html) = &self.html {
            content.push(Content {
                kind: "text/html",
                value: html,
            });
        }

        MailSendPayload {
            personalizations: vec![Personalization {
                to: vec![EmailAddress { email: &self.to }],
                dynamic_template_data: self.dynamic_template_data.as_ref(),
            }],
            from: EmailAddress { email: &self.from },
            subject: &self.subject,
            content,
            template_id: self.template_id.as_deref(),
        }
    }
}

/// Serialized body of `POST /v3/mail/send`.
#[derive(Debug, Serialize)]
pub struct MailSendPayload<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_template_data: Option<&'a Map<String, Value>>,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

/// What SendGrid returned for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    /// HTTP status code (202 on acceptance).
    pub status_code: u16,
    /// Value of the `X-Message-Id` header.
    pub message_id: Option<String>,
}
