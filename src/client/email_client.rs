use std::time::Duration;

use anyhow::Context;

use async_trait::async_trait;

use reqwest::Client;

use serde::{Deserialize, Serialize};

use secrecy::{ExposeSecret, Secret};

use url::Url;

use crate::error::{Error, Result};

/// Outcome of a successful send
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Accepted by the provider, with its message id when one was returned
    Sent { id: Option<String> },
    /// No provider configured, the email was only logged
    Simulated,
}

/// Anything able to deliver a rendered email
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<Delivery>;
}

#[derive(Debug)]
pub struct EmailClient {
    client: Client,
    sender: String,

    api_send_email_url: Url,
    api_auth_token: Option<Secret<String>>,
}

impl EmailClient {
    pub fn new(
        sender: impl Into<String>,
        api_timeout: Duration,
        api_base_url: Url,
        api_auth_token: Option<Secret<String>>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_send_email_url = api_base_url
            .join("emails")
            .context("Failed to create send email endpoint URL")?;

        Ok(Self {
            client,
            sender: sender.into(),
            api_send_email_url,
            api_auth_token,
        })
    }

    /// Whether emails are actually delivered, rather than logged
    pub fn is_live(&self) -> bool {
        self.api_auth_token.is_some()
    }
}

#[async_trait]
impl Mailer for EmailClient {
    #[tracing::instrument(
        name = "Send an email via API",
        skip(self, email),
        fields(recipient = %email.recipient, subject = %email.subject)
    )]
    async fn send(&self, email: &Email) -> Result<Delivery> {
        let Some(api_auth_token) = &self.api_auth_token else {
            tracing::info!(
                "[simulated] email to {}: {}",
                email.recipient,
                email.subject
            );
            return Ok(Delivery::Simulated);
        };

        let body = email.as_request(&self.sender);

        let response: SendEmailResponse = self
            .client
            .post(self.api_send_email_url.clone())
            .bearer_auth(api_auth_token.expose_secret())
            .json(&body)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(Error::SendEmailError)?
            .json()
            .await
            .unwrap_or_default();

        tracing::info!(
            "Email sent to {}: {}",
            email.recipient,
            response.id.as_deref().unwrap_or("ok")
        );

        Ok(Delivery::Sent { id: response.id })
    }
}

#[derive(Debug, Clone)]
pub struct Email {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl Email {
    fn as_request<'e>(&'e self, sender: &'e str) -> SendEmailRequest<'e> {
        SendEmailRequest {
            from: sender,
            to: &self.recipient,
            subject: &self.subject,
            html: &self.html_body,
            text: &self.text_body,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}
