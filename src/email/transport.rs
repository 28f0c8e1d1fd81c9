use crate::config::EmailConfig;
use crate::error::{config_error, transport_error, DashResult, Error};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

/// Sender name shown in the delivered email
pub const FROM_NAME: &str = "Daily Prep Assistant";

/// The three opaque EmailJS credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailCredentials {
    /// Credentials from config. Any missing value is a configuration error,
    /// reported with the names of every missing variable.
    pub fn from_config(config: &EmailConfig) -> DashResult<Self> {
        let mut missing = Vec::new();
        if config.service_id.is_none() {
            missing.push("EMAILJS_SERVICE_ID");
        }
        if config.template_id.is_none() {
            missing.push("EMAILJS_TEMPLATE_ID");
        }
        if config.public_key.is_none() {
            missing.push("EMAILJS_PUBLIC_KEY");
        }

        match (&config.service_id, &config.template_id, &config.public_key) {
            (Some(service_id), Some(template_id), Some(public_key)) => Ok(Self {
                service_id: service_id.clone(),
                template_id: template_id.clone(),
                public_key: public_key.clone(),
            }),
            _ => Err(Error::EmailNotConfigured(format!(
                "missing {}",
                missing.join(", ")
            ))),
        }
    }
}

/// One message ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Outbound transactional email call
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, credentials: &EmailCredentials, email: &OutgoingEmail) -> DashResult<()>;
}

/// EmailJS REST transport
#[derive(Debug, Clone)]
pub struct EmailJsTransport {
    client: Client,
    endpoint: Url,
}

impl EmailJsTransport {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.emailjs.com/api/v1.0/email/send";

    pub fn new() -> DashResult<Self> {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT)
    }

    /// Transport posting to a custom endpoint
    pub fn with_endpoint(endpoint: &str) -> DashResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| config_error(&format!("Invalid EmailJS endpoint {}: {}", endpoint, e)))?;

        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl EmailTransport for EmailJsTransport {
    async fn send(&self, credentials: &EmailCredentials, email: &OutgoingEmail) -> DashResult<()> {
        let payload = json!({
            "service_id": credentials.service_id,
            "template_id": credentials.template_id,
            "user_id": credentials.public_key,
            "template_params": {
                "to_email": email.to_email,
                "summary_content": email.body,
                "from_name": FROM_NAME,
                "subject": email.subject,
            },
        });

        debug!("Posting summary email to {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(&format!("Failed to send email: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(transport_error(&format!(
                "Failed to send email: HTTP {} - {}",
                status, error_body
            )));
        }

        info!("Summary email accepted for {}", email.to_email);
        Ok(())
    }
}
