use anyhow::Context as _;
use portal_shared::uac::{PermissionRecord, WebhookPayloadError};
use std::time::Duration;
use url::Url;

use crate::configuration::PermissionsWebhookSettings;

#[derive(thiserror::Error, Debug)]
pub enum PermissionFetchError {
    #[error("permission webhook could not be reached")]
    Network(#[from] reqwest::Error),
    #[error("permission webhook answered with status {0}")]
    Status(u16),
    #[error(transparent)]
    Payload(#[from] WebhookPayloadError),
}

#[derive(serde::Serialize)]
struct PermissionReqArgs<'a> {
    email: &'a str,
}

/// Client for the webhook that resolves a user's `is_admin` flag and funcoes
pub struct PermissionsClient {
    url: Url,
    http: reqwest::Client,
}

impl PermissionsClient {
    pub fn new(settings: &PermissionsWebhookSettings) -> anyhow::Result<Self> {
        let url = Url::parse(&settings.url)
            .with_context(|| format!("invalid permissions webhook url: {:?}", settings.url))?;
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .context("failed to build permissions webhook client")?;
        Ok(Self { url, http })
    }

    /// Single attempt, no retry
    #[tracing::instrument(skip(self), err(Debug))]
    pub async fn fetch(&self, email: &str) -> Result<PermissionRecord, PermissionFetchError> {
        let response = self
            .http
            .post(self.url.clone())
            .json(&PermissionReqArgs { email })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PermissionFetchError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        Ok(PermissionRecord::from_webhook_body(&body)?)
    }
}
