use super::{Funcoes, WebhookPayloadError};

/// Authorization attributes returned by the permissions webhook.
///
/// Missing fields default (`is_admin = false`, no funcoes) and the default
/// value is what a session gets whenever the webhook cannot be used
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PermissionRecord {
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub funcoes: Funcoes,
}

impl PermissionRecord {
    /// Decodes a webhook response body.
    ///
    /// The webhook may answer with the record itself or with an array wrapping
    /// it, in which case the first element is used
    pub fn from_webhook_body(body: &[u8]) -> Result<Self, WebhookPayloadError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(WebhookPayloadError::InvalidJson)?;
        let value = match value {
            serde_json::Value::Array(elements) => elements
                .into_iter()
                .next()
                .ok_or(WebhookPayloadError::EmptyArray)?,
            other => other,
        };
        serde_json::from_value(value).map_err(WebhookPayloadError::UnexpectedShape)
    }
}
