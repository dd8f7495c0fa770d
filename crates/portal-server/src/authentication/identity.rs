use anyhow::Context as _;
use portal_shared::{
    const_config::path::PATH_AUTH_CALLBACK, req_args::CallbackReqArgs, session::AccessToken,
};
use secrecy::{ExposeSecret as _, SecretString};
use std::fmt::Display;
use url::Url;

use crate::configuration::IdentityProviderSettings;

/// Credential bundle returned by the token endpoint
#[derive(Debug, Clone, serde::Deserialize)]
pub struct IdentityAccount {
    pub access_token: AccessToken,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Profile returned by the userinfo endpoint
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct IdentityUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityOperation {
    TokenExchange,
    UserInfo,
}

impl Display for IdentityOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityOperation::TokenExchange => write!(f, "token exchange"),
            IdentityOperation::UserInfo => write!(f, "userinfo request"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    #[error("identity provider returned '{error}': {description}")]
    Provider { error: String, description: String },
    #[error("callback state does not match the one issued at sign-in")]
    StateMismatch,
    #[error("callback did not include an authorization code")]
    MissingCode,
    #[error("{operation} failed with status {status}: {detail}")]
    Endpoint {
        operation: IdentityOperation,
        status: u16,
        detail: String,
    },
    #[error("{operation} could not be completed")]
    Http {
        operation: IdentityOperation,
        #[source]
        source: reqwest::Error,
    },
}

impl IdentityError {
    /// Short code passed to the error page
    pub fn code(&self) -> &'static str {
        match self {
            IdentityError::Provider { .. } => "provider_error",
            IdentityError::StateMismatch => "state_mismatch",
            IdentityError::MissingCode => "missing_code",
            IdentityError::Endpoint { operation, .. } | IdentityError::Http { operation, .. } => {
                match operation {
                    IdentityOperation::TokenExchange => "token_exchange_failed",
                    IdentityOperation::UserInfo => "userinfo_failed",
                }
            }
        }
    }
}

/// OAuth2 authorization-code client for the identity provider
pub struct IdentityClient {
    client_id: String,
    client_secret: SecretString,
    authorize_url: Url,
    token_url: Url,
    userinfo_url: Url,
    redirect_uri: Url,
    scopes: Vec<String>,
    http: reqwest::Client,
}

impl IdentityClient {
    pub fn new(settings: &IdentityProviderSettings, base_url: &str) -> anyhow::Result<Self> {
        let parse = |name: &str, value: &str| {
            Url::parse(value).with_context(|| format!("invalid {name}: {value:?}"))
        };
        let redirect_uri = parse("base_url", base_url)?
            .join(PATH_AUTH_CALLBACK.path)
            .context("failed to build redirect uri")?;
        Ok(Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            authorize_url: parse("authorize_url", &settings.authorize_url)?,
            token_url: parse("token_url", &settings.token_url)?,
            userinfo_url: parse("userinfo_url", &settings.userinfo_url)?,
            redirect_uri,
            scopes: settings.scopes.clone(),
            http: reqwest::Client::new(),
        })
    }

    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    /// Where to send the browser to start a sign-in carrying `state`
    pub fn authorization_url(&self, state: &str) -> Url {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_uri.as_str())
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", state);
        url
    }

    /// Validates the callback and exchanges its code for the account and the
    /// user's profile. No network call is made unless the callback checks pass
    #[tracing::instrument(skip_all, err(Debug))]
    pub async fn complete_handshake(
        &self,
        args: CallbackReqArgs,
        expected_state: Option<String>,
    ) -> Result<(IdentityAccount, IdentityUser), IdentityError> {
        if let Some(error) = args.error {
            return Err(IdentityError::Provider {
                error,
                description: args.error_description.unwrap_or_default(),
            });
        }
        match (args.state, expected_state) {
            (Some(received), Some(expected)) if received == expected => {}
            _ => return Err(IdentityError::StateMismatch),
        }
        let code = args.code.ok_or(IdentityError::MissingCode)?;
        let account = self.exchange_code(&code).await?;
        let user = self.fetch_user(&account).await?;
        Ok((account, user))
    }

    #[tracing::instrument(skip_all, err(Debug))]
    pub async fn exchange_code(&self, code: &str) -> Result<IdentityAccount, IdentityError> {
        let operation = IdentityOperation::TokenExchange;
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ];
        let response = self
            .http
            .post(self.token_url.clone())
            .form(&params)
            .send()
            .await
            .map_err(|source| IdentityError::Http { operation, source })?;
        let response = ensure_success(response, operation).await?;
        response
            .json::<IdentityAccount>()
            .await
            .map_err(|source| IdentityError::Http { operation, source })
    }

    #[tracing::instrument(skip_all, err(Debug))]
    pub async fn fetch_user(
        &self,
        account: &IdentityAccount,
    ) -> Result<IdentityUser, IdentityError> {
        let operation = IdentityOperation::UserInfo;
        let response = self
            .http
            .get(self.userinfo_url.clone())
            .bearer_auth(account.access_token.expose())
            .send()
            .await
            .map_err(|source| IdentityError::Http { operation, source })?;
        let response = ensure_success(response, operation).await?;
        response
            .json::<IdentityUser>()
            .await
            .map_err(|source| IdentityError::Http { operation, source })
    }
}

async fn ensure_success(
    response: reqwest::Response,
    operation: IdentityOperation,
) -> Result<reqwest::Response, IdentityError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let detail = response.text().await.unwrap_or_default();
    Err(IdentityError::Endpoint {
        operation,
        status,
        detail,
    })
}
