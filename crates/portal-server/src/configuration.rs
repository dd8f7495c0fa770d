use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::convert::{TryFrom, TryInto};

#[derive(serde::Deserialize, Clone)]
pub struct Configuration {
    pub application: ApplicationSettings,
    pub identity_provider: IdentityProviderSettings,
    pub permissions_webhook: PermissionsWebhookSettings,
    pub session: SessionSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Public address of the portal, used to build the OAuth redirect URI
    pub base_url: String,
    pub hmac_secret: SecretString,
    /// Where every successful sign-in lands
    pub landing_path: String,
    /// Where failed sign-ins are sent (with an `error` query parameter)
    pub error_path: String,
    pub cookie_secure: bool,
}

#[derive(serde::Deserialize, Clone)]
pub struct IdentityProviderSettings {
    pub client_id: String,
    pub client_secret: SecretString,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct PermissionsWebhookSettings {
    pub url: String,
    /// Absent means the permission lookup may delay sign-in indefinitely
    pub timeout_secs: Option<u64>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SessionSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub ttl_secs: u32,
    pub cookie_name: String,
}

impl SessionSettings {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs.into())
    }

    pub fn cookie_ttl(&self) -> actix_web::cookie::time::Duration {
        actix_web::cookie::time::Duration::seconds(self.ttl_secs.into())
    }
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    let base_path = std::env::current_dir().expect("failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.toml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_PERMISSIONS_WEBHOOK__URL=http://...` would set `Settings.permissions_webhook.url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Configuration>()
}

/// The possible runtime environment for our application.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
