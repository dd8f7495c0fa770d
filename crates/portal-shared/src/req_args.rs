//! Query arguments accepted by the sign-in routes

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SignInReqArgs {
    /// Page the browser asked for before signing in. Accepted for
    /// compatibility, every sign-in lands on the same page
    #[serde(rename = "callbackUrl", default)]
    pub callback_url: Option<String>,
}

/// What the identity provider appends to the redirect URI
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CallbackReqArgs {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}
