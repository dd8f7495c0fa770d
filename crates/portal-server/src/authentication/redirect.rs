use portal_shared::const_config::auth::ERROR_CODE_QUERY_KEY;

/// Decides where the browser goes once the sign-in handshake finishes
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    landing_path: String,
    error_path: String,
}

impl RedirectPolicy {
    pub fn new(landing_path: impl Into<String>, error_path: impl Into<String>) -> Self {
        Self {
            landing_path: landing_path.into(),
            error_path: error_path.into(),
        }
    }

    /// Post-login destination. Deep links requested before signing in are not
    /// honoured, every pair of inputs collapses to the landing route
    #[tracing::instrument(ret, skip(self))]
    pub fn on_redirect(&self, _target: Option<&str>, _origin: &str) -> &str {
        &self.landing_path
    }

    /// Page shown for a failed sign-in, asking the user to sign in again
    pub fn error_location(&self, code: &str) -> String {
        let separator = if self.error_path.contains('?') { '&' } else { '?' };
        format!("{}{separator}{ERROR_CODE_QUERY_KEY}={code}", self.error_path)
    }
}
