//! Claims carried by a signed-in session

use chrono::{DateTime, Duration, Utc};

use crate::uac::{Funcoes, PermissionRecord};

/// Access token issued by the identity provider. Only kept so collaborators
/// can call the provider on the user's behalf, never printed
#[derive(serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Everything the session cookie holds.
///
/// Built once at sign-in and never modified afterwards. The authorization
/// snapshot (`is_admin` and `funcoes`) is therefore only as fresh as the last
/// sign-in
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub email: Option<String>,
    pub name: Option<String>,
    pub access_token: AccessToken,
    pub is_admin: bool,
    pub funcoes: Funcoes,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    pub fn new(
        email: Option<String>,
        name: Option<String>,
        access_token: AccessToken,
        permissions: PermissionRecord,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        // Destructured so both authorization fields always come from the same record
        let PermissionRecord { is_admin, funcoes } = permissions;
        Self {
            email,
            name,
            access_token,
            is_admin,
            funcoes,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn has_funcao(&self, funcao: &str) -> bool {
        self.funcoes.contains(funcao)
    }

    /// Projection exposed to the browser and to collaborators
    pub fn view(&self) -> SessionView {
        SessionView {
            email: self.email.clone(),
            name: self.name.clone(),
            is_admin: self.is_admin,
            funcoes: self.funcoes.clone(),
        }
    }
}

/// The claims consumers are allowed to rely on
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_admin: bool,
    pub funcoes: Funcoes,
}
