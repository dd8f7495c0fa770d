use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use chrono::{DateTime, Utc};
use portal_shared::session::SessionClaims;
use std::{
    collections::HashMap,
    future::{ready, Ready},
};
use tracing::info;

/// Largest serialized session state the cookie store accepts
pub const MAX_SESSION_STATE_BYTES: usize = 4064;

#[derive(thiserror::Error, Debug)]
pub enum ClaimsStorageError {
    #[error("session state would be {size} bytes, the cookie holds at most {MAX_SESSION_STATE_BYTES}")]
    TooLarge { size: usize },
    #[error("failed to serialize session state")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Insert(#[from] SessionInsertError),
}

pub struct TypedSession(Session);

impl TypedSession {
    const CLAIMS_KEY: &'static str = "claims";
    const OAUTH_STATE_KEY: &'static str = "oauth_state";
    const REQUESTED_TARGET_KEY: &'static str = "requested_target";

    pub fn renew(&self) {
        self.0.renew();
    }

    /// Stores the claims unless the resulting state would not fit in the
    /// session cookie. The session is left untouched on error
    pub fn insert_claims(&self, claims: &SessionClaims) -> Result<(), ClaimsStorageError> {
        let size = self.state_size_with(Self::CLAIMS_KEY, claims)?;
        if size > MAX_SESSION_STATE_BYTES {
            return Err(ClaimsStorageError::TooLarge { size });
        }
        self.0.insert(Self::CLAIMS_KEY, claims)?;
        Ok(())
    }

    /// Length of the state as the cookie store serializes it, once `value` is
    /// stored under `key`
    fn state_size_with<T: serde::Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<usize, serde_json::Error> {
        let mut state: HashMap<String, String> = HashMap::clone(&self.0.entries());
        state.insert(key.to_string(), serde_json::to_string(value)?);
        Ok(serde_json::to_string(&state)?.len())
    }

    pub fn get_claims(&self) -> Result<Option<SessionClaims>, SessionGetError> {
        self.0.get(Self::CLAIMS_KEY)
    }

    /// Returns the claims only while they are inside their validity window.
    /// Expired sessions are purged
    pub fn get_active_claims(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionClaims>, SessionGetError> {
        match self.get_claims()? {
            Some(claims) if claims.is_expired_at(now) => {
                info!(expires_at = %claims.expires_at, "session expired");
                self.0.purge();
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Records the values of an in-flight sign-in so the callback can check them
    pub fn insert_pending_sign_in(
        &self,
        oauth_state: &str,
        requested_target: Option<&str>,
    ) -> Result<(), SessionInsertError> {
        self.0.insert(Self::OAUTH_STATE_KEY, oauth_state)?;
        match requested_target {
            Some(target) => self.0.insert(Self::REQUESTED_TARGET_KEY, target)?,
            None => {
                self.0.remove(Self::REQUESTED_TARGET_KEY);
            }
        }
        Ok(())
    }

    /// Removes and returns the `(oauth_state, requested_target)` of the
    /// in-flight sign-in. The state is single use
    pub fn take_pending_sign_in(
        &self,
    ) -> Result<(Option<String>, Option<String>), SessionGetError> {
        let oauth_state = self.0.get::<String>(Self::OAUTH_STATE_KEY)?;
        let requested_target = self.0.get::<String>(Self::REQUESTED_TARGET_KEY)?;
        self.0.remove(Self::OAUTH_STATE_KEY);
        self.0.remove(Self::REQUESTED_TARGET_KEY);
        Ok((oauth_state, requested_target))
    }

    pub fn sign_out(self) {
        self.0.purge()
    }
}

impl FromRequest for TypedSession {
    type Error = <Session as FromRequest>::Error;
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
