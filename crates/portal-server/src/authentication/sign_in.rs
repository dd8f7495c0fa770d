use chrono::{DateTime, Utc};
use portal_shared::{
    session::{SessionClaims, SessionView},
    uac::PermissionRecord,
};
use tracing::{info, warn};

use super::{IdentityAccount, IdentityUser, PermissionsClient};

/// Builds the claims for a freshly completed identity-provider handshake.
///
/// Never fails: if the user has no email, or the permissions webhook cannot
/// produce a record, the session is issued with `is_admin = false` and no
/// funcoes. Authorization degrades, sign-in does not.
#[tracing::instrument(skip_all, fields(email = tracing::field::Empty))]
pub async fn on_sign_in(
    account: IdentityAccount,
    user: IdentityUser,
    permissions: &PermissionsClient,
    now: DateTime<Utc>,
    ttl: chrono::Duration,
) -> SessionClaims {
    let IdentityUser { email, name } = user;
    let email = email.filter(|x| !x.trim().is_empty());
    let record = match email.as_deref() {
        Some(email) => {
            tracing::Span::current().record("email", email);
            fetch_permissions(permissions, email).await
        }
        None => {
            warn!("identity provider returned no email, signing in without permissions");
            PermissionRecord::default()
        }
    };
    SessionClaims::new(email, name, account.access_token, record, now, ttl)
}

async fn fetch_permissions(permissions: &PermissionsClient, email: &str) -> PermissionRecord {
    info!("looking up permissions");
    match permissions.fetch(email).await {
        Ok(record) => {
            info!(
                is_admin = record.is_admin,
                funcoes_count = record.funcoes.len(),
                "permissions attached to session"
            );
            record
        }
        Err(e) => {
            warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "permission lookup failed, signing in without permissions"
            );
            PermissionRecord::default()
        }
    }
}

/// Claims the rest of the application may read from a session
pub fn on_session_read(claims: &SessionClaims) -> SessionView {
    claims.view()
}
