use crate::session_state::TypedSession;
use actix_web::{web, HttpResponse};
use portal_shared::session::SessionClaims;
use tracing::info;

/// Ends the session. Reached only through the access middleware so the claims
/// are always present
#[tracing::instrument(skip_all)]
pub async fn sign_out(
    session: TypedSession,
    claims: web::ReqData<SessionClaims>,
) -> actix_web::Result<HttpResponse> {
    info!(email = ?claims.email, "signing out");
    session.sign_out();
    Ok(HttpResponse::Ok().finish())
}
