use crate::{
    authentication::{
        on_session_read, on_sign_in, BaseUrl, IdentityClient, PermissionsClient, RedirectPolicy,
        SessionTtl,
    },
    error_wrappers::e500,
    routes::see_other,
    session_state::{ClaimsStorageError, TypedSession},
};
use actix_web::{web, HttpResponse};
use anyhow::Context;
use portal_shared::{
    const_config::auth::SESSION_TOO_LARGE_ERROR_CODE,
    random::random_oauth_state,
    req_args::{CallbackReqArgs, SignInReqArgs},
};
use tracing::{info, warn};

/// Starts a sign-in by sending the browser to the identity provider
#[tracing::instrument(skip(session, identity))]
pub async fn sign_in(
    web::Query(req_args): web::Query<SignInReqArgs>,
    session: TypedSession,
    identity: web::Data<IdentityClient>,
) -> actix_web::Result<HttpResponse> {
    let state = random_oauth_state();
    session
        .insert_pending_sign_in(&state, req_args.callback_url.as_deref())
        .context("failed to store sign-in state")
        .map_err(e500)?;
    Ok(see_other(identity.authorization_url(&state).as_str()))
}

/// Redirect target of the identity provider.
///
/// Identity failures send the browser to the error page without creating a
/// session. Once the handshake succeeds the user is signed in whatever the
/// permissions webhook does
#[tracing::instrument(
    skip_all,
    fields(email = tracing::field::Empty)
)]
pub async fn callback(
    web::Query(req_args): web::Query<CallbackReqArgs>,
    session: TypedSession,
    identity: web::Data<IdentityClient>,
    permissions: web::Data<PermissionsClient>,
    redirect: web::Data<RedirectPolicy>,
    session_ttl: web::Data<SessionTtl>,
    base_url: web::Data<BaseUrl>,
) -> actix_web::Result<HttpResponse> {
    let (expected_state, requested_target) = session.take_pending_sign_in().map_err(e500)?;
    let (account, user) = match identity
        .complete_handshake(req_args, expected_state)
        .await
    {
        Ok(x) => x,
        Err(e) => {
            warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "sign-in rejected"
            );
            return Ok(see_other(&redirect.error_location(e.code())));
        }
    };
    if let Some(email) = user.email.as_deref() {
        tracing::Span::current().record("email", email);
    }

    let claims = on_sign_in(
        account,
        user,
        &permissions,
        chrono::Utc::now(),
        session_ttl.0,
    )
    .await;
    match session.insert_claims(&claims) {
        Ok(()) => {}
        Err(ClaimsStorageError::TooLarge { size }) => {
            warn!(size, "claims do not fit in the session cookie");
            return Ok(see_other(
                &redirect.error_location(SESSION_TOO_LARGE_ERROR_CODE),
            ));
        }
        Err(e) => return Err(e500(e)),
    }
    session.renew();
    info!(
        is_admin = claims.is_admin,
        funcoes_count = claims.funcoes.len(),
        "signed in"
    );
    Ok(see_other(
        redirect.on_redirect(requested_target.as_deref(), &base_url.0),
    ))
}

/// The claims of the current session, `null` when signed out or expired
#[tracing::instrument(skip_all)]
pub async fn session(session: TypedSession) -> actix_web::Result<HttpResponse> {
    let claims = session
        .get_active_claims(chrono::Utc::now())
        .map_err(e500)?;
    Ok(HttpResponse::Ok().json(claims.as_ref().map(on_session_read)))
}
