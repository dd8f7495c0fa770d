use crate::error_wrappers::e500;
use crate::session_state::TypedSession;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, FromRequest, HttpMessage,
};
use portal_shared::{errors::NotLoggedInError, uac::FuncaoRequirements};
use tracing::info;

/// Ensures the user holds a live session and the funcoes registered for the
/// path. The claims are then attached to the request so handlers receive them
/// as `web::ReqData<SessionClaims>`
#[tracing::instrument(skip(next))]
pub async fn validate_user_access(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    match session
        .get_active_claims(chrono::Utc::now())
        .map_err(e500)?
    {
        Some(claims) => {
            let requirements = req
                .app_data::<web::Data<FuncaoRequirements>>()
                .ok_or_else(|| e500("funcao requirements were not registered"))?;
            requirements.check(req.path(), &claims.funcoes)?;
            info!("Validated request for {:?}", claims.email);
            req.extensions_mut().insert(claims);
            next.call(req).await
        }
        None => Err(NotLoggedInError.into()),
    }
}
