use actix_web::{web, HttpResponse};
use portal_shared::session::SessionClaims;

use crate::authentication::on_session_read;

pub async fn whoami(claims: web::ReqData<SessionClaims>) -> HttpResponse {
    HttpResponse::Ok().json(on_session_read(&claims))
}
