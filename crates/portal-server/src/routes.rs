mod auth;
mod health_check;
mod sign_out;
mod whoami;

use actix_web::{http::header, HttpRequest, HttpResponse};
pub use auth::{callback, session, sign_in};
pub use health_check::health_check;
pub use sign_out::sign_out;
pub use whoami::whoami;

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[tracing::instrument]
pub async fn not_found(req: HttpRequest) -> actix_web::Result<HttpResponse> {
    tracing::error!("Failed to match route");
    Ok(HttpResponse::NotFound().body(format!(
        "404 - {} to '{}' Not found\n",
        req.method(),
        req.path()
    )))
}
