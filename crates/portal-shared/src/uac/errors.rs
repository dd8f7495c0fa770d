#[derive(thiserror::Error, Debug)]
pub enum PermissionsError {
    #[error("the following funcoes are missing to access this endpoint: {0:?}")]
    MissingFuncoes(Vec<String>),
    #[error("unable to find required funcoes for this path '{0}'")]
    PathNotFound(String),
}

/// Reasons a permissions webhook body could not be turned into a record
#[derive(thiserror::Error, Debug)]
pub enum WebhookPayloadError {
    #[error("permission webhook returned an empty array")]
    EmptyArray,
    #[error("permission webhook body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("permission webhook body does not have the expected shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),
}

#[cfg(not(target_arch = "wasm32"))]
pub mod conversions {
    use super::*;
    use actix_web::http::StatusCode;

    impl actix_web::error::ResponseError for PermissionsError {
        fn status_code(&self) -> StatusCode {
            match self {
                PermissionsError::MissingFuncoes(_) => StatusCode::FORBIDDEN,
                PermissionsError::PathNotFound(_) => StatusCode::SERVICE_UNAVAILABLE,
            }
        }
    }
}
