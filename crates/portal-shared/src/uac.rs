//! Shared items related to authorization: the role set carried in a session,
//! the record the permissions webhook answers with and the roles each
//! protected path requires

mod errors;
mod funcoes;
mod permission_record;
mod requirements;

pub use errors::{PermissionsError, WebhookPayloadError};
pub use funcoes::Funcoes;
pub use permission_record::PermissionRecord;
pub use requirements::FuncaoRequirements;
