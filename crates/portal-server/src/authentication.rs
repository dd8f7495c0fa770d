//! Sign-in through the identity provider and the permission snapshot attached
//! to the resulting session

mod identity;
mod middleware;
mod permissions;
mod redirect;
mod sign_in;

pub use identity::{IdentityAccount, IdentityClient, IdentityError, IdentityOperation, IdentityUser};
pub use middleware::validate_user_access;
pub use permissions::{PermissionFetchError, PermissionsClient};
pub use redirect::RedirectPolicy;
pub use sign_in::{on_session_read, on_sign_in};

#[derive(Debug, Clone, Copy)]
pub struct SessionTtl(pub chrono::Duration);

/// Public address of the portal, the `origin` of post-login redirects
#[derive(Debug, Clone)]
pub struct BaseUrl(pub String);
