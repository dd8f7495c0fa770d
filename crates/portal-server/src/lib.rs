//! Portal server: signs users in through the identity provider and attaches a
//! permission snapshot to their session
//!
//! # Notable design decisions (notes)
//! Using this area to document important design decisions made for ease of
//! reference and discoverability
//! - The session cookie is the whole session. It is encrypted and
//!   authenticated with `application.hmac_secret` and nothing is stored server
//!   side, so signing out only clears the browser's copy.
//! - `is_admin` and `funcoes` are fetched once during the sign-in callback and
//!   are not refreshed for the lifetime of the session. Changes made in the
//!   permissions service take effect at the next sign-in.
//! - A failing permissions webhook never blocks sign-in. The session is issued
//!   with `is_admin = false` and no funcoes and the failure is only logged.
//! - The permissions webhook has no timeout unless
//!   `permissions_webhook.timeout_secs` is set, so its latency adds directly to
//!   the sign-in callback.
//! - Every successful sign-in lands on `application.landing_path`, the page
//!   requested before signing in is ignored.
//! - Paths under `/api` go through [`authentication::validate_user_access`]
//!   and must be registered in [`portal_shared::uac::FuncaoRequirements`]
//!   even if they require no funcoes, otherwise they answer 503.

#![warn(unused_crate_dependencies)]

mod warning_suppress {
    use tokio as _; // Only used by the binary
}


pub mod authentication;
mod configuration;
mod error_wrappers;
pub mod routes;
pub mod session_state;
pub mod startup;

pub use configuration::{
    get_configuration, ApplicationSettings, Configuration, IdentityProviderSettings,
    PermissionsWebhookSettings, SessionSettings,
};
pub use startup::{
    get_socket_address, initialize_tracing, no_routes, ApiServerBuilder, RunnableApiServer,
};
