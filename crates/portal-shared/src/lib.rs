//! Code shared between the portal server and the routes that consume its
//! session claims

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
pub mod random;
pub mod req_args;
pub mod session;
pub mod uac;

pub use random::random_string;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
