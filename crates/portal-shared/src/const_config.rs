//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod auth {
    /// Length of the random `state` sent to the identity provider
    pub const OAUTH_STATE_LEN: usize = 32;
    pub const ERROR_CODE_QUERY_KEY: &str = "error";
    /// Error code for a sign-in whose claims do not fit in the session cookie
    pub const SESSION_TOO_LARGE_ERROR_CODE: &str = "session_too_large";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_API_PREFIX: &str = "/api"; // All routes behind the access middleware start with this prefix
    pub const PATH_API_SIGN_OUT: PathSpec = PathSpec::post("/api/signout");
    pub const PATH_API_WHOAMI: PathSpec = PathSpec::get("/api/whoami");
    pub const PATH_AUTH_CALLBACK: PathSpec = PathSpec::get("/auth/callback");
    pub const PATH_AUTH_SESSION: PathSpec = PathSpec::get("/auth/session");
    pub const PATH_AUTH_SIGN_IN: PathSpec = PathSpec::get("/auth/signin");
    pub const PATH_HEALTH_CHECK: PathSpec = PathSpec::get("/health_check");
    pub const PATH_VERSION: PathSpec = PathSpec::get("/version");
}
