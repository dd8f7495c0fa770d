use rand::distributions::DistString as _;

pub fn random_string(len: usize) -> String {
    rand::distributions::Alphanumeric.sample_string(&mut rand::thread_rng(), len)
}

/// Value used for the OAuth `state` parameter of a sign-in attempt
pub fn random_oauth_state() -> String {
    random_string(crate::const_config::auth::OAUTH_STATE_LEN)
}
