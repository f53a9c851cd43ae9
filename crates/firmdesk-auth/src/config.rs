//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Optional pepper prepended to passwords before Argon2id
    /// verification (must match the pepper used when hashing).
    pub pepper: Option<String>,
    /// Session lifetime in seconds (default: 1_209_600 = 14 days).
    pub session_lifetime_secs: u64,
    /// Password-reset token lifetime in seconds (default: 3600).
    pub reset_token_lifetime_secs: u64,
    /// Server-side secret mixed into password-reset tokens.
    pub reset_secret: String,
    /// Base URL for reset links mailed to users.
    pub reset_link_base: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            pepper: None,
            session_lifetime_secs: 1_209_600,
            reset_token_lifetime_secs: 3600,
            reset_secret: "change-me".into(),
            reset_link_base: "http://localhost:8080/reset_password".into(),
        }
    }
}
