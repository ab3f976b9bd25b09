//! Form login configuration.

use serde::Deserialize;

/// Request body field holding the identifier when none is configured.
pub const DEFAULT_USERNAME_FIELD: &str = "username";

/// Request body field holding the secret when none is configured.
pub const DEFAULT_PASSWORD_FIELD: &str = "password";

/// Settings for the form login authenticator.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticationConfig {
    /// Where unauthenticated callers are redirected. Required to build an authenticator.
    pub redirect: Option<String>,
    /// Name of the body field holding the identifier.
    pub username: Option<String>,
    /// Name of the body field holding the secret.
    pub password: Option<String>,
}

impl AuthenticationConfig {
    /// The body field to read the identifier from.
    pub fn username_field(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME_FIELD)
    }

    /// The body field to read the secret from.
    pub fn password_field(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_PASSWORD_FIELD)
    }
}
