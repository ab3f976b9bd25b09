use std::collections::BTreeMap;

use serde::Serialize;

use crate::Identity;

/// The authenticated principal attached to a request after login.
///
/// Handlers read it from the request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// The verified identity
    pub identity: Identity,
    /// Roles granted to the identity (e.g., "admin", "editor")
    pub roles: Vec<String>,
    /// Free-form details about the principal (e.g., display name, email)
    pub details: BTreeMap<String, String>,
}

impl AuthenticatedUser {
    /// Builds a user from its parts. The signature matches what a user factory receives, so this
    /// function can be handed to the authenticator as is.
    pub fn from_parts(identity: Identity, roles: Vec<String>, details: BTreeMap<String, String>) -> Self {
        Self {
            identity,
            roles,
            details,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn detail(&self, name: &str) -> Option<&str> {
        self.details.get(name).map(String::as_str)
    }
}
