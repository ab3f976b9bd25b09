use std::collections::BTreeMap;

use axum::body::Body;
use context::Identity;
use http::Response;

/// Builds the user handed to the pipeline from a verified identity.
///
/// Any `Fn(Identity, Vec<String>, BTreeMap<String, String>) -> User` is a user factory, so
/// [`context::AuthenticatedUser::from_parts`] can be used directly.
pub trait UserFactory: Send + Sync {
    type User;

    fn create_user(&self, identity: Identity, roles: Vec<String>, details: BTreeMap<String, String>) -> Self::User;
}

impl<F, T> UserFactory for F
where
    F: Fn(Identity, Vec<String>, BTreeMap<String, String>) -> T + Send + Sync,
{
    type User = T;

    fn create_user(&self, identity: Identity, roles: Vec<String>, details: BTreeMap<String, String>) -> T {
        self(identity, roles, details)
    }
}

/// Produces the blank response the unauthorized redirect is written into.
pub trait ResponseFactory: Send + Sync {
    fn create_response(&self) -> Response<Body>;
}

impl<F> ResponseFactory for F
where
    F: Fn() -> Response<Body> + Send + Sync,
{
    fn create_response(&self) -> Response<Body> {
        self()
    }
}

/// An empty `200 OK`, used when no response factory is configured.
pub fn empty_response() -> Response<Body> {
    Response::new(Body::empty())
}
