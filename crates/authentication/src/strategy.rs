use axum::body::Body;
use http::Response;

use crate::request::ServerRequest;

/// A way of deciding who is calling, shared by every authenticator the pipeline can host.
pub trait AuthenticationStrategy: Send + Sync {
    /// The principal attached to the request on success.
    type User;

    /// Returns the caller, or `None` when the request is not authenticated.
    fn authenticate(&self, request: &dyn ServerRequest) -> Option<Self::User>;

    /// The response sent instead of calling the protected service.
    fn unauthorized_response(&self, request: &dyn ServerRequest) -> Response<Body>;
}
