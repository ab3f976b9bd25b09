//! Form login for HTTP pipelines.
//!
//! A [`FormAuthenticator`] decides, for each request, whether the caller is authenticated: an
//! identity already established by the [`AuthenticationService`], or credentials posted in the
//! request body and verified by it. Callers it cannot authenticate are redirected. The
//! [`AuthLayer`] plugs any [`AuthenticationStrategy`] into a tower stack.

mod authenticator;
mod error;
mod factory;
mod layer;
mod request;
mod service;
mod strategy;

pub use authenticator::{FormAuthenticator, FormAuthenticatorBuilder};
pub use error::Error;
pub use factory::{ResponseFactory, UserFactory, empty_response};
pub use layer::{AuthLayer, AuthService};
pub use request::{FormRequest, ParsedBody, ServerRequest, parse_body};
pub use service::{AuthenticationResult, AuthenticationService, CredentialAdapter, ResultCode};
pub use strategy::AuthenticationStrategy;

pub type Result<T> = std::result::Result<T, Error>;
