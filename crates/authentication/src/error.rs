/// Reasons an authenticator cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The authentication service is missing")]
    MissingAuthenticationService,

    #[error("The redirect URL is missing for authentication")]
    MissingRedirect,

    #[error("The redirect URL for authentication is not a valid Location header value: {0:?}")]
    InvalidRedirect(String),

    #[error("The user factory is missing for authentication")]
    MissingUserFactory,
}
