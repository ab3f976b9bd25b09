//! Form login: credentials posted in the request body, redirect on failure.

use std::collections::BTreeMap;

use axum::body::Body;
use config::AuthenticationConfig;
use http::{HeaderValue, Response, StatusCode, header::LOCATION};
use secrecy::SecretString;

use crate::{
    error::Error,
    factory::{ResponseFactory, UserFactory, empty_response},
    request::ServerRequest,
    service::{AuthenticationService, CredentialAdapter},
    strategy::AuthenticationStrategy,
};

/// Authenticates callers through a credential verification service.
///
/// A `POST` request always starts a fresh login with the credentials found in its body, even when
/// an identity is already established. Any other request is authenticated only if the service
/// already knows an identity. Unauthenticated callers are redirected to the configured location
/// with a `301 Moved Permanently`.
///
/// Users are built without roles or details: the service only reports an identity.
pub struct FormAuthenticator<S, U> {
    service: S,
    user_factory: U,
    response_factory: Box<dyn ResponseFactory>,
    redirect: HeaderValue,
    username_field: String,
    password_field: String,
}

impl<S, U> FormAuthenticator<S, U>
where
    S: AuthenticationService,
    U: UserFactory,
{
    pub fn builder(config: AuthenticationConfig) -> FormAuthenticatorBuilder<S, U> {
        FormAuthenticatorBuilder::new(config)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn initiate_authentication(&self, request: &dyn ServerRequest) -> Option<U::User> {
        let body = request.parsed_body();

        let (Some(identity), Some(credential)) = (body.get(&self.username_field), body.get(&self.password_field))
        else {
            log::debug!(
                username_field = self.username_field.as_str(),
                password_field = self.password_field.as_str();
                "Login request is missing credential fields"
            );
            return None;
        };

        let mut adapter = self.service.adapter();
        adapter.set_identity(identity.clone());
        adapter.set_credential(SecretString::from(credential.clone()));

        let result = self.service.authenticate(adapter);

        if !result.is_valid() {
            log::debug!(code:? = result.code(), messages:? = result.messages(); "Credential verification failed");
            return None;
        }

        let Some(identity) = result.into_identity() else {
            log::warn!("Credential verification succeeded without reporting an identity");
            return None;
        };

        log::debug!(identity:% = identity; "Credential verification succeeded");

        Some(self.user_factory.create_user(identity, Vec::new(), BTreeMap::new()))
    }
}

impl<S, U> AuthenticationStrategy for FormAuthenticator<S, U>
where
    S: AuthenticationService,
    U: UserFactory,
{
    type User = U::User;

    fn authenticate(&self, request: &dyn ServerRequest) -> Option<U::User> {
        if request.method().eq_ignore_ascii_case("POST") {
            return self.initiate_authentication(request);
        }

        if !self.service.has_identity() {
            log::debug!(method = request.method(); "No established identity");
            return None;
        }

        let identity = self.service.identity()?;

        Some(self.user_factory.create_user(identity, Vec::new(), BTreeMap::new()))
    }

    fn unauthorized_response(&self, _: &dyn ServerRequest) -> Response<Body> {
        let mut response = self.response_factory.create_response();

        response.headers_mut().insert(LOCATION, self.redirect.clone());
        *response.status_mut() = StatusCode::MOVED_PERMANENTLY;

        response
    }
}

/// Collects the collaborators of a [`FormAuthenticator`] and checks them before it is built.
pub struct FormAuthenticatorBuilder<S, U> {
    config: AuthenticationConfig,
    service: Option<S>,
    user_factory: Option<U>,
    response_factory: Option<Box<dyn ResponseFactory>>,
}

impl<S, U> FormAuthenticatorBuilder<S, U>
where
    S: AuthenticationService,
    U: UserFactory,
{
    pub fn new(config: AuthenticationConfig) -> Self {
        Self {
            config,
            service: None,
            user_factory: None,
            response_factory: None,
        }
    }

    pub fn service(mut self, service: S) -> Self {
        self.service = Some(service);
        self
    }

    pub fn user_factory(mut self, user_factory: U) -> Self {
        self.user_factory = Some(user_factory);
        self
    }

    /// Without a response factory, redirects are written into an empty response.
    pub fn response_factory(mut self, response_factory: impl ResponseFactory + 'static) -> Self {
        self.response_factory = Some(Box::new(response_factory));
        self
    }

    pub fn build(self) -> crate::Result<FormAuthenticator<S, U>> {
        let Some(service) = self.service else {
            return Err(Error::MissingAuthenticationService);
        };

        let Some(redirect) = self.config.redirect.as_deref() else {
            return Err(Error::MissingRedirect);
        };

        let redirect = HeaderValue::from_str(redirect).map_err(|_| Error::InvalidRedirect(redirect.to_string()))?;

        let Some(user_factory) = self.user_factory else {
            return Err(Error::MissingUserFactory);
        };

        let response_factory = self
            .response_factory
            .unwrap_or_else(|| Box::new(empty_response as fn() -> Response<Body>));

        Ok(FormAuthenticator {
            service,
            user_factory,
            response_factory,
            redirect,
            username_field: self.config.username_field().to_string(),
            password_field: self.config.password_field().to_string(),
        })
    }
}
