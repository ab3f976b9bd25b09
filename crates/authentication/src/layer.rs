use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::body::{Body, Bytes};
use http::{Request, Response};
use http_body_util::{BodyExt, Limited};
use tower::Layer;

use crate::{
    request::{FormRequest, ServerRequest, parse_body},
    strategy::AuthenticationStrategy,
};

/// Login forms are small; anything above this is not read and authenticates nobody.
const MAX_LOGIN_BODY_SIZE: usize = 64 * 1024;

/// Puts an authentication strategy in front of a service.
///
/// Authenticated requests reach the inner service with the user in their extensions. Other
/// requests get the strategy's unauthorized response and never reach the inner service.
pub struct AuthLayer<A>(Arc<A>);

impl<A> AuthLayer<A> {
    pub fn new(strategy: A) -> Self {
        Self(Arc::new(strategy))
    }
}

impl<A> Clone for AuthLayer<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A, Service> Layer<Service> for AuthLayer<A>
where
    Service: Send + Clone,
{
    type Service = AuthService<A, Service>;

    fn layer(&self, next: Service) -> Self::Service {
        AuthService {
            next,
            strategy: self.0.clone(),
        }
    }
}

pub struct AuthService<A, Service> {
    next: Service,
    strategy: Arc<A>,
}

impl<A, Service: Clone> Clone for AuthService<A, Service> {
    fn clone(&self) -> Self {
        Self {
            next: self.next.clone(),
            strategy: self.strategy.clone(),
        }
    }
}

impl<A, Service> tower::Service<Request<Body>> for AuthService<A, Service>
where
    A: AuthenticationStrategy + 'static,
    A::User: Clone + Send + Sync + 'static,
    Service: tower::Service<Request<Body>, Response = Response<Body>> + Send + Clone + 'static,
    Service::Future: Send,
{
    type Response = Response<Body>;
    type Error = Service::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Body>, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.next.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut next = self.next.clone();
        let strategy = self.strategy.clone();

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();
            let method = parts.method.as_str();

            // Only a login reads the body, everything else streams through untouched.
            let (request, body) = if method.eq_ignore_ascii_case("POST") {
                let bytes = read_body(body).await;
                let fields = parse_body(&parts.headers, &bytes);

                (FormRequest::new(method).with_body(fields), Body::from(bytes))
            } else {
                (FormRequest::new(method), body)
            };

            match strategy.authenticate(&request) {
                Some(user) => {
                    parts.extensions.insert(user);
                    next.call(Request::from_parts(parts, body)).await
                }
                None => {
                    log::debug!(method = request.method(), path = parts.uri.path(); "Request is not authenticated");
                    Ok(strategy.unauthorized_response(&request))
                }
            }
        })
    }
}

async fn read_body(body: Body) -> Bytes {
    match Limited::new(body, MAX_LOGIN_BODY_SIZE).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            log::debug!("Failed to read login request body: {err}");
            Bytes::new()
        }
    }
}
