mod accounts;

use std::{collections::BTreeMap, net::SocketAddr, str::FromStr, sync::Arc};

use authentication::{AuthLayer, FormAuthenticator};
use axum::{
    Extension, Json, Router,
    response::Html,
    routing::{get, post},
};
use config::Config;
use context::{AuthenticatedUser, Identity};
use logforth::{append::Stderr, filter::EnvFilter};
use reqwest::redirect::Policy;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use accounts::{MemoryAccounts, SubmittedCredentials};

const DEFAULT_LOG_FILTER: &str = "authentication=debug,config=debug,integration_tests=debug";

#[ctor::ctor]
fn init_logger() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    logforth::builder()
        .dispatch(move |d| {
            let filter = EnvFilter::from_str(&filter)
                .unwrap_or_else(|_| EnvFilter::from_str("info").expect("default filter should be valid"));

            d.filter(filter).append(Stderr::default())
        })
        .apply();
}

type UserFn = fn(Identity, Vec<String>, BTreeMap<String, String>) -> AuthenticatedUser;

/// Test client for making HTTP requests to the test server. Redirects are never followed.
#[derive(Clone)]
pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to create test client");

        Self { base_url, client }
    }

    /// Send a GET request to the given path
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.request(reqwest::Method::GET, path).send().await.unwrap()
    }

    /// Send a POST request with a URL-encoded form body
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.request(reqwest::Method::POST, path)
            .form(fields)
            .send()
            .await
            .unwrap()
    }

    /// Send a POST request with a JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// Create a request with the given method and path
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }
}

#[derive(Default)]
pub struct TestServerBuilder {
    passwords: BTreeMap<String, String>,
    identity: Option<Identity>,
}

impl TestServerBuilder {
    /// Registers an account the server accepts.
    pub fn account(mut self, username: &str, password: &str) -> Self {
        self.passwords.insert(username.to_string(), password.to_string());
        self
    }

    /// Starts the server with an identity already established.
    pub fn logged_in_as(mut self, identity: &str) -> Self {
        self.identity = Some(Identity::new(identity));
        self
    }

    pub async fn build(self, config_toml: &str) -> TestServer {
        match self.try_build(config_toml).await {
            Ok(server) => server,
            #[allow(clippy::panic)]
            Err(err) => panic!("Server failed to start: {err}"),
        }
    }

    /// Starts the server, or returns why the authenticator could not be built.
    pub async fn try_build(self, config_toml: &str) -> authentication::Result<TestServer> {
        // Write config to a temporary file to go through the real loader
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, config_toml).unwrap();

        let config = Config::load(&config_path).unwrap();
        let accounts = Arc::new(MemoryAccounts::new(self.passwords, self.identity));

        let authenticator = FormAuthenticator::builder(config.authentication.clone())
            .service(accounts.clone())
            .user_factory(AuthenticatedUser::from_parts as UserFn)
            .build()?;

        let protected = Router::new()
            .route("/", get(whoami))
            .route("/session", post(whoami))
            .layer(AuthLayer::new(authenticator));

        let app = Router::new()
            .route("/health", get(|| async { "OK" }))
            .route("/login", get(login_page))
            .merge(protected);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();

        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { signal.cancelled().await })
                .await;

            if let Err(err) = result {
                log::error!("Test server failed: {err}");
            }
        });

        Ok(TestServer {
            client: TestClient::new(format!("http://{address}")),
            address,
            config,
            accounts,
            shutdown,
        })
    }
}

/// A running server with the form authenticator in front of its protected routes.
///
/// `GET /` and `POST /session` are protected and answer with the authenticated user as JSON.
/// `GET /login` and `GET /health` are public.
pub struct TestServer {
    pub client: TestClient,
    pub address: SocketAddr,
    /// Configuration used by this test server
    pub config: Config,
    /// The account store behind the authenticator
    pub accounts: Arc<MemoryAccounts>,
    shutdown: CancellationToken,
}

impl TestServer {
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder::default()
    }

    /// Start a new test server with no accounts
    pub async fn start(config_toml: &str) -> Self {
        Self::builder().build(config_toml).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> Json<AuthenticatedUser> {
    Json(user)
}

async fn login_page() -> Html<&'static str> {
    Html(r#"<form method="post" action="/session"><input name="username"><input name="password" type="password"></form>"#)
}
