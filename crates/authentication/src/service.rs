//! Capabilities the authenticator borrows from the credential store of the application.

use std::sync::Arc;

use context::Identity;
use secrecy::SecretString;

/// Receives the submitted credentials before a verification attempt.
pub trait CredentialAdapter {
    /// Sets the identifier the caller claims (e.g., a username or an email).
    fn set_identity(&mut self, identity: String);

    /// Sets the secret proving the claimed identifier.
    fn set_credential(&mut self, credential: SecretString);
}

/// The credential verification service together with its identity store.
///
/// A login attempt always goes through the same sequence: a fresh adapter is requested with
/// [`adapter`](Self::adapter), the identifier and then the secret are set on it, and the adapter
/// is handed back to [`authenticate`](Self::authenticate). Implementations are free to persist the
/// verified identity, so that later calls to [`identity`](Self::identity) return it.
///
/// Every method is called synchronously from within the request future, on an async runtime
/// worker. An implementation backed by blocking I/O (a database lookup, a password hash) stalls
/// that worker for the duration of the call and should keep such work short or hand it off to a
/// dedicated thread pool.
pub trait AuthenticationService: Send + Sync {
    type Adapter: CredentialAdapter;

    /// Whether an identity was already established, e.g. by an earlier login.
    fn has_identity(&self) -> bool {
        self.identity().is_some()
    }

    /// The established identity, if any.
    fn identity(&self) -> Option<Identity>;

    /// A fresh adapter to collect the credentials of one attempt.
    fn adapter(&self) -> Self::Adapter;

    /// Verifies the credentials collected by the adapter.
    fn authenticate(&self, adapter: Self::Adapter) -> AuthenticationResult;
}

impl<S> AuthenticationService for Arc<S>
where
    S: AuthenticationService + ?Sized,
{
    type Adapter = S::Adapter;

    fn has_identity(&self) -> bool {
        (**self).has_identity()
    }

    fn identity(&self) -> Option<Identity> {
        (**self).identity()
    }

    fn adapter(&self) -> Self::Adapter {
        (**self).adapter()
    }

    fn authenticate(&self, adapter: Self::Adapter) -> AuthenticationResult {
        (**self).authenticate(adapter)
    }
}

/// Outcome classification of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Success,
    Failure,
    FailureIdentityNotFound,
    FailureIdentityAmbiguous,
    FailureCredentialInvalid,
    FailureUncategorized,
}

/// The verdict of the credential verification service.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    code: ResultCode,
    identity: Option<Identity>,
    messages: Vec<String>,
}

impl AuthenticationResult {
    pub fn new(code: ResultCode, identity: Option<Identity>, messages: Vec<String>) -> Self {
        Self {
            code,
            identity,
            messages,
        }
    }

    /// A successful verification of the given identity.
    pub fn success(identity: impl Into<Identity>) -> Self {
        Self::new(ResultCode::Success, Some(identity.into()), Vec::new())
    }

    /// A failed verification with a reason.
    pub fn failure(code: ResultCode, message: impl Into<String>) -> Self {
        Self::new(code, None, vec![message.into()])
    }

    pub fn is_valid(&self) -> bool {
        self.code == ResultCode::Success
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn into_identity(self) -> Option<Identity> {
        self.identity
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
