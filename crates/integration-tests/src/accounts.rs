use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use authentication::{AuthenticationResult, AuthenticationService, CredentialAdapter, ResultCode};
use context::Identity;
use secrecy::{ExposeSecret, SecretString};

/// Credentials collected for one login attempt.
#[derive(Default)]
pub struct SubmittedCredentials {
    identity: Option<String>,
    credential: Option<SecretString>,
}

impl CredentialAdapter for SubmittedCredentials {
    fn set_identity(&mut self, identity: String) {
        self.identity = Some(identity);
    }

    fn set_credential(&mut self, credential: SecretString) {
        self.credential = Some(credential);
    }
}

/// An in-memory account store with a single, process-wide session.
///
/// A successful login becomes the established identity, like a session would.
#[derive(Default)]
pub struct MemoryAccounts {
    passwords: BTreeMap<String, String>,
    current: Mutex<Option<Identity>>,
    attempts: AtomicUsize,
}

impl MemoryAccounts {
    pub fn new(passwords: BTreeMap<String, String>, current: Option<Identity>) -> Self {
        Self {
            passwords,
            current: Mutex::new(current),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of verification attempts seen so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn logout(&self) {
        *self.current.lock().unwrap() = None;
    }

    pub fn login_as(&self, identity: &str) {
        *self.current.lock().unwrap() = Some(Identity::new(identity));
    }
}

impl AuthenticationService for MemoryAccounts {
    type Adapter = SubmittedCredentials;

    fn identity(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }

    fn adapter(&self) -> SubmittedCredentials {
        SubmittedCredentials::default()
    }

    fn authenticate(&self, adapter: SubmittedCredentials) -> AuthenticationResult {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let (Some(identity), Some(credential)) = (adapter.identity, adapter.credential) else {
            return AuthenticationResult::failure(ResultCode::Failure, "incomplete credentials");
        };

        let Some(expected) = self.passwords.get(&identity) else {
            return AuthenticationResult::failure(ResultCode::FailureIdentityNotFound, "unknown account");
        };

        if expected.as_str() != credential.expose_secret() {
            return AuthenticationResult::failure(ResultCode::FailureCredentialInvalid, "invalid password");
        }

        let identity = Identity::new(identity);
        *self.current.lock().unwrap() = Some(identity.clone());

        AuthenticationResult::success(identity)
    }
}
