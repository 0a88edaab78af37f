use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::watch;

use crate::session::IdentityProvider;

/// A signed-in identity as handed out by the identity provider.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub access_token: SecretString,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Explicit holder of the current authentication state. Whatever needs an
/// identity gets a reference to one of these instead of reading global state,
/// and can `subscribe` to sign-in / sign-out changes.
pub struct SessionContext {
    state: watch::Sender<Option<AuthSession>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    pub fn signed_in(session: AuthSession) -> Self {
        let context = Self::new();
        context.sign_in(session);
        context
    }

    pub fn sign_in(&self, session: AuthSession) {
        log::info!("Signed in as {}", session.email);
        self.state.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        if self.state.send_replace(None).is_some() {
            log::info!("Signed out");
        }
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().as_ref().map(|s| AuthUser {
            id: s.user_id.clone(),
            email: s.email.clone(),
        })
    }

    pub fn access_token(&self) -> Option<SecretString> {
        self.state.borrow().as_ref().map(|s| s.access_token.clone())
    }

    /// Receiver that observes every sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.state.subscribe()
    }
}

#[async_trait]
impl IdentityProvider for SessionContext {
    async fn current_user_id(&self) -> Option<String> {
        self.current_user().map(|u| u.id)
    }
}
