//! Authentication and the shared bearer token.

use jelajah_core::error::GatewayError;
use jelajah_core::gateway::{AuthGateway, NewUser};
use jelajah_core::token::TokenStore;
use jelajah_core::types::{Actor, Role, User};
use std::sync::Arc;
use thiserror::Error;

/// Failures surfaced by the session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The gateway rejected the email/password pair
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account could not be created
    #[error("registration failed: {reason}")]
    RegistrationFailed {
        /// The gateway's explanation
        reason: String,
    },

    /// The caller is not allowed to perform this operation
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Why the operation was refused
        reason: String,
    },

    /// The gateway call itself failed
    #[error("auth request failed")]
    Gateway(#[source] GatewayError),
}

/// The authenticated user's session.
///
/// Login stores the bearer token in the shared [`TokenStore`] the gateway
/// clients read from, so every capability picks up the credential without
/// being re-wired. Logout clears both the token and the cached user.
pub struct Session {
    gateway: Arc<dyn AuthGateway>,
    tokens: TokenStore,
    user: Option<User>,
}

impl Session {
    /// Creates a logged-out session over the given token store
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: TokenStore) -> Self {
        Self {
            gateway,
            tokens,
            user: None,
        }
    }

    /// The authenticated user, if logged in
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The actor identity of the authenticated user, if logged in
    #[must_use]
    pub fn actor(&self) -> Option<Actor> {
        self.user.as_ref().map(User::actor)
    }

    /// Whether a user is currently logged in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the bearer token is published to the token store and the
    /// user record cached. On failure the session is left untouched; a
    /// previously logged-in user stays logged in.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidCredentials`] when the gateway rejects the
    /// pair, [`SessionError::Gateway`] for any other failure.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, SessionError> {
        let session = self
            .gateway
            .login(email, password)
            .await
            .map_err(|e| match e {
                GatewayError::Unauthorized => SessionError::InvalidCredentials,
                other => SessionError::Gateway(other),
            })?;

        tracing::info!(user = %session.user.id, role = %session.user.role, "logged in");
        self.tokens.set(session.token);
        Ok(self.user.insert(session.user))
    }

    /// Registers a new account. Does not log the account in; the caller
    /// follows up with [`Self::login`].
    ///
    /// # Errors
    ///
    /// [`SessionError::RegistrationFailed`] when the gateway refuses the
    /// account (duplicate email), [`SessionError::Gateway`] for any other
    /// failure.
    pub async fn register(&self, user: &NewUser) -> Result<User, SessionError> {
        self.gateway.register(user).await.map_err(|e| match e {
            GatewayError::Conflict(reason) => SessionError::RegistrationFailed { reason },
            other => SessionError::Gateway(other),
        })
    }

    /// Fetches every registered user for the admin dashboard.
    ///
    /// Refused locally unless the logged-in user is an admin; other roles
    /// never reach the gateway.
    ///
    /// # Errors
    ///
    /// [`SessionError::Unauthorized`] when no admin is logged in or the
    /// gateway rejects the token, [`SessionError::Gateway`] for any other
    /// failure.
    pub async fn list_users(&self) -> Result<Vec<User>, SessionError> {
        match self.user.as_ref().map(|user| user.role) {
            Some(Role::Admin) => {}
            Some(role) => {
                return Err(SessionError::Unauthorized {
                    reason: format!("{role} cannot list registered users"),
                });
            }
            None => {
                return Err(SessionError::Unauthorized {
                    reason: "not logged in".to_string(),
                });
            }
        }

        self.gateway.list_users().await.map_err(|e| match e {
            GatewayError::Unauthorized => SessionError::Unauthorized {
                reason: "gateway rejected the session token".to_string(),
            },
            other => SessionError::Gateway(other),
        })
    }

    /// Drops the bearer token and the cached user
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.id, "logged out");
        }
        self.tokens.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jelajah_testing::{MockGateway, fixtures};

    #[tokio::test]
    async fn login_publishes_the_token() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_user("rahasia", fixtures::user("u1", Role::Traveler));
        let tokens = TokenStore::new();
        let mut session = Session::new(gateway, tokens.clone());

        let user = session.login("user-u1@example.com", "rahasia").await.unwrap();
        assert_eq!(user.role, Role::Traveler);
        assert_eq!(tokens.get().as_deref(), Some("mock-token-u1"));
        assert!(session.is_authenticated());
        assert_eq!(session.actor().unwrap().role, Role::Traveler);
    }

    #[tokio::test]
    async fn bad_credentials_leave_the_session_untouched() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_user("rahasia", fixtures::user("u1", Role::Traveler));
        let tokens = TokenStore::new();
        let mut session = Session::new(gateway, tokens.clone());

        let result = session.login("user-u1@example.com", "salah").await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
        assert_eq!(tokens.get(), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_token_and_user() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_user("rahasia", fixtures::user("u1", Role::Guide));
        let tokens = TokenStore::new();
        let mut session = Session::new(gateway, tokens.clone());

        session.login("user-u1@example.com", "rahasia").await.unwrap();
        session.logout();
        assert_eq!(tokens.get(), None);
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn admin_lists_every_registered_user() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_user("rahasia", fixtures::user("u1", Role::Traveler));
        gateway.seed_user("rahasia", fixtures::user("u2", Role::Guide));
        gateway.seed_user("rahasia", fixtures::user("a1", Role::Admin));
        let mut session = Session::new(gateway, TokenStore::new());

        session.login("user-a1@example.com", "rahasia").await.unwrap();
        let users = session.list_users().await.unwrap();
        assert_eq!(users.len(), 3);
        assert!(users.iter().any(|u| u.role == Role::Guide));
    }

    #[tokio::test]
    async fn only_admins_list_users() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_user("rahasia", fixtures::user("u1", Role::Traveler));
        let mut session = Session::new(gateway, TokenStore::new());

        // Logged out entirely.
        let result = session.list_users().await;
        assert!(matches!(result, Err(SessionError::Unauthorized { .. })));

        // Logged in, but not as an admin.
        session.login("user-u1@example.com", "rahasia").await.unwrap();
        let result = session.list_users().await;
        assert!(matches!(result, Err(SessionError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn duplicate_registration_is_refused() {
        let gateway = Arc::new(MockGateway::new());
        gateway.seed_user("rahasia", fixtures::user("u1", Role::Traveler));
        let session = Session::new(gateway, TokenStore::new());

        let result = session
            .register(&NewUser {
                name: "User u1".to_string(),
                email: "user-u1@example.com".to_string(),
                password: "lain".to_string(),
                role: Role::Traveler,
            })
            .await;
        assert!(matches!(
            result,
            Err(SessionError::RegistrationFailed { .. })
        ));
    }
}
