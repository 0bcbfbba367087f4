//! Shared bearer-token cell.
//!
//! The session manager writes the token on login and clears it on logout;
//! the HTTP gateway reads it when attaching the `Authorization` header.
//! Cloning a `TokenStore` shares the same cell.

use std::sync::{Arc, RwLock};

/// Shared cell holding the current bearer token, if any
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    /// Creates an empty token store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current token, if one is set
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Stores a token, replacing any previous one
    pub fn set(&self, token: impl Into<String>) {
        *self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.into());
    }

    /// Clears the stored token
    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }

    /// Checks whether a token is present
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_cell() {
        let store = TokenStore::new();
        let reader = store.clone();
        assert!(!reader.is_present());

        store.set("token-abc");
        assert_eq!(reader.get(), Some("token-abc".to_string()));

        store.clear();
        assert!(!reader.is_present());
        assert_eq!(reader.get(), None);
    }
}
