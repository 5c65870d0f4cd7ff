use anyhow::Result;

use super::store::{AuthStore, USER_DATA_KEY};

pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub path: String,
    /// `Some(false)` marks public screens such as the table kiosk.
    pub requires_auth: Option<bool>,
}

impl RouteTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: None,
        }
    }

    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

/// Sends anonymous visitors to the login screen and hydrates the store for everyone else.
pub fn auth_guard(to: &RouteTarget, store: &mut AuthStore) -> Result<GuardDecision> {
    if to.requires_auth == Some(false) {
        return Ok(GuardDecision::Proceed);
    }

    let has_user = store.storage().get_item(USER_DATA_KEY).is_some();
    if !has_user && to.path != LOGIN_PATH {
        log::debug!("No session, redirecting {} to login", to.path);
        return Ok(GuardDecision::Redirect(LOGIN_PATH.to_string()));
    }

    if has_user {
        store.initialize_from_storage()?;
    }
    Ok(GuardDecision::Proceed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::KeyValueStorage;
    use std::sync::Arc;

    #[test]
    fn test_public_routes_pass() {
        let mut store = AuthStore::new(Arc::new(KeyValueStorage::memory()));
        let decision = auth_guard(&RouteTarget::public("/mesa/4"), &mut store).unwrap();
        assert_eq!(decision, GuardDecision::Proceed);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_anonymous_user_is_redirected() {
        let mut store = AuthStore::new(Arc::new(KeyValueStorage::memory()));
        assert_eq!(
            auth_guard(&RouteTarget::new("/pedidos"), &mut store).unwrap(),
            GuardDecision::Redirect(LOGIN_PATH.to_string())
        );
        assert_eq!(
            auth_guard(&RouteTarget::new(LOGIN_PATH), &mut store).unwrap(),
            GuardDecision::Proceed
        );
    }

    #[test]
    fn test_stored_session_hydrates_store() {
        let storage = Arc::new(KeyValueStorage::memory());
        storage.set_item(USER_DATA_KEY, r#"{"id":2,"nombre":"Ana"}"#).unwrap();
        let mut store = AuthStore::new(storage);

        assert_eq!(
            auth_guard(&RouteTarget::new("/productos"), &mut store).unwrap(),
            GuardDecision::Proceed
        );
        assert!(store.is_authenticated());
    }
}
