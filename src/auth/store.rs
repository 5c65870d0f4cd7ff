use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;

use super::storage::KeyValueStorage;

pub const USER_DATA_KEY: &str = "userData";

/// Who is logged in, mirrored into persistent storage.
pub struct AuthStore {
    storage: Arc<KeyValueStorage>,
    user_data: Option<Value>,
    is_authenticated: bool,
}

impl AuthStore {
    pub fn new(storage: Arc<KeyValueStorage>) -> Self {
        Self {
            storage,
            user_data: None,
            is_authenticated: false,
        }
    }

    pub fn storage(&self) -> &KeyValueStorage {
        &self.storage
    }

    pub fn user_data(&self) -> Option<&Value> {
        self.user_data.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// `null`, `false`, `0` and `""` count as logged out.
    pub fn set_user_data(&mut self, data: Option<Value>) -> Result<()> {
        let data = data.filter(is_truthy);
        match &data {
            Some(value) => self.storage.set_item(USER_DATA_KEY, value.to_string())?,
            None => self.storage.remove_item(USER_DATA_KEY)?,
        }
        self.is_authenticated = data.is_some();
        self.user_data = data;
        Ok(())
    }

    pub fn clear_user_data(&mut self) -> Result<()> {
        self.set_user_data(None)
    }

    pub fn initialize_from_storage(&mut self) -> Result<()> {
        let Some(raw) = self.storage.get_item(USER_DATA_KEY) else {
            return Ok(());
        };
        let data: Value = serde_json::from_str(&raw).context("Stored user data is not valid JSON")?;
        self.set_user_data(Some(data))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_clear() {
        let storage = Arc::new(KeyValueStorage::memory());
        let mut store = AuthStore::new(storage.clone());

        store.set_user_data(Some(json!({ "id": 3, "rol": "admin" }))).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.user_data().unwrap()["rol"], json!("admin"));
        assert!(storage.get_item(USER_DATA_KEY).is_some());

        store.clear_user_data().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.user_data().is_none());
        assert!(storage.get_item(USER_DATA_KEY).is_none());
    }

    #[test]
    fn test_falsy_data_logs_out() {
        let mut store = AuthStore::new(Arc::new(KeyValueStorage::memory()));
        store.set_user_data(Some(json!(false))).unwrap();
        assert!(!store.is_authenticated());
        assert!(store.user_data().is_none());
    }

    #[test]
    fn test_initialize_from_storage() {
        let storage = Arc::new(KeyValueStorage::memory());
        storage.set_item(USER_DATA_KEY, r#"{"id":9}"#).unwrap();

        let mut store = AuthStore::new(storage.clone());
        store.initialize_from_storage().unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.user_data(), Some(&json!({ "id": 9 })));

        storage.set_item(USER_DATA_KEY, "{not json").unwrap();
        assert!(AuthStore::new(storage).initialize_from_storage().is_err());
    }
}
