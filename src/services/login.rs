use anyhow::{anyhow, Result};
use serde_json::Value;
use validator::Validate;

use crate::config::Endpoint;
use crate::models::Credentials;
use crate::services::api::{report, ApiClient};

#[derive(Clone)]
pub struct LoginService {
    api: ApiClient,
}

impl LoginService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Returns the user record on a match. A rejected login and an unreachable
    /// backend both come back as `Ok(None)`; only malformed credentials are errors.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Option<Value>> {
        credentials
            .validate()
            .map_err(|e| anyhow!("Invalid credentials: {}", e))?;

        let url = format!("{}/usuarios/auth", self.api.url(Endpoint::Login));
        let query = [
            ("email", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
        ];

        log::info!("Authenticating {}", credentials.email);
        let reply: Value = match report("authenticate", self.api.get_with_query(&url, &query).await) {
            Ok(reply) => reply,
            Err(_) => return Ok(None),
        };

        match reply {
            Value::Null | Value::Bool(false) => {
                log::info!("Authentication rejected for {}", credentials.email);
                Ok(None)
            }
            user => {
                log::info!("Authentication succeeded for {}", credentials.email);
                Ok(Some(user))
            }
        }
    }
}
