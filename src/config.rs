use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub poller: PollerSettings,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Staging,
}

impl Environment {
    /// Unknown names fall back to development.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:8081",
            Environment::Production => "https://restsys-production.up.railway.app",
            Environment::Staging => "https://staging-api.tudominio.com",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Productos,
    Categorias,
    Mesas,
    Meseros,
    Reservas,
    Pedidos,
    DetallesPedidos,
    Menu1,
    Menu2,
    Notificaciones,
    Empleados,
    Login,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Productos => "/api/productos",
            Endpoint::Categorias => "/api/categorias",
            Endpoint::Mesas => "/api/mesas",
            Endpoint::Meseros => "/api/meseros",
            Endpoint::Reservas => "/api/reservas",
            Endpoint::Pedidos => "/api/pedidos",
            Endpoint::DetallesPedidos => "/api/detalles-pedido",
            Endpoint::Menu1 => "/api/menu/menu1",
            Endpoint::Menu2 => "/api/menu/menu2",
            Endpoint::Notificaciones => "/api/notificaciones",
            Endpoint::Empleados => "/api/empleados",
            Endpoint::Login => "/api",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub environment: Environment,
    base_url: String,
}

impl ApiConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            base_url: environment.base_url().to_string(),
        }
    }

    /// Points every endpoint at an explicit host, e.g. a local test server.
    pub fn with_base_url(environment: Environment, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            environment,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[derive(Debug, Clone)]
pub struct PollerSettings {
    pub interval: Duration,
    pub suppressed_prefix: String,
    pub feedback_lifetime: Duration,
    pub nominal_lifetime: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(30_000),
            suppressed_prefix: "/mesa/".to_string(),
            feedback_lifetime: Duration::from_millis(3_000),
            nominal_lifetime: Duration::from_millis(5_000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("restsys-storage.json"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let environment = env::var("APP_ENV")
            .map(|name| Environment::from_name(&name))
            .unwrap_or(Environment::Development);

        let api = match env::var("API_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => ApiConfig::with_base_url(environment, url),
            _ => ApiConfig::new(environment),
        };

        let defaults = PollerSettings::default();
        let poller = PollerSettings {
            interval: match env::var("NOTIFICATION_POLL_INTERVAL_MS") {
                Ok(raw) => Duration::from_millis(parse_millis("NOTIFICATION_POLL_INTERVAL_MS", &raw)?),
                Err(_) => defaults.interval,
            },
            suppressed_prefix: env::var("NOTIFICATION_SUPPRESSED_PREFIX")
                .unwrap_or(defaults.suppressed_prefix),
            ..defaults
        };

        let storage = StorageConfig {
            path: env::var("RESTSYS_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| StorageConfig::default().path),
        };

        Ok(Config { api, poller, storage })
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<u64> {
    let millis: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a whole number of milliseconds, got {:?}", name, raw))?;
    if millis == 0 {
        return Err(anyhow!("{} must be greater than zero", name));
    }
    Ok(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name(" Staging "), Environment::Staging);
        assert_eq!(Environment::from_name("qa"), Environment::Development);
    }

    #[test]
    fn test_endpoint_urls() {
        let api = ApiConfig::new(Environment::Development);
        assert_eq!(api.url(Endpoint::Mesas), "http://localhost:8081/api/mesas");
        assert_eq!(api.url(Endpoint::Login), "http://localhost:8081/api");

        let api = ApiConfig::with_base_url(Environment::Staging, "http://127.0.0.1:9000/");
        assert_eq!(
            api.url(Endpoint::Notificaciones),
            "http://127.0.0.1:9000/api/notificaciones"
        );
    }

    #[test]
    fn test_poller_defaults() {
        let settings = PollerSettings::default();
        assert_eq!(settings.interval, Duration::from_secs(30));
        assert_eq!(settings.suppressed_prefix, "/mesa/");
        assert_eq!(settings.feedback_lifetime, Duration::from_secs(3));
    }

    #[test]
    fn test_parse_millis_rejects_garbage() {
        assert_eq!(parse_millis("X", "1500").unwrap(), 1500);
        assert!(parse_millis("X", "abc").is_err());
        assert!(parse_millis("X", "0").is_err());
    }
}
