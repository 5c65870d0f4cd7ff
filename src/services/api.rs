use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ApiConfig, Endpoint};
use crate::error::{TransportError, TransportResult};

/// Shared HTTP plumbing for every resource service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        self.config.url(endpoint)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> TransportResult<T> {
        log::debug!("GET {}", url);
        read_json(self.client.get(url).header("Accept", "application/json")).await
    }

    pub async fn get_with_query<T, Q>(&self, url: &str, query: &Q) -> TransportResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        log::debug!("GET {} (with query)", url);
        read_json(self.client.get(url).query(query)).await
    }

    /// Fetches a JSON array and logs how many items came back.
    pub async fn get_list<T: DeserializeOwned>(&self, label: &str, url: &str) -> TransportResult<Vec<T>> {
        log::info!("Requesting {} from {}", label, url);
        let items: Vec<T> = report(&format!("fetch {}", label), self.get(url).await)?;
        log::info!("Received {} {}", items.len(), label);
        Ok(items)
    }

    pub async fn post<B, T>(&self, url: &str, body: &B) -> TransportResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", url);
        read_json(self.client.post(url).json(body)).await
    }

    pub async fn put<B, T>(&self, url: &str, body: &B) -> TransportResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("PUT {}", url);
        read_json(self.client.put(url).json(body)).await
    }

    pub async fn delete(&self, url: &str) -> TransportResult<()> {
        log::debug!("DELETE {}", url);
        read_body(self.client.delete(url)).await.map(|_| ())
    }
}

async fn read_body(request: RequestBuilder) -> TransportResult<String> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> TransportResult<T> {
    let body = read_body(request).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Logs a failed call with whatever detail the error carries, then hands the result back.
pub(crate) fn report<T>(action: &str, result: TransportResult<T>) -> TransportResult<T> {
    if let Err(err) = &result {
        match err {
            TransportError::Status { status, body } => {
                log::error!("Failed to {}: status {}, body {}", action, status, body)
            }
            other => log::error!("Failed to {}: {}", action, other),
        }
    }
    result
}
