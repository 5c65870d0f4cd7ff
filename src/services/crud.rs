use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use crate::config::Endpoint;
use crate::error::TransportResult;
use crate::models::RecordId;
use crate::services::api::{report, ApiClient};

/// List/read/write calls against one REST collection.
#[derive(Clone)]
pub struct Collection<T> {
    api: ApiClient,
    url: String,
    label: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(api: ApiClient, endpoint: Endpoint, label: &'static str) -> Self {
        let url = api.url(endpoint);
        Self {
            api,
            url,
            label,
            _item: PhantomData,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn item_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.url, id)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn get_all(&self) -> TransportResult<Vec<T>> {
        self.api.get_list(self.label, &self.url).await
    }

    pub async fn get_by_id(&self, id: &RecordId) -> TransportResult<T> {
        log::info!("Requesting {} {}", self.label, id);
        report(
            &format!("fetch {} {}", self.label, id),
            self.api.get(&self.item_url(id)).await,
        )
    }

    pub async fn create(&self, item: &T) -> TransportResult<T> {
        log::info!("Creating {} entry", self.label);
        let created = report(
            &format!("create {} entry", self.label),
            self.api.post(&self.url, item).await,
        )?;
        log::info!("{} entry created", self.label);
        Ok(created)
    }

    pub async fn update(&self, id: &RecordId, item: &T) -> TransportResult<T> {
        log::info!("Updating {} {}", self.label, id);
        let updated = report(
            &format!("update {} {}", self.label, id),
            self.api.put(&self.item_url(id), item).await,
        )?;
        log::info!("{} {} updated", self.label, id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &RecordId) -> TransportResult<()> {
        log::info!("Deleting {} {}", self.label, id);
        report(
            &format!("delete {} {}", self.label, id),
            self.api.delete(&self.item_url(id)).await,
        )?;
        log::info!("{} {} deleted", self.label, id);
        Ok(())
    }
}
