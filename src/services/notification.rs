use async_trait::async_trait;

use crate::config::Endpoint;
use crate::error::TransportResult;
use crate::models::{CreateNotification, Notification, NotificationId};
use crate::services::api::{report, ApiClient};
use crate::tasks::notification_poller::NotificationTransport;

#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Notification>> {
        self.api
            .get_list("notifications", &self.api.url(Endpoint::Notificaciones))
            .await
    }

    pub async fn create(&self, notification: &CreateNotification) -> TransportResult<Notification> {
        log::info!("Creating notification: {:?}", notification);
        let created: Notification = report(
            "create notification",
            self.api
                .post(&self.api.url(Endpoint::Notificaciones), notification)
                .await,
        )?;
        log::info!("Notification {} created", created.id);
        Ok(created)
    }

    /// Flips the notification to resolved on the server.
    pub async fn acknowledge(&self, id: &NotificationId) -> TransportResult<Notification> {
        log::info!("Marking notification {} as attended", id);
        let url = format!("{}/{}/desactivar", self.api.url(Endpoint::Notificaciones), id);
        let updated: Notification = report("acknowledge notification", self.api.get(&url).await)?;
        log::info!("Notification {} updated", updated.id);
        Ok(updated)
    }
}

#[async_trait]
impl NotificationTransport for NotificationService {
    async fn fetch_all(&self) -> TransportResult<Vec<Notification>> {
        self.get_all().await
    }

    async fn acknowledge(&self, id: &NotificationId) -> TransportResult<Notification> {
        NotificationService::acknowledge(self, id).await
    }
}
