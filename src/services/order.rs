use chrono::{NaiveDate, Utc};
use futures::future::try_join_all;

use crate::config::Endpoint;
use crate::error::TransportResult;
use crate::models::{Order, OrderDetail, RecordId};
use crate::services::api::{report, ApiClient};
use crate::services::crud::Collection;

/// How far back the kitchen dashboard looks by default.
pub const RECENT_DAYS: u32 = 4;

#[derive(Clone)]
pub struct OrderService {
    orders: Collection<Order>,
    details: Collection<OrderDetail>,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            orders: Collection::new(api.clone(), Endpoint::Pedidos, "orders"),
            details: Collection::new(api, Endpoint::DetallesPedidos, "order details"),
        }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Order>> {
        self.orders.get_all().await
    }

    pub async fn get_all_details(&self) -> TransportResult<Vec<Order>> {
        let url = format!("{}/detalles", self.orders.url());
        self.orders.api().get_list("orders with details", &url).await
    }

    pub async fn get_details_for_date(&self, date: NaiveDate) -> TransportResult<Vec<Order>> {
        let url = format!("{}/detalles/fecha/{}", self.orders.url(), date.format("%Y-%m-%d"));
        self.orders.api().get_list("orders for date", &url).await
    }

    pub async fn get_today_details(&self) -> TransportResult<Vec<Order>> {
        self.get_details_for_date(Utc::now().date_naive()).await
    }

    pub async fn get_details_last_days(&self, days: u32) -> TransportResult<Vec<Order>> {
        let url = format!("{}/detalles/ultimos-dias/{}", self.orders.url(), days);
        self.orders.api().get_list("recent orders", &url).await
    }

    /// Creates the order, then every detail line pointing at it. Lines are sent concurrently;
    /// the first failing line fails the whole call, though earlier lines may already be stored.
    pub async fn create(&self, order: &Order, details: Vec<OrderDetail>) -> TransportResult<Order> {
        let created = self.orders.create(order).await?;

        let order_id = match &created.id {
            Some(id) => id.clone(),
            None => {
                log::warn!("Created order came back without an id; detail lines are left unlinked");
                return Ok(created);
            }
        };

        log::info!("Creating {} detail lines for order {}", details.len(), order_id);
        let linked = details
            .into_iter()
            .map(|detail| detail.for_order(order_id.clone()));

        let stored = report(
            &format!("create detail lines for order {}", order_id),
            try_join_all(linked.map(|detail| {
                let details = self.details.clone();
                async move { details.api().post::<_, OrderDetail>(details.url(), &detail).await }
            }))
            .await,
        )?;
        log::info!("Stored {} detail lines for order {}", stored.len(), order_id);

        Ok(created)
    }

    pub async fn update(&self, id: &RecordId, order: &Order) -> TransportResult<Order> {
        self.orders.update(id, order).await
    }
}
