use crate::config::Endpoint;
use crate::error::TransportResult;
use crate::models::{Product, RecordId};
use crate::services::api::ApiClient;
use crate::services::crud::Collection;

#[derive(Clone)]
pub struct ProductService {
    collection: Collection<Product>,
}

impl ProductService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            collection: Collection::new(api, Endpoint::Productos, "products"),
        }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Product>> {
        self.collection.get_all().await
    }

    pub async fn create(&self, product: &Product) -> TransportResult<Product> {
        self.collection.create(product).await
    }

    pub async fn delete(&self, id: &RecordId) -> TransportResult<()> {
        self.collection.delete(id).await
    }

    /// The backend overwrites `createdAt` on PUT, so the stored value is read first and sent back.
    pub async fn update(&self, id: &RecordId, product: &Product) -> TransportResult<Product> {
        let existing = self.collection.get_by_id(id).await?;

        let outgoing = Product {
            created_at: existing.created_at,
            ..product.clone()
        };

        self.collection.update(id, &outgoing).await
    }
}
