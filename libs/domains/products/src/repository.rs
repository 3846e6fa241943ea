use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, UpdateProduct};

/// Repository trait for Product storage
///
/// Every method sees and preserves insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Append a product to the store
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products, optionally restricted to one category (case-insensitive)
    async fn list(&self, category: Option<String>) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `name`, case-insensitive
    async fn search(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// Merge `input` into an existing product; `None` when the id is unknown
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Snapshot of every stored product
    async fn all(&self) -> ProductResult<Vec<Product>>;
}
