//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult, SEARCH_NAME_REQUIRED};
use crate::models::{
    CreateProduct, Product, ProductFilter, ProductPage, ProductStats, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Product service providing the operations behind the HTTP handlers
///
/// Ids arrive as raw path segments; anything that is not a known product id,
/// including strings that are not UUIDs at all, is reported as not found.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products with optional category filter and pagination
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<ProductPage> {
        let page = filter.page();
        let limit = filter.limit();
        let filtered = self
            .repository
            .list(filter.category().map(str::to_string))
            .await?;

        Ok(ProductPage::paginate(filtered, page, limit))
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let uuid = parse_id(id)?;
        self.repository
            .get_by_id(uuid)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Search products by name
    #[instrument(skip(self))]
    pub async fn search_products(&self, name: Option<&str>) -> ProductResult<Vec<Product>> {
        let name = name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ProductError::Validation(SEARCH_NAME_REQUIRED.to_string()))?;

        self.repository.search(name).await
    }

    /// Aggregate statistics over every stored product
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ProductResult<ProductStats> {
        let products = self.repository.all().await?;
        Ok(ProductStats::from_products(&products))
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = ?input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = self.repository.insert(Product::new(input)).await?;
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let uuid = parse_id(id)?;
        self.repository
            .update(uuid, input)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let uuid = parse_id(id)?;
        if !self.repository.delete(uuid).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %uuid, "Deleted product");
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn parse_id(id: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))
}
