//! In-memory implementation of ProductRepository

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Process-local product store.
///
/// An ordered list behind a lock; lookups are linear scans. Writers hold the
/// write guard for their whole read-modify-write, so mutations never
/// interleave. Clones share the same list.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.push(product.clone());

        tracing::debug!(product_id = %product.id, total = products.len(), "Stored product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, category: Option<String>) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let result = match category {
            Some(category) => products
                .iter()
                .filter(|p| p.in_category(&category))
                .cloned()
                .collect(),
            None => products.clone(),
        };

        Ok(result)
    }

    async fn search(&self, name: &str) -> ProductResult<Vec<Product>> {
        let needle = name.to_lowercase();
        let products = self.products.read().await;

        Ok(products
            .iter()
            .filter(|p| p.name_contains(&needle))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.apply_update(input);

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;

    fn product(name: &str, category: &str) -> Product {
        Product::new(CreateProduct {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_insert_and_get_by_id() {
        let repo = InMemoryProductRepository::new();
        let stored = repo.insert(product("Widget", "Tools")).await.unwrap();

        let fetched = repo.get_by_id(stored.id).await.unwrap();
        assert_eq!(fetched, Some(stored));
        assert_eq!(repo.get_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = InMemoryProductRepository::new();
        let names = ["c", "a", "b"];
        for name in names {
            repo.insert(product(name, "Tools")).await.unwrap();
        }

        let listed: Vec<String> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(listed, names);
    }

    #[tokio::test]
    async fn test_list_filters_by_category_case_insensitive() {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("hammer", "Tools")).await.unwrap();
        repo.insert(product("ball", "Toys")).await.unwrap();
        repo.insert(product("saw", "tools")).await.unwrap();

        let tools = repo.list(Some("TOOLS".to_string())).await.unwrap();
        let names: Vec<&str> = tools.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["hammer", "saw"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = InMemoryProductRepository::new();
        repo.insert(product("Widget", "Tools")).await.unwrap();
        repo.insert(product("Gadget", "Tools")).await.unwrap();

        assert_eq!(repo.search("widg").await.unwrap().len(), 1);
        assert_eq!(repo.search("WIDG").await.unwrap().len(), 1);
        assert_eq!(repo.search("dget").await.unwrap().len(), 2);
        assert!(repo.search("sprocket").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_in_place() {
        let repo = InMemoryProductRepository::new();
        let stored = repo.insert(product("A", "Tools")).await.unwrap();

        let updated = repo
            .update(
                stored.id,
                UpdateProduct {
                    price: Some(20.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.price, 20.0);
        assert_eq!(repo.get_by_id(stored.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let repo = InMemoryProductRepository::new();
        let result = repo
            .update(Uuid::new_v4(), UpdateProduct::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let repo = InMemoryProductRepository::new();
        let a = repo.insert(product("a", "Tools")).await.unwrap();
        let b = repo.insert(product("b", "Tools")).await.unwrap();

        assert!(repo.delete(a.id).await.unwrap());
        assert!(!repo.delete(a.id).await.unwrap());
        assert_eq!(repo.all().await.unwrap(), vec![b]);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let repo = InMemoryProductRepository::new();
        let other = repo.clone();
        other.insert(product("shared", "Tools")).await.unwrap();

        assert!(!repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_all_kept() {
        let repo = InMemoryProductRepository::new();
        let mut handles = Vec::new();
        for i in 0..50 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(product(&format!("p{i}"), "Tools")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.len().await, 50);
    }
}
