use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Category assigned when a product is created without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Page number used when `page` is missing, zero or not a number
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is missing, zero or not a number
pub const DEFAULT_LIMIT: i64 = 10;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Free-form category label
    pub category: String,
    /// Whether the product is available
    pub in_stock: bool,
}

/// Payload for creating a product. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    /// Stored as an empty string when absent
    pub name: Option<String>,
    /// Defaults to an empty string
    pub description: Option<String>,
    /// Defaults to 0
    pub price: Option<f64>,
    /// Defaults to "Uncategorized" when absent or empty
    pub category: Option<String>,
    /// Defaults to true
    pub in_stock: Option<bool>,
}

/// Partial update. Present fields overwrite, absent or null fields are kept.
///
/// There is no `id` field: unknown keys in the payload are ignored, so a
/// product's id can never be replaced through an update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// Query parameters for listing products.
///
/// `page` and `limit` are kept as raw strings and coerced leniently,
/// see [`ProductFilter::page`] and [`ProductFilter::limit`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Case-insensitive exact category match
    pub category: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
}

/// Search query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name (required)
    pub name: Option<String>,
}

/// One page of a product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    /// Number of products matching the filter, across all pages
    pub total: usize,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<Product>,
}

/// Aggregate statistics over the whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    /// Mean price, 0 when there are no products
    pub average_price: f64,
    pub count_by_category: BTreeMap<String, usize>,
}

impl Product {
    /// Create a new product from the creation payload, applying defaults
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            price: input.price.unwrap_or_default(),
            category: input
                .category
                .filter(|category| !category.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            in_stock: input.in_stock.unwrap_or(true),
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
    }

    /// Case-insensitive exact match on the category
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive substring match on the name; `needle` must already be lowercase
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

impl ProductFilter {
    /// Category to filter on; an empty value means no filter
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|category| !category.is_empty())
    }

    pub fn page(&self) -> i64 {
        coerce_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        coerce_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

impl ProductPage {
    /// Cut the requested page out of an already filtered listing
    pub fn paginate(filtered: Vec<Product>, page: i64, limit: i64) -> Self {
        let total = filtered.len();
        let window = page_window(total, page, limit);
        let data = filtered
            .into_iter()
            .skip(window.start)
            .take(window.len())
            .collect();

        Self {
            total,
            page,
            limit,
            data,
        }
    }
}

impl ProductStats {
    pub fn from_products(products: &[Product]) -> Self {
        let total_products = products.len();
        let average_price = if total_products > 0 {
            products.iter().map(|p| p.price).sum::<f64>() / total_products as f64
        } else {
            0.0
        };

        let count_by_category =
            products
                .iter()
                .fold(BTreeMap::new(), |mut counts: BTreeMap<String, usize>, p| {
                    *counts.entry(p.category.clone()).or_default() += 1;
                    counts
                });

        Self {
            total_products,
            average_price,
            count_by_category,
        }
    }
}

/// Parse the leading integer of `raw`, ignoring anything after it.
///
/// `"2"` → 2, `" 3rd"` → 3, `"1.9"` → 1, `"-4"` → -4, `"abc"` → None.
/// Digit runs too long for `i64` saturate to `i64::MAX` / `i64::MIN`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    // The run is all ASCII digits, so parsing can only fail on overflow.
    let value = match rest[..end].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

fn coerce_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_leading_int)
        .filter(|value| *value != 0)
        .unwrap_or(default)
}

/// Index range of page `page` with `limit` items per page, over `len` items.
///
/// The bounds are `(page - 1) * limit` and `page * limit`. Negative bounds
/// count back from the end, bounds are clamped to `0..=len`, and an inverted
/// range is empty.
pub fn page_window(len: usize, page: i64, limit: i64) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = page.saturating_mul(limit);

    let resolve = |index: i64| -> usize {
        let len = len as i64;
        if index < 0 {
            len.saturating_add(index).max(0) as usize
        } else {
            index.min(len) as usize
        }
    };

    let start = resolve(start);
    let end = resolve(end).max(start);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str, price: f64) -> Product {
        Product::new(CreateProduct {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            price: Some(price),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_product_applies_defaults() {
        let p = Product::new(CreateProduct::default());
        assert_eq!(p.name, "");
        assert_eq!(p.description, "");
        assert_eq!(p.price, 0.0);
        assert_eq!(p.category, DEFAULT_CATEGORY);
        assert!(p.in_stock);
    }

    #[test]
    fn test_new_product_empty_category_falls_back() {
        let p = product("Widget", "", 1.0);
        assert_eq!(p.category, "Uncategorized");
    }

    #[test]
    fn test_new_product_keeps_explicit_false_in_stock() {
        let p = Product::new(CreateProduct {
            in_stock: Some(false),
            ..Default::default()
        });
        assert!(!p.in_stock);
    }

    #[test]
    fn test_new_products_get_distinct_ids() {
        let a = Product::new(CreateProduct::default());
        let b = Product::new(CreateProduct::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_update_merges_present_fields_only() {
        let mut p = product("A", "Tools", 10.0);
        let id = p.id;

        p.apply_update(UpdateProduct {
            price: Some(20.0),
            ..Default::default()
        });

        assert_eq!(p.id, id);
        assert_eq!(p.name, "A");
        assert_eq!(p.category, "Tools");
        assert_eq!(p.price, 20.0);
    }

    #[test]
    fn test_update_payload_ignores_id() {
        let update: UpdateProduct =
            serde_json::from_str(r#"{"id":"not-allowed","name":"B","inStock":false}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("B"));
        assert_eq!(update.in_stock, Some(false));
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let p = product("Widget", "Tools", 2.5);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["inStock"], true);
        assert_eq!(json["id"], p.id.to_string());
        assert!(json.get("in_stock").is_none());
    }

    #[test]
    fn test_category_match_is_case_insensitive_and_exact() {
        let p = product("Widget", "Tools", 1.0);
        assert!(p.in_category("tools"));
        assert!(p.in_category("TOOLS"));
        assert!(!p.in_category("tool"));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("2"), Some(2));
        assert_eq!(parse_leading_int("  3rd"), Some(3));
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn test_filter_coercion_falls_back_to_defaults() {
        let filter = ProductFilter {
            category: Some(String::new()),
            page: Some("0".to_string()),
            limit: Some("lots".to_string()),
        };
        assert_eq!(filter.category(), None);
        assert_eq!(filter.page(), DEFAULT_PAGE);
        assert_eq!(filter.limit(), DEFAULT_LIMIT);

        let filter = ProductFilter::default();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), 10);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(15, 1, 10), 0..10);
        assert_eq!(page_window(15, 2, 10), 10..15);
        assert_eq!(page_window(15, 3, 10), 15..15);
        // negative bounds count back from the end
        assert_eq!(page_window(15, -1, 10), 0..5);
        assert_eq!(page_window(15, 1, -5), 0..10);
        assert_eq!(page_window(0, 1, 10), 0..0);
        assert_eq!(page_window(5, i64::MAX, i64::MAX), 5..5);
    }

    #[test]
    fn test_paginate_reports_filtered_total() {
        let products: Vec<Product> = (0..15)
            .map(|i| product(&format!("p{i}"), "Tools", 1.0))
            .collect();

        let page = ProductPage::paginate(products.clone(), 2, 10);
        assert_eq!(page.total, 15);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0], products[10]);
    }

    #[test]
    fn test_stats_on_empty_store() {
        let stats = ProductStats::from_products(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.average_price, 0.0);
        assert!(stats.count_by_category.is_empty());
    }

    #[test]
    fn test_stats_average_and_categories() {
        let products = vec![
            product("a", "Tools", 10.0),
            product("b", "Toys", 20.0),
            product("c", "Tools", 30.0),
        ];

        let stats = ProductStats::from_products(&products);
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.average_price, 20.0);
        assert_eq!(stats.count_by_category.get("Tools"), Some(&2));
        assert_eq!(stats.count_by_category.get("Toys"), Some(&1));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalProducts"], 3);
        assert_eq!(json["countByCategory"]["Tools"], 2);
    }
}
