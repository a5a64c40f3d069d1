//! Categories, foods and restaurants.

use futures::future::try_join_all;

use super::models::{Category, Food, Restaurant};
use super::{Page, fetch_list, fetch_page};
use crate::error::Result;
use crate::gateway::{ApiRequest, Gateway};

/// Page size used when pulling a whole collection for local processing.
pub const FETCH_ALL_PAGE_SIZE: u32 = 1000;

/// Server-side query for `/foods`. Backend pages are zero-based.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodQuery {
    pub page: u32,
    pub size: u32,
    pub search: Option<String>,
    pub category_id: Option<u64>,
}

impl FoodQuery {
    fn to_request(&self, path: &str) -> ApiRequest {
        ApiRequest::get(path)
            .query("page", self.page)
            .query("size", self.size)
            .query_opt("search", self.search.as_deref().filter(|s| !s.trim().is_empty()))
            .query_opt("categoryId", self.category_id)
    }
}

pub struct CatalogApi {
    gateway: Gateway,
}

impl CatalogApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        fetch_list(&self.gateway, ApiRequest::get("/categories")).await
    }

    pub async fn foods(&self, query: &FoodQuery) -> Result<Page<Food>> {
        fetch_page(&self.gateway, query.to_request("/foods")).await
    }

    pub async fn food(&self, id: u64) -> Result<Food> {
        self.gateway.get_json(&format!("/foods/{id}")).await
    }

    /// Every food, for in-memory search and filtering.
    pub async fn all_foods(&self) -> Result<Vec<Food>> {
        self.fetch_all("/foods").await
    }

    pub async fn restaurants(&self, query: &FoodQuery) -> Result<Page<Restaurant>> {
        let request = ApiRequest::get("/restaurants")
            .query("page", query.page)
            .query("size", query.size)
            .query_opt("search", query.search.as_deref().filter(|s| !s.trim().is_empty()));
        fetch_page(&self.gateway, request).await
    }

    pub async fn all_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.fetch_all("/restaurants").await
    }

    /// Request one oversized page, then any remaining pages concurrently.
    async fn fetch_all<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let first_query = FoodQuery {
            page: 0,
            size: FETCH_ALL_PAGE_SIZE,
            ..FoodQuery::default()
        };
        let first: Page<T> = fetch_page(&self.gateway, first_query.to_request(path)).await?;
        if first.total_pages <= 1 {
            return Ok(first.items);
        }

        tracing::debug!(path, total_pages = first.total_pages, "fetching remaining pages");
        let rest = (1..first.total_pages).map(|page| {
            let query = FoodQuery {
                page,
                size: FETCH_ALL_PAGE_SIZE,
                ..FoodQuery::default()
            };
            fetch_page::<T>(&self.gateway, query.to_request(path))
        });
        let pages = try_join_all(rest).await?;

        let mut items = first.items;
        for page in pages {
            items.extend(page.items);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::harness;
    use super::*;

    #[tokio::test]
    async fn test_food_query_parameters() {
        let h = harness();
        h.transport.on_get("/foods", r#"{"content":[],"totalPages":0}"#);

        let query = FoodQuery {
            page: 2,
            size: 12,
            search: Some("bún".to_string()),
            category_id: Some(4),
        };
        let page = h.api.catalog().foods(&query).await.unwrap();
        assert!(page.items.is_empty());

        let sent = h.transport.last().unwrap();
        let pairs: Vec<(String, String)> = sent.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "12".to_string()),
                ("search".to_string(), "bún".to_string()),
                ("categoryId".to_string(), "4".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_search_is_omitted() {
        let h = harness();
        h.transport.on_get("/restaurants", "[]");
        let query = FoodQuery {
            search: Some("  ".to_string()),
            ..FoodQuery::default()
        };
        h.api.catalog().restaurants(&query).await.unwrap();
        let sent = h.transport.last().unwrap();
        assert!(!sent.url.query_pairs().any(|(k, _)| k == "search"));
    }

    #[tokio::test]
    async fn test_all_foods_single_page() {
        let h = harness();
        h.transport.on_get(
            "/foods",
            r#"[{"id":1,"name":"Phở","price":40000},{"id":2,"name":"Bánh mì","price":20000}]"#,
        );
        let foods = h.api.catalog().all_foods().await.unwrap();
        assert_eq!(foods.len(), 2);
        assert_eq!(h.transport.count(), 1);
    }

    #[tokio::test]
    async fn test_food_by_id() {
        let h = harness();
        h.transport
            .on_get("/foods/9", r#"{"id":9,"name":"Chè","price":15000}"#);
        let food = h.api.catalog().food(9).await.unwrap();
        assert_eq!(food.name, "Chè");
    }
}
