//! HTTP implementation of the inventory client.
//!
//! Talks to a JSON REST API: `GET {base}/products/{id}` for catalog entries
//! and `GET {base}/stock/{id}` for stock counts. Catalog entries are cached
//! with `moka` (5-minute TTL); stock is never cached - the store must see
//! the latest count at mutation time.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use cartwright_core::{Product, ProductId, Stock};

use crate::config::InventoryConfig;
use crate::inventory::{InventoryClient, InventoryError};

const CATALOG_CACHE_CAPACITY: u64 = 1000;

/// Client for the inventory REST API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the catalog
/// cache.
#[derive(Clone)]
pub struct HttpInventoryClient {
    inner: Arc<HttpInventoryClientInner>,
}

struct HttpInventoryClientInner {
    client: reqwest::Client,
    base_url: String,
    catalog_cache: Cache<ProductId, Product>,
}

impl HttpInventoryClient {
    /// Create a new inventory API client.
    #[must_use]
    pub fn new(config: &InventoryConfig) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(HttpInventoryClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                catalog_cache,
            }),
        }
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, InventoryError> {
        let url = format!("{}/{path}/{id}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound(id));
        }
        if !response.status().is_success() {
            return Err(InventoryError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Drop all cached catalog entries.
    pub fn invalidate_catalog_cache(&self) {
        self.inner.catalog_cache.invalidate_all();
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        if let Some(product) = self.inner.catalog_cache.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json("products", id).await?;
        self.inner
            .catalog_cache
            .insert(id, product.clone())
            .await;
        Ok(product)
    }

    // Deliberately uncached: a stale count here would defeat the stock
    // validation the store performs at mutation time.
    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        self.get_json("stock", id).await
    }
}
