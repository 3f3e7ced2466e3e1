//! Catalog Service client.
//!
//! # Architecture
//!
//! - The shop's `.js` JSON endpoints are the source of truth - no local
//!   sync, direct API calls
//! - In-memory caching via `moka` for product responses (5 minute TTL)
//! - Raw payloads are deserialized separately (`payload`) and converted
//!   into the domain types in [`types`]
//!
//! Transport and payload failures are translated into [`CatalogError`]
//! here; raw `reqwest`/`serde_json` errors never reach the session state
//! machine.

mod payload;
pub mod types;

pub use types::{Product, ProductOption, Variant};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use quickshop_core::Handle;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::WidgetConfig;

use payload::{ProductPayload, convert_product};

/// Errors that can occur when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("catalog returned status {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Payload parsed but is not a usable product.
    #[error("invalid product payload: {0}")]
    Payload(String),

    /// Endpoint URL could not be built.
    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Read-only access to product data, keyed by handle.
///
/// The session controller and cart composer depend on this trait rather
/// than the HTTP client so they can be driven by in-memory catalogs in
/// tests.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch the product for `handle`.
    async fn product_by_handle(&self, handle: &Handle) -> Result<Arc<Product>, CatalogError>;
}

// =============================================================================
// HttpCatalogClient
// =============================================================================

/// Client for the shop's product `.js` endpoint.
///
/// Products are cached for 5 minutes.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<String, Arc<Product>>,
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &WidgetConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(HttpCatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.shop_base_url.clone(),
                cache,
            }),
        }
    }

    async fn fetch(&self, handle: &Handle) -> Result<Arc<Product>, CatalogError> {
        let url = self
            .inner
            .base_url
            .join(&format!("products/{handle}.js"))?;

        let response = self
            .inner
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                handle = %handle,
                body = %response_text.chars().take(200).collect::<String>(),
                "Catalog endpoint returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        let payload: ProductPayload = serde_json::from_str(&response_text)?;

        convert_product(payload).map(Arc::new)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be fetched or the payload
    /// cannot be understood.
    #[instrument(skip(self), fields(handle = %handle))]
    async fn product_by_handle(&self, handle: &Handle) -> Result<Arc<Product>, CatalogError> {
        if let Some(product) = self.inner.cache.get(handle.as_str()).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product = self.fetch(handle).await?;
        self.inner
            .cache
            .insert(handle.as_str().to_owned(), Arc::clone(&product))
            .await;

        Ok(product)
    }
}
