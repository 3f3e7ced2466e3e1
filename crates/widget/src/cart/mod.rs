//! Cart Service client.
//!
//! Line items are submitted one per request to `POST /cart/add.js`, the
//! same shape the storefront's own add-to-cart forms use. Transport
//! failures are translated into [`CartError`] at this boundary.

use std::sync::Arc;

use async_trait::async_trait;
use quickshop_core::VariantId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::WidgetConfig;

/// Errors that can occur when submitting cart lines.
#[derive(Debug, Error)]
pub enum CartError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("cart returned status {0}")]
    Status(reqwest::StatusCode),

    /// Endpoint URL could not be built.
    #[error("invalid cart URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A single line-item add request.
///
/// Created transiently by the cart composer per submission; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRequest {
    /// Variant to add.
    pub id: VariantId,
    /// Quantity to add.
    pub quantity: u32,
}

impl CartLineRequest {
    /// Create a line request.
    #[must_use]
    pub const fn new(id: VariantId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

/// Wire body for `POST /cart/add.js`.
#[derive(Debug, Serialize)]
struct AddToCartBody<'a> {
    items: &'a [CartLineRequest],
}

/// Write access to the cart.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Submit one line item to the cart.
    async fn add_line(&self, line: &CartLineRequest) -> Result<(), CartError>;
}

// =============================================================================
// HttpCartClient
// =============================================================================

/// Client for the shop's cart `.js` endpoint.
#[derive(Clone)]
pub struct HttpCartClient {
    inner: Arc<HttpCartClientInner>,
}

struct HttpCartClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCartClient {
    /// Create a new cart client.
    #[must_use]
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            inner: Arc::new(HttpCartClientInner {
                client: reqwest::Client::new(),
                base_url: config.shop_base_url.clone(),
            }),
        }
    }
}

#[async_trait]
impl CartService for HttpCartClient {
    /// Add one line item to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint rejects the
    /// line.
    #[instrument(skip(self), fields(variant_id = %line.id, quantity = line.quantity))]
    async fn add_line(&self, line: &CartLineRequest) -> Result<(), CartError> {
        let url = self.inner.base_url.join("cart/add.js")?;

        let body = AddToCartBody {
            items: std::slice::from_ref(line),
        };

        let response = self
            .inner
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body_text.chars().take(200).collect::<String>(),
                "Cart endpoint returned non-success status"
            );
            return Err(CartError::Status(status));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_body_wire_format() {
        let line = CartLineRequest::new(VariantId::new(40_001), 1);
        let body = AddToCartBody {
            items: std::slice::from_ref(&line),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"items":[{"id":40001,"quantity":1}]}"#);
    }
}
