//! Widget configuration loaded from the host page's section settings.
//!
//! # Section Settings
//!
//! The host embeds a JSON settings object per widget instance:
//!
//! ## Required
//! - `shopBaseUrl` - Origin the catalog and cart endpoints live under
//!
//! ## Optional
//! - `upsellHandle` - Handle of the product bundled by the upsell rule
//!
//! Unknown keys (presentation texts and the like) are ignored.

use quickshop_core::{Handle, HandleError};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings JSON could not be parsed.
    #[error("invalid section settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// The base URL could not be parsed.
    #[error("invalid shopBaseUrl: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// The base URL uses a scheme other than http/https.
    #[error("unsupported shopBaseUrl scheme {0:?}")]
    UnsupportedScheme(String),
    /// The upsell handle failed validation.
    #[error("invalid upsellHandle: {0}")]
    InvalidUpsellHandle(#[from] HandleError),
}

/// Raw section settings as embedded by the host page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionSettings {
    shop_base_url: String,
    #[serde(default)]
    upsell_handle: Option<String>,
}

/// Widget application configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Origin the catalog and cart endpoints live under.
    pub shop_base_url: Url,
    /// Product bundled by the upsell rule, when configured.
    pub upsell_handle: Option<Handle>,
}

impl WidgetConfig {
    /// Create a configuration without an upsell product.
    #[must_use]
    pub const fn new(shop_base_url: Url) -> Self {
        Self {
            shop_base_url,
            upsell_handle: None,
        }
    }

    /// Set the upsell product handle.
    #[must_use]
    pub fn with_upsell(mut self, handle: Handle) -> Self {
        self.upsell_handle = Some(handle);
        self
    }

    /// Load and validate configuration from a section-settings JSON
    /// string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed, the base URL is
    /// missing/non-http(s), or the upsell handle fails validation. An
    /// empty `upsellHandle` string is treated as unset (the host's
    /// settings form serializes a cleared field that way).
    pub fn from_section_settings(json: &str) -> Result<Self, ConfigError> {
        let settings: SectionSettings = serde_json::from_str(json)?;

        let shop_base_url = Url::parse(&settings.shop_base_url)?;
        if !matches!(shop_base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(
                shop_base_url.scheme().to_owned(),
            ));
        }

        let upsell_handle = settings
            .upsell_handle
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(Handle::parse)
            .transpose()?;

        Ok(Self {
            shop_base_url,
            upsell_handle,
        })
    }
}
