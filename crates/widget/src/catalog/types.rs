//! Domain types for the shop catalog.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! `.js` endpoint payloads (see `payload`).

use quickshop_core::{Handle, Price, VariantId};
use serde::{Deserialize, Serialize};

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Allowed values in declaration order (e.g., `["Small", "Medium", "Large"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant ID (pass to the cart).
    pub id: VariantId,
    /// Option values by slot position, in option declaration order.
    ///
    /// Vacant trailing slots are dropped, so a two-option product's
    /// variants carry two values.
    pub option_values: Vec<String>,
    /// Whether this variant is available for sale.
    pub available: bool,
    /// Current price.
    pub price: Price,
}

impl Variant {
    /// The option value at a slot position, if the variant carries one.
    #[must_use]
    pub fn value_at(&self, slot: usize) -> Option<&str> {
        self.option_values.get(slot).map(String::as_str)
    }
}

/// Immutable product snapshot for one configuration session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// URL handle.
    pub handle: Handle,
    /// Product title.
    pub title: String,
    /// HTML description (rendered by the host; not interpreted here).
    pub description: String,
    /// Image URLs.
    pub images: Vec<String>,
    /// Base price.
    pub price: Price,
    /// Product options in declaration order.
    pub options: Vec<ProductOption>,
    /// Product variants in catalog order.
    pub variants: Vec<Variant>,
}

impl Product {
    /// Number of option slots on this product.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Look up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// First variant in catalog order.
    #[must_use]
    pub fn first_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// First variant marked available, falling back to the first variant.
    #[must_use]
    pub fn first_available_variant(&self) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.available)
            .or_else(|| self.variants.first())
    }
}
