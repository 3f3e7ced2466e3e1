//! Raw payload structures for the `/products/{handle}.js` endpoint.

use quickshop_core::{CurrencyCode, Handle, Price, VariantId};
use serde::Deserialize;

use super::CatalogError;
use super::types::{Product, ProductOption, Variant};

/// Product payload as returned by `GET /products/{handle}.js`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductPayload {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Base price in minor units; absent on some themes.
    pub price: Option<i64>,
    #[serde(default)]
    pub options: Vec<OptionPayload>,
    #[serde(default)]
    pub variants: Vec<VariantPayload>,
}

/// Option payload: name plus allowed values.
#[derive(Debug, Deserialize)]
pub(crate) struct OptionPayload {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Variant payload with positional option slots.
#[derive(Debug, Deserialize)]
pub(crate) struct VariantPayload {
    pub id: i64,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub available: bool,
}

/// Convert a raw product payload into the domain [`Product`].
///
/// The base price falls back to the first variant's price when the payload
/// omits it. Vacant variant option slots are dropped.
pub(crate) fn convert_product(payload: ProductPayload) -> Result<Product, CatalogError> {
    let handle = Handle::parse(&payload.handle)
        .map_err(|e| CatalogError::Payload(format!("bad handle {:?}: {e}", payload.handle)))?;

    let minor_units = payload
        .price
        .or_else(|| payload.variants.first().map(|v| v.price))
        .unwrap_or(0);

    Ok(Product {
        handle,
        title: payload.title,
        description: payload.description,
        images: payload.images,
        price: Price::from_minor_units(minor_units, CurrencyCode::default()),
        options: payload
            .options
            .into_iter()
            .map(|opt| ProductOption {
                name: opt.name,
                values: opt.values,
            })
            .collect(),
        variants: payload.variants.into_iter().map(convert_variant).collect(),
    })
}

fn convert_variant(payload: VariantPayload) -> Variant {
    Variant {
        id: VariantId::new(payload.id),
        option_values: [payload.option1, payload.option2, payload.option3]
            .into_iter()
            .flatten()
            .collect(),
        available: payload.available,
        price: Price::from_minor_units(payload.price, CurrencyCode::default()),
    }
}
