//! Quickshop Widget - product configurator core.
//!
//! Opens a modal session for a catalog item, tracks option-value picks,
//! resolves the matching purchasable variant, and submits line items to
//! the cart - optionally bundling an upsell item.
//!
//! # Architecture
//!
//! - [`catalog`] / [`cart`] - HTTP clients for the shop's `.js`
//!   endpoints, behind service traits so the core can be driven by
//!   in-memory doubles in tests
//! - [`variant_index`] / [`selection`] - pure selection and resolution
//!   logic over an immutable product snapshot
//! - [`composer`] - line-item planning, including the upsell rule
//! - [`session`] - the per-widget state machine tying it together
//! - [`render`] - typed events/commands exchanged with the host's
//!   rendering layer
//!
//! # Example
//!
//! ```rust,ignore
//! use quickshop_widget::prelude::*;
//!
//! let config = WidgetConfig::from_section_settings(settings_json)?;
//! let catalog = HttpCatalogClient::new(&config);
//! let cart = HttpCartClient::new(&config);
//! let mut controller = SessionController::new(config, catalog, cart, sink);
//!
//! controller.handle_event(UiEvent::OpenRequested { handle }).await?;
//! controller.handle_event(UiEvent::OptionClicked { slot: 0, value: "Black".into() }).await?;
//! controller.handle_event(UiEvent::AddToCartRequested).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod render;
pub mod selection;
pub mod session;
pub mod variant_index;

/// Commonly used types, re-exported.
pub mod prelude {
    pub use crate::cart::{CartLineRequest, CartService, HttpCartClient};
    pub use crate::catalog::{CatalogService, HttpCatalogClient, Product, Variant};
    pub use crate::config::WidgetConfig;
    pub use crate::error::{ErrorKind, WidgetError};
    pub use crate::render::{RenderSink, SelectionView, UiCommand, UiEvent};
    pub use crate::selection::SelectionState;
    pub use crate::session::{SessionController, SessionPhase};
}
