//! Integration test support for Quickshop.
//!
//! Provides in-memory stand-ins for the widget's collaborators so the
//! session controller can be driven end-to-end without a network:
//!
//! - [`InMemoryCatalog`] - product catalog keyed by handle, with
//!   per-handle failure injection
//! - [`InMemoryCart`] - records submitted lines, with per-variant
//!   failure injection
//! - [`RecordingSink`] - captures every [`UiCommand`] for assertion
//!
//! All three are cheaply cloneable handles over shared state, so tests
//! keep a handle while the controller owns its copy.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quickshop_core::{CurrencyCode, Handle, Price, VariantId};
use quickshop_widget::cart::{CartError, CartLineRequest, CartService};
use quickshop_widget::catalog::{CatalogError, CatalogService, Product, ProductOption, Variant};
use quickshop_widget::config::WidgetConfig;
use quickshop_widget::error::ErrorKind;
use quickshop_widget::render::{RenderSink, UiCommand};

/// Initialize tracing output for a test binary (idempotent).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// ============================================================================
// In-Memory Catalog
// ============================================================================

#[derive(Default)]
struct CatalogState {
    products: HashMap<String, Arc<Product>>,
    failing: HashSet<String>,
    calls: Vec<String>,
}

/// In-memory [`CatalogService`] keyed by handle.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl InMemoryCatalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a product.
    pub fn insert(&self, product: Product) {
        let mut state = self.state.lock().expect("catalog mutex poisoned");
        state
            .products
            .insert(product.handle.as_str().to_owned(), Arc::new(product));
    }

    /// Make every fetch for `handle` fail with a 503.
    pub fn fail_handle(&self, handle: &str) {
        let mut state = self.state.lock().expect("catalog mutex poisoned");
        state.failing.insert(handle.to_owned());
    }

    /// Handles fetched so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().expect("catalog mutex poisoned").calls.clone()
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn product_by_handle(&self, handle: &Handle) -> Result<Arc<Product>, CatalogError> {
        let mut state = self.state.lock().expect("catalog mutex poisoned");
        state.calls.push(handle.as_str().to_owned());

        if state.failing.contains(handle.as_str()) {
            return Err(CatalogError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ));
        }

        state
            .products
            .get(handle.as_str())
            .cloned()
            .ok_or(CatalogError::Status(reqwest::StatusCode::NOT_FOUND))
    }
}

// ============================================================================
// In-Memory Cart
// ============================================================================

#[derive(Default)]
struct CartState {
    lines: Vec<CartLineRequest>,
    failing: HashSet<VariantId>,
}

/// In-memory [`CartService`] that records accepted lines.
#[derive(Clone, Default)]
pub struct InMemoryCart {
    state: Arc<Mutex<CartState>>,
}

impl InMemoryCart {
    /// Empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make adds for `id` fail with a 503.
    pub fn fail_variant(&self, id: VariantId) {
        let mut state = self.state.lock().expect("cart mutex poisoned");
        state.failing.insert(id);
    }

    /// Stop failing adds for `id`.
    pub fn clear_failure(&self, id: VariantId) {
        let mut state = self.state.lock().expect("cart mutex poisoned");
        state.failing.remove(&id);
    }

    /// Lines accepted so far, in submission order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLineRequest> {
        self.state.lock().expect("cart mutex poisoned").lines.clone()
    }
}

#[async_trait]
impl CartService for InMemoryCart {
    async fn add_line(&self, line: &CartLineRequest) -> Result<(), CartError> {
        let mut state = self.state.lock().expect("cart mutex poisoned");
        if state.failing.contains(&line.id) {
            return Err(CartError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        state.lines.push(*line);
        Ok(())
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// [`RenderSink`] capturing every command for assertion.
#[derive(Clone, Default)]
pub struct RecordingSink {
    commands: Arc<Mutex<Vec<UiCommand>>>,
}

impl RecordingSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands captured so far.
    #[must_use]
    pub fn commands(&self) -> Vec<UiCommand> {
        self.commands.lock().expect("sink mutex poisoned").clone()
    }

    /// Drain captured commands.
    #[must_use]
    pub fn take(&self) -> Vec<UiCommand> {
        std::mem::take(&mut *self.commands.lock().expect("sink mutex poisoned"))
    }

    /// Captured `ReportError` commands as `(kind, message)` pairs.
    #[must_use]
    pub fn errors(&self) -> Vec<(ErrorKind, String)> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                UiCommand::ReportError { kind, message } => Some((kind, message)),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn command(&mut self, command: UiCommand) {
        self.commands
            .lock()
            .expect("sink mutex poisoned")
            .push(command);
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Build a variant with positional option values.
#[must_use]
pub fn variant(id: i64, values: &[&str], available: bool, price: i64) -> Variant {
    Variant {
        id: VariantId::new(id),
        option_values: values.iter().map(|&v| v.to_owned()).collect(),
        available,
        price: Price::from_minor_units(price, CurrencyCode::USD),
    }
}

/// Build a product from option definitions and variants.
#[must_use]
pub fn product(handle: &str, options: &[(&str, &[&str])], variants: Vec<Variant>) -> Product {
    Product {
        handle: Handle::parse(handle).expect("fixture handle must be valid"),
        title: handle.to_owned(),
        description: String::new(),
        images: vec![],
        price: variants
            .first()
            .map_or(Price::from_minor_units(0, CurrencyCode::USD), |v| v.price),
        options: options
            .iter()
            .map(|(name, values)| ProductOption {
                name: (*name).to_owned(),
                values: values.iter().map(|&v| v.to_owned()).collect(),
            })
            .collect(),
        variants,
    }
}

/// The standard two-option test product.
///
/// Options `Color: [Red, Black]`, `Size: [Small, Medium]`, one variant
/// per combination; `Black/Medium` is id 4.
#[must_use]
pub fn sweater() -> Product {
    product(
        "wool-sweater",
        &[("Color", &["Red", "Black"]), ("Size", &["Small", "Medium"])],
        vec![
            variant(1, &["Red", "Small"], true, 4500),
            variant(2, &["Red", "Medium"], true, 4500),
            variant(3, &["Black", "Small"], true, 4700),
            variant(4, &["Black", "Medium"], true, 4700),
        ],
    )
}

/// The standard upsell product: first variant unavailable (id 90),
/// second available (id 91).
#[must_use]
pub fn care_kit() -> Product {
    product(
        "care-kit",
        &[],
        vec![variant(90, &[], false, 900), variant(91, &[], true, 900)],
    )
}

/// Widget configuration with or without the upsell handle.
#[must_use]
pub fn widget_config(with_upsell: bool) -> WidgetConfig {
    let mut settings = serde_json::json!({"shopBaseUrl": "https://shop.example.com"});
    if with_upsell {
        settings["upsellHandle"] = serde_json::json!("care-kit");
    }
    WidgetConfig::from_section_settings(&settings.to_string())
        .expect("fixture settings must be valid")
}
