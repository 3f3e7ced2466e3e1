//! Typed interface between the configurator core and the rendering layer.
//!
//! The host draws the modal and reports user interaction as [`UiEvent`]s;
//! the core answers with [`UiCommand`]s through a [`RenderSink`]. This
//! keeps selection/resolution logic free of any DOM wiring and unit
//! testable without rendering.

use std::sync::Arc;

use quickshop_core::{Handle, Price, VariantId};
use serde::Serialize;

use crate::catalog::Product;
use crate::error::ErrorKind;
use crate::selection::SelectionState;

/// User interaction reported by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A product tile was activated.
    OpenRequested {
        /// Handle of the product to configure.
        handle: Handle,
    },
    /// An option value button was clicked.
    OptionClicked {
        /// Option slot index in declaration order.
        slot: usize,
        /// Clicked value.
        value: String,
    },
    /// The add-to-cart button was clicked.
    AddToCartRequested,
    /// The modal was dismissed.
    CloseRequested,
}

/// Command issued to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Draw the modal for a freshly loaded product.
    ShowModal {
        /// Product snapshot to render.
        product: Arc<Product>,
        /// Initial selection view (defaults already applied).
        view: SelectionView,
    },
    /// Redraw the option/price area after a selection change.
    UpdateSelectionView {
        /// Post-mutation selection view.
        view: SelectionView,
    },
    /// Hide the modal.
    HideModal,
    /// Surface the cart (open the cart drawer if present).
    OpenCartDrawer,
    /// Surface an error to the user.
    ReportError {
        /// Error class.
        kind: ErrorKind,
        /// Human-readable message.
        message: String,
    },
}

/// Receiver for [`UiCommand`]s.
///
/// Commands are fire-and-forget; the sink must not call back into the
/// controller while handling one.
pub trait RenderSink {
    /// Handle one command.
    fn command(&mut self, command: UiCommand);
}

// =============================================================================
// Selection Views
// =============================================================================

/// One option slot's display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    /// Option name (e.g., "Color").
    pub name: String,
    /// Allowed values in declaration order.
    pub values: Vec<String>,
    /// Currently chosen value, if any.
    pub selected: Option<String>,
}

/// Display data for the resolved variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedVariantView {
    /// Resolved variant ID.
    pub id: VariantId,
    /// Variant price.
    pub price: Price,
    /// Whether the variant is available for sale.
    pub available: bool,
}

/// Selection display data handed to the rendering layer.
///
/// Always built after all pending slot mutations have applied, so the
/// host never sees a partial intermediate state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    /// Per-slot display data in option declaration order.
    pub slots: Vec<SlotView>,
    /// Resolved variant data, when the selection resolves.
    pub resolved: Option<ResolvedVariantView>,
}

impl From<&SelectionState> for SelectionView {
    fn from(selection: &SelectionState) -> Self {
        let product = selection.product();

        let slots = product
            .options
            .iter()
            .zip(selection.values())
            .map(|(option, chosen)| SlotView {
                name: option.name.clone(),
                values: option.values.clone(),
                selected: chosen.clone(),
            })
            .collect();

        let resolved = selection.current_variant().map(|v| ResolvedVariantView {
            id: v.id,
            price: v.price,
            available: v.available,
        });

        Self { slots, resolved }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickshop_core::CurrencyCode;

    use super::*;
    use crate::catalog::{ProductOption, Variant};

    fn product() -> Arc<Product> {
        Arc::new(Product {
            handle: Handle::parse("wool-sweater").unwrap(),
            title: "Wool Sweater".to_owned(),
            description: String::new(),
            images: vec![],
            price: Price::from_minor_units(4500, CurrencyCode::USD),
            options: vec![ProductOption {
                name: "Size".to_owned(),
                values: vec!["Small".to_owned(), "Medium".to_owned()],
            }],
            variants: vec![Variant {
                id: VariantId::new(7),
                option_values: vec!["Medium".to_owned()],
                available: true,
                price: Price::from_minor_units(4700, CurrencyCode::USD),
            }],
        })
    }

    #[test]
    fn test_view_reflects_unresolved_selection() {
        let selection = SelectionState::new(product());
        let view = SelectionView::from(&selection);

        assert_eq!(view.slots.len(), 1);
        assert_eq!(view.slots[0].name, "Size");
        assert_eq!(view.slots[0].selected, None);
        assert!(view.resolved.is_none());
    }

    #[test]
    fn test_view_carries_resolved_variant() {
        let mut selection = SelectionState::new(product());
        selection.set_slot(0, "Medium").unwrap();

        let view = SelectionView::from(&selection);
        let resolved = view.resolved.unwrap();
        assert_eq!(resolved.id, VariantId::new(7));
        assert_eq!(resolved.price.minor_units(), 4700);
        assert!(resolved.available);
    }
}
