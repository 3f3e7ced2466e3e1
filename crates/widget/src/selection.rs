//! Per-slot option selection for one configurator session.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{Product, Variant};
use crate::variant_index::VariantIndex;

/// A selection value was rejected.
///
/// This signals a rendering-layer defect (the UI offered a value the
/// product does not declare), so it fails fast and is never silently
/// ignored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidSelectionValue {
    /// The slot index does not exist on this product.
    #[error("option slot {slot} is out of range (product has {count} options)")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of option slots on the product.
        count: usize,
    },
    /// The value is not in the option's allowed set.
    #[error("value {value:?} is not allowed for option {option:?}")]
    ValueNotAllowed {
        /// Option name for the slot.
        option: String,
        /// Rejected value.
        value: String,
    },
}

/// Tracks which value, if any, is chosen per option slot.
///
/// Owned exclusively by the session controller for the session's
/// lifetime. Setting a slot is the only mutation; resolution never
/// mutates.
#[derive(Debug, Clone)]
pub struct SelectionState {
    product: Arc<Product>,
    index: VariantIndex,
    slots: Vec<Option<String>>,
}

impl SelectionState {
    /// Create an empty selection over a product snapshot.
    #[must_use]
    pub fn new(product: Arc<Product>) -> Self {
        let index = VariantIndex::build(&product);
        let slots = vec![None; product.option_count()];
        Self {
            product,
            index,
            slots,
        }
    }

    /// Choose `value` for option slot `slot` (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSelectionValue`] without mutating state when the
    /// slot is out of range or the value is not in the option's allowed
    /// set.
    pub fn set_slot(&mut self, slot: usize, value: &str) -> Result<(), InvalidSelectionValue> {
        let option = self
            .product
            .options
            .get(slot)
            .ok_or(InvalidSelectionValue::SlotOutOfRange {
                slot,
                count: self.product.option_count(),
            })?;

        if !option.values.iter().any(|allowed| allowed == value) {
            return Err(InvalidSelectionValue::ValueNotAllowed {
                option: option.name.clone(),
                value: value.to_owned(),
            });
        }

        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(value.to_owned());
        }
        Ok(())
    }

    /// Reset every slot to unchosen.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Whether every option slot holds a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Whether no slot holds a value (the initial state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Current selection vector, one entry per option slot.
    #[must_use]
    pub fn values(&self) -> &[Option<String>] {
        &self.slots
    }

    /// The product this selection configures.
    #[must_use]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// The variant the current selection resolves to.
    ///
    /// `None` while the selection is incomplete or when no variant
    /// matches.
    #[must_use]
    pub fn current_variant(&self) -> Option<&Variant> {
        let id = self.index.resolve(&self.slots)?;
        self.product.variant(id)
    }
}
