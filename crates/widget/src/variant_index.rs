//! Lookup from ordered option values to a purchasable variant.

use quickshop_core::VariantId;

use crate::catalog::Product;

/// Index over a product's variants, keyed by positional option values.
///
/// Built once per product snapshot; owns copied value tuples so it has no
/// lifetime tie to the product. Pure - resolution never mutates.
#[derive(Debug, Clone)]
pub struct VariantIndex {
    option_count: usize,
    /// `(option values, variant id)` in catalog order.
    entries: Vec<(Vec<String>, VariantId)>,
}

impl VariantIndex {
    /// Build the index from a product snapshot.
    #[must_use]
    pub fn build(product: &Product) -> Self {
        Self {
            option_count: product.option_count(),
            entries: product
                .variants
                .iter()
                .map(|v| (v.option_values.clone(), v.id))
                .collect(),
        }
    }

    /// Resolve an ordered selection vector to a variant.
    ///
    /// Returns `None` unless every option slot holds a value; committing
    /// to a variant requires the full specification. When several variants
    /// match (malformed catalog data), the first in catalog order wins -
    /// a defined tie-break, not an error.
    #[must_use]
    pub fn resolve(&self, selection: &[Option<String>]) -> Option<VariantId> {
        if selection.len() < self.option_count {
            return None;
        }
        if selection.iter().any(Option::is_none) {
            return None;
        }

        self.entries
            .iter()
            .find(|(values, _)| Self::matches(values, selection))
            .map(|&(_, id)| id)
    }

    /// Positional matching rule: every filled selection slot must equal
    /// the variant's value at that slot exactly (case-sensitive); empty
    /// slots act as wildcards.
    fn matches(values: &[String], selection: &[Option<String>]) -> bool {
        selection.iter().enumerate().all(|(slot, chosen)| {
            chosen
                .as_ref()
                .is_none_or(|want| values.get(slot).is_some_and(|have| have == want))
        })
    }
}
