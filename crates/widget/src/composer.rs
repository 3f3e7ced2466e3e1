//! Line-item planning for one cart submission.

use quickshop_core::Handle;
use tracing::{instrument, warn};

use crate::cart::CartLineRequest;
use crate::catalog::{CatalogService, Variant};

/// Option values that trigger the bundled upsell line. Both must appear
/// among the resolved variant's values, in any slots, matched
/// case-insensitively.
const UPSELL_TRIGGER_COLOR: &str = "black";
const UPSELL_TRIGGER_SIZE: &str = "medium";

/// Plans the ordered line items for a resolved variant.
///
/// The primary line always comes first; the upsell line, when the trigger
/// rule holds and an upsell handle is configured, is appended after it.
/// The caller must submit lines in the composed order.
pub struct CartComposer<'a, C: CatalogService + ?Sized> {
    catalog: &'a C,
    upsell_handle: Option<&'a Handle>,
}

impl<'a, C: CatalogService + ?Sized> CartComposer<'a, C> {
    /// Create a composer over a catalog service and optional upsell
    /// handle.
    pub fn new(catalog: &'a C, upsell_handle: Option<&'a Handle>) -> Self {
        Self {
            catalog,
            upsell_handle,
        }
    }

    /// Compose the ordered line list for `variant`.
    ///
    /// Always emits the primary line with quantity 1 first. An upsell
    /// fetch failure or an upsell product without variants only drops the
    /// upsell line - the primary submission is unaffected.
    #[instrument(skip(self, variant), fields(variant_id = %variant.id))]
    pub async fn compose(&self, variant: &Variant) -> Vec<CartLineRequest> {
        let mut lines = vec![CartLineRequest::new(variant.id, 1)];

        let Some(handle) = self.upsell_handle else {
            return lines;
        };
        if !Self::triggers_upsell(variant) {
            return lines;
        }

        match self.catalog.product_by_handle(handle).await {
            Ok(upsell) => {
                if let Some(upsell_variant) = upsell.first_available_variant() {
                    lines.push(CartLineRequest::new(upsell_variant.id, 1));
                } else {
                    warn!(handle = %handle, "upsell product has no variants");
                }
            }
            Err(error) => {
                warn!(handle = %handle, error = %error, "upsell product fetch failed");
            }
        }

        lines
    }

    /// Whether the variant's values contain both trigger values.
    fn triggers_upsell(variant: &Variant) -> bool {
        let contains = |needle: &str| {
            variant
                .option_values
                .iter()
                .any(|value| value.eq_ignore_ascii_case(needle))
        };
        contains(UPSELL_TRIGGER_COLOR) && contains(UPSELL_TRIGGER_SIZE)
    }
}
