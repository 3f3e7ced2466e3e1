//! Unified error handling for the configurator.
//!
//! Network-originating errors are translated into [`CatalogError`] /
//! [`CartError`] at the boundary where the call is made; no raw transport
//! errors reach the session state machine. The session controller reports
//! recoverable failures to the rendering layer as an [`ErrorKind`] plus
//! message and only propagates selection-validation defects to the host.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::selection::InvalidSelectionValue;

/// Error classes surfaced to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Product or upsell fetch failed.
    CatalogLoad,
    /// Primary cart submission failed.
    CartAdd,
    /// A selection value outside the option's allowed set (a UI defect).
    InvalidSelection,
}

/// Application-level error type for the widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Selection validation failed.
    #[error("Selection error: {0}")]
    Selection(#[from] InvalidSelectionValue),
}

impl WidgetError {
    /// The error class to report to the rendering layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog(_) => ErrorKind::CatalogLoad,
            Self::Cart(_) => ErrorKind::CartAdd,
            Self::Selection(_) => ErrorKind::InvalidSelection,
        }
    }
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;
