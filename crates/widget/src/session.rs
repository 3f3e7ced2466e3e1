//! Session controller: orchestrates one "configure a product" session.
//!
//! The controller is single-threaded and event-driven: user interactions
//! and network completions are discrete events processed one at a time.
//! Network calls are the only suspension points, with at most one
//! in-flight catalog load per controller - a newer open supersedes an
//! older one, and the older response is discarded when it finally
//! arrives (see [`LoadTicket`]).

use std::sync::Arc;

use quickshop_core::Handle;
use tracing::instrument;
use uuid::Uuid;

use crate::cart::CartService;
use crate::catalog::{CatalogError, CatalogService, Product};
use crate::composer::CartComposer;
use crate::config::WidgetConfig;
use crate::error::{ErrorKind, WidgetError};
use crate::render::{RenderSink, SelectionView, UiCommand, UiEvent};
use crate::selection::SelectionState;

/// Observable controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No active product.
    Idle,
    /// A product load is in flight.
    Loading,
    /// A product is open and accepting option clicks.
    Configuring,
    /// A cart submission is in progress.
    Submitting,
    /// The session ended; product and selection released.
    Closed,
}

/// Token for one product load.
///
/// Minted by [`SessionController::begin_load`] and consumed by
/// [`SessionController::finish_load`]; a ticket whose generation no
/// longer matches the controller's is stale and its result is discarded.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
    handle: Handle,
}

impl LoadTicket {
    /// The handle this load is for.
    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// One open configurator session.
struct ActiveSession {
    id: Uuid,
    selection: SelectionState,
}

enum Phase {
    Idle,
    Loading,
    Configuring(ActiveSession),
    Submitting,
    Closed,
}

/// Orchestrates product loading, selection tracking, and cart
/// submission for one widget instance.
///
/// Owns the collaborating services and the render sink; the host feeds
/// it [`UiEvent`]s and receives [`UiCommand`]s back through the sink.
pub struct SessionController<Cat, Crt, R> {
    config: WidgetConfig,
    catalog: Cat,
    cart: Crt,
    sink: R,
    phase: Phase,
    load_generation: u64,
}

impl<Cat, Crt, R> SessionController<Cat, Crt, R>
where
    Cat: CatalogService,
    Crt: CartService,
    R: RenderSink,
{
    /// Create an idle controller.
    pub fn new(config: WidgetConfig, catalog: Cat, cart: Crt, sink: R) -> Self {
        Self {
            config,
            catalog,
            cart,
            sink,
            phase: Phase::Idle,
            load_generation: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.phase {
            Phase::Idle => SessionPhase::Idle,
            Phase::Loading => SessionPhase::Loading,
            Phase::Configuring(_) => SessionPhase::Configuring,
            Phase::Submitting => SessionPhase::Submitting,
            Phase::Closed => SessionPhase::Closed,
        }
    }

    /// The open session's product snapshot, if configuring.
    #[must_use]
    pub fn product(&self) -> Option<&Arc<Product>> {
        match &self.phase {
            Phase::Configuring(session) => Some(session.selection.product()),
            _ => None,
        }
    }

    /// The open session's selection state, if configuring.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionState> {
        match &self.phase {
            Phase::Configuring(session) => Some(&session.selection),
            _ => None,
        }
    }

    /// Process one rendering-layer event.
    ///
    /// # Errors
    ///
    /// Only selection validation defects ([`WidgetError::Selection`]) are
    /// returned to the host - they signal a rendering-layer bug. Catalog
    /// and cart failures are handled internally and surfaced through
    /// [`UiCommand::ReportError`].
    pub async fn handle_event(&mut self, event: UiEvent) -> Result<(), WidgetError> {
        match event {
            UiEvent::OpenRequested { handle } => {
                self.open_product(handle).await;
                Ok(())
            }
            UiEvent::OptionClicked { slot, value } => self.option_clicked(slot, &value),
            UiEvent::AddToCartRequested => {
                self.submit().await;
                Ok(())
            }
            UiEvent::CloseRequested => {
                self.close();
                Ok(())
            }
        }
    }

    /// Load a product and open a session for it.
    ///
    /// Convenience driver for hosts that let the controller await the
    /// fetch itself; event-loop hosts can instead pair
    /// [`begin_load`](Self::begin_load) with
    /// [`finish_load`](Self::finish_load).
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn open_product(&mut self, handle: Handle) {
        let ticket = self.begin_load(handle);
        let result = self.catalog.product_by_handle(&ticket.handle).await;
        self.finish_load(ticket, result);
    }

    /// Start a product load, superseding any load still in flight.
    pub fn begin_load(&mut self, handle: Handle) -> LoadTicket {
        self.load_generation += 1;
        tracing::debug!(
            handle = %handle,
            generation = self.load_generation,
            "product load started"
        );
        self.phase = Phase::Loading;
        LoadTicket {
            generation: self.load_generation,
            handle,
        }
    }

    /// Apply a load result.
    ///
    /// A stale ticket (superseded by a newer open or a close) is
    /// discarded without touching the newer state.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Arc<Product>, CatalogError>,
    ) {
        if ticket.generation != self.load_generation {
            tracing::debug!(handle = %ticket.handle, "discarding stale catalog response");
            return;
        }

        match result {
            Ok(product) => self.start_session(product),
            Err(error) => {
                tracing::error!(handle = %ticket.handle, error = %error, "product load failed");
                self.phase = Phase::Idle;
                self.sink.command(UiCommand::ReportError {
                    kind: ErrorKind::CatalogLoad,
                    message: error.to_string(),
                });
            }
        }
    }

    /// Open a session over a loaded product: seed an empty selection,
    /// apply the catalog default-selection convention (first allowed
    /// value of each option in declaration order), and show the modal.
    fn start_session(&mut self, product: Arc<Product>) {
        let id = Uuid::new_v4();
        let mut selection = SelectionState::new(Arc::clone(&product));

        for (slot, option) in product.options.iter().enumerate() {
            if let Some(first) = option.values.first() {
                // The first value always belongs to its own option's list.
                let _ = selection.set_slot(slot, first);
            }
        }

        let view = SelectionView::from(&selection);
        tracing::info!(
            session_id = %id,
            handle = %product.handle,
            "configurator session started"
        );
        self.phase = Phase::Configuring(ActiveSession { id, selection });
        self.sink.command(UiCommand::ShowModal { product, view });
    }

    /// Apply one option click to the open session.
    fn option_clicked(&mut self, slot: usize, value: &str) -> Result<(), WidgetError> {
        let Phase::Configuring(session) = &mut self.phase else {
            tracing::debug!(slot, value, "option click ignored outside configuring");
            return Ok(());
        };

        if let Err(error) = session.selection.set_slot(slot, value) {
            tracing::error!(
                session_id = %session.id,
                slot,
                value,
                error = %error,
                "rejected selection value"
            );
            self.sink.command(UiCommand::ReportError {
                kind: ErrorKind::InvalidSelection,
                message: error.to_string(),
            });
            return Err(error.into());
        }

        let view = SelectionView::from(&session.selection);
        self.sink.command(UiCommand::UpdateSelectionView { view });
        Ok(())
    }

    /// Submit the resolved variant (plus any upsell line) to the cart.
    #[instrument(skip(self))]
    async fn submit(&mut self) {
        let session = match std::mem::replace(&mut self.phase, Phase::Submitting) {
            Phase::Configuring(session) => session,
            other => {
                self.phase = other;
                tracing::debug!("add to cart ignored outside configuring");
                return;
            }
        };

        // Fall back to the first variant only when the selection never
        // had any activity (options never rendered); a missing
        // resolution after activity is a no-op add.
        let resolved = session.selection.current_variant().cloned().or_else(|| {
            if session.selection.is_empty() {
                session.selection.product().first_variant().cloned()
            } else {
                None
            }
        });

        let Some(variant) = resolved else {
            tracing::debug!(session_id = %session.id, "no resolvable variant; nothing submitted");
            self.phase = Phase::Configuring(session);
            return;
        };

        let composer = CartComposer::new(&self.catalog, self.config.upsell_handle.as_ref());
        let lines = composer.compose(&variant).await;

        let Some((primary, extras)) = lines.split_first() else {
            self.phase = Phase::Configuring(session);
            return;
        };

        if let Err(error) = self.cart.add_line(primary).await {
            tracing::error!(
                session_id = %session.id,
                variant_id = %primary.id,
                error = %error,
                "primary cart add failed"
            );
            self.sink.command(UiCommand::ReportError {
                kind: ErrorKind::CartAdd,
                message: error.to_string(),
            });
            self.phase = Phase::Configuring(session);
            return;
        }

        for line in extras {
            if let Err(error) = self.cart.add_line(line).await {
                tracing::warn!(
                    session_id = %session.id,
                    variant_id = %line.id,
                    error = %error,
                    "upsell cart add failed"
                );
            }
        }

        tracing::info!(
            session_id = %session.id,
            variant_id = %variant.id,
            "cart submission complete"
        );
        self.phase = Phase::Closed;
        self.sink.command(UiCommand::HideModal);
        self.sink.command(UiCommand::OpenCartDrawer);
    }

    /// End the session without submitting.
    fn close(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Closed) {
            return;
        }
        // Invalidate any load still in flight.
        self.load_generation += 1;
        self.phase = Phase::Closed;
        self.sink.command(UiCommand::HideModal);
    }
}
