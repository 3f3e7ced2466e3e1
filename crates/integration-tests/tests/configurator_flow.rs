//! End-to-end option selection and resolution flows.
//!
//! Drives the session controller with rendering-layer events against
//! in-memory collaborators and asserts on the commands and cart lines
//! that come out.

use quickshop_core::{Handle, VariantId};
use quickshop_integration_tests::{
    InMemoryCart, InMemoryCatalog, RecordingSink, care_kit, init_tracing, product, sweater,
    variant, widget_config,
};
use quickshop_widget::render::{UiCommand, UiEvent};
use quickshop_widget::session::{SessionController, SessionPhase};

type TestController = SessionController<InMemoryCatalog, InMemoryCart, RecordingSink>;

fn setup(with_upsell: bool) -> (TestController, InMemoryCatalog, InMemoryCart, RecordingSink) {
    init_tracing();
    let catalog = InMemoryCatalog::new();
    catalog.insert(sweater());
    catalog.insert(care_kit());
    let cart = InMemoryCart::new();
    let sink = RecordingSink::new();
    let controller = SessionController::new(
        widget_config(with_upsell),
        catalog.clone(),
        cart.clone(),
        sink.clone(),
    );
    (controller, catalog, cart, sink)
}

async fn open(controller: &mut TestController, handle: &str) {
    let handle = Handle::parse(handle).expect("valid handle");
    controller
        .handle_event(UiEvent::OpenRequested { handle })
        .await
        .expect("open does not return selection errors");
}

async fn click(controller: &mut TestController, slot: usize, value: &str) {
    controller
        .handle_event(UiEvent::OptionClicked {
            slot,
            value: value.to_owned(),
        })
        .await
        .expect("valid option click");
}

#[tokio::test]
async fn open_applies_default_selection_and_shows_modal() {
    let (mut controller, _catalog, _cart, sink) = setup(false);

    open(&mut controller, "wool-sweater").await;

    assert_eq!(controller.phase(), SessionPhase::Configuring);

    let commands = sink.commands();
    let Some(UiCommand::ShowModal { product, view }) = commands.first() else {
        panic!("expected ShowModal, got {commands:?}");
    };
    assert_eq!(product.handle.as_str(), "wool-sweater");

    // First allowed value of each option, in declaration order
    assert_eq!(view.slots[0].selected.as_deref(), Some("Red"));
    assert_eq!(view.slots[1].selected.as_deref(), Some("Small"));

    // Defaults already resolve a variant
    let resolved = view.resolved.expect("defaults resolve Red/Small");
    assert_eq!(resolved.id, VariantId::new(1));
}

#[tokio::test]
async fn selecting_black_medium_resolves_and_submits_v4() {
    let (mut controller, _catalog, cart, sink) = setup(false);

    open(&mut controller, "wool-sweater").await;
    click(&mut controller, 0, "Black").await;
    click(&mut controller, 1, "Medium").await;

    let selection = controller.selection().expect("configuring");
    assert_eq!(
        selection.current_variant().map(|v| v.id),
        Some(VariantId::new(4))
    );

    controller
        .handle_event(UiEvent::AddToCartRequested)
        .await
        .expect("submit does not return selection errors");

    assert_eq!(controller.phase(), SessionPhase::Closed);
    let lines = cart.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id, VariantId::new(4));
    assert_eq!(lines[0].quantity, 1);

    // Submission closes the modal and surfaces the cart
    let commands = sink.commands();
    let tail: Vec<_> = commands.iter().rev().take(2).collect();
    assert!(matches!(tail[1], UiCommand::HideModal));
    assert!(matches!(tail[0], UiCommand::OpenCartDrawer));
}

#[tokio::test]
async fn every_click_rerenders_the_post_mutation_state() {
    let (mut controller, _catalog, _cart, sink) = setup(false);

    open(&mut controller, "wool-sweater").await;
    let _ = sink.take();

    click(&mut controller, 0, "Black").await;

    let commands = sink.take();
    assert_eq!(commands.len(), 1, "one view update per click");
    let UiCommand::UpdateSelectionView { view } = &commands[0] else {
        panic!("expected UpdateSelectionView, got {commands:?}");
    };
    assert_eq!(view.slots[0].selected.as_deref(), Some("Black"));
    // Black/Small exists, so the view still resolves
    assert_eq!(
        view.resolved.map(|r| r.id),
        Some(VariantId::new(3))
    );
}

#[tokio::test]
async fn invalid_option_value_fails_fast_and_preserves_state() {
    let (mut controller, _catalog, _cart, sink) = setup(false);

    open(&mut controller, "wool-sweater").await;
    let _ = sink.take();

    let result = controller
        .handle_event(UiEvent::OptionClicked {
            slot: 0,
            value: "Chartreuse".to_owned(),
        })
        .await;
    assert!(result.is_err(), "value outside the allowed set is a defect");

    // No view update was emitted and the selection is unchanged
    let selection = controller.selection().expect("still configuring");
    assert_eq!(selection.values()[0].as_deref(), Some("Red"));
    assert!(
        !sink
            .commands()
            .iter()
            .any(|c| matches!(c, UiCommand::UpdateSelectionView { .. })),
        "no partial render after a rejected click"
    );
}

#[tokio::test]
async fn unresolvable_combination_makes_submit_a_noop() {
    init_tracing();
    // Sparse catalog: only Red/Small and Black/Medium exist
    let catalog = InMemoryCatalog::new();
    catalog.insert(product(
        "sparse-sweater",
        &[("Color", &["Red", "Black"]), ("Size", &["Small", "Medium"])],
        vec![
            variant(1, &["Red", "Small"], true, 4500),
            variant(4, &["Black", "Medium"], true, 4700),
        ],
    ));
    let cart = InMemoryCart::new();
    let sink = RecordingSink::new();
    let mut controller = SessionController::new(
        widget_config(false),
        catalog,
        cart.clone(),
        sink.clone(),
    );

    open(&mut controller, "sparse-sweater").await;
    click(&mut controller, 0, "Black").await;
    // Selection is now Black/Small: complete but unmatched

    controller
        .handle_event(UiEvent::AddToCartRequested)
        .await
        .expect("noop submit");

    assert_eq!(controller.phase(), SessionPhase::Configuring);
    assert!(cart.lines().is_empty(), "nothing submitted");
    assert!(sink.errors().is_empty(), "a missing resolution is not an error");
}

#[tokio::test]
async fn empty_selection_falls_back_to_first_variant() {
    init_tracing();
    // Options declared with no values: nothing can be auto-selected, so
    // the selection stays entirely empty (options never rendered).
    let catalog = InMemoryCatalog::new();
    catalog.insert(product(
        "bare-product",
        &[("Color", &[])],
        vec![variant(7, &["Red"], true, 1200)],
    ));
    let cart = InMemoryCart::new();
    let sink = RecordingSink::new();
    let mut controller =
        SessionController::new(widget_config(false), catalog, cart.clone(), sink);

    open(&mut controller, "bare-product").await;
    controller
        .handle_event(UiEvent::AddToCartRequested)
        .await
        .expect("fallback submit");

    assert_eq!(controller.phase(), SessionPhase::Closed);
    let lines = cart.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id, VariantId::new(7));
}
