//! Session controller lifecycle: load failures, supersede/stale
//! handling, close, and reuse.

use std::sync::Arc;

use quickshop_core::Handle;
use quickshop_integration_tests::{
    InMemoryCart, InMemoryCatalog, RecordingSink, init_tracing, product, sweater, variant,
    widget_config,
};
use quickshop_widget::error::ErrorKind;
use quickshop_widget::render::{UiCommand, UiEvent};
use quickshop_widget::session::{SessionController, SessionPhase};

type TestController = SessionController<InMemoryCatalog, InMemoryCart, RecordingSink>;

fn setup() -> (TestController, InMemoryCatalog, InMemoryCart, RecordingSink) {
    init_tracing();
    let catalog = InMemoryCatalog::new();
    catalog.insert(sweater());
    let cart = InMemoryCart::new();
    let sink = RecordingSink::new();
    let controller = SessionController::new(
        widget_config(false),
        catalog.clone(),
        cart.clone(),
        sink.clone(),
    );
    (controller, catalog, cart, sink)
}

fn handle(s: &str) -> Handle {
    Handle::parse(s).expect("valid handle")
}

#[tokio::test]
async fn failed_load_reports_error_and_stays_idle() {
    let (mut controller, _catalog, _cart, sink) = setup();

    controller
        .handle_event(UiEvent::OpenRequested {
            handle: handle("missing"),
        })
        .await
        .expect("load failure is reported, not returned");

    assert_eq!(controller.phase(), SessionPhase::Idle);
    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, ErrorKind::CatalogLoad);
    assert!(
        !sink
            .commands()
            .iter()
            .any(|c| matches!(c, UiCommand::ShowModal { .. })),
        "no modal after a failed load"
    );
}

#[tokio::test]
async fn stale_load_result_is_discarded() {
    let (mut controller, _catalog, _cart, _sink) = setup();

    let first = product("first-product", &[], vec![variant(1, &[], true, 1000)]);
    let second = product("second-product", &[], vec![variant(2, &[], true, 2000)]);

    // Two overlapping loads; the second supersedes the first
    let stale_ticket = controller.begin_load(handle("first-product"));
    let fresh_ticket = controller.begin_load(handle("second-product"));

    controller.finish_load(fresh_ticket, Ok(Arc::new(second)));
    assert_eq!(controller.phase(), SessionPhase::Configuring);

    // The first response arrives late and must not overwrite the newer
    // session
    controller.finish_load(stale_ticket, Ok(Arc::new(first)));
    assert_eq!(
        controller
            .product()
            .expect("still configuring")
            .handle
            .as_str(),
        "second-product"
    );
}

#[tokio::test]
async fn stale_load_failure_is_discarded_too() {
    let (mut controller, _catalog, _cart, sink) = setup();

    let stale_ticket = controller.begin_load(handle("first-product"));
    let fresh_ticket = controller.begin_load(handle("wool-sweater"));

    let fresh = sweater();
    controller.finish_load(fresh_ticket, Ok(Arc::new(fresh)));
    controller.finish_load(
        stale_ticket,
        Err(quickshop_widget::catalog::CatalogError::Payload(
            "late failure".to_owned(),
        )),
    );

    assert_eq!(controller.phase(), SessionPhase::Configuring);
    assert!(sink.errors().is_empty(), "stale failures are not reported");
}

#[tokio::test]
async fn close_during_load_discards_the_result() {
    let (mut controller, _catalog, _cart, _sink) = setup();

    let ticket = controller.begin_load(handle("wool-sweater"));
    controller
        .handle_event(UiEvent::CloseRequested)
        .await
        .expect("close");
    assert_eq!(controller.phase(), SessionPhase::Closed);

    controller.finish_load(ticket, Ok(Arc::new(sweater())));
    assert_eq!(
        controller.phase(),
        SessionPhase::Closed,
        "a closed session does not reopen on a late response"
    );
}

#[tokio::test]
async fn close_releases_the_session_and_hides_the_modal() {
    let (mut controller, _catalog, _cart, sink) = setup();

    controller
        .handle_event(UiEvent::OpenRequested {
            handle: handle("wool-sweater"),
        })
        .await
        .expect("open");
    assert!(controller.product().is_some());
    let _ = sink.take();

    controller
        .handle_event(UiEvent::CloseRequested)
        .await
        .expect("close");

    assert_eq!(controller.phase(), SessionPhase::Closed);
    assert!(controller.product().is_none(), "product released");
    assert_eq!(sink.take(), vec![UiCommand::HideModal]);
}

#[tokio::test]
async fn controller_is_reusable_after_close() {
    let (mut controller, _catalog, cart, _sink) = setup();

    controller
        .handle_event(UiEvent::OpenRequested {
            handle: handle("wool-sweater"),
        })
        .await
        .expect("open");
    controller
        .handle_event(UiEvent::CloseRequested)
        .await
        .expect("close");

    // A new open from Closed starts a fresh session
    controller
        .handle_event(UiEvent::OpenRequested {
            handle: handle("wool-sweater"),
        })
        .await
        .expect("reopen");
    assert_eq!(controller.phase(), SessionPhase::Configuring);

    controller
        .handle_event(UiEvent::AddToCartRequested)
        .await
        .expect("submit");
    assert_eq!(controller.phase(), SessionPhase::Closed);
    assert_eq!(cart.lines().len(), 1);
}

#[tokio::test]
async fn events_outside_their_phase_are_ignored() {
    let (mut controller, _catalog, cart, sink) = setup();

    // Nothing open yet: clicks and submits are no-ops
    controller
        .handle_event(UiEvent::OptionClicked {
            slot: 0,
            value: "Black".to_owned(),
        })
        .await
        .expect("ignored click");
    controller
        .handle_event(UiEvent::AddToCartRequested)
        .await
        .expect("ignored submit");
    controller
        .handle_event(UiEvent::CloseRequested)
        .await
        .expect("ignored close");

    assert_eq!(controller.phase(), SessionPhase::Idle);
    assert!(cart.lines().is_empty());
    assert!(sink.commands().is_empty());
}

#[tokio::test]
async fn a_newer_open_supersedes_the_previous_session() {
    let (mut controller, catalog, _cart, _sink) = setup();
    catalog.insert(product(
        "second-product",
        &[],
        vec![variant(2, &[], true, 2000)],
    ));

    controller
        .handle_event(UiEvent::OpenRequested {
            handle: handle("wool-sweater"),
        })
        .await
        .expect("open first");
    controller
        .handle_event(UiEvent::OpenRequested {
            handle: handle("second-product"),
        })
        .await
        .expect("open second");

    assert_eq!(controller.phase(), SessionPhase::Configuring);
    assert_eq!(
        controller
            .product()
            .expect("configuring")
            .handle
            .as_str(),
        "second-product"
    );
}
