//! End-to-end tests of the recompute/supersede flow: reducer effects drive
//! real spawned fetch tasks against a wiremock server, with the same
//! abort-then-spawn discipline the event loop uses.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use tokio::task::AbortHandle;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kurs::core::action::{Action, Effect, update};
use kurs::core::currency::Currency;
use kurs::core::state::{App, Outcome};
use kurs::rates::FrankfurterProvider;
use kurs::tui::spawn_conversion;

// ============================================================================
// Helper Functions
// ============================================================================

fn app_against(server: &MockServer) -> App {
    App::new(Arc::new(FrankfurterProvider::new(Some(server.uri()))))
}

/// Mounts a `/latest` mock for one (amount, from, to) triple.
async fn mount_rate(server: &MockServer, amount: &str, from: &str, to: &str, value: f64, delay: Duration) {
    let mut rates = serde_json::Map::new();
    rates.insert(to.to_string(), serde_json::json!(value));

    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("amount", amount))
        .and(query_param("from", from))
        .and(query_param("to", to))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "amount": amount.parse::<f64>().unwrap(),
                    "base": from,
                    "date": "2024-01-12",
                    "rates": rates,
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Runs one action through the reducer and executes its effect the way the
/// event loop does: abort the prior fetch task first, then spawn.
fn drive(
    app: &mut App,
    action: Action,
    active_fetch: &mut Option<AbortHandle>,
    tx: &mpsc::Sender<Action>,
) {
    match update(app, action) {
        Effect::Fetch(pending) => {
            if let Some(handle) = active_fetch.take() {
                handle.abort();
            }
            *active_fetch = Some(spawn_conversion(app.provider.clone(), pending, tx.clone()));
        }
        Effect::Cancel => {
            if let Some(handle) = active_fetch.take() {
                handle.abort();
            }
        }
        Effect::None | Effect::Quit => {}
    }
}

fn drain(rx: &mpsc::Receiver<Action>) -> Vec<Action> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

// ============================================================================
// Flow Tests
// ============================================================================

#[tokio::test]
async fn test_settled_triple_issues_exactly_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("amount", "100"))
        .and(query_param("from", "EUR"))
        .and(query_param("to", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "amount": 100.0, "base": "EUR", "date": "2024-01-12", "rates": {"USD": 110.0},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app_against(&server);
    let (tx, rx) = mpsc::channel();
    let mut active_fetch = None;

    drive(&mut app, Action::Refresh, &mut active_fetch, &tx);
    tokio::time::sleep(Duration::from_millis(300)).await;

    for action in drain(&rx) {
        update(&mut app, action);
    }

    assert_eq!(
        app.outcome,
        Outcome::Converted {
            value: 110.0,
            to: Currency::Usd
        }
    );
    assert!(!app.is_loading);
    // MockServer verifies expect(1) on drop
}

#[tokio::test]
async fn test_same_currency_settles_locally_with_no_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app_against(&server);
    app.from = Currency::Usd;
    app.to = Currency::Usd;
    let (tx, rx) = mpsc::channel();
    let mut active_fetch = None;

    drive(
        &mut app,
        Action::AmountInput("50".to_string()),
        &mut active_fetch,
        &tx,
    );
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(
        app.outcome,
        Outcome::Converted {
            value: 50.0,
            to: Currency::Usd
        }
    );
    assert!(active_fetch.is_none());
    assert!(drain(&rx).is_empty());
}

#[tokio::test]
async fn test_rapid_amount_changes_only_last_request_settles() {
    let server = MockServer::start().await;
    // The first two requests hang long enough to still be in flight when
    // superseded; the last answers immediately.
    mount_rate(&server, "100", "EUR", "USD", 110.0, Duration::from_secs(2)).await;
    mount_rate(&server, "200", "EUR", "USD", 220.0, Duration::from_secs(2)).await;
    mount_rate(&server, "300", "EUR", "USD", 330.0, Duration::ZERO).await;

    let mut app = app_against(&server);
    let (tx, rx) = mpsc::channel();
    let mut active_fetch = None;

    for text in ["100", "200", "300"] {
        drive(
            &mut app,
            Action::AmountInput(text.to_string()),
            &mut active_fetch,
            &tx,
        );
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    let completions = drain(&rx);
    assert_eq!(
        completions.len(),
        1,
        "aborted fetches must never deliver a completion, got {completions:?}"
    );

    for action in completions {
        update(&mut app, action);
    }
    assert_eq!(
        app.outcome,
        Outcome::Converted {
            value: 330.0,
            to: Currency::Usd
        }
    );
}

#[tokio::test]
async fn test_changing_target_retriggers_fetch() {
    let server = MockServer::start().await;
    mount_rate(&server, "100", "EUR", "USD", 110.0, Duration::ZERO).await;
    mount_rate(&server, "100", "EUR", "CAD", 150.0, Duration::ZERO).await;

    let mut app = app_against(&server);
    let (tx, rx) = mpsc::channel();
    let mut active_fetch = None;

    drive(&mut app, Action::Refresh, &mut active_fetch, &tx);
    tokio::time::sleep(Duration::from_millis(300)).await;
    for action in drain(&rx) {
        update(&mut app, action);
    }
    assert_eq!(
        app.outcome,
        Outcome::Converted {
            value: 110.0,
            to: Currency::Usd
        }
    );

    // Same amount and source; only the target changes. No caching: a second
    // request goes out.
    drive(
        &mut app,
        Action::SetTo(Currency::Cad),
        &mut active_fetch,
        &tx,
    );
    tokio::time::sleep(Duration::from_millis(300)).await;
    for action in drain(&rx) {
        update(&mut app, action);
    }
    assert_eq!(
        app.outcome,
        Outcome::Converted {
            value: 150.0,
            to: Currency::Cad
        }
    );

    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_aborted_fetch_never_mutates_state() {
    let server = MockServer::start().await;
    mount_rate(&server, "100", "EUR", "USD", 110.0, Duration::from_millis(300)).await;

    let mut app = app_against(&server);
    let (tx, rx) = mpsc::channel();
    let mut active_fetch = None;

    drive(&mut app, Action::Refresh, &mut active_fetch, &tx);

    // Supersede while the response is still delayed: from == to settles
    // locally and aborts the in-flight task.
    drive(
        &mut app,
        Action::SetTo(Currency::Eur),
        &mut active_fetch,
        &tx,
    );

    // Wait past the mock's delay; the aborted task must stay silent.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(drain(&rx).is_empty());
    assert_eq!(
        app.outcome,
        Outcome::Converted {
            value: 100.0,
            to: Currency::Eur
        }
    );
}

#[tokio::test]
async fn test_failed_fetch_surfaces_error_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let mut app = app_against(&server);
    let (tx, rx) = mpsc::channel();
    let mut active_fetch = None;

    drive(&mut app, Action::Refresh, &mut active_fetch, &tx);
    tokio::time::sleep(Duration::from_millis(300)).await;
    for action in drain(&rx) {
        update(&mut app, action);
    }

    match &app.outcome {
        Outcome::Failed(message) => assert!(message.contains("500"), "got: {message}"),
        other => panic!("expected Failed outcome, got {other:?}"),
    }
    assert!(!app.is_loading);
}
