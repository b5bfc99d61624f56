//! HTTP API tests driven through the router without a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use strictly_escrow::{EscrowConfig, InMemoryLedger, ManualClock, Registry, TracingSink};
use strictly_server::api::CALLER_HEADER;
use strictly_server::{AppState, router};
use strictly_tictactoe::{AccountId, START_WINDOW};
use tower::ServiceExt;

fn app(clock: ManualClock) -> Router {
    let ledger = InMemoryLedger::with_balances([
        (AccountId::from("house"), 50),
        (AccountId::from("alice"), 5),
    ]);
    let registry = Registry::new(EscrowConfig::default(), ledger, clock, TracingSink).unwrap();
    router(AppState::new(registry))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    caller: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        req = req.header(CALLER_HEADER, caller);
    }
    let req = match body {
        Some(body) => req
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, caller: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/games",
        Some(caller),
        Some(json!({"player_one": "alice", "player_two": "bob"})),
    )
    .await
}

async fn mark(app: &Router, id: u64, caller: &str, row: usize, col: usize) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        &format!("/games/{id}/marks"),
        Some(caller),
        Some(json!({"row": row, "col": col})),
    )
    .await
}

async fn balance(app: &Router, account: &str) -> u64 {
    let uri = format!("/accounts/{account}/balance");
    let (status, body) = call(app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    body["balance"].as_u64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app(ManualClock::new(0));
    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["games"], 0);
}

#[tokio::test]
async fn test_play_to_win_over_http() {
    let clock = ManualClock::new(0);
    let app = app(clock.clone());

    let (status, body) = create(&app, "house").await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["game_id"].as_u64().unwrap();
    assert_eq!(id, 1);
    assert_eq!(balance(&app, "escrow").await, 10);

    for (caller, row, col) in [
        ("alice", 1, 1),
        ("bob", 0, 0),
        ("alice", 0, 1),
        ("bob", 2, 2),
        ("alice", 2, 1),
    ] {
        clock.advance(1);
        let (status, _) = mark(&app, id, caller, row, col).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, game) = call(&app, "GET", "/games/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["prize_recipient"], "alice");
    assert_eq!(balance(&app, "alice").await, 15);
    assert_eq!(balance(&app, "escrow").await, 0);
}

#[tokio::test]
async fn test_release_after_deadline() {
    let clock = ManualClock::new(0);
    let app = app(clock.clone());
    create(&app, "house").await;

    let (status, body) = call(&app, "POST", "/games/1/release", None, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "GameIsNotExpired");

    clock.advance(START_WINDOW);
    let (status, game) = call(&app, "POST", "/games/1/release", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["prize_recipient"], "bob");
    assert_eq!(balance(&app, "bob").await, 10);
}

#[tokio::test]
async fn test_error_status_mapping() {
    let app = app(ManualClock::new(0));

    let (status, body) = call(
        &app,
        "POST",
        "/games",
        None,
        Some(json!({"player_one": "alice", "player_two": "bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "MissingCaller");

    let (status, body) = create(&app, "carol").await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["class"], "resource");

    let (status, body) = call(&app, "GET", "/games/7", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "InvalidGameId");

    create(&app, "house").await;
    let (status, body) = mark(&app, 1, "alice", 3, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["class"], "input");

    let (status, body) = mark(&app, 1, "bob", 0, 0).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "NotYourTurn");
}
