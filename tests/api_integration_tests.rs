use std::time::Duration;

use serde_json::json;
use shopbot::api::{ApiError, HttpBackend, ShopBackend};
use shopbot::core::action::{
    Action, Effect, LOGIN_FAILED, LoginOutcome, NO_PRODUCTS, Password, SEARCH_FAILED,
    SearchOutcome, update,
};
use shopbot::core::conversation::Sender;
use shopbot::core::dispatcher;
use shopbot::core::session::{self, SESSION_KEY};
use shopbot::core::state::App;
use shopbot::core::storage::{KeyValueStore, MemoryStore};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

async fn mount_login(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Runs a login for `username` through reducer, dispatcher and store, the
/// same way the event loop does.
async fn log_in(app: &mut App, backend: &dyn ShopBackend, store: &dyn KeyValueStore, username: &str) {
    let effect = update(
        app,
        Action::LoginSubmitted {
            username: username.to_string(),
            password: Password::new("pw"),
        },
    );
    let Effect::Login { username, password } = effect else {
        panic!("expected a login effect, got {:?}", effect);
    };
    let completion = dispatcher::login(backend, &username, &password).await;
    let effect = update(app, completion);
    session::apply_effect(store, &effect).unwrap();
}

/// Submits `query` and feeds the backend's answer back into the reducer.
async fn search(app: &mut App, backend: &dyn ShopBackend, query: &str) {
    let Effect::Search { request_id, query } = update(app, Action::Submit(query.to_string())) else {
        panic!("expected a search effect");
    };
    let completion = dispatcher::search(backend, request_id, &query).await;
    update(app, completion);
}

// ============================================================================
// HTTP Backend Tests
// ============================================================================

#[tokio::test]
async fn test_login_success_sends_credentials() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "alice", "password": "s3cret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "username": "alice"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = backend_for(&mock_server).login("alice", "s3cret").await.unwrap();
    assert!(response.success);
    assert_eq!(response.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_login_rejection_is_parsed_despite_401() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 401, json!({"error": "Invalid credentials"})).await;

    let response = backend_for(&mock_server).login("alice", "wrong").await.unwrap();
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Invalid credentials"));
}

#[tokio::test]
async fn test_html_error_page_is_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .mount(&mock_server)
        .await;

    let result = backend_for(&mock_server).login("alice", "pw").await;
    match result {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_returns_products() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"query": "laptops"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 1, "name": "Laptop", "description": "Fast", "price": 999}]
        })))
        .mount(&mock_server)
        .await;

    let response = backend_for(&mock_server).search("laptops").await.unwrap();
    let products = response.products.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Laptop");
    assert_eq!(products[0].price_label(), "$999");
}

#[tokio::test]
async fn test_search_error_body() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, 400, json!({"error": "Query too vague"})).await;

    let response = backend_for(&mock_server).search("stuff").await.unwrap();
    assert!(response.products.is_none());
    assert_eq!(response.error.as_deref(), Some("Query too vague"));
}

#[tokio::test]
async fn test_search_non_json_success_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = backend_for(&mock_server).search("laptops").await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_search_body_without_products_or_error_is_parse_error() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, 200, json!({"results": []})).await;

    let result = backend_for(&mock_server).search("laptops").await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 1
    let backend = HttpBackend::new("http://127.0.0.1:1", Duration::from_secs(5)).unwrap();
    let result = backend.search("laptops").await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"products": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(&mock_server.uri(), Duration::from_millis(100)).unwrap();
    match backend.search("laptops").await {
        Err(ApiError::Network(message)) => assert!(message.contains("timed out")),
        other => panic!("Expected timeout, got {:?}", other),
    }
}

// ============================================================================
// Dispatcher Tests
// ============================================================================

#[tokio::test]
async fn test_dispatcher_maps_rejection_with_default_text() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 401, json!({"success": false})).await;

    let action = dispatcher::login(&backend_for(&mock_server), "alice", &Password::new("pw")).await;
    assert_eq!(
        action,
        Action::LoginFinished(LoginOutcome::Rejected("Invalid credentials".to_string()))
    );
}

#[tokio::test]
async fn test_dispatcher_maps_server_crash_to_failed_search() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let action = dispatcher::search(&backend_for(&mock_server), 7, "laptops").await;
    assert_eq!(
        action,
        Action::SearchFinished {
            request_id: 7,
            outcome: SearchOutcome::Failed,
        }
    );
}

// ============================================================================
// End-to-End Flows
// ============================================================================

#[tokio::test]
async fn test_login_persists_session_and_greets_user() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 200, json!({"success": true, "username": "alice"})).await;
    let backend = backend_for(&mock_server);
    let store = MemoryStore::new();
    let mut app = App::new();

    log_in(&mut app, &backend, &store, "alice").await;

    assert_eq!(app.username(), Some("alice"));
    let record = store.get(SESSION_KEY).unwrap().unwrap();
    let record: serde_json::Value = serde_json::from_str(&record).unwrap();
    assert_eq!(record, json!({"username": "alice"}));
    let last = app.conversation.last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert!(last.message.contains("alice"));
}

#[tokio::test]
async fn test_logout_erases_session() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 200, json!({"success": true, "username": "alice"})).await;
    let backend = backend_for(&mock_server);
    let store = MemoryStore::new();
    let mut app = App::new();
    log_in(&mut app, &backend, &store, "alice").await;

    let effect = update(&mut app, Action::Logout);
    session::apply_effect(&store, &effect).unwrap();

    assert!(!app.is_logged_in());
    assert!(app.conversation.is_empty());
    assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    assert!(session::restore(&store).is_none());
}

#[tokio::test]
async fn test_failed_login_shows_notice_and_leaves_store_alone() {
    let store = MemoryStore::new();
    let backend = HttpBackend::new("http://127.0.0.1:1", Duration::from_secs(5)).unwrap();
    let mut app = App::new();

    log_in(&mut app, &backend, &store, "alice").await;

    assert!(!app.is_logged_in());
    assert_eq!(app.notice.as_deref(), Some(LOGIN_FAILED));
    assert!(app.conversation.is_empty());
    assert_eq!(store.get(SESSION_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_search_flow_found_products() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 200, json!({"success": true, "username": "alice"})).await;
    mount_search(
        &mock_server,
        200,
        json!({"products": [{"id": 1, "name": "Laptop", "description": "Fast", "price": 999}]}),
    )
    .await;
    let backend = backend_for(&mock_server);
    let store = MemoryStore::new();
    let mut app = App::new();
    log_in(&mut app, &backend, &store, "alice").await;

    search(&mut app, &backend, "laptops").await;

    assert_eq!(app.products.len(), 1);
    assert_eq!(app.conversation.last().unwrap().message, "Found 1 products!");
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_search_flow_tolerates_null_description_and_text_price() {
    let mock_server = MockServer::start().await;
    mount_search(
        &mock_server,
        200,
        json!({"products": [{"id": 1, "name": "Laptop", "description": null, "price": "999.99"}]}),
    )
    .await;
    let backend = backend_for(&mock_server);
    let mut app = App::new();
    update(&mut app, Action::SessionRestored(session::Session::new("bob")));

    search(&mut app, &backend, "laptops").await;

    assert_eq!(app.conversation.last().unwrap().message, "Found 1 products!");
    assert_eq!(app.products[0].description, "");
    assert_eq!(app.products[0].price_label(), "$999.99");
}

#[tokio::test]
async fn test_search_flow_empty_result() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, 200, json!({"products": []})).await;
    let backend = backend_for(&mock_server);
    let mut app = App::new();
    update(&mut app, Action::SessionRestored(session::Session::new("bob")));

    search(&mut app, &backend, "unicorns").await;

    assert!(app.products.is_empty());
    assert_eq!(app.conversation.last().unwrap().message, NO_PRODUCTS);
}

#[tokio::test]
async fn test_search_flow_transport_failure_keeps_products() {
    let mock_server = MockServer::start().await;
    mount_search(
        &mock_server,
        200,
        json!({"products": [{"id": "a1", "name": "Mouse", "price": 25.5}]}),
    )
    .await;
    let backend = backend_for(&mock_server);
    let mut app = App::new();
    update(&mut app, Action::SessionRestored(session::Session::new("bob")));
    search(&mut app, &backend, "mouse").await;
    assert_eq!(app.products.len(), 1);

    let offline = HttpBackend::new("http://127.0.0.1:1", Duration::from_secs(5)).unwrap();
    search(&mut app, &offline, "keyboard").await;

    assert_eq!(app.products.len(), 1);
    assert_eq!(app.conversation.last().unwrap().message, SEARCH_FAILED);
}

#[tokio::test]
async fn test_blank_query_never_reaches_backend() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(0)
        .mount(&mock_server)
        .await;
    let mut app = App::new();
    update(&mut app, Action::SessionRestored(session::Session::new("bob")));

    assert_eq!(update(&mut app, Action::Submit("   ".to_string())), Effect::None);
    assert!(app.conversation.is_empty());
    assert!(!app.is_loading);
    // MockServer verifies `.expect(0)` on drop
}
