//! Integration tests for the premium HTTP endpoints.
//!
//! Each test serves the full router (middleware included) on an ephemeral
//! port backed by the in-memory store, then drives it through
//! `PremiumApiClient` or raw reqwest calls.

use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

use premium_unlock::adapters::client::{ClientError, PremiumApiClient, PremiumApiConfig};
use premium_unlock::adapters::http::{app_router, PremiumAppState};
use premium_unlock::adapters::memory::InMemoryPremiumStore;
use premium_unlock::adapters::storage::{FileIdentityStore, InMemoryIdentityStore};
use premium_unlock::application::IdentityProvider;
use premium_unlock::config::ServerConfig;
use premium_unlock::domain::foundation::UserId;
use premium_unlock::domain::premium::PremiumCode;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestServer {
    base_url: String,
    store: Arc<InMemoryPremiumStore>,
}

async fn spawn_server(codes: &[&str]) -> TestServer {
    let store = Arc::new(InMemoryPremiumStore::with_codes(
        codes.iter().map(|c| PremiumCode::try_new(c).unwrap()),
    ));
    let app = app_router(
        PremiumAppState::new(store.clone(), store.clone()),
        &ServerConfig::default(),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        store,
    }
}

fn client_for(server: &TestServer, user_id: &str) -> PremiumApiClient {
    let store = InMemoryIdentityStore::with_id(UserId::new(user_id).unwrap());
    let identity = Arc::new(IdentityProvider::new(Arc::new(store)));
    PremiumApiClient::new(PremiumApiConfig::new(&server.base_url), identity).unwrap()
}

async fn post_raw(server: &TestServer, path: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}{}", server.base_url, path))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

fn rejection_message(err: ClientError) -> (u16, String) {
    match err {
        ClientError::Rejected { status, message } => (status, message),
        other => panic!("expected server rejection, got {:?}", other),
    }
}

// =============================================================================
// Redemption
// =============================================================================

#[tokio::test]
async fn lowercase_code_redeems_and_grants_premium() {
    let server = spawn_server(&["FREE2024"]).await;
    let client = client_for(&server, "user_1700000000000");

    let response = client.redeem("  free2024 ").await.unwrap();

    assert!(response.success);
    assert_eq!(response.message, "Premium activated successfully");
    assert!(client.is_premium().await.unwrap());
    assert_eq!(server.store.unused_count().await, 0);
}

#[tokio::test]
async fn used_code_is_rejected_for_another_user() {
    let server = spawn_server(&["FREE2024"]).await;
    client_for(&server, "user_a").redeem("FREE2024").await.unwrap();

    let other = client_for(&server, "user_b");
    let err = other.redeem("FREE2024").await.unwrap_err();

    assert_eq!(
        rejection_message(err),
        (400, "Invalid or already used premium code".to_string())
    );
    assert!(!other.is_premium().await.unwrap());
}

#[tokio::test]
async fn unknown_code_is_rejected() {
    let server = spawn_server(&["FREE2024"]).await;

    let err = client_for(&server, "user_a")
        .redeem("NOT-A-CODE")
        .await
        .unwrap_err();

    assert_eq!(
        rejection_message(err),
        (400, "Invalid or already used premium code".to_string())
    );
    assert_eq!(server.store.unused_count().await, 1);
}

#[tokio::test]
async fn premium_user_cannot_consume_a_second_code() {
    let server = spawn_server(&["C1", "C2"]).await;
    let client = client_for(&server, "user_a");
    client.redeem("C1").await.unwrap();

    let err = client.redeem("C2").await.unwrap_err();

    assert_eq!(
        rejection_message(err),
        (400, "User already has premium access".to_string())
    );
    assert_eq!(server.store.unused_count().await, 1);
    assert_eq!(server.store.status_count().await, 1);
}

#[tokio::test]
async fn empty_code_is_rejected_by_the_server() {
    let server = spawn_server(&["FREE2024"]).await;

    let (status, body) = post_raw(
        &server,
        "/api/premium/redeem",
        json!({"code": "", "userId": "user_a"}),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Code and userId are required"}));
}

#[tokio::test]
async fn missing_user_id_is_rejected_by_the_server() {
    let server = spawn_server(&["FREE2024"]).await;

    let (status, body) =
        post_raw(&server, "/api/premium/redeem", json!({"code": "FREE2024"})).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Code and userId are required"}));
    assert_eq!(server.store.unused_count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_redemptions_grant_exactly_one_user() {
    let server = spawn_server(&["RACE"]).await;
    let first = client_for(&server, "user_first");
    let second = client_for(&server, "user_second");

    let (a, b) = tokio::join!(first.redeem("RACE"), second.redeem("RACE"));

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);

    let loser = if a.is_ok() { b } else { a };
    assert_eq!(
        rejection_message(loser.unwrap_err()),
        (400, "Invalid or already used premium code".to_string())
    );

    let premium = [
        first.is_premium().await.unwrap(),
        second.is_premium().await.unwrap(),
    ];
    assert_eq!(premium.iter().filter(|p| **p).count(), 1);
    assert_eq!(server.store.status_count().await, 1);
}

// =============================================================================
// Status
// =============================================================================

#[tokio::test]
async fn unknown_user_is_not_premium() {
    let server = spawn_server(&[]).await;

    let (status, body) = post_raw(
        &server,
        "/api/premium/status",
        json!({"userId": "user_never_seen"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"isPremium": false}));
}

#[tokio::test]
async fn status_without_user_id_is_rejected() {
    let server = spawn_server(&[]).await;

    let (status, body) = post_raw(&server, "/api/premium/status", json!({"userId": ""})).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "UserId is required"}));
}

// =============================================================================
// Client behaviour
// =============================================================================

#[tokio::test]
async fn api_key_headers_are_accepted() {
    let server = spawn_server(&["KEYED"]).await;
    let identity = Arc::new(IdentityProvider::new(Arc::new(InMemoryIdentityStore::new())));
    let client = PremiumApiClient::new(
        PremiumApiConfig::new(&server.base_url).with_api_key("pk_test_123"),
        identity,
    )
    .unwrap();

    assert!(client.redeem("keyed").await.unwrap().success);
}

#[tokio::test]
async fn persisted_identity_keeps_premium_across_restarts() {
    let server = spawn_server(&["FREE2024"]).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("identity.yaml");

    let make_client = || {
        let identity = Arc::new(IdentityProvider::new(Arc::new(FileIdentityStore::new(
            path.clone(),
        ))));
        PremiumApiClient::new(PremiumApiConfig::new(&server.base_url), identity).unwrap()
    };

    make_client().redeem("FREE2024").await.unwrap();

    assert!(make_client().is_premium().await.unwrap());
}

#[tokio::test]
async fn new_visitor_gets_generated_identity() {
    let server = spawn_server(&[]).await;
    let store = Arc::new(InMemoryIdentityStore::new());
    let identity = Arc::new(IdentityProvider::new(store.clone()));
    let client =
        PremiumApiClient::new(PremiumApiConfig::new(&server.base_url), identity.clone()).unwrap();

    assert!(!client.is_premium().await.unwrap());

    let id = identity.get_or_create_id().await.unwrap();
    assert!(id.as_str().starts_with("user_"));
}
