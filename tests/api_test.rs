//! Full-stack HTTP tests: real router, real server, in-memory store.
//!
//! Each test spins up its own server on an ephemeral port and talks to it
//! with reqwest, asserting on status codes and the response envelope exactly
//! as a client would see them.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use upi_transaction_service::{AppState, router, store::MemoryStore};

// === Server Setup ===

struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        let app = router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base_url: format!("http://{}", addr),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn register(&self, phone: &str, balance: i64) -> reqwest::Response {
        self.client
            .post(self.url("/api/users"))
            .json(&json!({ "phone_number": phone, "initial_balance": balance }))
            .send()
            .await
            .unwrap()
    }

    async fn balance(&self, phone: &str) -> i64 {
        let body: Value = self
            .client
            .get(self.url(&format!("/api/upi/balance/{phone}")))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        body["data"].as_i64().unwrap()
    }

    async fn transfer(&self, from: &str, to: &str, amount: i64) -> reqwest::Response {
        self.client
            .post(self.url("/api/upi/transfer"))
            .json(&json!({
                "sender_phone_number": from,
                "receiver_phone_number": to,
                "amount": amount,
            }))
            .send()
            .await
            .unwrap()
    }
}

// === Registration and lookups ===

#[tokio::test]
async fn register_returns_success_envelope() {
    let server = TestServer::start().await;

    let response = server.register("9000000001", 1000).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("User registered successfully."));
    assert_eq!(body["data"]["phone_number"], json!("9000000001"));
    assert_eq!(body["data"]["balance"], json!(1000));
    assert_eq!(body["data"]["is_upi_enabled"], json!(true));
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let server = TestServer::start().await;
    server.register("9000000001", 1000).await;

    let response = server.register("9000000001", 50).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"], Value::Null);

    // The original balance is untouched.
    assert_eq!(server.balance("9000000001").await, 1000);
}

#[tokio::test]
async fn malformed_phone_numbers_are_rejected_at_the_boundary() {
    let server = TestServer::start().await;

    for phone in ["123", "90000000012", "90000o0001"] {
        let response = server.register(phone, 0).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn out_of_range_opening_balance_is_a_bad_request() {
    let server = TestServer::start().await;

    let response = server.register("9000000001", 100_001).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_user_lookups_return_404_envelopes() {
    let server = TestServer::start().await;

    let response = server
        .client
        .get(server.url("/api/users/9999999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("User not found."));
}

#[tokio::test]
async fn validate_endpoint_reports_registered_users() {
    let server = TestServer::start().await;
    server.register("9000000001", 0).await;

    let response = server
        .client
        .get(server.url("/api/users/validate/9000000001"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("User is valid."));
}

#[tokio::test]
async fn validate_receiver_carries_the_senders_data() {
    let server = TestServer::start().await;
    server.register("9000000001", 450).await;
    server.register("9000000002", 9000).await;

    let response = server
        .client
        .get(server.url(
            "/api/users/validate-receiver?sender_phone=9000000001&receiver_phone=9000000002",
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Receiver is valid."));
    assert_eq!(body["data"]["phone_number"], json!("9000000001"));
    assert_eq!(body["data"]["balance"], json!(450));
}

// === UPI status and deposits ===

#[tokio::test]
async fn upi_status_toggles_through_the_api() {
    let server = TestServer::start().await;
    server.register("9000000001", 100).await;

    let response = server
        .client
        .patch(server.url("/api/upi/upi-status/9000000001"))
        .json(&false)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("UPI disabled."));
    assert_eq!(body["data"], json!(false));

    // Deposits are now gated.
    let response = server
        .client
        .put(server.url("/api/upi/add-money/9000000001"))
        .json(&json!({ "amount": 50 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("User's UPI is disabled."));
    assert_eq!(server.balance("9000000001").await, 100);
}

#[tokio::test]
async fn add_money_returns_the_new_balance() {
    let server = TestServer::start().await;
    server.register("9000000001", 1000).await;

    let response = server
        .client
        .put(server.url("/api/upi/add-money/9000000001"))
        .json(&json!({ "amount": 500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Amount successfully added."));
    assert_eq!(body["data"], json!(1500));
}

// === Transfers ===

#[tokio::test]
async fn transfer_scenario_moves_500_between_fresh_users() {
    let server = TestServer::start().await;
    server.register("9000000001", 1000).await;
    server.register("9000000002", 0).await;

    let response = server.transfer("9000000001", "9000000002", 500).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Transfer successful."));
    assert_eq!(body["data"], json!(true));

    assert_eq!(server.balance("9000000001").await, 500);
    assert_eq!(server.balance("9000000002").await, 500);
}

#[tokio::test]
async fn transfer_above_the_per_transfer_cap_fails_cleanly() {
    let server = TestServer::start().await;
    server.register("9000000001", 100_000).await;
    server.register("9000000002", 0).await;

    let response = server.transfer("9000000001", "9000000002", 25_000).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));

    assert_eq!(server.balance("9000000001").await, 100_000);
    assert_eq!(server.balance("9000000002").await, 0);
}

#[tokio::test]
async fn transfer_with_unknown_receiver_is_not_found() {
    let server = TestServer::start().await;
    server.register("9000000001", 1000).await;

    let response = server.transfer("9000000001", "9000000002", 100).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Receiver not found."));
}

// === Health ===

#[tokio::test]
async fn health_endpoint_reports_store_connectivity() {
    let server = TestServer::start().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["store"], json!("connected"));
}
