//! Integration tests for the Talk delivery client against local mock endpoints.

use std::time::Duration;

use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use talkbridge_core::{BridgeConfig, DeliveryError, TalkClient, TalkMessage};

const SECRET: &str = "integration-test-secret";

/// Serve a router on an ephemeral local port, returning its base URL.
async fn spawn_mock(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(url: String) -> TalkClient {
    let config = BridgeConfig::new(url, SECRET).unwrap();
    TalkClient::new(config).unwrap()
}

#[tokio::test]
async fn test_http_201_is_success() {
    let router = Router::new().route(
        "/",
        post(|| async { (StatusCode::CREATED, Json(json!({}))) }),
    );
    let url = spawn_mock(router).await;

    let result = client_for(url).send(&TalkMessage::new("hello")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_http_200_with_ocs_success_is_success() {
    let router = Router::new().route(
        "/",
        post(|| async {
            (
                StatusCode::OK,
                Json(json!({"ocs": {"meta": {"status": "success"}, "data": []}})),
            )
        }),
    );
    let url = spawn_mock(router).await;

    let result = client_for(url).send(&TalkMessage::new("hello")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_http_500_is_rejected_with_detail() {
    let router = Router::new().route(
        "/",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"ocs": {"meta": {"status": "failure", "message": "server exploded"}}})),
            )
        }),
    );
    let url = spawn_mock(router).await;

    let err = client_for(url)
        .send(&TalkMessage::new("hello"))
        .await
        .unwrap_err();
    match err {
        DeliveryError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("server exploded"));
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_response_body_is_invalid_response() {
    let router = Router::new().route("/", post(|| async { "this is not json" }));
    let url = spawn_mock(router).await;

    let err = client_for(url)
        .send(&TalkMessage::new("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    // Handler sleeps far past the client timeout, so the attempt must be
    // cut off and reported as a network failure, not retried or hung.
    let router = Router::new().route(
        "/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (StatusCode::CREATED, Json(json!({})))
        }),
    );
    let url = spawn_mock(router).await;

    let mut config = BridgeConfig::new(url, SECRET).unwrap();
    config.timeout = Duration::from_millis(200);
    let client = TalkClient::new(config).unwrap();

    let err = client.send(&TalkMessage::new("hello")).await.unwrap_err();
    match err {
        DeliveryError::Network(detail) => assert!(!detail.is_empty()),
        other => panic!("expected Network, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop a listener so the port is known-closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(format!("http://{}", addr))
        .send(&TalkMessage::new("hello"))
        .await
        .unwrap_err();
    match err {
        DeliveryError::Network(detail) => assert!(!detail.is_empty()),
        other => panic!("expected Network, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_carries_verifiable_signature_headers() {
    // Mock endpoint that verifies the Talk bot signature scheme the way the
    // real server does: HMAC-SHA256(secret, nonce || message text).
    async fn verify(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let nonce = headers
            .get("X-Nextcloud-Talk-Bot-Random")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let signature = headers
            .get("X-Nextcloud-Talk-Bot-Signature")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let message = body["message"].as_str().unwrap_or_default();

        let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(nonce.as_bytes());
        mac.update(message.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        if signature == expected && headers.get("OCS-APIRequest").is_some() {
            (StatusCode::CREATED, Json(json!({})))
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad signature"})))
        }
    }

    let router = Router::new().route("/", post(verify));
    let url = spawn_mock(router).await;

    let result = client_for(url)
        .send(&TalkMessage::new("signed hello"))
        .await;
    assert!(result.is_ok(), "mock rejected the signature: {:?}", result);
}
