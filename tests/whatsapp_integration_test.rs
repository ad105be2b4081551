use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use travel_widgets::adapters::whatsapp::{WhatsAppClient, DEFAULT_API_URL};
use travel_widgets::app::webhook::{self, SIGNATURE_HEADER};
use travel_widgets::app::{router, AppState};
use travel_widgets::core::messaging::ItemKind;
use travel_widgets::core::{FlightWidget, HotelWidget, RestaurantWidget};
use travel_widgets::domain::ports::WhatsAppSettings;
use travel_widgets::ToolService;

const SECRET: &str = "app-secret-123";
const VERIFY_TOKEN: &str = "verify-me";

fn settings(app_secret: Option<&str>) -> WhatsAppSettings {
    WhatsAppSettings {
        access_token: None,
        phone_number_id: None,
        business_account_id: None,
        api_url: DEFAULT_API_URL.to_string(),
        verify_token: VERIFY_TOKEN.to_string(),
        app_secret: app_secret.map(str::to_string),
    }
}

fn app(app_secret: Option<&str>) -> Router {
    let tools = ToolService::new(
        FlightWidget::with_seed(None, 1),
        HotelWidget::new(None),
        RestaurantWidget::with_seed(1),
        WhatsAppClient::new(settings(app_secret)).unwrap(),
    );
    router(AppState::new(Arc::new(tools)))
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

fn delivery(body: &str, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::post("/webhook/whatsapp").header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn button_reply_payload() -> String {
    json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "WABA_ID",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "messages": [{
                        "from": "15550100000",
                        "id": "wamid.1",
                        "type": "interactive",
                        "interactive": {
                            "type": "button_reply",
                            "button_reply": {"id": "book_flight_mock_JFK_CDG", "title": "Book Now"}
                        }
                    }]
                }
            }]
        }]
    })
    .to_string()
}

#[tokio::test]
async fn handshake_echoes_challenge_only_for_matching_token() {
    let uri = format!(
        "/webhook/whatsapp?hub.mode=subscribe&hub.verify_token={}&hub.challenge=1158201444",
        VERIFY_TOKEN
    );
    let (status, body) = call(app(None), Request::get(uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1158201444");

    let uri = "/webhook/whatsapp?hub.mode=subscribe&hub.verify_token=nope&hub.challenge=1";
    let (status, _) = call(app(None), Request::get(uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
        app(None),
        Request::get("/webhook/whatsapp").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn signed_delivery_is_accepted() {
    let body = button_reply_payload();
    let signature = webhook::sign(SECRET, body.as_bytes()).unwrap();

    let (status, response) = call(app(Some(SECRET)), delivery(&body, Some(signature))).await;
    assert_eq!(status, StatusCode::OK);

    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["status"], "received");
    assert_eq!(response["events"], 1);
}

#[tokio::test]
async fn bad_or_missing_signature_is_rejected() {
    let body = button_reply_payload();

    let wrong = webhook::sign("another-secret", body.as_bytes()).unwrap();
    let (status, _) = call(app(Some(SECRET)), delivery(&body, Some(wrong))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(app(Some(SECRET)), delivery(&body, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let signed_other_body = webhook::sign(SECRET, b"{}").unwrap();
    let (status, _) = call(app(Some(SECRET)), delivery(&body, Some(signed_other_body))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unsigned_delivery_accepted_without_secret() {
    let (status, response) = call(app(None), delivery(&button_reply_payload(), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("received"));
}

#[tokio::test]
async fn malformed_payload_is_a_400() {
    let body = "{\"entry\": [";
    let signature = webhook::sign(SECRET, body.as_bytes()).unwrap();
    let (status, response) = call(app(Some(SECRET)), delivery(body, Some(signature))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["status"], "error");
}

#[tokio::test]
async fn status_reports_configuration_without_secrets() {
    let (status, body) = call(
        app(Some(SECRET)),
        Request::get("/webhook/status").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains(SECRET));
    assert!(!body.contains(VERIFY_TOKEN));

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["signature_validation"], "enabled");
    assert_eq!(body["sending"], "preview");
}

#[tokio::test]
async fn configured_client_posts_to_graph_api() {
    let server = MockServer::start_async().await;
    let messages = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/10001/messages")
                .header("authorization", "Bearer wa-token")
                .json_body_partial(
                    r#"{"messaging_product": "whatsapp", "to": "15550100000", "type": "interactive"}"#,
                );
            then.status(200).json_body(json!({
                "messaging_product": "whatsapp",
                "messages": [{"id": "wamid.HBgL"}]
            }));
        })
        .await;

    let client = WhatsAppClient::new(WhatsAppSettings {
        access_token: Some("wa-token".to_string()),
        phone_number_id: Some("10001".to_string()),
        business_account_id: None,
        api_url: server.base_url(),
        verify_token: VERIFY_TOKEN.to_string(),
        app_secret: None,
    })
    .unwrap();

    let item = json!({"id": "mock_JFK_CDG", "route": "JFK -> CDG", "price": "$1,847"});
    let outcome = client.send_card(ItemKind::Flight, "+15550100000", &item).await;

    messages.assert_async().await;
    assert!(outcome.success);
    assert!(!outcome.is_preview());
    assert_eq!(outcome.response.unwrap()["messages"][0]["id"], "wamid.HBgL");
}

#[tokio::test]
async fn graph_api_error_becomes_failed_outcome() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/10001/messages");
            then.status(400)
                .json_body(json!({"error": {"message": "Invalid parameter", "code": 100}}));
        })
        .await;

    let client = WhatsAppClient::new(WhatsAppSettings {
        access_token: Some("wa-token".to_string()),
        phone_number_id: Some("10001".to_string()),
        business_account_id: None,
        api_url: server.base_url(),
        verify_token: VERIFY_TOKEN.to_string(),
        app_secret: None,
    })
    .unwrap();

    let outcome = client
        .send_list(ItemKind::Hotel, "15550100000", "Paris hotels", &[json!({"id": "h1", "name": "Le Bristol"})])
        .await;

    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("Invalid parameter"));
}
