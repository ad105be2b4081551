//! WhatsApp webhook: subscription handshake, signed event delivery and
//! dispatch of button replies.

use crate::app::http::AppState;
use crate::core::messaging::ItemKind;
use crate::utils::error::{Result, TravelError};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const SIGNATURE_PREFIX: &str = "sha256=";
pub const WEBHOOK_PATH: &str = "/webhook/whatsapp";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Challenge to echo back, or `None` when the subscription must be refused.
pub fn verify_handshake(query: &VerifyQuery, expected_token: &str) -> Option<String> {
    let subscribing = query.mode.as_deref() == Some("subscribe");
    let token_ok = query.verify_token.as_deref() == Some(expected_token);
    if subscribing && token_ok {
        Some(query.challenge.clone().unwrap_or_else(|| "OK".to_string()))
    } else {
        None
    }
}

fn mac(secret: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| TravelError::SignatureMismatch {
        reason: format!("unusable app secret: {}", e),
    })
}

/// `sha256=<hex>` header value for `body`.
pub fn sign(secret: &str, body: &[u8]) -> Result<String> {
    let mut mac = mac(secret)?;
    mac.update(body);
    Ok(format!(
        "{}{}",
        SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Checks `X-Hub-Signature-256` against HMAC-SHA256(secret, body) in constant time.
pub fn verify_signature(secret: &str, body: &[u8], header: Option<&str>) -> Result<()> {
    let header = header.ok_or_else(|| TravelError::SignatureMismatch {
        reason: "missing signature header".to_string(),
    })?;
    let hex_digest = header
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or_else(|| TravelError::SignatureMismatch {
            reason: "signature is not sha256".to_string(),
        })?;
    let expected = hex::decode(hex_digest).map_err(|_| TravelError::SignatureMismatch {
        reason: "signature is not valid hex".to_string(),
    })?;

    let mut mac = mac(secret)?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| TravelError::SignatureMismatch {
            reason: "digest does not match body".to_string(),
        })
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
    #[serde(default)]
    pub statuses: Vec<StatusUpdate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub from: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub text: Option<TextBody>,
    pub interactive: Option<InteractiveReply>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InteractiveReply {
    pub button_reply: Option<ReplyRef>,
    pub list_reply: Option<ReplyRef>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplyRef {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub recipient_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonTarget {
    pub domain: Option<ItemKind>,
    pub item_id: String,
}

impl ButtonTarget {
    fn parse(rest: &str) -> Self {
        match rest.split_once('_') {
            Some((domain, item_id)) => match domain.parse::<ItemKind>() {
                Ok(kind) => Self {
                    domain: Some(kind),
                    item_id: item_id.to_string(),
                },
                Err(_) => Self {
                    domain: None,
                    item_id: rest.to_string(),
                },
            },
            None => Self {
                domain: None,
                item_id: rest.to_string(),
            },
        }
    }
}

/// What a reply id asks for, decoded from its `{action}_{domain}_{id}` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InboundAction {
    Book(ButtonTarget),
    Details(ButtonTarget),
    AddToCart(ButtonTarget),
    Reserve(ButtonTarget),
    Menu(ButtonTarget),
    Select { item_id: String },
    Checkout,
    ModifyCart,
    ClearCart,
    Unknown { id: String },
}

impl InboundAction {
    pub fn parse(id: &str) -> Self {
        match id {
            "checkout_now" => return InboundAction::Checkout,
            "modify_cart" => return InboundAction::ModifyCart,
            "clear_cart" => return InboundAction::ClearCart,
            _ => {}
        }

        let Some((action, rest)) = id.split_once('_') else {
            return InboundAction::Unknown { id: id.to_string() };
        };
        match action {
            "book" => InboundAction::Book(ButtonTarget::parse(rest)),
            "details" => InboundAction::Details(ButtonTarget::parse(rest)),
            "cart" => InboundAction::AddToCart(ButtonTarget::parse(rest)),
            "reserve" => InboundAction::Reserve(ButtonTarget::parse(rest)),
            "menu" => InboundAction::Menu(ButtonTarget::parse(rest)),
            "select" => InboundAction::Select {
                item_id: rest.to_string(),
            },
            _ => InboundAction::Unknown { id: id.to_string() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebhookEvent {
    Text { from: String, body: String },
    Reply { from: String, action: InboundAction },
    Status { recipient: String, status: String },
    Unsupported { from: String, kind: String },
}

/// Flattens every change in the payload into events, logging each one.
pub fn process(payload: &WebhookPayload) -> Vec<WebhookEvent> {
    let mut events = Vec::new();
    let values = payload
        .entry
        .iter()
        .flat_map(|entry| entry.changes.iter())
        .map(|change| &change.value);

    for value in values {
        for message in &value.messages {
            let event = match message.kind.as_str() {
                "text" => {
                    let body = message
                        .text
                        .as_ref()
                        .map(|t| t.body.clone())
                        .unwrap_or_default();
                    tracing::info!("Message from {}: {}", message.from, body);
                    WebhookEvent::Text {
                        from: message.from.clone(),
                        body,
                    }
                }
                "interactive" => {
                    let reply_id = message
                        .interactive
                        .as_ref()
                        .and_then(|i| i.button_reply.as_ref().or(i.list_reply.as_ref()))
                        .map(|r| r.id.as_str())
                        .unwrap_or_default();
                    let action = InboundAction::parse(reply_id);
                    tracing::info!("Reply from {}: {} -> {:?}", message.from, reply_id, action);
                    WebhookEvent::Reply {
                        from: message.from.clone(),
                        action,
                    }
                }
                other => {
                    tracing::debug!("Ignoring {} message from {}", other, message.from);
                    WebhookEvent::Unsupported {
                        from: message.from.clone(),
                        kind: other.to_string(),
                    }
                }
            };
            events.push(event);
        }

        for status in &value.statuses {
            tracing::info!("Message to {}: {}", status.recipient_id, status.status);
            events.push(WebhookEvent::Status {
                recipient: status.recipient_id.clone(),
                status: status.status.clone(),
            });
        }
    }

    events
}

pub async fn verify(State(state): State<AppState>, query: Option<Query<VerifyQuery>>) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let expected = &state.tools.whatsapp_settings().verify_token;

    match verify_handshake(&query, expected) {
        Some(challenge) => {
            tracing::info!("WhatsApp webhook verified");
            (StatusCode::OK, challenge).into_response()
        }
        None => {
            tracing::warn!("WhatsApp webhook verification refused");
            (StatusCode::FORBIDDEN, "Verification failed").into_response()
        }
    }
}

pub async fn receive(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    match state.tools.whatsapp_settings().app_secret.as_deref() {
        Some(secret) => {
            let header = headers
                .get(SIGNATURE_HEADER)
                .and_then(|value| value.to_str().ok());
            if let Err(e) = verify_signature(secret, &body, header) {
                tracing::warn!("Rejected webhook delivery: {}", e);
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"status": "error", "message": e.user_friendly_message()})),
                )
                    .into_response();
            }
        }
        None => tracing::debug!("No app secret configured, skipping signature check"),
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Malformed webhook payload: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "error", "message": "Malformed payload"})),
            )
                .into_response();
        }
    };

    let events = process(&payload);
    Json(json!({"status": "received", "events": events.len()})).into_response()
}

pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let settings = state.tools.whatsapp_settings();
    Json(json!({
        "webhook_endpoint": WEBHOOK_PATH,
        "status": "ready",
        "signature_validation": if settings.app_secret.is_some() { "enabled" } else { "disabled" },
        "sending": if settings.access_token.is_some() && settings.phone_number_id.is_some() {
            "live"
        } else {
            "preview"
        },
        "env_vars_needed": {
            "WHATSAPP_ACCESS_TOKEN": "From App Dashboard -> WhatsApp -> API Setup",
            "WHATSAPP_PHONE_NUMBER_ID": "From App Dashboard -> WhatsApp -> API Setup",
            "WHATSAPP_APP_SECRET": "From App Dashboard -> Settings -> Basic -> App Secret",
            "WHATSAPP_VERIFY_TOKEN": "Any string, repeated in the webhook configuration"
        }
    }))
}
