use crate::core::messaging::{self, ItemKind, OutboundMessage};
use crate::domain::ports::WhatsAppSettings;
use crate::utils::error::{Result, TravelError};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://graph.facebook.com/v18.0";
pub const DEFAULT_VERIFY_TOKEN: &str = "luxurytravel_webhook_2024";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of a send attempt, serialized as-is into tool and HTTP responses.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<OutboundMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    fn preview(message: OutboundMessage) -> Self {
        Self {
            success: true,
            mock: Some(true),
            message: Some("WhatsApp not configured - showing preview".to_string()),
            preview: Some(message),
            response: None,
            error: None,
        }
    }

    fn delivered(response: Value) -> Self {
        Self {
            success: true,
            mock: None,
            message: None,
            preview: None,
            response: Some(response),
            error: None,
        }
    }

    fn failed(err: &TravelError) -> Self {
        Self {
            success: false,
            mock: None,
            message: None,
            preview: None,
            response: None,
            error: Some(err.to_string()),
        }
    }

    pub fn is_preview(&self) -> bool {
        self.mock.unwrap_or(false)
    }
}

/// Cloud API sender. Without an access token and phone number id every send
/// is a dry run that returns the payload it would have posted.
pub struct WhatsAppClient {
    settings: WhatsAppSettings,
    client: Client,
}

impl WhatsAppClient {
    pub fn new(settings: WhatsAppSettings) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &WhatsAppSettings {
        &self.settings
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.settings.access_token, &self.settings.phone_number_id) {
            (Some(token), Some(phone_id)) if !token.is_empty() && !phone_id.is_empty() => {
                Some((token.as_str(), phone_id.as_str()))
            }
            _ => None,
        }
    }

    /// Delivery failures are reported in the outcome rather than as errors.
    pub async fn send(&self, message: OutboundMessage) -> SendOutcome {
        let Some((token, phone_id)) = self.credentials() else {
            tracing::info!("WhatsApp not configured, returning preview for {}", message.to);
            return SendOutcome::preview(message);
        };

        match self.post(token, phone_id, &message).await {
            Ok(response) => {
                tracing::info!("WhatsApp message delivered to {}", message.to);
                SendOutcome::delivered(response)
            }
            Err(err) => {
                tracing::error!("WhatsApp delivery failed: {}", err);
                SendOutcome::failed(&err)
            }
        }
    }

    async fn post(&self, token: &str, phone_id: &str, message: &OutboundMessage) -> Result<Value> {
        let url = format!(
            "{}/{}/messages",
            self.settings.api_url.trim_end_matches('/'),
            phone_id
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(message)
            .send()
            .await
            .map_err(|e| TravelError::DeliveryFailure {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != reqwest::StatusCode::OK {
            return Err(TravelError::DeliveryFailure {
                message: format!("{}: {}", status, body),
            });
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    pub async fn send_card(&self, kind: ItemKind, to: &str, item: &Value) -> SendOutcome {
        self.send(messaging::format_card(kind, to, item)).await
    }

    pub async fn send_list(
        &self,
        kind: ItemKind,
        to: &str,
        title: &str,
        items: &[Value],
    ) -> SendOutcome {
        self.send(messaging::format_list(kind, to, title, items)).await
    }

    pub async fn send_cart_summary(&self, to: &str, items: &[Value], total: f64) -> SendOutcome {
        self.send(messaging::format_cart_summary(to, items, total))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unconfigured() -> WhatsAppSettings {
        WhatsAppSettings {
            access_token: None,
            phone_number_id: Some("123".to_string()),
            business_account_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            verify_token: DEFAULT_VERIFY_TOKEN.to_string(),
            app_secret: None,
        }
    }

    #[tokio::test]
    async fn dry_run_returns_preview() {
        let client = WhatsAppClient::new(unconfigured()).unwrap();
        assert!(!client.is_configured());

        let outcome = client
            .send_card(ItemKind::Hotel, "+1 555", &json!({"id": "h1", "name": "Ritz"}))
            .await;
        assert!(outcome.success);
        assert!(outcome.is_preview());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["message"], "WhatsApp not configured - showing preview");
        assert_eq!(json["preview"]["to"], "1555");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn empty_token_counts_as_unconfigured() {
        let mut settings = unconfigured();
        settings.access_token = Some(String::new());
        assert!(!WhatsAppClient::new(settings).unwrap().is_configured());
    }
}
