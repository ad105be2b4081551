//! Interactive WhatsApp message payloads built from widget display mappings.
//!
//! Formatting never fails: missing fields fall back to alternates or literals,
//! so partially populated items still render.

use crate::core::catalog;
use crate::utils::error::{Result, TravelError};
use crate::utils::format::{truncate_chars, usd_cents};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const FOOTER: &str = "LuxuryTravel.AI";
/// Channel limits for interactive messages.
pub const MAX_BODY_CHARS: usize = 1024;
pub const MAX_BUTTON_TITLE_CHARS: usize = 20;
pub const MAX_ROW_TITLE_CHARS: usize = 24;
pub const MAX_ROW_DESCRIPTION_CHARS: usize = 72;
pub const MAX_LIST_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Flight,
    Hotel,
    Restaurant,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Flight => "flight",
            ItemKind::Hotel => "hotel",
            ItemKind::Restaurant => "restaurant",
        }
    }

    fn section_title(&self) -> &'static str {
        match self {
            ItemKind::Flight => "Flights",
            ItemKind::Hotel => "Hotels",
            ItemKind::Restaurant => "Restaurants",
        }
    }

    /// Button actions offered on a card, as `(action, title)`.
    fn card_actions(&self) -> [(&'static str, &'static str); 3] {
        match self {
            ItemKind::Flight => [
                ("book", "Book Now"),
                ("details", "More Details"),
                ("cart", "Add to Cart"),
            ],
            ItemKind::Hotel => [
                ("book", "Book Now"),
                ("details", "View Rooms"),
                ("cart", "Add to Cart"),
            ],
            ItemKind::Restaurant => [
                ("reserve", "Reserve Now"),
                ("menu", "View Menu"),
                ("cart", "Add to Trip"),
            ],
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flight" => Ok(ItemKind::Flight),
            "hotel" => Ok(ItemKind::Hotel),
            "restaurant" => Ok(ItemKind::Restaurant),
            _ => Err(TravelError::validation(
                "item_type",
                s,
                "Expected one of flight, hotel, restaurant",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub messaging_product: &'static str,
    pub recipient_type: &'static str,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub interactive: Interactive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interactive {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    pub body: Text,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Text>,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Header {
    Image { image: MediaLink },
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaLink {
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    Buttons { buttons: Vec<ReplyButton> },
    List { button: String, sections: Vec<ListSection> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyButton {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub reply: ButtonReply,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonReply {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSection {
    pub title: String,
    pub rows: Vec<ListRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl OutboundMessage {
    fn interactive(to: &str, interactive: Interactive) -> Self {
        Self {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to: normalize_phone(to),
            kind: "interactive",
            interactive,
        }
    }

    /// Reply button ids, in display order.
    pub fn button_ids(&self) -> Vec<&str> {
        match &self.interactive.action {
            Action::Buttons { buttons } => buttons.iter().map(|b| b.reply.id.as_str()).collect(),
            Action::List { .. } => Vec::new(),
        }
    }
}

pub fn normalize_phone(to: &str) -> String {
    to.chars().filter(|c| *c != '+' && !c.is_whitespace()).collect()
}

fn reply(id: String, title: &str) -> ReplyButton {
    ReplyButton {
        kind: "reply",
        reply: ButtonReply {
            id,
            title: truncate_chars(title, MAX_BUTTON_TITLE_CHARS),
        },
    }
}

/// First present field among `keys`, rendered as text.
fn text_field(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match item.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn text_or(item: &Value, keys: &[&str], default: &str) -> String {
    text_field(item, keys).unwrap_or_else(|| default.to_string())
}

fn int_or(item: &Value, keys: &[&str], default: u64) -> u64 {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(Value::as_u64))
        .unwrap_or(default)
}

fn string_list(item: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(Value::as_array))
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn flight_body(item: &Value) -> String {
    let mut body = format!(
        "✈️ *{}*\n\n💺 {}\n🛫 {}\n📅 {} at {}\n⏱️ {} · {}\n\n💰 *{}* per person",
        text_or(item, &["route", "routeCode"], "Flight Deal"),
        text_or(item, &["cabin", "cabin_class"], "Business Class"),
        text_or(item, &["airlineName", "airline_name", "airline"], ""),
        text_or(item, &["departureDate", "departure_date"], ""),
        text_or(item, &["departureTime", "departure_time"], ""),
        text_or(item, &["duration"], ""),
        text_or(item, &["stopsDisplay"], "Nonstop"),
        text_or(item, &["price"], ""),
    );
    if let Some(savings) = text_field(item, &["savings"]) {
        body.push_str(&format!("\n🏷️ {}", savings));
    }
    body
}

fn hotel_body(item: &Value) -> String {
    let stars = int_or(item, &["stars", "star_rating"], 5);
    let mut body = format!(
        "🏨 *{}*\n\n📍 {}\n⭐ {}/5 · {}\n{} {}-Star\n\n💰 *{}* per night",
        text_or(item, &["name"], "Luxury Hotel"),
        text_or(item, &["city", "location"], ""),
        text_or(item, &["ratingDisplay", "rating"], "4.9"),
        text_or(item, &["reviewsDisplay"], ""),
        "⭐".repeat(stars.min(5) as usize),
        stars,
        text_or(item, &["pricePerNight", "price_per_night", "price"], ""),
    );
    if let Some(savings) = text_field(item, &["savings"]) {
        body.push_str(&format!("\n🏷️ {}", savings));
    }
    if let Some(amenities) = text_field(item, &["amenitiesDisplay"]) {
        body.push_str(&format!("\n\n✨ {}", amenities));
    }
    body
}

fn restaurant_body(item: &Value) -> String {
    let michelin = int_or(item, &["michelinStars", "michelin_stars"], 0);
    let michelin_text = if michelin > 0 {
        format!("{} Michelin", "⭐".repeat(michelin.min(3) as usize))
    } else {
        String::new()
    };
    let mut body = format!(
        "🍽️ *{}*\n\n🍴 {}\n📍 {}\n⭐ {}/5\n{}\n\n💰 {}",
        text_or(item, &["name"], "Restaurant"),
        text_or(item, &["cuisineDisplay", "cuisine_display", "cuisine"], ""),
        text_or(item, &["neighborhood"], ""),
        text_or(item, &["ratingDisplay", "rating"], "4.8"),
        michelin_text,
        text_or(item, &["priceRange", "price_range"], "$$$"),
    );
    let times = string_list(item, &["availableTimes", "available_times"]);
    if !times.is_empty() {
        let shown: Vec<&str> = times.iter().take(3).map(String::as_str).collect();
        body.push_str(&format!("\n\n🕐 Available: {}", shown.join(", ")));
    }
    body
}

fn header_image(kind: ItemKind, item: &Value) -> String {
    let fallback = match kind {
        ItemKind::Flight => catalog::DEFAULT_FLIGHT_IMAGE,
        ItemKind::Hotel => catalog::DEFAULT_HOTEL_IMAGE,
        ItemKind::Restaurant => catalog::DEFAULT_RESTAURANT_IMAGE,
    };
    text_or(item, &["imageUrl", "image_url"], fallback)
}

/// Single result rendered as an image card with three reply buttons whose ids
/// follow `{action}_{domain}_{resultId}`.
pub fn format_card(kind: ItemKind, to: &str, item: &Value) -> OutboundMessage {
    let body = match kind {
        ItemKind::Flight => flight_body(item),
        ItemKind::Hotel => hotel_body(item),
        ItemKind::Restaurant => restaurant_body(item),
    };
    let id = text_or(item, &["id"], "unknown");
    let buttons = kind
        .card_actions()
        .iter()
        .map(|(action, title)| reply(format!("{}_{}_{}", action, kind.as_str(), id), title))
        .collect();

    OutboundMessage::interactive(
        to,
        Interactive {
            kind: "button",
            header: Some(Header::Image {
                image: MediaLink {
                    link: header_image(kind, item),
                },
            }),
            body: Text {
                text: truncate_chars(&body, MAX_BODY_CHARS),
            },
            footer: Some(Text {
                text: FOOTER.to_string(),
            }),
            action: Action::Buttons { buttons },
        },
    )
}

fn list_row(kind: ItemKind, item: &Value) -> ListRow {
    let (title, description) = match kind {
        ItemKind::Flight => (
            format!(
                "{} - {}",
                text_or(item, &["route", "routeCode"], ""),
                text_or(item, &["price"], "")
            ),
            format!(
                "{} · {}",
                text_or(item, &["airlineName", "airline"], ""),
                text_or(item, &["duration"], "")
            ),
        ),
        ItemKind::Hotel => (
            text_or(item, &["name"], ""),
            format!(
                "{} · {}⭐",
                text_or(item, &["pricePerNight", "price"], ""),
                text_or(item, &["ratingDisplay", "rating"], "")
            ),
        ),
        ItemKind::Restaurant => (
            text_or(item, &["name"], ""),
            format!(
                "{} · {}",
                text_or(item, &["cuisineDisplay", "cuisine"], ""),
                text_or(item, &["priceRange"], "")
            ),
        ),
    };
    ListRow {
        id: format!("select_{}", text_or(item, &["id"], "")),
        title: truncate_chars(&title, MAX_ROW_TITLE_CHARS),
        description: truncate_chars(&description, MAX_ROW_DESCRIPTION_CHARS),
    }
}

/// Several results as a selectable list, at most ten rows.
pub fn format_list(kind: ItemKind, to: &str, title: &str, items: &[Value]) -> OutboundMessage {
    let rows = items
        .iter()
        .take(MAX_LIST_ROWS)
        .map(|item| list_row(kind, item))
        .collect();

    OutboundMessage::interactive(
        to,
        Interactive {
            kind: "list",
            header: Some(Header::Text {
                text: title.to_string(),
            }),
            body: Text {
                text: format!("Found {} options. Tap to view details.", items.len()),
            },
            footer: Some(Text {
                text: FOOTER.to_string(),
            }),
            action: Action::List {
                button: "View Options".to_string(),
                sections: vec![ListSection {
                    title: kind.section_title().to_string(),
                    rows,
                }],
            },
        },
    )
}

/// Cart contents with a total and checkout controls. Items carry a `type`
/// field naming their domain.
pub fn format_cart_summary(to: &str, items: &[Value], total: f64) -> OutboundMessage {
    let mut body = String::from("🛒 *Your Travel Cart*\n\n");
    for item in items {
        let line = match item.get("type").and_then(Value::as_str) {
            Some("flight") => format!(
                "✈️ {} - {}",
                text_or(item, &["route"], ""),
                text_or(item, &["price"], "")
            ),
            Some("hotel") => format!(
                "🏨 {} - {}",
                text_or(item, &["name"], ""),
                text_or(item, &["totalPrice", "price"], "")
            ),
            Some("restaurant") => format!("🍽️ {} - Reservation", text_or(item, &["name"], "")),
            _ => continue,
        };
        body.push_str(&line);
        body.push('\n');
    }
    body.push_str(&format!("\n💰 *Total: {}*", usd_cents(total)));

    OutboundMessage::interactive(
        to,
        Interactive {
            kind: "button",
            header: None,
            body: Text {
                text: truncate_chars(&body, MAX_BODY_CHARS),
            },
            footer: Some(Text {
                text: "Ready to complete your booking?".to_string(),
            }),
            action: Action::Buttons {
                buttons: vec![
                    reply("checkout_now".to_string(), "Checkout"),
                    reply("modify_cart".to_string(), "Modify Cart"),
                    reply("clear_cart".to_string(), "Clear Cart"),
                ],
            },
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flight_card_has_three_prefixed_buttons() {
        let item = json!({
            "id": "amadeus_JFK_CDG",
            "route": "NYC -> Paris",
            "price": "$1,847",
            "airlineName": "Air France",
            "savings": "26% off"
        });
        let message = format_card(ItemKind::Flight, "+1 555 0100", &item);

        assert_eq!(message.to, "15550100");
        assert_eq!(
            message.button_ids(),
            vec![
                "book_flight_amadeus_JFK_CDG",
                "details_flight_amadeus_JFK_CDG",
                "cart_flight_amadeus_JFK_CDG"
            ]
        );
        assert!(message.interactive.body.text.contains("NYC -> Paris"));
        assert!(message.interactive.body.text.contains("26% off"));

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["interactive"]["header"]["type"], "image");
        assert_eq!(json["interactive"]["action"]["buttons"][0]["type"], "reply");
    }

    #[test]
    fn empty_item_still_renders() {
        let message = format_card(ItemKind::Restaurant, "123", &json!({}));
        assert_eq!(message.button_ids()[0], "reserve_restaurant_unknown");
        assert!(message.interactive.body.text.contains("Restaurant"));
        assert!(message.interactive.body.text.contains("$$$"));
    }

    #[test]
    fn body_is_bounded() {
        let item = json!({"name": "x".repeat(5000)});
        let message = format_card(ItemKind::Hotel, "1", &item);
        assert_eq!(message.interactive.body.text.chars().count(), MAX_BODY_CHARS);
    }

    #[test]
    fn list_caps_rows_and_titles() {
        let items: Vec<Value> = (0..12)
            .map(|i| json!({"id": format!("h{}", i), "name": "Four Seasons Hotel George V Paris", "pricePerNight": "$895/night", "ratingDisplay": "4.9"}))
            .collect();
        let message = format_list(ItemKind::Hotel, "1", "Paris hotels", &items);

        let json = serde_json::to_value(&message).unwrap();
        let rows = json["interactive"]["action"]["sections"][0]["rows"]
            .as_array()
            .unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0]["id"], "select_h0");
        assert!(rows[0]["title"].as_str().unwrap().chars().count() <= 24);
        assert_eq!(rows[0]["description"], "$895/night · 4.9⭐");
        assert_eq!(json["interactive"]["action"]["sections"][0]["title"], "Hotels");
        assert_eq!(json["interactive"]["body"]["text"], "Found 12 options. Tap to view details.");
    }

    #[test]
    fn cart_summary_lists_items_and_total() {
        let items = vec![
            json!({"type": "flight", "route": "NYC -> Paris", "price": "$1,847"}),
            json!({"type": "hotel", "name": "Ritz Paris", "totalPrice": "$3,600"}),
            json!({"type": "restaurant", "name": "Le Cinq"}),
            json!({"type": "spaceship", "name": "ignored"}),
        ];
        let message = format_cart_summary("+44 20", &items, 5447.0);
        let body = &message.interactive.body.text;

        assert!(body.contains("✈️ NYC -> Paris - $1,847"));
        assert!(body.contains("🏨 Ritz Paris - $3,600"));
        assert!(body.contains("🍽️ Le Cinq - Reservation"));
        assert!(!body.contains("ignored"));
        assert!(body.contains("*Total: $5,447.00*"));
        assert_eq!(message.button_ids(), vec!["checkout_now", "modify_cart", "clear_cart"]);
        assert!(message.interactive.header.is_none());
    }

    #[test]
    fn item_kind_parses() {
        assert_eq!("Hotel".parse::<ItemKind>().unwrap(), ItemKind::Hotel);
        assert!("car".parse::<ItemKind>().is_err());
    }
}
