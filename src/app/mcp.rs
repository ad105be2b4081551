//! MCP JSON-RPC server exposing the travel tools.

use crate::app::tools::{
    FlightSearchRequest, FlightWidgetQuery, HotelSearchRequest, HotelWidgetQuery,
    RestaurantSearchRequest, RestaurantWidgetQuery, ToolService, WhatsAppSendRequest,
};
use crate::utils::error::{Result, TravelError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "luxury-travel-agent";
pub const MAX_IMAGES: usize = 3;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// MCP JSON-RPC request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// MCP JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i64, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message,
                data: None,
            }),
        }
    }

    pub fn from_error(id: Option<Value>, err: TravelError) -> Self {
        Self::error(id, err.code(), err.to_string())
    }
}

pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "search_flights",
            "Search for flights between airports",
            json!({
                "type": "object",
                "properties": {
                    "origin": {"type": "string", "description": "Origin airport IATA code (e.g., JFK)"},
                    "destination": {"type": "string", "description": "Destination airport IATA code (e.g., CDG)"},
                    "departure_date": {"type": "string", "description": "Departure date (YYYY-MM-DD)"},
                    "return_date": {"type": "string", "description": "Return date (YYYY-MM-DD, optional)"},
                    "cabin_class": {
                        "type": "string",
                        "enum": ["ECONOMY", "PREMIUM_ECONOMY", "BUSINESS", "FIRST"],
                        "description": "Cabin class (default: BUSINESS)"
                    },
                    "adults": {"type": "integer", "description": "Number of adult passengers (default: 1)"}
                },
                "required": ["origin", "destination", "departure_date"]
            }),
        ),
        tool(
            "search_hotels",
            "Search for luxury hotels in a destination",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string", "description": "City name or IATA code (e.g., Paris, PAR)"},
                    "check_in": {"type": "string", "description": "Check-in date (YYYY-MM-DD)"},
                    "check_out": {"type": "string", "description": "Check-out date (YYYY-MM-DD)"},
                    "guests": {"type": "integer", "description": "Number of guests (default: 2)"},
                    "category": {
                        "type": "string",
                        "enum": ["luxury", "boutique", "resort", "business"],
                        "description": "Hotel category (default: luxury)"
                    }
                },
                "required": ["location", "check_in", "check_out"]
            }),
        ),
        tool(
            "get_flight_deals",
            "Get current flight deals for widget display",
            json!({
                "type": "object",
                "properties": {
                    "max_deals": {"type": "integer", "description": "Maximum number of deals to return (default: 3)"}
                }
            }),
        ),
        tool(
            "get_hotel_recommendations",
            "Get luxury hotel recommendations for widget display",
            json!({
                "type": "object",
                "properties": {
                    "max_hotels": {"type": "integer", "description": "Maximum number of hotels to return (default: 3)"}
                }
            }),
        ),
        tool(
            "search_restaurants",
            "Search for fine dining restaurants",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string", "description": "City name (e.g., Paris, Tokyo, Miami)"},
                    "date": {"type": "string", "description": "Reservation date (YYYY-MM-DD)"},
                    "time": {"type": "string", "description": "Preferred time (HH:MM, default: 19:00)"},
                    "party_size": {"type": "integer", "description": "Number of guests (default: 2)"},
                    "cuisine": {
                        "type": "string",
                        "enum": ["french", "italian", "japanese", "american", "seafood", "steakhouse", "all"],
                        "description": "Cuisine type (default: all)"
                    }
                },
                "required": ["location", "date"]
            }),
        ),
        tool(
            "get_restaurant_recommendations",
            "Get fine dining restaurant recommendations",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string", "description": "City name (default: Paris)"},
                    "max_restaurants": {"type": "integer", "description": "Maximum number of restaurants to return (default: 3)"}
                }
            }),
        ),
        tool(
            "send_to_whatsapp",
            "Send travel options (flights, hotels, restaurants) as interactive cards to WhatsApp",
            json!({
                "type": "object",
                "properties": {
                    "phone": {"type": "string", "description": "Recipient phone number with country code (e.g., +1234567890)"},
                    "item_type": {
                        "type": "string",
                        "enum": ["flight", "hotel", "restaurant"],
                        "description": "Type of item to send"
                    },
                    "item": {"type": "object", "description": "The travel item data to send"}
                },
                "required": ["phone", "item_type", "item"]
            }),
        ),
    ]
}

fn arguments<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments)
        .map_err(|e| TravelError::validation("arguments", "", e.to_string()))
}

fn text(item: &Value, key: &str) -> Value {
    item.get(key).cloned().unwrap_or_else(|| json!(""))
}

fn image_ref(item: &Value, caption: String) -> Option<Value> {
    item.get("imageUrl")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(|url| json!({"url": url, "caption": caption}))
}

fn empty_summary(label: &str, raw: Value) -> Value {
    json!({"formatted": format!("No {} found.", label), "raw": raw, "images": []})
}

/// Condensed flight listing with up to three image references.
pub fn summarize_flights(deals: &[Value]) -> Value {
    if deals.is_empty() {
        return empty_summary("flights", json!({"deals": [], "count": 0}));
    }
    let flights: Vec<Value> = deals
        .iter()
        .map(|d| {
            json!({
                "airline": text(d, "airlineName"),
                "route": text(d, "route"),
                "cabin": text(d, "cabin"),
                "departure": format!(
                    "{} at {}",
                    d["departureDate"].as_str().unwrap_or(""),
                    d["departureTime"].as_str().unwrap_or("")
                ),
                "arrival": text(d, "arrivalTime"),
                "duration": text(d, "duration"),
                "stops": text(d, "stopsDisplay"),
                "price": text(d, "price"),
                "original_price": text(d, "originalPrice"),
                "savings": text(d, "savings"),
                "deal_score": d.get("dealScore").cloned().unwrap_or(json!(0)),
                "urgency": text(d, "urgency"),
                "image_url": text(d, "imageUrl"),
            })
        })
        .collect();
    let images: Vec<Value> = deals
        .iter()
        .filter_map(|d| {
            let caption = format!(
                "{} - {}",
                d["airlineName"].as_str().unwrap_or(""),
                d["route"].as_str().unwrap_or("")
            );
            image_ref(d, caption)
        })
        .take(MAX_IMAGES)
        .collect();
    json!({"type": "flight_results", "count": flights.len(), "flights": flights, "images": images})
}

pub fn summarize_hotels(hotels: &[Value]) -> Value {
    if hotels.is_empty() {
        return empty_summary("hotels", json!({"hotels": [], "count": 0}));
    }
    let summaries: Vec<Value> = hotels
        .iter()
        .map(|h| {
            json!({
                "name": text(h, "name"),
                "brand": text(h, "brand"),
                "location": text(h, "city"),
                "rating": text(h, "ratingDisplay"),
                "reviews": text(h, "reviewsDisplay"),
                "stars": text(h, "starsDisplay"),
                "price_per_night": text(h, "pricePerNight"),
                "original_price": text(h, "originalPrice"),
                "total_price": text(h, "totalPrice"),
                "savings": text(h, "savings"),
                "amenities": text(h, "amenitiesDisplay"),
                "room_type": text(h, "roomType"),
                "image_url": text(h, "imageUrl"),
            })
        })
        .collect();
    let images: Vec<Value> = hotels
        .iter()
        .filter_map(|h| {
            let caption = format!(
                "{} - {}",
                h["name"].as_str().unwrap_or(""),
                h["city"].as_str().unwrap_or("")
            );
            image_ref(h, caption)
        })
        .take(MAX_IMAGES)
        .collect();
    json!({"type": "hotel_results", "count": summaries.len(), "hotels": summaries, "images": images})
}

pub fn summarize_restaurants(restaurants: &[Value]) -> Value {
    if restaurants.is_empty() {
        return empty_summary("restaurants", json!({"restaurants": [], "count": 0}));
    }
    let summaries: Vec<Value> = restaurants
        .iter()
        .map(|r| {
            json!({
                "name": text(r, "name"),
                "cuisine": text(r, "cuisineDisplay"),
                "location": text(r, "neighborhood"),
                "city": text(r, "city"),
                "rating": text(r, "ratingDisplay"),
                "reviews": text(r, "reviewsDisplay"),
                "price_range": text(r, "priceRange"),
                "michelin_stars": r.get("michelinStars").cloned().unwrap_or(json!(0)),
                "michelin_display": text(r, "michelinDisplay"),
                "description": text(r, "description"),
                "highlights": text(r, "highlightsDisplay"),
                "available_times": r.get("availableTimes").cloned().unwrap_or(json!([])),
                "image_url": text(r, "imageUrl"),
            })
        })
        .collect();
    let images: Vec<Value> = restaurants
        .iter()
        .filter_map(|r| {
            let stars = r["michelinStars"].as_u64().unwrap_or(0);
            let michelin = if stars > 0 {
                format!(" ({}★ Michelin)", stars)
            } else {
                String::new()
            };
            let caption = format!("{}{}", r["name"].as_str().unwrap_or(""), michelin);
            image_ref(r, caption)
        })
        .take(MAX_IMAGES)
        .collect();
    json!({
        "type": "restaurant_results",
        "count": summaries.len(),
        "restaurants": summaries,
        "images": images
    })
}

/// Tool result as MCP content: image items first, then the pretty-printed JSON.
pub fn tool_content(result: &Value) -> Result<Value> {
    let mut content: Vec<Value> = result
        .get("images")
        .and_then(Value::as_array)
        .map(|images| {
            images
                .iter()
                .take(MAX_IMAGES)
                .map(|img| {
                    json!({
                        "type": "image",
                        "data": img.get("url").and_then(Value::as_str).unwrap_or(""),
                        "mimeType": "image/jpeg"
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    content.push(json!({"type": "text", "text": serde_json::to_string_pretty(result)?}));
    Ok(json!({ "content": content }))
}

pub struct McpServer {
    tools: Arc<ToolService>,
}

impl McpServer {
    pub fn new(tools: Arc<ToolService>) -> Self {
        Self { tools }
    }

    /// Parses one JSON-RPC message. `None` means nothing should be written back.
    pub async fn handle_message(&self, message: &str) -> Option<McpResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                return Some(McpResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        let id = value
            .get("id")
            .filter(|id| id.is_string() || id.is_number())
            .cloned();
        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(McpResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        tracing::debug!("MCP request: {}", request.method);
        let id = request.id;

        match request.method.as_str() {
            methods::INITIALIZE => Some(McpResponse::success(
                id,
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {"tools": {}},
                    "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")}
                }),
            )),
            methods::LIST_TOOLS => Some(McpResponse::success(
                id,
                json!({ "tools": tool_definitions() }),
            )),
            methods::CALL_TOOL => {
                let params: CallParams = match serde_json::from_value(request.params) {
                    Ok(params) => params,
                    Err(e) => {
                        return Some(McpResponse::error(
                            id,
                            INVALID_PARAMS,
                            format!("Invalid params: {}", e),
                        ))
                    }
                };
                let response = match self.call_tool(&params.name, params.arguments).await {
                    Ok(result) => tool_content(&result),
                    Err(e) => Err(e),
                };
                Some(match response {
                    Ok(content) => McpResponse::success(id, content),
                    Err(e) => {
                        tracing::warn!("Tool {} failed: {}", params.name, e);
                        McpResponse::from_error(id, e)
                    }
                })
            }
            method if method.starts_with("notifications/") => {
                if method == methods::INITIALIZED {
                    tracing::info!("MCP client initialized");
                }
                None
            }
            method => Some(McpResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        }
    }

    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value> {
        tracing::info!("Calling tool {}", name);
        match name {
            "search_flights" => {
                let request: FlightSearchRequest = arguments(args)?;
                let response = self.tools.search_flights(&request).await?;
                let deals = serde_json::to_value(&response.deals)?;
                Ok(summarize_flights(deals.as_array().map(Vec::as_slice).unwrap_or_default()))
            }
            "search_hotels" => {
                let request: HotelSearchRequest = arguments(args)?;
                let response = self.tools.search_hotels(&request).await?;
                let hotels = serde_json::to_value(&response.hotels)?;
                Ok(summarize_hotels(hotels.as_array().map(Vec::as_slice).unwrap_or_default()))
            }
            "get_flight_deals" => {
                let query: FlightWidgetQuery = arguments(args)?;
                let payload = self.tools.flight_widget(&query).await?;
                Ok(summarize_flights(&payload.all_items))
            }
            "get_hotel_recommendations" => {
                let query: HotelWidgetQuery = arguments(args)?;
                let payload = self.tools.hotel_widget(&query).await?;
                Ok(summarize_hotels(&payload.all_items))
            }
            "search_restaurants" => {
                let request: RestaurantSearchRequest = arguments(args)?;
                let response = self.tools.search_restaurants(&request)?;
                let restaurants = serde_json::to_value(&response.restaurants)?;
                Ok(summarize_restaurants(
                    restaurants.as_array().map(Vec::as_slice).unwrap_or_default(),
                ))
            }
            "get_restaurant_recommendations" => {
                let query: RestaurantWidgetQuery = arguments(args)?;
                let payload = self.tools.restaurant_widget(&query)?;
                Ok(summarize_restaurants(&payload.all_items))
            }
            "send_to_whatsapp" => {
                let request: WhatsAppSendRequest = arguments(args)?;
                let outcome = self.tools.send_to_whatsapp(&request).await?;
                Ok(serde_json::to_value(outcome)?)
            }
            other => Err(TravelError::validation("name", other, "Unknown tool")),
        }
    }

    /// Line-delimited JSON-RPC over stdin/stdout until EOF.
    pub async fn run(&self) -> Result<()> {
        self.serve_io(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;
        tracing::info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Answers each newline-terminated message from `reader` on `writer`.
    /// A line that is not UTF-8 gets a parse error and the loop keeps going.
    pub async fn serve_io<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    self.handle_message(trimmed).await
                }
                Err(e) => {
                    tracing::warn!("Dropping non UTF-8 input line: {}", e);
                    Some(McpResponse::error(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_tools_with_schemas() {
        let tools = tool_definitions();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().all(|t| t.input_schema["type"] == "object"));
        let json = serde_json::to_value(&tools[0]).unwrap();
        assert!(json.get("inputSchema").is_some());
    }

    #[test]
    fn content_caps_images() {
        let result = json!({
            "type": "hotel_results",
            "images": [{"url": "a"}, {"url": "b"}, {"url": "c"}, {"url": "d"}]
        });
        let content = tool_content(&result).unwrap();
        let items = content["content"].as_array().unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0]["type"], "image");
        assert_eq!(items[0]["mimeType"], "image/jpeg");
        assert_eq!(items[2]["data"], "c");
        assert_eq!(items[3]["type"], "text");
    }

    #[test]
    fn empty_results_are_described() {
        let summary = summarize_flights(&[]);
        assert_eq!(summary["formatted"], "No flights found.");
        assert_eq!(summary["images"], json!([]));
    }
}
