use serde_json::{json, Value};
use std::sync::Arc;
use travel_widgets::adapters::whatsapp::{WhatsAppClient, DEFAULT_API_URL, DEFAULT_VERIFY_TOKEN};
use travel_widgets::core::{FlightWidget, HotelWidget, RestaurantWidget};
use travel_widgets::domain::ports::WhatsAppSettings;
use travel_widgets::{McpServer, ToolService};

fn server() -> McpServer {
    let tools = ToolService::new(
        FlightWidget::with_seed(None, 3),
        HotelWidget::new(None),
        RestaurantWidget::with_seed(3),
        WhatsAppClient::new(WhatsAppSettings {
            access_token: None,
            phone_number_id: None,
            business_account_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            verify_token: DEFAULT_VERIFY_TOKEN.to_string(),
            app_secret: None,
        })
        .unwrap(),
    );
    McpServer::new(Arc::new(tools))
}

async fn rpc(server: &McpServer, message: Value) -> Value {
    let response = server
        .handle_message(&message.to_string())
        .await
        .expect("request should produce a response");
    serde_json::to_value(response).unwrap()
}

async fn call_tool(server: &McpServer, name: &str, arguments: Value) -> Value {
    rpc(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        }),
    )
    .await
}

fn text_payload(response: &Value) -> Value {
    let content = response["result"]["content"].as_array().unwrap();
    let text = content.last().unwrap();
    assert_eq!(text["type"], "text");
    serde_json::from_str(text["text"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn initialize_and_list_tools() {
    let server = server();

    let init = rpc(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}})).await;
    assert_eq!(init["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(init["result"]["serverInfo"]["name"], "luxury-travel-agent");

    let notification = server
        .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(notification.is_none());

    let list = rpc(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
    let names: Vec<&str> = list["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 7);
    for expected in [
        "search_flights",
        "search_hotels",
        "get_flight_deals",
        "get_hotel_recommendations",
        "search_restaurants",
        "get_restaurant_recommendations",
        "send_to_whatsapp",
    ] {
        assert!(names.contains(&expected), "missing tool {}", expected);
    }
}

#[tokio::test]
async fn protocol_errors() {
    let server = server();

    let parse = server.handle_message("{not json").await.unwrap();
    assert_eq!(parse.error.unwrap().code, -32700);

    let no_method = rpc(&server, json!({"jsonrpc": "2.0", "id": 5})).await;
    assert_eq!(no_method["error"]["code"], -32600);
    assert_eq!(no_method["id"], 5);

    let not_an_object = server.handle_message("[1, 2]").await.unwrap();
    assert_eq!(not_an_object.error.unwrap().code, -32600);
    assert!(not_an_object.id.is_none());

    let unknown = rpc(&server, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).await;
    assert_eq!(unknown["error"]["code"], -32601);

    let bad_tool = call_tool(&server, "book_spaceflight", json!({})).await;
    assert_eq!(bad_tool["error"]["code"], -32602);

    let bad_args = call_tool(
        &server,
        "search_flights",
        json!({"origin": "JFK", "destination": "CDG", "departure_date": "June 1st"}),
    )
    .await;
    assert_eq!(bad_args["error"]["code"], -32602);
    assert_eq!(bad_args["id"], 7);
}

#[tokio::test]
async fn stdio_loop_survives_non_utf8_line() {
    let server = server();
    let mut input = Vec::new();
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#);
    input.extend_from_slice(b"\n\xff\xfe bad\n\n");
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"initialize","params":{}}"#);
    input.push(b'\n');

    let mut output = Vec::new();
    server.serve_io(input.as_slice(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert!(responses[0]["result"]["tools"].is_array());
    assert_eq!(responses[1]["error"]["code"], -32700);
    assert_eq!(responses[2]["id"], 2);
    assert_eq!(responses[2]["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn hotel_search_returns_images_then_summary() {
    let server = server();
    let response = call_tool(
        &server,
        "search_hotels",
        json!({"location": "Unknownsville", "check_in": "2025-06-01", "check_out": "2025-06-04"}),
    )
    .await;

    let content = response["result"]["content"].as_array().unwrap();
    assert!(content.len() >= 2 && content.len() <= 4);
    let (images, text) = content.split_at(content.len() - 1);
    assert!(images.iter().all(|c| c["type"] == "image" && c["mimeType"] == "image/jpeg"));
    assert_eq!(text[0]["type"], "text");

    let payload = text_payload(&response);
    assert_eq!(payload["type"], "hotel_results");
    assert_eq!(payload["count"], 3);
    let hotels = payload["hotels"].as_array().unwrap();
    assert!(hotels
        .iter()
        .all(|h| h["name"].as_str().unwrap().ends_with("Unknownsville")));
}

#[tokio::test]
async fn widget_tools_respect_max() {
    let server = server();

    let response = call_tool(&server, "get_flight_deals", json!({"max_deals": 2})).await;
    let payload = text_payload(&response);
    assert_eq!(payload["type"], "flight_results");
    let deals = payload["flights"].as_array().unwrap();
    assert!(!deals.is_empty() && deals.len() <= 2);

    let response = call_tool(
        &server,
        "get_restaurant_recommendations",
        json!({"location": "Paris", "max_restaurants": 1}),
    )
    .await;
    let payload = text_payload(&response);
    assert_eq!(payload["type"], "restaurant_results");
    assert_eq!(payload["restaurants"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn send_to_whatsapp_tool_previews() {
    let server = server();
    let response = call_tool(
        &server,
        "send_to_whatsapp",
        json!({
            "phone": "15550100000",
            "item_type": "restaurant",
            "item": {"id": "opentable_paris_0", "name": "Le Cinq"}
        }),
    )
    .await;

    let payload = text_payload(&response);
    assert_eq!(payload["success"], true);
    assert_eq!(payload["mock"], true);
    let buttons = payload["preview"]["interactive"]["action"]["buttons"]
        .as_array()
        .unwrap();
    assert_eq!(buttons[0]["reply"]["id"], "reserve_restaurant_opentable_paris_0");
}
