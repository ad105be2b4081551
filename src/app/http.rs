//! REST surface over [`ToolService`], plus the MCP-over-HTTP bridge and the
//! WhatsApp webhook routes.

use crate::app::mcp::McpServer;
use crate::app::tools::{
    CuratedQuery, FlightSearchRequest, FlightWidgetQuery, HotelSearchRequest, HotelWidgetQuery,
    RestaurantSearchRequest, RestaurantWidgetQuery, ToolService, WhatsAppSendRequest,
};
use crate::app::webhook;
use crate::domain::model::WidgetPayload;
use crate::utils::error::{ErrorCategory, Result, TravelError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "Luxury Travel Agent API";
pub const MARGAUX_DEALS: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolService>,
}

impl AppState {
    pub fn new(tools: Arc<ToolService>) -> Self {
        Self { tools }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Travel(TravelError),
    BadRequest(String),
}

impl From<TravelError> for ApiError {
    fn from(err: TravelError) -> Self {
        ApiError::Travel(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Travel(err) => {
                let status = match err.category() {
                    ErrorCategory::Input => StatusCode::BAD_REQUEST,
                    ErrorCategory::Security => StatusCode::UNAUTHORIZED,
                    ErrorCategory::Upstream | ErrorCategory::Delivery => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!("Request failed: {} ({:?})", err, err.severity());
                } else {
                    tracing::warn!("Request rejected: {}", err);
                }
                (status, err.to_string())
            }
        };
        (status, Json(json!({"success": false, "error": message}))).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

async fn search_flights(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FlightSearchRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let response = state.tools.search_flights(&request).await?;
    Ok(Json(serde_json::to_value(response).map_err(TravelError::from)?))
}

async fn flight_widget(
    State(state): State<AppState>,
    query: std::result::Result<Query<FlightWidgetQuery>, QueryRejection>,
) -> ApiResult<WidgetPayload> {
    let Query(query) = query?;
    Ok(Json(state.tools.flight_widget(&query).await?))
}

async fn margaux_widget(State(state): State<AppState>) -> ApiResult<WidgetPayload> {
    let query = FlightWidgetQuery {
        user_id: None,
        max_deals: MARGAUX_DEALS,
    };
    Ok(Json(state.tools.flight_widget(&query).await?))
}

async fn search_hotels(
    State(state): State<AppState>,
    payload: std::result::Result<Json<HotelSearchRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let response = state.tools.search_hotels(&request).await?;
    Ok(Json(serde_json::to_value(response).map_err(TravelError::from)?))
}

async fn hotel_widget(
    State(state): State<AppState>,
    query: std::result::Result<Query<HotelWidgetQuery>, QueryRejection>,
) -> ApiResult<WidgetPayload> {
    let Query(query) = query?;
    Ok(Json(state.tools.hotel_widget(&query).await?))
}

async fn curated_hotels(
    State(state): State<AppState>,
    query: std::result::Result<Query<CuratedQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query?;
    Ok(Json(state.tools.curated_hotels(&query)?))
}

async fn search_restaurants(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RestaurantSearchRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let response = state.tools.search_restaurants(&request)?;
    Ok(Json(serde_json::to_value(response).map_err(TravelError::from)?))
}

async fn restaurant_widget(
    State(state): State<AppState>,
    query: std::result::Result<Query<RestaurantWidgetQuery>, QueryRejection>,
) -> ApiResult<WidgetPayload> {
    let Query(query) = query?;
    Ok(Json(state.tools.restaurant_widget(&query)?))
}

async fn send_whatsapp(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WhatsAppSendRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let outcome = state.tools.send_to_whatsapp(&request).await?;
    Ok(Json(serde_json::to_value(outcome).map_err(TravelError::from)?))
}

async fn mcp(State(state): State<AppState>, body: String) -> Response {
    let server = McpServer::new(state.tools.clone());
    match server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/flights/search", post(search_flights))
        .route("/api/flights/widget", get(flight_widget))
        .route("/api/widget/margaux", get(margaux_widget))
        .route("/api/hotels/search", post(search_hotels))
        .route("/api/hotels/widget", get(hotel_widget))
        .route("/api/hotels/curated", get(curated_hotels))
        .route("/api/restaurants/search", post(search_restaurants))
        .route("/api/restaurants/widget", get(restaurant_widget))
        .route("/api/whatsapp/send", post(send_whatsapp))
        .route("/mcp", post(mcp))
        .route(
            webhook::WEBHOOK_PATH,
            get(webhook::verify).post(webhook::receive),
        )
        .route("/webhook/status", get(webhook::status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(TravelError::IoError)?;
    tracing::info!("{} listening on http://{}", SERVICE_NAME, addr);
    axum::serve(listener, router(state))
        .await
        .map_err(TravelError::IoError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let response =
            ApiError::from(TravelError::validation("origin", "J", "must be 3 letters")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn signature_errors_map_to_401() {
        let response = ApiError::from(TravelError::SignatureMismatch {
            reason: "bad".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn configuration_errors_map_to_500() {
        let response = ApiError::from(TravelError::MissingConfigError {
            field: "amadeus".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
