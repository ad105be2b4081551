//! Operations shared by the HTTP router and the MCP server.
//!
//! Request structs carry the public defaults; `to_params` is the only place
//! where caller input is validated.

use crate::adapters::amadeus::{AmadeusFlightClient, AmadeusHotelClient};
use crate::adapters::curated::CuratedHotelsClient;
use crate::adapters::whatsapp::{SendOutcome, WhatsAppClient};
use crate::core::catalog;
use crate::core::messaging::ItemKind;
use crate::core::{FlightWidget, HotelWidget, RestaurantWidget};
use crate::domain::flight::{CabinClass, FlightDealView, FlightSearchParams};
use crate::domain::hotel::{HotelCategory, HotelSearchParams, HotelView};
use crate::domain::model::WidgetPayload;
use crate::domain::ports::{ConfigProvider, FlightProvider, HotelProvider, WhatsAppSettings};
use crate::domain::restaurant::{
    CuisineType, PriceRange, RestaurantSearchParams, RestaurantView,
};
use crate::utils::error::{Result, TravelError};
use crate::utils::validation::{
    parse_date, parse_location_code, parse_time, validate_non_empty_string,
    validate_positive_number, validate_range,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const MAX_WIDGET_ITEMS: usize = 10;
pub const MAX_FLIGHT_RESULTS: usize = 50;

fn default_adults() -> u32 {
    1
}

fn default_cabin() -> String {
    CabinClass::Business.as_str().to_string()
}

fn default_max_results() -> usize {
    10
}

fn default_guests() -> u32 {
    2
}

fn default_rooms() -> u32 {
    1
}

fn default_min_rating() -> f64 {
    4.0
}

fn default_category() -> String {
    HotelCategory::Luxury.as_str().to_string()
}

fn default_time() -> String {
    "19:00".to_string()
}

fn default_party_size() -> u32 {
    2
}

fn default_cuisine() -> String {
    CuisineType::All.as_str().to_string()
}

fn default_widget_items() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default = "default_cabin")]
    pub cabin_class: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl FlightSearchRequest {
    pub fn to_params(&self) -> Result<FlightSearchParams> {
        let origin = parse_location_code("origin", &self.origin)?;
        let destination = parse_location_code("destination", &self.destination)?;
        let departure_date = parse_date("departure_date", &self.departure_date)?;
        let return_date = match self.return_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let date = parse_date("return_date", raw)?;
                if date < departure_date {
                    return Err(TravelError::validation(
                        "return_date",
                        raw,
                        "Return date must not be before the departure date",
                    ));
                }
                Some(date)
            }
            _ => None,
        };
        validate_positive_number("adults", self.adults, 1)?;
        if let Some(max_price) = self.max_price {
            validate_range("max_price", max_price, 0.0, f64::MAX)?;
        }

        let mut params = FlightSearchParams::new(&origin, &destination, departure_date);
        params.return_date = return_date;
        params.adults = self.adults;
        params.cabin_class = self.cabin_class.parse()?;
        params.max_results = self.max_results.clamp(1, MAX_FLIGHT_RESULTS);
        params.max_price = self.max_price;
        Ok(params)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchRequest {
    pub location: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default = "default_category")]
    pub category: String,
}

impl HotelSearchRequest {
    pub fn to_params(&self) -> Result<HotelSearchParams> {
        validate_non_empty_string("location", &self.location)?;
        let check_in = parse_date("check_in", &self.check_in)?;
        let check_out = parse_date("check_out", &self.check_out)?;
        if check_out < check_in {
            return Err(TravelError::validation(
                "check_out",
                &self.check_out,
                "Check-out must not be before check-in",
            ));
        }
        validate_positive_number("guests", self.guests, 1)?;
        validate_positive_number("rooms", self.rooms, 1)?;

        let mut params = HotelSearchParams::new(self.location.trim(), check_in, check_out);
        params.guests = self.guests;
        params.rooms = self.rooms;
        params.min_rating = self.min_rating.clamp(0.0, 5.0);
        params.max_price = self.max_price;
        params.category = self.category.parse()?;
        Ok(params)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSearchRequest {
    pub location: String,
    pub date: String,
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    #[serde(default = "default_cuisine")]
    pub cuisine: String,
    #[serde(default)]
    pub price_range: Option<String>,
}

impl RestaurantSearchRequest {
    pub fn to_params(&self) -> Result<RestaurantSearchParams> {
        validate_non_empty_string("location", &self.location)?;
        let date = parse_date("date", &self.date)?;
        let time = parse_time("time", &self.time)?;
        validate_positive_number("party_size", self.party_size, 1)?;

        let mut params = RestaurantSearchParams::new(self.location.trim(), date, time);
        params.party_size = self.party_size;
        params.cuisine = self.cuisine.parse()?;
        params.price_range = self
            .price_range
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(str::parse::<PriceRange>)
            .transpose()?;
        Ok(params)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightWidgetQuery {
    pub user_id: Option<String>,
    #[serde(default = "default_widget_items")]
    pub max_deals: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelWidgetQuery {
    pub user_id: Option<String>,
    #[serde(default = "default_widget_items")]
    pub max_hotels: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantWidgetQuery {
    pub location: Option<String>,
    #[serde(default = "default_widget_items")]
    pub max_restaurants: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratedQuery {
    pub location: String,
    #[serde(default = "default_category")]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppSendRequest {
    pub phone: String,
    pub item_type: String,
    pub item: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightSearchResponse {
    pub success: bool,
    pub count: usize,
    pub deals: Vec<FlightDealView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HotelSearchResponse {
    pub success: bool,
    pub count: usize,
    pub hotels: Vec<HotelView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantSearchResponse {
    pub success: bool,
    pub count: usize,
    pub restaurants: Vec<RestaurantView>,
}

/// One widget per domain plus the WhatsApp sender, shared for the life of the
/// process so provider token caches are reused across requests.
pub struct ToolService {
    flights: FlightWidget,
    hotels: HotelWidget,
    restaurants: RestaurantWidget,
    whatsapp: WhatsAppClient,
}

impl ToolService {
    pub fn new(
        flights: FlightWidget,
        hotels: HotelWidget,
        restaurants: RestaurantWidget,
        whatsapp: WhatsAppClient,
    ) -> Self {
        Self {
            flights,
            hotels,
            restaurants,
            whatsapp,
        }
    }

    pub fn from_config(config: &dyn ConfigProvider) -> Result<Self> {
        let (flight_provider, hotel_provider): (
            Option<Arc<dyn FlightProvider>>,
            Option<Arc<dyn HotelProvider>>,
        ) = match config.amadeus() {
            Some(credentials) => {
                tracing::info!("Amadeus configured at {}", credentials.base_url);
                (
                    Some(Arc::new(AmadeusFlightClient::new(credentials.clone())?)),
                    Some(Arc::new(AmadeusHotelClient::new(credentials)?)),
                )
            }
            None => {
                tracing::info!("Amadeus not configured, searches use mock inventory");
                (None, None)
            }
        };

        let mut hotels = HotelWidget::new(hotel_provider);
        if config.merge_curated() {
            tracing::info!("Merging curated hotels from {}", config.curated_api_url());
            hotels = hotels.with_curated(Arc::new(CuratedHotelsClient::new(
                config.curated_api_url(),
            )?));
        }

        let whatsapp = WhatsAppClient::new(config.whatsapp())?;
        if !whatsapp.is_configured() {
            tracing::info!("WhatsApp not configured, sends return previews");
        }

        Ok(Self::new(
            FlightWidget::new(flight_provider),
            hotels,
            RestaurantWidget::new(),
            whatsapp,
        ))
    }

    pub fn whatsapp_settings(&self) -> &WhatsAppSettings {
        self.whatsapp.settings()
    }

    pub async fn search_flights(&self, request: &FlightSearchRequest) -> Result<FlightSearchResponse> {
        let params = request.to_params()?;
        let deals: Vec<FlightDealView> = self
            .flights
            .search(&params)
            .await
            .iter()
            .map(|deal| deal.to_widget_format())
            .collect();
        tracing::info!(
            "Flight search {}-{} returned {} deals",
            params.origin,
            params.destination,
            deals.len()
        );
        Ok(FlightSearchResponse {
            success: true,
            count: deals.len(),
            deals,
        })
    }

    pub async fn search_hotels(&self, request: &HotelSearchRequest) -> Result<HotelSearchResponse> {
        let params = request.to_params()?;
        let hotels: Vec<HotelView> = self
            .hotels
            .search(&params)
            .await
            .iter()
            .map(|hotel| hotel.to_widget_format())
            .collect();
        tracing::info!("Hotel search in {} returned {} hotels", params.location, hotels.len());
        Ok(HotelSearchResponse {
            success: true,
            count: hotels.len(),
            hotels,
        })
    }

    pub fn search_restaurants(
        &self,
        request: &RestaurantSearchRequest,
    ) -> Result<RestaurantSearchResponse> {
        let params = request.to_params()?;
        let restaurants: Vec<RestaurantView> = self
            .restaurants
            .search(&params)
            .iter()
            .map(|restaurant| restaurant.to_widget_format())
            .collect();
        Ok(RestaurantSearchResponse {
            success: true,
            count: restaurants.len(),
            restaurants,
        })
    }

    pub async fn flight_widget(&self, query: &FlightWidgetQuery) -> Result<WidgetPayload> {
        validate_range("max_deals", query.max_deals, 1, MAX_WIDGET_ITEMS)?;
        self.flights
            .get_widget_data(query.user_id.as_deref(), query.max_deals)
            .await
    }

    pub async fn hotel_widget(&self, query: &HotelWidgetQuery) -> Result<WidgetPayload> {
        validate_range("max_hotels", query.max_hotels, 1, MAX_WIDGET_ITEMS)?;
        self.hotels
            .get_widget_data(query.user_id.as_deref(), query.max_hotels)
            .await
    }

    pub fn restaurant_widget(&self, query: &RestaurantWidgetQuery) -> Result<WidgetPayload> {
        validate_range("max_restaurants", query.max_restaurants, 1, MAX_WIDGET_ITEMS)?;
        self.restaurants
            .get_widget_data(query.location.as_deref(), query.max_restaurants)
    }

    /// Demo curated listing in the shape the curated hotel client consumes.
    pub fn curated_hotels(&self, query: &CuratedQuery) -> Result<Value> {
        validate_non_empty_string("location", &query.location)?;
        let category: HotelCategory = query.category.parse()?;
        let location = query.location.trim();

        Ok(json!({
            "hotels": [{
                "id": "1",
                "name": "Four Seasons Hotel",
                "brand": "Four Seasons",
                "location": location,
                "city": location,
                "rating": 4.9,
                "reviewCount": 2500,
                "price": 850,
                "category": category.as_str(),
                "stars": 5,
                "imageUrl": catalog::DEFAULT_HOTEL_IMAGE,
                "amenities": ["Spa", "Pool", "Restaurant", "Butler Service"],
                "highlights": ["Award-winning", "City Center"]
            }]
        }))
    }

    pub async fn send_to_whatsapp(&self, request: &WhatsAppSendRequest) -> Result<SendOutcome> {
        validate_non_empty_string("phone", &request.phone)?;
        let kind: ItemKind = request.item_type.parse()?;
        if !request.item.is_object() {
            return Err(TravelError::validation(
                "item",
                request.item.to_string(),
                "Item must be a JSON object",
            ));
        }
        Ok(self.whatsapp.send_card(kind, &request.phone, &request.item).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flight_request(value: Value) -> FlightSearchRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flight_request_defaults() {
        let request = flight_request(json!({
            "origin": "jfk", "destination": "CDG", "departure_date": "2025-06-01"
        }));
        let params = request.to_params().unwrap();

        assert_eq!(params.origin, "JFK");
        assert_eq!(params.adults, 1);
        assert_eq!(params.cabin_class, CabinClass::Business);
        assert_eq!(params.max_results, 10);
        assert!(params.return_date.is_none());
    }

    #[test]
    fn flight_request_rejects_bad_input() {
        let base = json!({"origin": "JFK", "destination": "CDG", "departure_date": "2025-06-01"});

        let mut bad_cabin = base.clone();
        bad_cabin["cabin_class"] = json!("COACH");
        assert!(matches!(
            flight_request(bad_cabin).to_params(),
            Err(TravelError::Validation { .. })
        ));

        let mut bad_date = base.clone();
        bad_date["departure_date"] = json!("June 1st");
        assert!(flight_request(bad_date).to_params().is_err());

        let mut early_return = base.clone();
        early_return["return_date"] = json!("2025-05-01");
        assert!(flight_request(early_return).to_params().is_err());

        let mut no_adults = base;
        no_adults["adults"] = json!(0);
        assert!(flight_request(no_adults).to_params().is_err());
    }

    #[test]
    fn flight_request_accepts_city_names_and_clamps_results() {
        let request = flight_request(json!({
            "origin": "Paris", "destination": "nrt", "departure_date": "2025-06-01",
            "max_results": 100
        }));
        let params = request.to_params().unwrap();
        assert_eq!(params.origin, "PARIS");
        assert_eq!(params.destination, "NRT");
        assert_eq!(params.max_results, MAX_FLIGHT_RESULTS);

        let request = flight_request(json!({
            "origin": "JFK", "destination": "CDG", "departure_date": "2025-06-01",
            "max_results": 0
        }));
        assert_eq!(request.to_params().unwrap().max_results, 1);

        let request = flight_request(json!({
            "origin": " ", "destination": "CDG", "departure_date": "2025-06-01"
        }));
        assert!(request.to_params().is_err());
    }

    #[test]
    fn hotel_request_validates_stay() {
        let request: HotelSearchRequest = serde_json::from_value(json!({
            "location": "Paris", "check_in": "2025-06-03", "check_out": "2025-06-01"
        }))
        .unwrap();
        assert!(request.to_params().is_err());

        let request: HotelSearchRequest = serde_json::from_value(json!({
            "location": "Paris", "check_in": "2025-06-01", "check_out": "2025-06-04",
            "category": "resort"
        }))
        .unwrap();
        let params = request.to_params().unwrap();
        assert_eq!(params.category, HotelCategory::Resort);
        assert_eq!(params.guests, 2);
        assert_eq!(params.nights(), 3);
    }

    #[test]
    fn hotel_request_allows_same_day_and_clamps_rating() {
        let request: HotelSearchRequest = serde_json::from_value(json!({
            "location": "Paris", "check_in": "2025-06-01", "check_out": "2025-06-01",
            "min_rating": 9.5
        }))
        .unwrap();
        let params = request.to_params().unwrap();
        assert_eq!(params.nights(), 1);
        assert_eq!(params.min_rating, 5.0);
    }

    #[test]
    fn restaurant_request_parses_filters() {
        let request: RestaurantSearchRequest = serde_json::from_value(json!({
            "location": "Tokyo", "date": "2025-06-01", "cuisine": "japanese", "price_range": "$$$$"
        }))
        .unwrap();
        let params = request.to_params().unwrap();
        assert_eq!(params.cuisine, CuisineType::Japanese);
        assert_eq!(params.price_range, Some(PriceRange::VeryExpensive));
        assert_eq!(params.time.to_string(), "19:00:00");

        let request: RestaurantSearchRequest = serde_json::from_value(json!({
            "location": "Tokyo", "date": "2025-06-01", "cuisine": "martian"
        }))
        .unwrap();
        assert!(request.to_params().is_err());
    }
}
