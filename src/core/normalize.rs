//! Maps raw provider records onto the canonical result types.
//!
//! Single-record functions return `TravelError::MalformedRecord` for input they
//! cannot interpret; the batch functions log those and keep going.

use crate::core::catalog;
use crate::core::links;
use crate::core::scoring::{
    self, FLIGHT_ORIGINAL_MARKUP, FLIGHT_SAVINGS_PERCENT, HOTEL_ORIGINAL_MARKUP,
    HOTEL_SAVINGS_PERCENT,
};
use crate::domain::flight::{FlightDeal, FlightSearchParams};
use crate::domain::hotel::{HotelCategory, HotelResult, HotelSearchParams};
use crate::domain::model::{Coordinates, Source, Urgency};
use crate::domain::ports::RawRecord;
use crate::utils::error::{Result, TravelError};
use crate::utils::format::{title_case, truncate_chars};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;

const AMADEUS: &str = "amadeus";
const CURATED: &str = "curated";
const CURATED_BOOST: u8 = 1;

#[derive(Debug, Deserialize)]
struct Price {
    total: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FlightOffer {
    id: Option<Value>,
    price: Option<Price>,
    #[serde(default)]
    itineraries: Vec<Itinerary>,
}

#[derive(Debug, Deserialize)]
struct Itinerary {
    #[serde(default)]
    duration: String,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Segment {
    carrier_code: Option<String>,
    departure: Option<Endpoint>,
    arrival: Option<Endpoint>,
}

#[derive(Debug, Deserialize)]
struct Endpoint {
    at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HotelOffer {
    #[serde(default)]
    hotel: HotelInfo,
    #[serde(default)]
    offers: Vec<RoomOffer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelInfo {
    hotel_id: Option<String>,
    name: Option<String>,
    chain_code: Option<String>,
    rating: Option<Value>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RoomOffer {
    price: Option<Price>,
    room: Option<Room>,
}

#[derive(Debug, Deserialize)]
struct Room {
    description: Option<RoomDescription>,
}

#[derive(Debug, Deserialize)]
struct RoomDescription {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CuratedHotel {
    id: Option<Value>,
    name: Option<String>,
    brand: Option<String>,
    location: Option<String>,
    city: Option<String>,
    country: Option<String>,
    price: Option<Value>,
    rating: Option<Value>,
    review_count: Option<u32>,
    category: Option<String>,
    stars: Option<u8>,
    image_url: Option<String>,
    thumbnail_url: Option<String>,
    amenities: Option<Vec<String>>,
    highlights: Option<Vec<String>>,
    room_type: Option<String>,
    booking_url: Option<String>,
    coordinates: Option<Coordinates>,
}

/// Amounts arrive either as JSON numbers or as decimal strings.
fn amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite() && *v >= 0.0)
}

fn id_string(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// `2025-06-01T18:30:00` -> `18:30`.
fn clock_time(at: &str) -> String {
    match at.split_once('T') {
        Some((_, time)) => time.chars().take(5).collect(),
        None => at.chars().take(5).collect(),
    }
}

fn required_amount(price: Option<&Price>, source_name: &str) -> Result<f64> {
    let total = price
        .and_then(|p| p.total.as_ref())
        .ok_or_else(|| TravelError::malformed(source_name, "missing price.total"))?;
    amount(total).ok_or_else(|| {
        TravelError::malformed(source_name, format!("unparseable price.total: {}", total))
    })
}

pub fn normalize_flight_offer(
    raw: &RawRecord,
    params: &FlightSearchParams,
    now: DateTime<Utc>,
) -> Result<FlightDeal> {
    let offer: FlightOffer = serde_json::from_value(raw.clone())
        .map_err(|e| TravelError::malformed(AMADEUS, e.to_string()))?;
    let price = required_amount(offer.price.as_ref(), AMADEUS)?;
    let itinerary = offer
        .itineraries
        .first()
        .ok_or_else(|| TravelError::malformed(AMADEUS, "offer has no itineraries"))?;

    let first = itinerary.segments.first();
    let last = itinerary.segments.last();
    let stops = itinerary.segments.len().saturating_sub(1) as u32;
    let airline = first
        .and_then(|s| s.carrier_code.clone())
        .unwrap_or_else(|| "XX".to_string());
    let airline_name = catalog::airline_name(&airline)
        .map(str::to_string)
        .unwrap_or_else(|| airline.clone());

    let deal_score = scoring::flight_deal_score(price, params.cabin_class, stops);
    let (savings_percent, original_price) =
        scoring::savings(deal_score, price, FLIGHT_SAVINGS_PERCENT, FLIGHT_ORIGINAL_MARKUP);

    Ok(FlightDeal {
        id: format!("amadeus_{}", id_string(&offer.id)),
        origin: params.origin.clone(),
        destination: params.destination.clone(),
        route_display: format!("{} -> {}", params.origin, params.destination),
        price,
        original_price,
        currency: "USD".to_string(),
        cabin_class: params.cabin_class,
        airline,
        airline_name,
        departure_date: params.departure_date.to_string(),
        return_date: params.return_date.map(|d| d.to_string()),
        departure_time: first
            .and_then(|s| s.departure.as_ref())
            .and_then(|e| e.at.as_deref())
            .map(clock_time)
            .unwrap_or_default(),
        arrival_time: last
            .and_then(|s| s.arrival.as_ref())
            .and_then(|e| e.at.as_deref())
            .map(clock_time)
            .unwrap_or_default(),
        duration: itinerary.duration.replace("PT", "").to_lowercase(),
        stops,
        deal_score,
        savings_percent,
        urgency: Urgency::from_score(deal_score),
        expires_at: (deal_score >= scoring::EXPIRY_THRESHOLD).then(|| now + Duration::hours(12)),
        is_mistake_fare: deal_score >= scoring::MISTAKE_FARE_THRESHOLD,
        source: Source::Amadeus,
        deep_link: links::flight_sms_link(&params.origin, &params.destination, price),
        booking_url: None,
        image_url: catalog::destination_image(&params.destination).to_string(),
    })
}

pub fn normalize_flight_offers(
    raws: &[RawRecord],
    params: &FlightSearchParams,
    now: DateTime<Utc>,
) -> Vec<FlightDeal> {
    raws.iter()
        .filter_map(|raw| match normalize_flight_offer(raw, params, now) {
            Ok(deal) => Some(deal),
            Err(e) => {
                tracing::warn!("Skipping flight offer: {}", e);
                None
            }
        })
        .collect()
}

pub fn normalize_hotel_offer(raw: &RawRecord, params: &HotelSearchParams) -> Result<HotelResult> {
    let offer: HotelOffer = serde_json::from_value(raw.clone())
        .map_err(|e| TravelError::malformed(AMADEUS, e.to_string()))?;
    let first_offer = offer
        .offers
        .first()
        .ok_or_else(|| TravelError::malformed(AMADEUS, "hotel has no offers"))?;

    let total = required_amount(first_offer.price.as_ref(), AMADEUS)?;
    let nights = params.nights() as f64;
    let price_per_night = total / nights;
    let rating = match offer.hotel.rating.as_ref() {
        Some(value) => amount(value).ok_or_else(|| {
            TravelError::malformed(AMADEUS, format!("unparseable rating: {}", value))
        })?,
        None => 4.5,
    };

    let deal_score = scoring::hotel_deal_score(price_per_night, rating);
    let (savings_percent, original_price) = scoring::savings(
        deal_score,
        price_per_night,
        HOTEL_SAVINGS_PERCENT,
        HOTEL_ORIGINAL_MARKUP,
    );
    let name = offer
        .hotel
        .name
        .clone()
        .unwrap_or_else(|| "Luxury Hotel".to_string());
    let city = title_case(&catalog::resolve_city(&params.location));
    let image_url = catalog::hotel_image(&params.location);
    let room_type = first_offer
        .room
        .as_ref()
        .and_then(|r| r.description.as_ref())
        .and_then(|d| d.text.as_deref())
        .map(|text| truncate_chars(text, 50))
        .unwrap_or_else(|| "Deluxe Room".to_string());

    Ok(HotelResult {
        id: format!("amadeus_{}", offer.hotel.hotel_id.clone().unwrap_or_default()),
        deep_link: links::hotel_sms_link(&name, price_per_night),
        name,
        brand: offer.hotel.chain_code.clone(),
        location: city.clone(),
        city,
        country: String::new(),
        rating,
        review_count: (rating * 100.0) as u32,
        price_per_night,
        original_price,
        total_price: total,
        currency: "USD".to_string(),
        category: HotelCategory::Luxury,
        star_rating: rating.trunc().clamp(0.0, 5.0) as u8,
        image_url: image_url.to_string(),
        thumbnail_url: catalog::thumbnail(image_url),
        amenities: ["Spa", "Pool", "Restaurant", "WiFi", "Gym"]
            .map(String::from)
            .to_vec(),
        highlights: ["City Center", "Luxury Amenities"].map(String::from).to_vec(),
        room_type,
        deal_score,
        savings_percent,
        urgency: Urgency::from_score(deal_score),
        source: Source::Amadeus,
        booking_url: None,
        coordinates: offer.hotel.latitude.map(|lat| Coordinates {
            lat,
            lng: offer.hotel.longitude.unwrap_or_default(),
        }),
    })
}

pub fn normalize_hotel_offers(raws: &[RawRecord], params: &HotelSearchParams) -> Vec<HotelResult> {
    raws.iter()
        .filter_map(|raw| match normalize_hotel_offer(raw, params) {
            Ok(hotel) => Some(hotel),
            Err(e) => {
                tracing::warn!("Skipping hotel offer: {}", e);
                None
            }
        })
        .collect()
}

/// Curated listings are hand-picked, so they get a one point boost on top of
/// the regular hotel score.
pub fn normalize_curated_hotel(raw: &RawRecord, params: &HotelSearchParams) -> Result<HotelResult> {
    let data: CuratedHotel = serde_json::from_value(raw.clone())
        .map_err(|e| TravelError::malformed(CURATED, e.to_string()))?;

    let price = match data.price.as_ref() {
        Some(value) => amount(value)
            .ok_or_else(|| TravelError::malformed(CURATED, format!("unparseable price: {}", value)))?,
        None => 500.0,
    };
    let rating = match data.rating.as_ref() {
        Some(value) => amount(value).ok_or_else(|| {
            TravelError::malformed(CURATED, format!("unparseable rating: {}", value))
        })?,
        None => 4.8,
    };
    let category = match data.category.as_deref() {
        Some(raw_category) => raw_category
            .parse::<HotelCategory>()
            .map_err(|e| TravelError::malformed(CURATED, e.to_string()))?,
        None => HotelCategory::Luxury,
    };

    let deal_score = scoring::boosted(scoring::hotel_deal_score(price, rating), CURATED_BOOST);
    let (savings_percent, original_price) =
        scoring::savings(deal_score, price, HOTEL_SAVINGS_PERCENT, HOTEL_ORIGINAL_MARKUP);

    let name = data.name.unwrap_or_else(|| "Luxury Hotel".to_string());
    let image_url = data
        .image_url
        .unwrap_or_else(|| catalog::DEFAULT_HOTEL_IMAGE.to_string());
    let thumbnail_url = data
        .thumbnail_url
        .unwrap_or_else(|| catalog::thumbnail(&image_url));

    Ok(HotelResult {
        id: format!("curated_{}", id_string(&data.id)),
        deep_link: links::hotel_sms_link(&name, price),
        name,
        brand: data.brand,
        location: data.location.unwrap_or_else(|| params.location.clone()),
        city: data.city.unwrap_or_else(|| params.location.clone()),
        country: data.country.unwrap_or_default(),
        rating,
        review_count: data.review_count.unwrap_or(500),
        price_per_night: price,
        original_price,
        total_price: price * params.nights() as f64,
        currency: "USD".to_string(),
        category,
        star_rating: data.stars.unwrap_or(5),
        image_url,
        thumbnail_url,
        amenities: data
            .amenities
            .unwrap_or_else(|| ["Spa", "Pool", "Restaurant"].map(String::from).to_vec()),
        highlights: data
            .highlights
            .unwrap_or_else(|| vec!["Award-winning".to_string()]),
        room_type: data.room_type.unwrap_or_else(|| "Deluxe Suite".to_string()),
        deal_score,
        savings_percent,
        urgency: Urgency::from_score(deal_score),
        source: Source::Curated,
        booking_url: data.booking_url,
        coordinates: data.coordinates,
    })
}

pub fn normalize_curated_hotels(raws: &[RawRecord], params: &HotelSearchParams) -> Vec<HotelResult> {
    raws.iter()
        .filter_map(|raw| match normalize_curated_hotel(raw, params) {
            Ok(hotel) => Some(hotel),
            Err(e) => {
                tracing::warn!("Skipping curated hotel: {}", e);
                None
            }
        })
        .collect()
}
