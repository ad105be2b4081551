use crate::domain::model::{Coordinates, Source, Urgency};
use crate::utils::error::{Result, TravelError};
use crate::utils::format::{thousands, usd};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HotelCategory {
    #[default]
    Luxury,
    Boutique,
    Resort,
    Business,
    All,
}

impl HotelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelCategory::Luxury => "luxury",
            HotelCategory::Boutique => "boutique",
            HotelCategory::Resort => "resort",
            HotelCategory::Business => "business",
            HotelCategory::All => "all",
        }
    }
}

impl FromStr for HotelCategory {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "luxury" => Ok(HotelCategory::Luxury),
            "boutique" => Ok(HotelCategory::Boutique),
            "resort" => Ok(HotelCategory::Resort),
            "business" => Ok(HotelCategory::Business),
            "all" => Ok(HotelCategory::All),
            _ => Err(TravelError::validation(
                "category",
                s,
                "Expected one of luxury, boutique, resort, business, all",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelSearchParams {
    pub location: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub rooms: u32,
    pub min_rating: f64,
    pub max_price: Option<f64>,
    pub category: HotelCategory,
}

impl HotelSearchParams {
    pub fn new(location: &str, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            location: location.to_string(),
            check_in,
            check_out,
            guests: 2,
            rooms: 1,
            min_rating: 4.0,
            max_price: None,
            category: HotelCategory::Luxury,
        }
    }

    /// Length of stay, never less than one night.
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days().max(1) as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelResult {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub location: String,
    pub city: String,
    pub country: String,
    pub rating: f64,
    pub review_count: u32,
    pub price_per_night: f64,
    pub original_price: Option<f64>,
    pub total_price: f64,
    pub currency: String,
    pub category: HotelCategory,
    pub star_rating: u8,
    pub image_url: String,
    pub thumbnail_url: String,
    pub amenities: Vec<String>,
    pub highlights: Vec<String>,
    pub room_type: String,
    pub deal_score: u8,
    pub savings_percent: Option<u32>,
    pub urgency: Urgency,
    pub source: Source,
    pub deep_link: String,
    pub booking_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelView {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub location: String,
    pub city: String,
    pub country: String,
    pub rating: f64,
    pub rating_display: String,
    pub review_count: u32,
    pub reviews_display: String,
    pub price: String,
    pub price_numeric: f64,
    pub price_per_night: String,
    pub original_price: Option<String>,
    pub total_price: String,
    pub total_price_numeric: f64,
    pub currency: String,
    pub category: HotelCategory,
    pub stars: u8,
    pub stars_display: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub amenities: Vec<String>,
    pub amenities_display: String,
    pub highlights: Vec<String>,
    pub room_type: String,
    pub deal_score: u8,
    pub savings: Option<String>,
    pub savings_percent: Option<u32>,
    pub urgency: Urgency,
    pub source: Source,
    pub deep_link: String,
    pub booking_url: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub action: &'static str,
}

impl HotelResult {
    /// Case and whitespace insensitive key used to collapse duplicate listings.
    pub fn dedup_key(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(20)
            .collect()
    }

    pub fn to_widget_format(&self) -> HotelView {
        HotelView {
            id: self.id.clone(),
            name: self.name.clone(),
            brand: self.brand.clone(),
            location: self.location.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            rating: self.rating,
            rating_display: format!("{:.1}", self.rating),
            review_count: self.review_count,
            reviews_display: format!("{} reviews", thousands(self.review_count as u64)),
            price: usd(self.price_per_night),
            price_numeric: self.price_per_night,
            price_per_night: format!("{}/night", usd(self.price_per_night)),
            original_price: self.original_price.map(usd),
            total_price: usd(self.total_price),
            total_price_numeric: self.total_price,
            currency: self.currency.clone(),
            category: self.category,
            stars: self.star_rating,
            stars_display: "★".repeat(self.star_rating as usize),
            image_url: self.image_url.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            amenities: self.amenities.iter().take(5).cloned().collect(),
            amenities_display: self
                .amenities
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" · "),
            highlights: self.highlights.iter().take(3).cloned().collect(),
            room_type: self.room_type.clone(),
            deal_score: self.deal_score,
            savings: self.savings_percent.map(|s| format!("{}% off", s)),
            savings_percent: self.savings_percent,
            urgency: self.urgency,
            source: self.source,
            deep_link: self.deep_link.clone(),
            booking_url: self.booking_url.clone(),
            coordinates: self.coordinates,
            action: "tap_to_book",
        }
    }
}
