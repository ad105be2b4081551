use crate::domain::model::{Coordinates, Source};
use crate::utils::error::{Result, TravelError};
use crate::utils::format::thousands;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CuisineType {
    French,
    Italian,
    Japanese,
    American,
    Mediterranean,
    Seafood,
    Steakhouse,
    AsianFusion,
    FineDining,
    #[default]
    All,
}

impl CuisineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CuisineType::French => "french",
            CuisineType::Italian => "italian",
            CuisineType::Japanese => "japanese",
            CuisineType::American => "american",
            CuisineType::Mediterranean => "mediterranean",
            CuisineType::Seafood => "seafood",
            CuisineType::Steakhouse => "steakhouse",
            CuisineType::AsianFusion => "asian_fusion",
            CuisineType::FineDining => "fine_dining",
            CuisineType::All => "all",
        }
    }
}

impl FromStr for CuisineType {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self> {
        let cuisine = match s.trim().to_ascii_lowercase().as_str() {
            "french" => CuisineType::French,
            "italian" => CuisineType::Italian,
            "japanese" => CuisineType::Japanese,
            "american" => CuisineType::American,
            "mediterranean" => CuisineType::Mediterranean,
            "seafood" => CuisineType::Seafood,
            "steakhouse" => CuisineType::Steakhouse,
            "asian_fusion" => CuisineType::AsianFusion,
            "fine_dining" => CuisineType::FineDining,
            "all" => CuisineType::All,
            _ => {
                return Err(TravelError::validation(
                    "cuisine",
                    s,
                    "Unknown cuisine type",
                ))
            }
        };
        Ok(cuisine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Expensive,
    #[serde(rename = "$$$$")]
    VeryExpensive,
}

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Moderate => "$$",
            PriceRange::Expensive => "$$$",
            PriceRange::VeryExpensive => "$$$$",
        }
    }
}

impl FromStr for PriceRange {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "$$" => Ok(PriceRange::Moderate),
            "$$$" => Ok(PriceRange::Expensive),
            "$$$$" => Ok(PriceRange::VeryExpensive),
            _ => Err(TravelError::validation(
                "price_range",
                s,
                "Expected one of $$, $$$, $$$$",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Limited,
    Waitlist,
    SoldOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSearchParams {
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u32,
    pub cuisine: CuisineType,
    pub price_range: Option<PriceRange>,
}

impl RestaurantSearchParams {
    pub fn new(location: &str, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            location: location.to_string(),
            date,
            time,
            party_size: 2,
            cuisine: CuisineType::All,
            price_range: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantResult {
    pub id: String,
    pub name: String,
    /// Free-form cuisine tag; inventory may carry cuisines outside [`CuisineType`].
    pub cuisine: String,
    pub cuisine_display: String,
    pub location: String,
    pub city: String,
    pub neighborhood: String,
    pub rating: f64,
    pub review_count: u32,
    pub price_range: PriceRange,
    pub michelin_stars: u8,
    pub image_url: String,
    pub thumbnail_url: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub available_times: Vec<String>,
    pub availability_status: AvailabilityStatus,
    pub next_available: Option<String>,
    pub source: Source,
    pub deep_link: String,
    pub booking_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantView {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub cuisine_display: String,
    pub location: String,
    pub city: String,
    pub neighborhood: String,
    pub rating: f64,
    pub rating_display: String,
    pub review_count: u32,
    pub reviews_display: String,
    pub price_range: PriceRange,
    pub michelin_stars: u8,
    pub michelin_display: Option<String>,
    pub image_url: String,
    pub thumbnail_url: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub highlights_display: String,
    pub available_times: Vec<String>,
    pub availability_status: AvailabilityStatus,
    pub next_available: Option<String>,
    pub source: Source,
    pub deep_link: String,
    pub booking_url: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub action: &'static str,
}

impl RestaurantResult {
    pub fn to_widget_format(&self) -> RestaurantView {
        RestaurantView {
            id: self.id.clone(),
            name: self.name.clone(),
            cuisine: self.cuisine.clone(),
            cuisine_display: self.cuisine_display.clone(),
            location: self.location.clone(),
            city: self.city.clone(),
            neighborhood: self.neighborhood.clone(),
            rating: self.rating,
            rating_display: format!("{:.1}", self.rating),
            review_count: self.review_count,
            reviews_display: format!("{} reviews", thousands(self.review_count as u64)),
            price_range: self.price_range,
            michelin_stars: self.michelin_stars,
            michelin_display: (self.michelin_stars > 0)
                .then(|| "⭐".repeat(self.michelin_stars as usize)),
            image_url: self.image_url.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            description: self.description.clone(),
            highlights: self.highlights.iter().take(3).cloned().collect(),
            highlights_display: self
                .highlights
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" · "),
            available_times: self.available_times.iter().take(4).cloned().collect(),
            availability_status: self.availability_status,
            next_available: self.next_available.clone(),
            source: self.source,
            deep_link: self.deep_link.clone(),
            booking_url: self.booking_url.clone(),
            coordinates: self.coordinates,
            action: "reserve_now",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_from_wire_strings() {
        assert_eq!("Asian_Fusion".parse::<CuisineType>().unwrap(), CuisineType::AsianFusion);
        assert!("klingon".parse::<CuisineType>().is_err());
        assert_eq!("$$$".parse::<PriceRange>().unwrap(), PriceRange::Expensive);
        assert!("$".parse::<PriceRange>().is_err());
        assert_eq!(serde_json::to_value(PriceRange::VeryExpensive).unwrap(), "$$$$");
    }
}
