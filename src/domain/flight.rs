use crate::domain::model::{Source, Urgency};
use crate::utils::error::{Result, TravelError};
use crate::utils::format::usd;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    #[default]
    Business,
    First,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "ECONOMY",
            CabinClass::PremiumEconomy => "PREMIUM_ECONOMY",
            CabinClass::Business => "BUSINESS",
            CabinClass::First => "FIRST",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CabinClass {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ECONOMY" => Ok(CabinClass::Economy),
            "PREMIUM_ECONOMY" => Ok(CabinClass::PremiumEconomy),
            "BUSINESS" => Ok(CabinClass::Business),
            "FIRST" => Ok(CabinClass::First),
            _ => Err(TravelError::validation(
                "cabin_class",
                s,
                "Expected one of ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightSearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    pub cabin_class: CabinClass,
    pub max_results: usize,
    pub max_price: Option<f64>,
}

impl FlightSearchParams {
    pub fn new(origin: &str, destination: &str, departure_date: NaiveDate) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date,
            return_date: None,
            adults: 1,
            cabin_class: CabinClass::Business,
            max_results: 10,
            max_price: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightDeal {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub route_display: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub currency: String,
    pub cabin_class: CabinClass,
    pub airline: String,
    pub airline_name: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: u32,
    pub deal_score: u8,
    pub savings_percent: Option<u32>,
    pub urgency: Urgency,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_mistake_fare: bool,
    pub source: Source,
    pub deep_link: String,
    pub booking_url: Option<String>,
    pub image_url: String,
}

/// Display mapping of a [`FlightDeal`]; the field names are the wire contract.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDealView {
    pub id: String,
    pub route: String,
    pub route_code: String,
    pub price: String,
    pub price_numeric: f64,
    pub original_price: Option<String>,
    pub cabin: CabinClass,
    pub airline: String,
    pub airline_name: String,
    pub savings: Option<String>,
    pub savings_percent: Option<u32>,
    pub deal_score: u8,
    pub urgency: Urgency,
    pub expires: Option<String>,
    pub is_mistake_fare: bool,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: u32,
    pub stops_display: String,
    pub source: Source,
    pub deep_link: String,
    pub booking_url: Option<String>,
    pub image_url: String,
    pub action: &'static str,
}

impl FlightDeal {
    pub fn stops_display(&self) -> String {
        match self.stops {
            0 => "Nonstop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{} stops", n),
        }
    }

    pub fn to_widget_format(&self) -> FlightDealView {
        FlightDealView {
            id: self.id.clone(),
            route: self.route_display.clone(),
            route_code: format!("{}->{}", self.origin, self.destination),
            price: usd(self.price),
            price_numeric: self.price,
            original_price: self.original_price.map(usd),
            cabin: self.cabin_class,
            airline: self.airline.clone(),
            airline_name: self.airline_name.clone(),
            savings: self.savings_percent.map(|s| format!("{}% off", s)),
            savings_percent: self.savings_percent,
            deal_score: self.deal_score,
            urgency: self.urgency,
            expires: self.expires_at.map(|t| t.to_rfc3339()),
            is_mistake_fare: self.is_mistake_fare,
            departure_date: self.departure_date.clone(),
            return_date: self.return_date.clone(),
            departure_time: self.departure_time.clone(),
            arrival_time: self.arrival_time.clone(),
            duration: self.duration.clone(),
            stops: self.stops,
            stops_display: self.stops_display(),
            source: self.source,
            deep_link: self.deep_link.clone(),
            booking_url: self.booking_url.clone(),
            image_url: self.image_url.clone(),
            action: "tap_to_book",
        }
    }
}
