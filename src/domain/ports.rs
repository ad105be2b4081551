use crate::domain::flight::FlightSearchParams;
use crate::domain::hotel::{HotelCategory, HotelSearchParams};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Raw record exactly as the upstream provider returned it.
pub type RawRecord = Value;

#[async_trait]
pub trait FlightProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn search_flights(&self, params: &FlightSearchParams) -> Result<Vec<RawRecord>>;
}

#[async_trait]
pub trait HotelProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn search_hotels(&self, params: &HotelSearchParams) -> Result<Vec<RawRecord>>;
}

#[async_trait]
pub trait CuratedHotelSource: Send + Sync {
    async fn curated_hotels(
        &self,
        location: &str,
        category: HotelCategory,
    ) -> Result<Vec<RawRecord>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmadeusCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhatsAppSettings {
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
    pub business_account_id: Option<String>,
    pub api_url: String,
    pub verify_token: String,
    pub app_secret: Option<String>,
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    /// `None` when no Amadeus key pair is configured; searches then use mock inventory.
    fn amadeus(&self) -> Option<AmadeusCredentials>;
    fn curated_api_url(&self) -> &str;
    fn merge_curated(&self) -> bool;
    fn whatsapp(&self) -> WhatsAppSettings;
}
