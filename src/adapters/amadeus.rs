use crate::core::catalog;
use crate::domain::flight::FlightSearchParams;
use crate::domain::hotel::HotelSearchParams;
use crate::domain::ports::{AmadeusCredentials, FlightProvider, HotelProvider, RawRecord};
use crate::utils::error::{Result, TravelError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub const TEST_BASE_URL: &str = "https://test.api.amadeus.com";
pub const PRODUCTION_BASE_URL: &str = "https://api.amadeus.com";

const PROVIDER: &str = "amadeus";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawRecord>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Client-credentials OAuth against the Amadeus token endpoint.
///
/// The cache lock is held across the refresh call, so concurrent searches on
/// the same client wait for one refresh instead of racing.
pub struct AmadeusAuth {
    credentials: AmadeusCredentials,
    client: Client,
    token: Mutex<Option<CachedToken>>,
}

impl AmadeusAuth {
    pub fn new(credentials: AmadeusCredentials) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            credentials,
            client,
            token: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        self.credentials.base_url.trim_end_matches('/')
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
            tracing::debug!("Amadeus token expired or about to expire, refreshing");
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        let url = format!("{}/v1/security/oauth2/token", self.base_url());
        tracing::debug!("Requesting Amadeus token from {}", url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.api_key.as_str()),
                ("client_secret", self.credentials.api_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TravelError::AuthFailed {
                provider: PROVIDER.to_string(),
                message: format!("token endpoint returned {}: {}", status, body),
            });
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in);
        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        })
    }

    async fn get_data(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<RawRecord>> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.base_url(), path);
        tracing::debug!("GET {} ({} query params)", url, query.len());

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TravelError::upstream(
                PROVIDER,
                format!("{} returned {}: {}", path, status, body),
            ));
        }

        let payload: SearchResponse = response.json().await?;
        Ok(payload.data)
    }
}

pub struct AmadeusFlightClient {
    auth: AmadeusAuth,
}

impl AmadeusFlightClient {
    pub fn new(credentials: AmadeusCredentials) -> Result<Self> {
        Ok(Self {
            auth: AmadeusAuth::new(credentials)?,
        })
    }

    fn query(params: &FlightSearchParams) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("originLocationCode", params.origin.clone()),
            ("destinationLocationCode", params.destination.clone()),
            ("departureDate", params.departure_date.to_string()),
            ("adults", params.adults.to_string()),
            ("travelClass", params.cabin_class.as_str().to_string()),
            ("max", params.max_results.to_string()),
            ("currencyCode", "USD".to_string()),
        ];
        if let Some(return_date) = params.return_date {
            query.push(("returnDate", return_date.to_string()));
        }
        if let Some(max_price) = params.max_price {
            query.push(("maxPrice", (max_price as u64).to_string()));
        }
        query
    }
}

#[async_trait]
impl FlightProvider for AmadeusFlightClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search_flights(&self, params: &FlightSearchParams) -> Result<Vec<RawRecord>> {
        self.auth
            .get_data("/v2/shopping/flight-offers", &Self::query(params))
            .await
    }
}

pub struct AmadeusHotelClient {
    auth: AmadeusAuth,
}

impl AmadeusHotelClient {
    pub fn new(credentials: AmadeusCredentials) -> Result<Self> {
        Ok(Self {
            auth: AmadeusAuth::new(credentials)?,
        })
    }

    /// Star ratings accepted by the provider, from the minimum rating up to five.
    fn ratings(min_rating: f64) -> String {
        let lowest = min_rating.ceil().clamp(1.0, 5.0) as u8;
        (lowest..=5)
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn query(params: &HotelSearchParams) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("cityCode", catalog::city_code(&params.location)),
            ("checkInDate", params.check_in.to_string()),
            ("checkOutDate", params.check_out.to_string()),
            ("adults", params.guests.to_string()),
            ("roomQuantity", params.rooms.to_string()),
            ("ratings", Self::ratings(params.min_rating)),
            ("radius", "20".to_string()),
            ("radiusUnit", "KM".to_string()),
            ("bestRateOnly", "true".to_string()),
            ("currency", "USD".to_string()),
        ];
        if let Some(max_price) = params.max_price {
            query.push(("priceRange", format!("0-{}", max_price as u64)));
        }
        query
    }
}

#[async_trait]
impl HotelProvider for AmadeusHotelClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search_hotels(&self, params: &HotelSearchParams) -> Result<Vec<RawRecord>> {
        self.auth
            .get_data("/v3/shopping/hotel-offers", &Self::query(params))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn ratings_span_min_to_five() {
        assert_eq!(AmadeusHotelClient::ratings(4.0), "4,5");
        assert_eq!(AmadeusHotelClient::ratings(3.2), "4,5");
        assert_eq!(AmadeusHotelClient::ratings(0.0), "1,2,3,4,5");
        assert_eq!(AmadeusHotelClient::ratings(9.0), "5");
    }

    #[test]
    fn flight_query_includes_optional_fields() {
        let mut params =
            FlightSearchParams::new("JFK", "CDG", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(!AmadeusFlightClient::query(&params)
            .iter()
            .any(|(k, _)| *k == "returnDate" || *k == "maxPrice"));

        params.return_date = NaiveDate::from_ymd_opt(2025, 6, 8);
        params.max_price = Some(2999.99);
        let query = AmadeusFlightClient::query(&params);
        assert!(query.contains(&("returnDate", "2025-06-08".to_string())));
        assert!(query.contains(&("maxPrice", "2999".to_string())));
        assert!(query.contains(&("travelClass", "BUSINESS".to_string())));
    }
}
