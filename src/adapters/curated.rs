use crate::domain::hotel::HotelCategory;
use crate::domain::ports::{CuratedHotelSource, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct CuratedResponse {
    #[serde(default)]
    hotels: Vec<RawRecord>,
}

/// Hand-picked hotel listings served by the companion web app.
pub struct CuratedHotelsClient {
    api_base_url: String,
    client: Client,
}

impl CuratedHotelsClient {
    pub fn new(api_base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl CuratedHotelSource for CuratedHotelsClient {
    async fn curated_hotels(
        &self,
        location: &str,
        category: HotelCategory,
    ) -> Result<Vec<RawRecord>> {
        let url = format!("{}/api/hotels/curated", self.api_base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("location", location), ("category", category.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                "Curated hotels request returned {}, ignoring",
                response.status()
            );
            return Ok(Vec::new());
        }

        let payload: CuratedResponse = response.json().await?;
        Ok(payload.hotels)
    }
}
