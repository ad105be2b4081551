//! Hotel search and the discovery widget.

use crate::core::catalog::FEATURED_DESTINATIONS;
use crate::core::mocks;
use crate::core::normalize;
use crate::domain::hotel::{HotelCategory, HotelResult, HotelSearchParams};
use crate::domain::model::WidgetPayload;
use crate::domain::ports::{CuratedHotelSource, HotelProvider};
use crate::utils::error::Result;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

pub const WIDGET_TYPE: &str = "hotel_discovery";
pub const WIDGET_SIZE: &str = "medium_2x2";
pub const REFRESH_INTERVAL_SECS: u64 = 14400;
pub const MAX_RESULTS: usize = 10;

pub struct HotelWidget {
    provider: Option<Arc<dyn HotelProvider>>,
    curated: Option<Arc<dyn CuratedHotelSource>>,
}

impl HotelWidget {
    pub fn new(provider: Option<Arc<dyn HotelProvider>>) -> Self {
        Self {
            provider,
            curated: None,
        }
    }

    /// Appends curated listings after provider results on every search.
    pub fn with_curated(mut self, curated: Arc<dyn CuratedHotelSource>) -> Self {
        self.curated = Some(curated);
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn search(&self, params: &HotelSearchParams) -> Vec<HotelResult> {
        let mut hotels = Vec::new();

        if let Some(provider) = &self.provider {
            match provider.search_hotels(params).await {
                Ok(raws) => hotels.extend(normalize::normalize_hotel_offers(&raws, params)),
                Err(e) => tracing::error!("{} hotel search failed: {}", provider.name(), e),
            }
        }

        if let Some(curated) = &self.curated {
            match curated.curated_hotels(&params.location, params.category).await {
                Ok(raws) => hotels.extend(normalize::normalize_curated_hotels(&raws, params)),
                Err(e) => tracing::warn!("Curated hotel lookup failed: {}", e),
            }
        }

        if hotels.is_empty() {
            hotels = mocks::mock_hotels(params);
        }

        let mut hotels = dedup_by_name(hotels);
        hotels.sort_by(|a, b| {
            b.deal_score
                .cmp(&a.deal_score)
                .then(b.rating.total_cmp(&a.rating))
        });
        hotels.truncate(MAX_RESULTS);
        hotels
    }

    /// Top hotel from each featured destination until `max_hotels` are collected.
    pub async fn get_widget_data(
        &self,
        user_id: Option<&str>,
        max_hotels: usize,
    ) -> Result<WidgetPayload> {
        let now = Utc::now();
        let check_in = now.date_naive() + Duration::days(30);
        let check_out = check_in + Duration::days(3);
        tracing::debug!(
            "Building hotel widget for {} (max {})",
            user_id.unwrap_or("anonymous"),
            max_hotels
        );

        let mut hotels = Vec::new();
        for destination in FEATURED_DESTINATIONS.iter().take(max_hotels + 2) {
            let mut params = HotelSearchParams::new(destination.code, check_in, check_out);
            params.category = HotelCategory::Luxury;

            if let Some(hotel) = self.search(&params).await.into_iter().next() {
                hotels.push(hotel);
            }
            if hotels.len() >= max_hotels {
                break;
            }
        }

        if hotels.is_empty() {
            tracing::warn!("No hotels found, using hero hotel");
            hotels.push(mocks::hero_hotel());
        }

        let items = hotels
            .iter()
            .map(|hotel| serde_json::to_value(hotel.to_widget_format()))
            .collect::<std::result::Result<Vec<Value>, _>>()?;
        let featured: Vec<Value> = FEATURED_DESTINATIONS
            .iter()
            .map(|d| json!({"city": d.city, "country": d.country, "code": d.code}))
            .collect();

        Ok(
            WidgetPayload::new(WIDGET_TYPE, WIDGET_SIZE, items, REFRESH_INTERVAL_SECS, now)
                .with_extra("featuredDestinations", Value::Array(featured))
                .with_extra("savedHotels", json!([]))
                .with_extra("deepLinkScheme", json!("sms://")),
        )
    }
}

/// Keeps the first hotel for each normalized name prefix.
fn dedup_by_name(hotels: Vec<HotelResult>) -> Vec<HotelResult> {
    let mut seen = HashSet::new();
    hotels
        .into_iter()
        .filter(|hotel| seen.insert(hotel.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Source;
    use crate::domain::ports::RawRecord;
    use crate::utils::error::TravelError;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FixedProvider(Vec<RawRecord>);

    #[async_trait]
    impl HotelProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search_hotels(&self, _params: &HotelSearchParams) -> Result<Vec<RawRecord>> {
            Ok(self.0.clone())
        }
    }

    struct FixedCurated(Vec<RawRecord>);

    #[async_trait]
    impl CuratedHotelSource for FixedCurated {
        async fn curated_hotels(
            &self,
            _location: &str,
            _category: HotelCategory,
        ) -> Result<Vec<RawRecord>> {
            Ok(self.0.clone())
        }
    }

    struct DownProvider;

    #[async_trait]
    impl HotelProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        async fn search_hotels(&self, _params: &HotelSearchParams) -> Result<Vec<RawRecord>> {
            Err(TravelError::upstream("down", "timeout"))
        }
    }

    fn offer(id: &str, name: &str, total: &str, rating: &str) -> RawRecord {
        json!({
            "hotel": {"hotelId": id, "name": name, "rating": rating},
            "offers": [{"price": {"total": total}}]
        })
    }

    fn params(location: &str) -> HotelSearchParams {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        HotelSearchParams::new(location, day, day + Duration::days(3))
    }

    #[tokio::test]
    async fn unknown_city_gets_generic_mocks() {
        let widget = HotelWidget::new(None);
        let hotels = widget.search(&params("Unknownsville")).await;

        assert_eq!(hotels.len(), 3);
        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert!(names.contains(&"Four Seasons Unknownsville"));
        assert!(names.contains(&"Ritz-Carlton Unknownsville"));
        assert!(names.contains(&"St. Regis Unknownsville"));
        assert!(hotels.iter().all(|h| h.star_rating == 5 && h.deal_score == 8));
    }

    #[tokio::test]
    async fn duplicates_keep_first_occurrence() {
        let provider = FixedProvider(vec![
            offer("A", "Grand Hotel Paris Opera", "2700", "5"),
            offer("B", "grand hotel  paris opera deluxe", "600", "5"),
            offer("C", "Le Bristol", "1800", "5"),
        ]);
        let widget = HotelWidget::new(Some(Arc::new(provider)));
        let hotels = widget.search(&params("Paris")).await;

        let ids: Vec<&str> = hotels.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(hotels.len(), 2);
        assert!(ids.contains(&"amadeus_A"));
        assert!(!ids.contains(&"amadeus_B"));
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_mock() {
        let widget = HotelWidget::new(Some(Arc::new(DownProvider)));
        let hotels = widget.search(&params("Paris")).await;
        assert!(!hotels.is_empty());
        assert!(hotels.iter().all(|h| h.source == Source::Mock));
    }

    #[tokio::test]
    async fn curated_results_merge_and_sort_first() {
        let provider = FixedProvider(vec![offer("A", "Hotel Lutetia", "2700", "4")]);
        let curated = FixedCurated(vec![json!({"id": 1, "name": "Hidden Gem", "price": 280, "rating": 4.9})]);
        let widget =
            HotelWidget::new(Some(Arc::new(provider))).with_curated(Arc::new(curated));
        let hotels = widget.search(&params("Paris")).await;

        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[0].id, "curated_1");
        assert_eq!(hotels[0].source, Source::Curated);
    }

    #[tokio::test]
    async fn widget_lists_featured_destinations() {
        let widget = HotelWidget::new(None);
        let payload = widget.get_widget_data(None, 3).await.unwrap();

        assert_eq!(payload.widget_type, WIDGET_TYPE);
        assert_eq!(payload.all_items.len(), 3);
        assert!(payload.top_item.get("pricePerNight").is_some());
        assert_eq!(payload.extra["featuredDestinations"].as_array().unwrap().len(), 5);
        assert_eq!(payload.extra["savedHotels"], json!([]));
    }
}
