//! Restaurant search over the curated dining inventory.

use crate::core::mocks;
use crate::domain::model::WidgetPayload;
use crate::domain::restaurant::{RestaurantResult, RestaurantSearchParams};
use crate::utils::error::Result;
use chrono::{Duration, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::sync::Mutex;

pub const WIDGET_TYPE: &str = "restaurant_discovery";
pub const WIDGET_SIZE: &str = "medium_2x2";
pub const REFRESH_INTERVAL_SECS: u64 = 3600;
pub const MAX_RESULTS: usize = 10;
pub const DEFAULT_LOCATION: &str = "Paris";

pub struct RestaurantWidget {
    rng: Mutex<StdRng>,
}

impl Default for RestaurantWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl RestaurantWidget {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic time-slot sampling.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn search(&self, params: &RestaurantSearchParams) -> Vec<RestaurantResult> {
        let mut restaurants = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            mocks::mock_restaurants(params, &mut *rng)
        };

        restaurants.sort_by(|a, b| {
            b.michelin_stars
                .cmp(&a.michelin_stars)
                .then(b.rating.total_cmp(&a.rating))
        });
        restaurants.truncate(MAX_RESULTS);
        restaurants
    }

    /// Dinner for two tomorrow at 19:00 in `location` (Paris by default).
    pub fn get_widget_data(
        &self,
        location: Option<&str>,
        max_restaurants: usize,
    ) -> Result<WidgetPayload> {
        let now = Utc::now();
        let target = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCATION);
        let date = now.date_naive() + Duration::days(1);
        let dinner = NaiveTime::from_hms_opt(19, 0, 0).unwrap_or_default();

        let params = RestaurantSearchParams::new(target, date, dinner);
        let restaurants = self.search(&params);

        let items = restaurants
            .iter()
            .take(max_restaurants.max(1))
            .map(|r| serde_json::to_value(r.to_widget_format()))
            .collect::<std::result::Result<Vec<Value>, _>>()?;

        Ok(
            WidgetPayload::new(WIDGET_TYPE, WIDGET_SIZE, items, REFRESH_INTERVAL_SECS, now)
                .with_extra("searchLocation", json!(target))
                .with_extra("searchDate", json!(date.to_string()))
                .with_extra("deepLinkScheme", json!("opentable://")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::{CuisineType, PriceRange};
    use chrono::NaiveDate;

    fn params(location: &str) -> RestaurantSearchParams {
        RestaurantSearchParams::new(
            location,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        )
    }

    #[test]
    fn sorted_by_michelin_then_rating() {
        let widget = RestaurantWidget::with_seed(11);
        let results = widget.search(&params("Paris"));

        assert!(!results.is_empty() && results.len() <= MAX_RESULTS);
        assert!(results.windows(2).all(|w| {
            w[0].michelin_stars > w[1].michelin_stars
                || (w[0].michelin_stars == w[1].michelin_stars && w[0].rating >= w[1].rating)
        }));
    }

    #[test]
    fn unknown_city_borrows_paris_inventory() {
        let widget = RestaurantWidget::with_seed(2);
        let results = widget.search(&params("Atlantis"));
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.city == "Atlantis"));
    }

    #[test]
    fn empty_filter_result_keeps_full_list() {
        let widget = RestaurantWidget::with_seed(5);
        let unfiltered = widget.search(&params("Paris")).len();

        let mut p = params("Paris");
        p.cuisine = CuisineType::Steakhouse;
        p.price_range = Some(PriceRange::Moderate);
        assert_eq!(widget.search(&p).len(), unfiltered);
    }

    #[test]
    fn widget_defaults_to_paris() {
        let widget = RestaurantWidget::with_seed(9);
        let payload = widget.get_widget_data(None, 2).unwrap();

        assert_eq!(payload.widget_type, WIDGET_TYPE);
        assert_eq!(payload.all_items.len(), 2);
        assert_eq!(payload.extra["searchLocation"], "Paris");
        assert_eq!(payload.extra["deepLinkScheme"], "opentable://");
        assert_eq!(payload.top_item["action"], "reserve_now");
    }
}
