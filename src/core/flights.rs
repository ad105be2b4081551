//! Flight deal search and the deal tracker widget.

use crate::core::catalog::POPULAR_ROUTES;
use crate::core::mocks;
use crate::core::normalize;
use crate::domain::flight::{CabinClass, FlightDeal, FlightSearchParams};
use crate::domain::model::WidgetPayload;
use crate::domain::ports::FlightProvider;
use crate::utils::error::Result;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const WIDGET_TYPE: &str = "flight_deal_tracker";
pub const WIDGET_SIZE: &str = "medium_2x2";
pub const REFRESH_INTERVAL_SECS: u64 = 7200;

pub struct FlightWidget {
    provider: Option<Arc<dyn FlightProvider>>,
    rng: Mutex<StdRng>,
}

impl FlightWidget {
    pub fn new(provider: Option<Arc<dyn FlightProvider>>) -> Self {
        Self {
            provider,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic mock jitter.
    pub fn with_seed(provider: Option<Arc<dyn FlightProvider>>, seed: u64) -> Self {
        Self {
            provider,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Always returns at least one deal for well-formed params: provider
    /// failures and empty batches fall back to mock inventory.
    pub async fn search(&self, params: &FlightSearchParams) -> Vec<FlightDeal> {
        let now = Utc::now();
        let mut deals = match &self.provider {
            Some(provider) => match provider.search_flights(params).await {
                Ok(raws) => {
                    tracing::debug!(
                        "{} returned {} offers for {}-{}",
                        provider.name(),
                        raws.len(),
                        params.origin,
                        params.destination
                    );
                    normalize::normalize_flight_offers(&raws, params, now)
                }
                Err(e) => {
                    tracing::error!("{} flight search failed: {}", provider.name(), e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        if deals.is_empty() {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            deals = mocks::mock_flight_deals(params, &mut *rng, now);
        }

        deals.sort_by(|a, b| {
            b.deal_score
                .cmp(&a.deal_score)
                .then(a.price.total_cmp(&b.price))
        });
        deals.truncate(params.max_results);
        deals
    }

    /// Top deal from each popular route until `max_deals` are collected.
    pub async fn get_widget_data(
        &self,
        user_id: Option<&str>,
        max_deals: usize,
    ) -> Result<WidgetPayload> {
        let now = Utc::now();
        let today = now.date_naive();
        let departure = today + Duration::days(30);
        tracing::debug!(
            "Building flight widget for {} (max {})",
            user_id.unwrap_or("anonymous"),
            max_deals
        );

        let mut deals = Vec::new();
        for route in POPULAR_ROUTES.iter().take(max_deals + 2) {
            let mut params = FlightSearchParams::new(route.origin, route.destination, departure);
            params.return_date = Some(departure + Duration::days(7));
            params.cabin_class = CabinClass::Business;
            params.max_results = 1;

            if let Some(deal) = self.search(&params).await.into_iter().next() {
                deals.push(deal);
            }
            if deals.len() >= max_deals {
                break;
            }
        }

        if deals.is_empty() {
            tracing::warn!("No flight deals found, using hero deal");
            deals.push(mocks::hero_flight_deal(today, now));
        }

        let items = deals
            .iter()
            .map(|deal| serde_json::to_value(deal.to_widget_format()))
            .collect::<std::result::Result<Vec<Value>, _>>()?;

        Ok(
            WidgetPayload::new(WIDGET_TYPE, WIDGET_SIZE, items, REFRESH_INTERVAL_SECS, now)
                .with_extra("watchedRoutes", json!([]))
                .with_extra("activeAlerts", json!(0))
                .with_extra("deepLinkScheme", json!("sms://")),
        )
    }
}
