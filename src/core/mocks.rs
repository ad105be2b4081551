//! Fallback inventory used when no provider is configured or a provider call
//! comes back empty. Randomness and the clock are injected so callers can
//! reproduce results.

use crate::core::catalog::{self, MockRestaurant};
use crate::core::links;
use crate::core::scoring::{
    FLIGHT_ORIGINAL_MARKUP, FLIGHT_SAVINGS_PERCENT, HOTEL_ORIGINAL_MARKUP, HOTEL_SAVINGS_PERCENT,
};
use crate::domain::flight::{CabinClass, FlightDeal, FlightSearchParams};
use crate::domain::hotel::{HotelCategory, HotelResult, HotelSearchParams};
use crate::domain::model::{Coordinates, Source, Urgency};
use crate::domain::restaurant::{
    AvailabilityStatus, CuisineType, PriceRange, RestaurantResult, RestaurantSearchParams,
};
use crate::utils::format::{slug, title_case};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Upper bound of the random flight price jitter, in USD.
pub const FLIGHT_PRICE_JITTER: i64 = 200;
const MOCK_SCORE: u8 = 8;

pub fn mock_flight_deals<R: Rng + ?Sized>(
    params: &FlightSearchParams,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<FlightDeal> {
    let route = catalog::mock_route(&params.origin, &params.destination);
    let jitter = rng.gen_range(-FLIGHT_PRICE_JITTER..=FLIGHT_PRICE_JITTER);
    let price = (route.price as i64 + jitter) as f64;

    vec![FlightDeal {
        id: format!("mock_{}_{}", params.origin, params.destination),
        origin: params.origin.clone(),
        destination: params.destination.clone(),
        route_display: format!("{} -> {}", params.origin, params.destination),
        price,
        original_price: Some((price * FLIGHT_ORIGINAL_MARKUP).trunc()),
        currency: "USD".to_string(),
        cabin_class: params.cabin_class,
        airline: route.airline.to_string(),
        airline_name: route.airline_name.to_string(),
        departure_date: params.departure_date.to_string(),
        return_date: params.return_date.map(|d| d.to_string()),
        departure_time: "18:30".to_string(),
        arrival_time: "07:45".to_string(),
        duration: route.duration.to_string(),
        stops: 0,
        deal_score: MOCK_SCORE,
        savings_percent: Some(FLIGHT_SAVINGS_PERCENT),
        urgency: Urgency::High,
        expires_at: Some(now + Duration::hours(6)),
        is_mistake_fare: false,
        source: Source::Mock,
        deep_link: links::flight_sms_link(&params.origin, &params.destination, price),
        booking_url: None,
        image_url: catalog::destination_image(&params.destination).to_string(),
    }]
}

/// Hand-built hero deal used when a whole widget fan-out produced nothing.
pub fn hero_flight_deal(today: NaiveDate, now: DateTime<Utc>) -> FlightDeal {
    let price = 1847.0;
    FlightDeal {
        id: "mock_JFK_CDG".to_string(),
        origin: "JFK".to_string(),
        destination: "CDG".to_string(),
        route_display: "NYC -> Paris".to_string(),
        price,
        original_price: Some(2497.0),
        currency: "USD".to_string(),
        cabin_class: CabinClass::Business,
        airline: "AF".to_string(),
        airline_name: "Air France".to_string(),
        departure_date: (today + Duration::days(30)).to_string(),
        return_date: Some((today + Duration::days(37)).to_string()),
        departure_time: "18:30".to_string(),
        arrival_time: "07:45".to_string(),
        duration: "7h 15m".to_string(),
        stops: 0,
        deal_score: MOCK_SCORE,
        savings_percent: Some(FLIGHT_SAVINGS_PERCENT),
        urgency: Urgency::High,
        expires_at: Some(now + Duration::hours(6)),
        is_mistake_fare: false,
        source: Source::Mock,
        deep_link: links::flight_sms_link("JFK", "CDG", price),
        booking_url: None,
        image_url: catalog::destination_image("CDG").to_string(),
    }
}

pub fn mock_hotels(params: &HotelSearchParams) -> Vec<HotelResult> {
    let city = catalog::resolve_city(&params.location);
    let nights = params.nights() as f64;
    let image_url = catalog::hotel_image(&city);

    let (display_city, entries): (String, Vec<(String, String, f64, f64)>) =
        match catalog::mock_hotels(&city) {
            Some(hotels) => (
                title_case(&city),
                hotels
                    .iter()
                    .map(|h| (h.name.to_string(), h.brand.to_string(), h.price as f64, h.rating))
                    .collect(),
            ),
            None => {
                let display = title_case(params.location.trim());
                let generic = vec![
                    (format!("Four Seasons {}", display), "Four Seasons".to_string(), 895.0, 4.9),
                    (format!("Ritz-Carlton {}", display), "Ritz-Carlton".to_string(), 750.0, 4.8),
                    (format!("St. Regis {}", display), "St. Regis".to_string(), 850.0, 4.8),
                ];
                (display, generic)
            }
        };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (name, brand, price, rating))| HotelResult {
            id: format!("mock_{}_{}", slug(&city), idx),
            deep_link: links::hotel_sms_link(&name, price),
            name,
            brand: Some(brand),
            location: display_city.clone(),
            city: display_city.clone(),
            country: String::new(),
            rating,
            review_count: (rating * 500.0) as u32,
            price_per_night: price,
            original_price: Some((price * HOTEL_ORIGINAL_MARKUP).trunc()),
            total_price: price * nights,
            currency: "USD".to_string(),
            category: HotelCategory::Luxury,
            star_rating: 5,
            image_url: image_url.to_string(),
            thumbnail_url: catalog::thumbnail(image_url),
            amenities: ["Spa", "Pool", "Fine Dining", "Butler Service", "Gym"]
                .map(String::from)
                .to_vec(),
            highlights: ["City Center", "Award-winning Service"].map(String::from).to_vec(),
            room_type: "Deluxe Suite".to_string(),
            deal_score: MOCK_SCORE,
            savings_percent: Some(HOTEL_SAVINGS_PERCENT),
            urgency: Urgency::High,
            source: Source::Mock,
            booking_url: None,
            coordinates: None,
        })
        .collect()
}

pub fn hero_hotel() -> HotelResult {
    let image_url = "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=800";
    HotelResult {
        id: "mock_paris_hero".to_string(),
        name: "Four Seasons Hotel George V".to_string(),
        brand: Some("Four Seasons".to_string()),
        location: "8 Avenue George V, Paris".to_string(),
        city: "Paris".to_string(),
        country: "France".to_string(),
        rating: 4.9,
        review_count: 2847,
        price_per_night: 895.0,
        original_price: Some(1195.0),
        total_price: 2685.0,
        currency: "USD".to_string(),
        category: HotelCategory::Luxury,
        star_rating: 5,
        image_url: image_url.to_string(),
        thumbnail_url: catalog::thumbnail(image_url),
        amenities: ["Spa", "Pool", "Michelin Restaurant", "Butler Service", "Gym"]
            .map(String::from)
            .to_vec(),
        highlights: ["Eiffel Tower View", "Award-winning Spa"].map(String::from).to_vec(),
        room_type: "Deluxe Suite with View".to_string(),
        deal_score: MOCK_SCORE,
        savings_percent: Some(25),
        urgency: Urgency::High,
        source: Source::Mock,
        deep_link: links::hotel_sms_link("Four Seasons Hotel George V", 895.0),
        booking_url: None,
        coordinates: Some(Coordinates {
            lat: 48.8688,
            lng: 2.3006,
        }),
    }
}

fn matches_filters(entry: &MockRestaurant, params: &RestaurantSearchParams) -> bool {
    let cuisine_ok = params.cuisine == CuisineType::All || entry.cuisine == params.cuisine.as_str();
    let price_ok = params
        .price_range
        .map_or(true, |range| entry.price == range.as_str());
    cuisine_ok && price_ok
}

/// Restaurant inventory for a city. Unknown cities borrow the Paris list; filters
/// that would leave nothing are ignored so the caller always gets results.
pub fn mock_restaurants<R: Rng + ?Sized>(
    params: &RestaurantSearchParams,
    rng: &mut R,
) -> Vec<RestaurantResult> {
    let city_key = params.location.trim().to_lowercase();
    let inventory = catalog::mock_restaurants(&city_key)
        .or_else(|| catalog::mock_restaurants(catalog::RESTAURANT_FALLBACK_CITY))
        .unwrap_or_default();

    let filtered: Vec<&MockRestaurant> = inventory
        .iter()
        .filter(|entry| matches_filters(entry, params))
        .collect();
    let selected: Vec<&MockRestaurant> = if filtered.is_empty() {
        tracing::debug!(
            "No restaurants in {} match the filters, returning the full list",
            params.location
        );
        inventory.iter().collect()
    } else {
        filtered
    };

    let city = title_case(params.location.trim());
    selected
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            let image_url = catalog::cuisine_image(entry.cuisine);
            let mut available_times: Vec<String> = catalog::DINNER_SLOTS
                .choose_multiple(rng, 4)
                .map(|slot| slot.to_string())
                .collect();
            available_times.sort();
            let name_slug = slug(entry.name);

            RestaurantResult {
                id: format!("opentable_{}_{}", slug(&city_key), idx),
                name: entry.name.to_string(),
                cuisine: entry.cuisine.to_string(),
                cuisine_display: entry.cuisine_display.to_string(),
                location: format!("{}, {}", entry.neighborhood, city),
                city: city.clone(),
                neighborhood: entry.neighborhood.to_string(),
                rating: entry.rating,
                review_count: entry.reviews,
                price_range: entry.price.parse().unwrap_or(PriceRange::VeryExpensive),
                michelin_stars: entry.michelin,
                image_url: image_url.to_string(),
                thumbnail_url: catalog::thumbnail(image_url),
                description: entry.description.to_string(),
                highlights: entry.highlights.map(String::from).to_vec(),
                availability_status: if available_times.is_empty() {
                    AvailabilityStatus::Limited
                } else {
                    AvailabilityStatus::Available
                },
                next_available: available_times.first().cloned(),
                available_times,
                source: Source::Opentable,
                deep_link: format!("opentable://reserve?restaurant={}", name_slug),
                booking_url: Some(format!("https://opentable.com/r/{}", name_slug)),
                coordinates: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
    }

    fn jfk_cdg() -> FlightSearchParams {
        FlightSearchParams::new("JFK", "CDG", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn mock_flight_matches_route_table() {
        let mut rng = StdRng::seed_from_u64(7);
        let deals = mock_flight_deals(&jfk_cdg(), &mut rng, fixed_now());

        assert_eq!(deals.len(), 1);
        let deal = &deals[0];
        assert!((deal.price - 1847.0).abs() <= FLIGHT_PRICE_JITTER as f64);
        assert_eq!(deal.deal_score, 8);
        assert_eq!(deal.urgency, Urgency::High);
        assert_eq!(deal.stops, 0);
        assert!(!deal.is_mistake_fare);
        assert_eq!(deal.airline_name, "Air France");
        assert_eq!(deal.cabin_class, CabinClass::Business);
        assert_eq!(deal.source, Source::Mock);
        assert!(deal.savings_percent.is_some() && deal.original_price.is_some());
    }

    #[test]
    fn seeded_mocks_are_reproducible() {
        let params = jfk_cdg();
        let a = mock_flight_deals(&params, &mut StdRng::seed_from_u64(42), fixed_now());
        let b = mock_flight_deals(&params, &mut StdRng::seed_from_u64(42), fixed_now());
        assert_eq!(a, b);

        let c = mock_flight_deals(&params, &mut StdRng::seed_from_u64(43), fixed_now());
        let mut a0 = a[0].clone();
        let c0 = &c[0];
        assert!((c0.price - 1847.0).abs() <= FLIGHT_PRICE_JITTER as f64);
        // Everything except the jittered price (and what derives from it) is stable.
        a0.price = c0.price;
        a0.original_price = c0.original_price;
        a0.deep_link = c0.deep_link.clone();
        assert_eq!(&a0, c0);
    }

    #[test]
    fn unknown_route_uses_generic_carrier() {
        let params =
            FlightSearchParams::new("BOS", "SEA", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let deals = mock_flight_deals(&params, &mut StdRng::seed_from_u64(1), fixed_now());
        assert_eq!(deals[0].airline, "AA");
        assert!((deals[0].price - 2500.0).abs() <= 200.0);
    }

    #[test]
    fn unknown_hotel_location_gets_generic_brands() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let params = HotelSearchParams::new("Unknownsville", day, day + Duration::days(2));
        let hotels = mock_hotels(&params);

        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Four Seasons Unknownsville",
                "Ritz-Carlton Unknownsville",
                "St. Regis Unknownsville"
            ]
        );
        assert!(hotels.iter().all(|h| h.star_rating == 5 && h.deal_score == 8));
        assert_eq!(hotels[0].total_price, 895.0 * 2.0);
    }

    #[test]
    fn hotel_codes_map_to_city_inventory() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let params = HotelSearchParams::new("PAR", day, day + Duration::days(3));
        let hotels = mock_hotels(&params);
        assert_eq!(hotels[0].name, "Four Seasons Hotel George V");
        assert_eq!(hotels[0].city, "Paris");
        assert_eq!(hotels[0].original_price, Some(1118.0));
    }

    #[test]
    fn restaurants_fall_back_to_paris_and_respect_filters() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let params = RestaurantSearchParams::new("Atlantis", date, time);
        let results = mock_restaurants(&params, &mut rng);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "Le Cinq");
        assert_eq!(results[0].city, "Atlantis");
        assert!(results.iter().all(|r| r.available_times.len() == 4));
        assert!(results
            .iter()
            .all(|r| r.available_times.windows(2).all(|w| w[0] <= w[1])));

        let mut params = RestaurantSearchParams::new("new york", date, time);
        params.cuisine = CuisineType::Seafood;
        let results = mock_restaurants(&params, &mut rng);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Le Bernardin");

        params.cuisine = CuisineType::Steakhouse;
        assert_eq!(mock_restaurants(&params, &mut rng).len(), 3);
    }
}
