//! Static lookup tables: airlines, airports, destination imagery and the mock inventory.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_FLIGHT_IMAGE: &str =
    "https://images.unsplash.com/photo-1436491865332-7a61a109cc05?w=800";
pub const DEFAULT_HOTEL_IMAGE: &str =
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800";
pub const DEFAULT_RESTAURANT_IMAGE: &str =
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800";

static AIRLINES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("AA", "American Airlines"),
        ("UA", "United Airlines"),
        ("DL", "Delta Air Lines"),
        ("AF", "Air France"),
        ("BA", "British Airways"),
        ("LH", "Lufthansa"),
        ("EK", "Emirates"),
        ("SQ", "Singapore Airlines"),
        ("QF", "Qantas"),
        ("NH", "ANA"),
        ("JL", "Japan Airlines"),
        ("CX", "Cathay Pacific"),
        ("QR", "Qatar Airways"),
        ("TK", "Turkish Airlines"),
        ("EY", "Etihad Airways"),
        ("VS", "Virgin Atlantic"),
        ("AC", "Air Canada"),
        ("KL", "KLM"),
        ("IB", "Iberia"),
        ("AZ", "ITA Airways"),
        ("LX", "SWISS"),
        ("OS", "Austrian"),
        ("SK", "SAS"),
        ("AY", "Finnair"),
        ("SU", "Aeroflot"),
        ("KE", "Korean Air"),
        ("OZ", "Asiana Airlines"),
        ("CI", "China Airlines"),
        ("BR", "EVA Air"),
        ("MH", "Malaysia Airlines"),
        ("TG", "Thai Airways"),
        ("GA", "Garuda Indonesia"),
        ("NZ", "Air New Zealand"),
        ("LA", "LATAM"),
        ("AM", "Aeromexico"),
        ("AS", "Alaska Airlines"),
        ("WN", "Southwest Airlines"),
        ("B6", "JetBlue"),
        ("F9", "Frontier Airlines"),
        ("NK", "Spirit Airlines"),
    ])
});

static DESTINATION_IMAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let paris = "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=800";
    let london = "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad?w=800";
    let tokyo = "https://images.unsplash.com/photo-1536098561742-ca998e48cbcc?w=800";
    let nyc = "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=800";
    let rome = "https://images.unsplash.com/photo-1552832230-c0197dd311b5?w=800";
    HashMap::from([
        ("CDG", paris),
        ("PAR", paris),
        ("LHR", london),
        ("LON", london),
        ("NRT", tokyo),
        ("HND", tokyo),
        ("TYO", tokyo),
        ("DXB", "https://images.unsplash.com/photo-1512453979798-5ea266f8880c?w=800"),
        ("MIA", "https://images.unsplash.com/photo-1533106497176-45ae19e68ba2?w=800"),
        ("LAX", "https://images.unsplash.com/photo-1534190760961-74e8c1c5c3da?w=800"),
        ("SFO", "https://images.unsplash.com/photo-1501594907352-04cda38ebc29?w=800"),
        ("JFK", nyc),
        ("NYC", nyc),
        ("SIN", "https://images.unsplash.com/photo-1525625293386-3f8f99389edd?w=800"),
        ("HKG", "https://images.unsplash.com/photo-1536599018102-9f803c140fc1?w=800"),
        ("SYD", "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9?w=800"),
        ("FCO", rome),
        ("ROM", rome),
        ("BCN", "https://images.unsplash.com/photo-1583422409516-2895a77efded?w=800"),
        ("AMS", "https://images.unsplash.com/photo-1534351590666-13e3e96b5017?w=800"),
        ("YVR", "https://images.unsplash.com/photo-1559511260-66a68e5c81b5?w=800"),
        ("MLE", "https://images.unsplash.com/photo-1514282401047-d79a71a590e8?w=800"),
        ("DPS", "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=800"),
    ])
});

static HOTEL_IMAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("paris", "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=800"),
        ("tokyo", "https://images.unsplash.com/photo-1590490360182-c33d57733427?w=800"),
        ("dubai", "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=800"),
        ("maldives", "https://images.unsplash.com/photo-1439130490301-25e322d88054?w=800"),
        ("bali", "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=800"),
        ("miami", "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=800"),
        ("london", "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=800"),
        ("new york", "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=800"),
        ("whistler", "https://images.unsplash.com/photo-1548802673-380ab8ebc7b7?w=800"),
        ("vancouver", "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=800"),
        ("aspen", "https://images.unsplash.com/photo-1584132967334-10e028bd69f7?w=800"),
        ("santorini", "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=800"),
        ("amalfi", "https://images.unsplash.com/photo-1602002418082-a4443e081dd1?w=800"),
    ])
});

static CUISINE_IMAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("french", "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=800"),
        ("italian", "https://images.unsplash.com/photo-1551183053-bf91a1d81141?w=800"),
        ("japanese", "https://images.unsplash.com/photo-1579871494447-9811cf80d66c?w=800"),
        ("american", "https://images.unsplash.com/photo-1544025162-d76694265947?w=800"),
        ("seafood", "https://images.unsplash.com/photo-1559339352-11d035aa65de?w=800"),
        ("steakhouse", "https://images.unsplash.com/photo-1600891964092-4316c288032e?w=800"),
        ("fine_dining", "https://images.unsplash.com/photo-1550966871-3ed3cdb5ed0c?w=800"),
        ("mediterranean", "https://images.unsplash.com/photo-1544124499-58912cbddaad?w=800"),
    ])
});

/// City names the hotel provider understands, keyed by lowercase name.
static CITY_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("new york", "NYC"),
        ("nyc", "NYC"),
        ("london", "LON"),
        ("paris", "PAR"),
        ("tokyo", "TYO"),
        ("dubai", "DXB"),
        ("singapore", "SIN"),
        ("hong kong", "HKG"),
        ("los angeles", "LAX"),
        ("miami", "MIA"),
        ("san francisco", "SFO"),
        ("chicago", "CHI"),
        ("rome", "ROM"),
        ("barcelona", "BCN"),
        ("sydney", "SYD"),
        ("maldives", "MLE"),
        ("bali", "DPS"),
    ])
});

/// Airport and city codes mapped back to the city names used by the hotel inventory.
static CODE_TO_CITY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mia", "miami"),
        ("par", "paris"),
        ("tyo", "tokyo"),
        ("dxb", "dubai"),
        ("lon", "london"),
        ("nyc", "new york"),
        ("mle", "maldives"),
        ("lhr", "london"),
        ("yvr", "vancouver"),
        ("yws", "whistler"),
        ("dps", "bali"),
        ("jtr", "santorini"),
        ("nap", "amalfi"),
        ("ase", "aspen"),
        ("cdg", "paris"),
        ("hnd", "tokyo"),
        ("nrt", "tokyo"),
        ("jfk", "new york"),
        ("lax", "los angeles"),
        ("sfo", "san francisco"),
    ])
});

pub fn airline_name(code: &str) -> Option<&'static str> {
    AIRLINES.get(code).copied()
}

pub fn destination_image(code: &str) -> &'static str {
    DESTINATION_IMAGES
        .get(code.to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_FLIGHT_IMAGE)
}

/// Hotel image for a city name or code.
pub fn hotel_image(location: &str) -> &'static str {
    let city = resolve_city(location);
    HOTEL_IMAGES
        .get(city.as_str())
        .copied()
        .unwrap_or(DEFAULT_HOTEL_IMAGE)
}

pub fn cuisine_image(cuisine: &str) -> &'static str {
    CUISINE_IMAGES
        .get(cuisine)
        .copied()
        .unwrap_or(DEFAULT_RESTAURANT_IMAGE)
}

pub fn thumbnail(image_url: &str) -> String {
    image_url.replace("w=800", "w=200")
}

/// Lowercase city name for a location, translating known airport/city codes.
pub fn resolve_city(location: &str) -> String {
    let lower = location.trim().to_lowercase();
    match CODE_TO_CITY.get(lower.as_str()) {
        Some(city) => (*city).to_string(),
        None => lower,
    }
}

/// City code for the hotel provider. Unknown names degrade to their first
/// three letters, which is lossy but never an error.
pub fn city_code(location: &str) -> String {
    let trimmed = location.trim();
    if let Some(code) = CITY_CODES.get(trimmed.to_lowercase().as_str()) {
        return (*code).to_string();
    }
    if trimmed.chars().count() == 3 && trimmed.chars().all(|c| c.is_ascii_uppercase()) {
        return trimmed.to_string();
    }
    trimmed.chars().take(3).collect::<String>().to_uppercase()
}

pub struct PopularRoute {
    pub origin: &'static str,
    pub destination: &'static str,
    pub name: &'static str,
}

pub const POPULAR_ROUTES: &[PopularRoute] = &[
    PopularRoute { origin: "JFK", destination: "CDG", name: "NYC -> Paris" },
    PopularRoute { origin: "LAX", destination: "NRT", name: "LA -> Tokyo" },
    PopularRoute { origin: "MIA", destination: "LHR", name: "Miami -> London" },
    PopularRoute { origin: "SFO", destination: "HND", name: "SF -> Tokyo" },
    PopularRoute { origin: "JFK", destination: "DXB", name: "NYC -> Dubai" },
];

pub struct FeaturedDestination {
    pub city: &'static str,
    pub country: &'static str,
    pub code: &'static str,
}

pub const FEATURED_DESTINATIONS: &[FeaturedDestination] = &[
    FeaturedDestination { city: "Paris", country: "France", code: "PAR" },
    FeaturedDestination { city: "Tokyo", country: "Japan", code: "TYO" },
    FeaturedDestination { city: "Dubai", country: "UAE", code: "DXB" },
    FeaturedDestination { city: "Maldives", country: "Maldives", code: "MLE" },
    FeaturedDestination { city: "Bali", country: "Indonesia", code: "DPS" },
];

pub struct MockRoute {
    pub airline: &'static str,
    pub airline_name: &'static str,
    pub price: u32,
    pub duration: &'static str,
}

pub const GENERIC_ROUTE: MockRoute = MockRoute {
    airline: "AA",
    airline_name: "American Airlines",
    price: 2500,
    duration: "8h 00m",
};

pub fn mock_route(origin: &str, destination: &str) -> &'static MockRoute {
    const ROUTES: &[(&str, &str, MockRoute)] = &[
        ("JFK", "CDG", MockRoute { airline: "AF", airline_name: "Air France", price: 1847, duration: "7h 15m" }),
        ("JFK", "LHR", MockRoute { airline: "BA", airline_name: "British Airways", price: 2150, duration: "7h 00m" }),
        ("LAX", "NRT", MockRoute { airline: "JL", airline_name: "Japan Airlines", price: 2890, duration: "11h 30m" }),
        ("LAX", "HND", MockRoute { airline: "NH", airline_name: "ANA", price: 2750, duration: "11h 45m" }),
        ("SFO", "HND", MockRoute { airline: "UA", airline_name: "United Airlines", price: 2650, duration: "10h 30m" }),
        ("MIA", "LHR", MockRoute { airline: "BA", airline_name: "British Airways", price: 2350, duration: "8h 45m" }),
        ("JFK", "DXB", MockRoute { airline: "EK", airline_name: "Emirates", price: 3200, duration: "12h 30m" }),
    ];
    let origin = origin.to_ascii_uppercase();
    let destination = destination.to_ascii_uppercase();
    ROUTES
        .iter()
        .find(|(o, d, _)| *o == origin && *d == destination)
        .map(|(_, _, route)| route)
        .unwrap_or(&GENERIC_ROUTE)
}

pub struct MockHotel {
    pub name: &'static str,
    pub brand: &'static str,
    pub price: u32,
    pub rating: f64,
}

const fn hotel(name: &'static str, brand: &'static str, price: u32, rating: f64) -> MockHotel {
    MockHotel { name, brand, price, rating }
}

const MOCK_HOTELS: &[(&str, [MockHotel; 3])] = &[
    ("miami", [
        hotel("Faena Miami Beach", "Faena", 750, 4.8),
        hotel("The Setai Miami Beach", "The Setai", 895, 4.9),
        hotel("Four Seasons Surf Club", "Four Seasons", 1100, 4.9),
    ]),
    ("paris", [
        hotel("Four Seasons Hotel George V", "Four Seasons", 895, 4.9),
        hotel("Le Bristol Paris", "Oetker Collection", 1050, 4.9),
        hotel("Ritz Paris", "Ritz", 1200, 4.8),
    ]),
    ("tokyo", [
        hotel("Aman Tokyo", "Aman", 1100, 4.9),
        hotel("Park Hyatt Tokyo", "Park Hyatt", 650, 4.8),
        hotel("The Peninsula Tokyo", "Peninsula", 750, 4.8),
    ]),
    ("dubai", [
        hotel("Burj Al Arab Jumeirah", "Jumeirah", 1500, 4.9),
        hotel("One&Only The Palm", "One&Only", 950, 4.8),
        hotel("Armani Hotel Dubai", "Armani", 650, 4.7),
    ]),
    ("london", [
        hotel("Claridge's", "Maybourne", 850, 4.9),
        hotel("The Connaught", "Maybourne", 950, 4.9),
        hotel("The Savoy", "Fairmont", 750, 4.8),
    ]),
    ("new york", [
        hotel("The Mark", "The Mark", 1100, 4.9),
        hotel("Aman New York", "Aman", 1800, 4.9),
        hotel("The Carlyle", "Rosewood", 950, 4.8),
    ]),
    ("maldives", [
        hotel("Soneva Fushi", "Soneva", 2500, 4.9),
        hotel("One&Only Reethi Rah", "One&Only", 2200, 4.9),
        hotel("Cheval Blanc Randheli", "LVMH", 3000, 4.9),
    ]),
    ("whistler", [
        hotel("Four Seasons Resort Whistler", "Four Seasons", 895, 4.9),
        hotel("Fairmont Chateau Whistler", "Fairmont", 650, 4.8),
        hotel("Nita Lake Lodge", "Nita Lake", 450, 4.7),
    ]),
    ("vancouver", [
        hotel("Fairmont Pacific Rim", "Fairmont", 650, 4.9),
        hotel("Rosewood Hotel Georgia", "Rosewood", 550, 4.8),
        hotel("Shangri-La Vancouver", "Shangri-La", 480, 4.8),
    ]),
    ("aspen", [
        hotel("The Little Nell", "The Little Nell", 1200, 4.9),
        hotel("St. Regis Aspen Resort", "St. Regis", 1100, 4.9),
        hotel("The Limelight Hotel", "Limelight", 650, 4.7),
    ]),
    ("bali", [
        hotel("Aman Villas at Nusa Dua", "Aman", 1500, 4.9),
        hotel("Four Seasons Resort Bali", "Four Seasons", 950, 4.9),
        hotel("Bulgari Resort Bali", "Bulgari", 1200, 4.8),
    ]),
    ("santorini", [
        hotel("Canaves Oia Epitome", "Canaves", 1100, 4.9),
        hotel("Mystique Santorini", "Luxury Collection", 950, 4.8),
        hotel("Grace Hotel Santorini", "Auberge", 850, 4.8),
    ]),
    ("amalfi", [
        hotel("Belmond Hotel Caruso", "Belmond", 1200, 4.9),
        hotel("Il San Pietro di Positano", "Independent", 1100, 4.9),
        hotel("Le Sirenuse", "Independent", 950, 4.8),
    ]),
];

pub fn mock_hotels(city: &str) -> Option<&'static [MockHotel]> {
    MOCK_HOTELS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, hotels)| hotels.as_slice())
}

pub struct MockRestaurant {
    pub name: &'static str,
    pub cuisine: &'static str,
    pub cuisine_display: &'static str,
    pub neighborhood: &'static str,
    pub rating: f64,
    pub reviews: u32,
    pub price: &'static str,
    pub michelin: u8,
    pub description: &'static str,
    pub highlights: [&'static str; 3],
}

pub const RESTAURANT_FALLBACK_CITY: &str = "paris";

const MOCK_RESTAURANTS: &[(&str, [MockRestaurant; 3])] = &[
    ("paris", [
        MockRestaurant {
            name: "Le Cinq",
            cuisine: "french",
            cuisine_display: "French Fine Dining",
            neighborhood: "8th arrondissement",
            rating: 4.9,
            reviews: 2847,
            price: "$$$$",
            michelin: 3,
            description: "Three Michelin star restaurant at Four Seasons George V",
            highlights: ["Michelin 3-Star", "Tasting Menu", "Wine Pairing"],
        },
        MockRestaurant {
            name: "L'Ambroisie",
            cuisine: "french",
            cuisine_display: "Classic French",
            neighborhood: "Place des Vosges",
            rating: 4.9,
            reviews: 1923,
            price: "$$$$",
            michelin: 3,
            description: "Legendary three-star in historic Place des Vosges",
            highlights: ["Michelin 3-Star", "Historic Setting", "Classic Cuisine"],
        },
        MockRestaurant {
            name: "Septime",
            cuisine: "french",
            cuisine_display: "Modern French",
            neighborhood: "11th arrondissement",
            rating: 4.7,
            reviews: 3421,
            price: "$$$",
            michelin: 1,
            description: "Innovative tasting menus in a minimalist setting",
            highlights: ["Michelin 1-Star", "Seasonal Menu", "Natural Wine"],
        },
    ]),
    ("tokyo", [
        MockRestaurant {
            name: "Sukiyabashi Jiro",
            cuisine: "japanese",
            cuisine_display: "Omakase Sushi",
            neighborhood: "Ginza",
            rating: 4.9,
            reviews: 1256,
            price: "$$$$",
            michelin: 3,
            description: "World-famous sushi by Jiro Ono",
            highlights: ["Michelin 3-Star", "Omakase Only", "Reservation Required"],
        },
        MockRestaurant {
            name: "Narisawa",
            cuisine: "japanese",
            cuisine_display: "Innovative Japanese",
            neighborhood: "Minami-Aoyama",
            rating: 4.8,
            reviews: 2134,
            price: "$$$$",
            michelin: 2,
            description: "Avant-garde cuisine celebrating nature",
            highlights: ["Michelin 2-Star", "Sustainability", "World's 50 Best"],
        },
        MockRestaurant {
            name: "Den",
            cuisine: "japanese",
            cuisine_display: "Creative Japanese",
            neighborhood: "Jingumae",
            rating: 4.8,
            reviews: 1876,
            price: "$$$",
            michelin: 2,
            description: "Playful fine dining with Japanese soul",
            highlights: ["Michelin 2-Star", "Inventive", "Asia's 50 Best"],
        },
    ]),
    ("new york", [
        MockRestaurant {
            name: "Eleven Madison Park",
            cuisine: "american",
            cuisine_display: "Contemporary American",
            neighborhood: "Flatiron",
            rating: 4.8,
            reviews: 4521,
            price: "$$$$",
            michelin: 3,
            description: "Plant-based tasting menu in Art Deco landmark",
            highlights: ["Michelin 3-Star", "Plant-Based", "World's Best"],
        },
        MockRestaurant {
            name: "Le Bernardin",
            cuisine: "seafood",
            cuisine_display: "French Seafood",
            neighborhood: "Midtown",
            rating: 4.9,
            reviews: 5234,
            price: "$$$$",
            michelin: 3,
            description: "Eric Ripert's legendary seafood temple",
            highlights: ["Michelin 3-Star", "Seafood", "40 Years"],
        },
        MockRestaurant {
            name: "Carbone",
            cuisine: "italian",
            cuisine_display: "Italian-American",
            neighborhood: "Greenwich Village",
            rating: 4.6,
            reviews: 6789,
            price: "$$$",
            michelin: 0,
            description: "Classic Italian-American in retro glamour",
            highlights: ["Celebrity Favorite", "Spicy Rigatoni", "Tableside Service"],
        },
    ]),
    ("miami", [
        MockRestaurant {
            name: "Fiola Miami",
            cuisine: "italian",
            cuisine_display: "Modern Italian",
            neighborhood: "Coral Gables",
            rating: 4.7,
            reviews: 1823,
            price: "$$$$",
            michelin: 0,
            description: "Fabio Trabocchi's Italian excellence",
            highlights: ["James Beard Award", "Pasta", "Wine List"],
        },
        MockRestaurant {
            name: "Ariete",
            cuisine: "american",
            cuisine_display: "New American",
            neighborhood: "Coconut Grove",
            rating: 4.6,
            reviews: 2134,
            price: "$$$",
            michelin: 0,
            description: "Farm-to-table with Latin influences",
            highlights: ["Local Sourcing", "Cocktails", "Brunch"],
        },
        MockRestaurant {
            name: "Stubborn Seed",
            cuisine: "american",
            cuisine_display: "Creative American",
            neighborhood: "South Beach",
            rating: 4.7,
            reviews: 1567,
            price: "$$$$",
            michelin: 0,
            description: "Top Chef winner Jeremy Ford's flagship",
            highlights: ["Top Chef Winner", "Tasting Menu", "South Beach"],
        },
    ]),
    ("london", [
        MockRestaurant {
            name: "Restaurant Gordon Ramsay",
            cuisine: "french",
            cuisine_display: "French Fine Dining",
            neighborhood: "Chelsea",
            rating: 4.8,
            reviews: 2345,
            price: "$$$$",
            michelin: 3,
            description: "Gordon Ramsay's flagship three-star",
            highlights: ["Michelin 3-Star", "Classic French", "Intimate"],
        },
        MockRestaurant {
            name: "The Ledbury",
            cuisine: "french",
            cuisine_display: "Modern European",
            neighborhood: "Notting Hill",
            rating: 4.8,
            reviews: 1987,
            price: "$$$$",
            michelin: 2,
            description: "Brett Graham's innovative cuisine",
            highlights: ["Michelin 2-Star", "Game Dishes", "Tasting Menu"],
        },
        MockRestaurant {
            name: "Dishoom",
            cuisine: "indian",
            cuisine_display: "Bombay Cafe",
            neighborhood: "Covent Garden",
            rating: 4.6,
            reviews: 8765,
            price: "$$",
            michelin: 0,
            description: "Beloved Bombay-style cafe and bar",
            highlights: ["Iconic Breakfast", "Black Daal", "No Reservations"],
        },
    ]),
];

/// Restaurants for a lowercase city name; `None` when the city is not stocked.
pub fn mock_restaurants(city: &str) -> Option<&'static [MockRestaurant]> {
    MOCK_RESTAURANTS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, list)| list.as_slice())
}

pub const DINNER_SLOTS: &[&str] = &["18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_codes_resolve_or_degrade() {
        assert_eq!(city_code("Paris"), "PAR");
        assert_eq!(city_code(" new york "), "NYC");
        assert_eq!(city_code("MLE"), "MLE");
        assert_eq!(city_code("Unknownsville"), "UNK");
        assert_eq!(city_code("ab"), "AB");
    }

    #[test]
    fn codes_resolve_to_inventory_cities() {
        assert_eq!(resolve_city("PAR"), "paris");
        assert_eq!(resolve_city("yws"), "whistler");
        assert_eq!(resolve_city("Unknownsville"), "unknownsville");
        assert!(mock_hotels(&resolve_city("DPS")).is_some());
    }

    #[test]
    fn lookups_fall_back_to_defaults() {
        assert_eq!(airline_name("AF"), Some("Air France"));
        assert_eq!(airline_name("ZZ"), None);
        assert_eq!(destination_image("xyz"), DEFAULT_FLIGHT_IMAGE);
        assert_eq!(hotel_image("nowhere"), DEFAULT_HOTEL_IMAGE);
        assert_eq!(cuisine_image("indian"), DEFAULT_RESTAURANT_IMAGE);
        assert_eq!(mock_route("jfk", "cdg").price, 1847);
        assert_eq!(mock_route("BOS", "SEA").airline, "AA");
        assert_eq!(thumbnail(DEFAULT_HOTEL_IMAGE), DEFAULT_HOTEL_IMAGE.replace("w=800", "w=200"));
    }
}
