//! Deal scoring on the shared 1-10 scale.

use crate::domain::flight::CabinClass;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Score at or above which a result advertises savings and an original price.
pub const SAVINGS_THRESHOLD: u8 = 7;

pub const FLIGHT_SAVINGS_PERCENT: u32 = 26;
pub const FLIGHT_ORIGINAL_MARKUP: f64 = 1.35;
pub const HOTEL_SAVINGS_PERCENT: u32 = 20;
pub const HOTEL_ORIGINAL_MARKUP: f64 = 1.25;

/// Score at or above which a flight deal gets an expiry timestamp.
pub const EXPIRY_THRESHOLD: u8 = 8;
/// Score at or above which a flight deal is flagged as a mistake fare.
pub const MISTAKE_FARE_THRESHOLD: u8 = 9;

/// Cabin price thresholds: (excellent, good, average), inclusive upper bounds.
fn cabin_thresholds(cabin: CabinClass) -> (f64, f64, f64) {
    match cabin {
        CabinClass::Economy => (400.0, 600.0, 900.0),
        CabinClass::PremiumEconomy => (800.0, 1200.0, 1800.0),
        CabinClass::Business => (2000.0, 3000.0, 4500.0),
        CabinClass::First => (4000.0, 6000.0, 9000.0),
    }
}

fn clamp_score(raw: f64) -> u8 {
    // Truncate toward zero first, then clamp.
    let truncated = raw.trunc();
    truncated.clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8
}

pub fn flight_deal_score(price: f64, cabin: CabinClass, stops: u32) -> u8 {
    let (excellent, good, average) = cabin_thresholds(cabin);
    let base = if price <= excellent {
        9.0
    } else if price <= good {
        7.0
    } else if price <= average {
        5.0
    } else {
        3.0
    };
    clamp_score(base - 0.5 * stops as f64)
}

pub fn hotel_deal_score(price_per_night: f64, rating: f64) -> u8 {
    let price_score = if price_per_night <= 300.0 {
        9.0
    } else if price_per_night <= 500.0 {
        7.0
    } else if price_per_night <= 800.0 {
        5.0
    } else {
        3.0
    };
    let rating_bonus = if rating >= 4.0 { (rating - 4.0) * 2.0 } else { 0.0 };
    clamp_score(price_score + rating_bonus)
}

/// Adds `boost` to an existing score without leaving the 1-10 scale.
pub fn boosted(score: u8, boost: u8) -> u8 {
    score.saturating_add(boost).clamp(MIN_SCORE, MAX_SCORE)
}

/// Savings percent and marked-up original price, both present only for good deals.
pub fn savings(deal_score: u8, price: f64, percent: u32, markup: f64) -> (Option<u32>, Option<f64>) {
    if deal_score >= SAVINGS_THRESHOLD {
        (Some(percent), Some(price * markup))
    } else {
        (None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_scores_follow_cabin_thresholds() {
        assert_eq!(flight_deal_score(1847.0, CabinClass::Business, 0), 9);
        assert_eq!(flight_deal_score(2000.0, CabinClass::Business, 0), 9);
        assert_eq!(flight_deal_score(2500.0, CabinClass::Business, 0), 7);
        assert_eq!(flight_deal_score(4000.0, CabinClass::Business, 0), 5);
        assert_eq!(flight_deal_score(8000.0, CabinClass::Business, 0), 3);
        assert_eq!(flight_deal_score(350.0, CabinClass::Economy, 0), 9);
        assert_eq!(flight_deal_score(5000.0, CabinClass::First, 0), 7);
        assert_eq!(flight_deal_score(1000.0, CabinClass::PremiumEconomy, 0), 7);
    }

    #[test]
    fn stops_reduce_flight_score_and_truncate() {
        // 9 - 0.5 = 8.5 -> 8
        assert_eq!(flight_deal_score(1500.0, CabinClass::Business, 1), 8);
        // 3 - 2.5 = 0.5 -> 0 -> clamped to 1
        assert_eq!(flight_deal_score(9000.0, CabinClass::Business, 5), 1);
        assert_eq!(flight_deal_score(9000.0, CabinClass::Business, 40), 1);
    }

    #[test]
    fn hotel_score_adds_rating_bonus() {
        // 5 + 1.8 = 6.8 -> 6
        assert_eq!(hotel_deal_score(750.0, 4.9), 6);
        // 9 + 2 = 11 -> 10
        assert_eq!(hotel_deal_score(250.0, 5.0), 10);
        assert_eq!(hotel_deal_score(450.0, 3.5), 7);
        assert_eq!(hotel_deal_score(1200.0, 4.0), 3);
    }

    #[test]
    fn scores_stay_on_scale() {
        for price in [0.0, 150.0, 399.0, 650.0, 1999.0, 4500.0, 12000.0] {
            for stops in 0..6 {
                for cabin in [
                    CabinClass::Economy,
                    CabinClass::PremiumEconomy,
                    CabinClass::Business,
                    CabinClass::First,
                ] {
                    let s = flight_deal_score(price, cabin, stops);
                    assert!((MIN_SCORE..=MAX_SCORE).contains(&s));
                }
            }
            for rating in [0.0, 3.9, 4.0, 4.5, 5.0] {
                let s = hotel_deal_score(price, rating);
                assert!((MIN_SCORE..=MAX_SCORE).contains(&s));
            }
        }
        assert_eq!(boosted(10, 1), 10);
        assert_eq!(boosted(6, 1), 7);
    }

    #[test]
    fn savings_and_original_price_co_occur() {
        assert_eq!(savings(6, 100.0, 26, 1.35), (None, None));
        let (pct, original) = savings(7, 100.0, 26, 1.35);
        assert_eq!(pct, Some(26));
        assert!((original.unwrap() - 135.0).abs() < 1e-9);
    }
}
