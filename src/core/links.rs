//! Booking deep links.

use crate::utils::format::usd;

/// Concierge number that receives SMS booking requests.
pub const BOOKING_SMS_NUMBER: &str = "+1234567890";

fn sms_link(body: &str) -> String {
    format!(
        "sms://{}?body={}",
        BOOKING_SMS_NUMBER,
        urlencoding::encode(body)
    )
}

pub fn flight_sms_link(origin: &str, destination: &str, price: f64) -> String {
    if price > 0.0 {
        sms_link(&format!("Book {}-{} for {}", origin, destination, usd(price)))
    } else {
        sms_link(&format!("Book {}-{}", origin, destination))
    }
}

pub fn hotel_sms_link(hotel_name: &str, price_per_night: f64) -> String {
    sms_link(&format!("Book {} at {}/night", hotel_name, usd(price_per_night)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_message_body() {
        assert_eq!(
            flight_sms_link("JFK", "CDG", 1847.0),
            "sms://+1234567890?body=Book%20JFK-CDG%20for%20%241%2C847"
        );
        assert!(hotel_sms_link("Ritz Paris", 1200.0).ends_with("%241%2C200%2Fnight"));
    }
}
