//! Display helpers shared by the view models and the messaging formatter.

/// Groups digits in thousands: `1847` -> `1,847`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount: `1847.4` -> `$1,847`.
pub fn usd(amount: f64) -> String {
    format!("${}", thousands(amount.max(0.0).round() as u64))
}

/// Dollar amount with cents: `2743.5` -> `$2,743.50`.
pub fn usd_cents(amount: f64) -> String {
    let cents = (amount.max(0.0) * 100.0).round() as u64;
    format!("${}.{:02}", thousands(cents / 100), cents % 100)
}

/// Capitalizes the first letter of every word, lowercasing the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Truncates to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// URL slug: lowercase, spaces to dashes, apostrophes dropped.
pub fn slug(value: &str) -> String {
    value
        .to_lowercase()
        .replace('\'', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_money() {
        assert_eq!(usd(1847.0), "$1,847");
        assert_eq!(usd(1_234_567.4), "$1,234,567");
        assert_eq!(usd(95.0), "$95");
        assert_eq!(usd_cents(2743.5), "$2,743.50");
        assert_eq!(thousands(2847), "2,847");
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("UNKNOWNSVILLE"), "Unknownsville");
        assert_eq!(title_case("st. regis"), "St. Regis");
    }

    #[test]
    fn slugs_and_truncates() {
        assert_eq!(slug("L'Ambroisie"), "lambroisie");
        assert_eq!(slug("Le Cinq"), "le-cinq");
        assert_eq!(truncate_chars("Four Seasons Hotel George V", 24), "Four Seasons Hotel Georg");
    }
}
