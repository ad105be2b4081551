use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How quickly a deal should be acted on. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn from_score(deal_score: u8) -> Self {
        match deal_score {
            9.. => Urgency::Critical,
            7..=8 => Urgency::High,
            5..=6 => Urgency::Medium,
            _ => Urgency::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Amadeus,
    Curated,
    Mock,
    Opentable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Uniform envelope returned by every widget.
///
/// Domain specific keys (`watchedRoutes`, `featuredDestinations`, ...) are
/// flattened into the same object through `extra`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPayload {
    pub widget_type: String,
    pub size: String,
    pub top_item: Value,
    pub all_items: Vec<Value>,
    pub last_updated: String,
    pub next_refresh: String,
    pub refresh_interval: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WidgetPayload {
    /// Builds the envelope from display mappings. `items` must not be empty;
    /// callers substitute a hero item before getting here.
    pub fn new(
        widget_type: &str,
        size: &str,
        items: Vec<Value>,
        refresh_interval_secs: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let top_item = items.first().cloned().unwrap_or(Value::Null);
        Self {
            widget_type: widget_type.to_string(),
            size: size.to_string(),
            top_item,
            all_items: items,
            last_updated: now.to_rfc3339(),
            next_refresh: (now + Duration::seconds(refresh_interval_secs as i64)).to_rfc3339(),
            refresh_interval: refresh_interval_secs,
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_is_monotonic_in_score() {
        let tiers: Vec<Urgency> = (1..=10).map(Urgency::from_score).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(Urgency::from_score(4), Urgency::Low);
        assert_eq!(Urgency::from_score(5), Urgency::Medium);
        assert_eq!(Urgency::from_score(7), Urgency::High);
        assert_eq!(Urgency::from_score(9), Urgency::Critical);
    }

    #[test]
    fn widget_payload_flattens_extras() {
        let now = Utc::now();
        let payload = WidgetPayload::new(
            "flight_deal_tracker",
            "medium_2x2",
            vec![serde_json::json!({"id": "a"})],
            7200,
            now,
        )
        .with_extra("activeAlerts", Value::from(0));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["widgetType"], "flight_deal_tracker");
        assert_eq!(json["topItem"]["id"], "a");
        assert_eq!(json["refreshInterval"], 7200);
        assert_eq!(json["activeAlerts"], 0);
    }
}
