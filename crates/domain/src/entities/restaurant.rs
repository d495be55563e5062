//! Restaurant entity - a candidate for the lunch lottery
//!
//! Restaurants are owned by the backend. The client only ever holds copies:
//! counters are bumped remotely through dedicated increment calls and never
//! written back from here.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{CategoryId, RestaurantId};

/// A geographic point in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A restaurant eligible to be picked by a roll session
///
/// Simple data struct: any combination of counters is a valid snapshot of
/// whatever the backend last reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    /// User-submitted website, may lack a scheme
    #[serde(default)]
    pub url: Option<String>,
    /// Times the restaurant was approved after a roll
    #[serde(default)]
    pub selected_amount: u32,
    /// Times a roll sequence ended on the restaurant
    #[serde(default)]
    pub result_amount: u32,
    /// Times the restaurant was rolled away from without approval
    #[serde(default)]
    pub not_selected_amount: u32,
    #[serde(default, deserialize_with = "category_ids")]
    pub categories: Vec<CategoryId>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Distance from the office in metres, when the backend knows it
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub place_id: Option<String>,
}

impl Restaurant {
    pub fn new(id: impl Into<RestaurantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            selected_amount: 0,
            result_amount: 0,
            not_selected_amount: 0,
            categories: Vec::new(),
            coordinates: None,
            distance: None,
            place_id: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_distance(mut self, metres: f64) -> Self {
        self.distance = Some(metres);
        self
    }

    pub fn has_category(&self, category: &CategoryId) -> bool {
        self.categories.contains(category)
    }

    /// Link target for the website, or `None` when no (non-blank) URL was submitted.
    ///
    /// Addresses without an explicit scheme are made protocol-relative so the
    /// browser does not resolve them against the app's own origin.
    ///
    /// ```
    /// use lunchroll_domain::Restaurant;
    ///
    /// let r = Restaurant::new("1", "Luigi's pizza").with_url("www.pizza.fi");
    /// assert_eq!(r.website_href().as_deref(), Some("//www.pizza.fi"));
    ///
    /// let r = Restaurant::new("2", "Noodle bar").with_url("https://noodles.fi");
    /// assert_eq!(r.website_href().as_deref(), Some("https://noodles.fi"));
    /// ```
    pub fn website_href(&self) -> Option<String> {
        let url = self.url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let has_prefix =
            url.starts_with("https://") || url.starts_with("http://") || url.starts_with("//");
        Some(if has_prefix {
            url.to_string()
        } else {
            format!("//{}", url)
        })
    }

    /// Share of lottery wins that were approved, `None` before the first win.
    pub fn acceptance_ratio(&self) -> Option<f64> {
        if self.result_amount == 0 {
            None
        } else {
            Some(self.selected_amount as f64 / self.result_amount as f64)
        }
    }

    /// Wins that were not rolled away from afterwards.
    pub fn accepted_results(&self) -> i64 {
        self.result_amount as i64 - self.not_selected_amount as i64
    }
}

/// The backend sends categories either as bare ids or populated documents.
fn category_ids<'de, D>(deserializer: D) -> Result<Vec<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CategoryRef {
        Id(CategoryId),
        Populated { id: CategoryId },
    }

    let refs = Option::<Vec<CategoryRef>>::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|r| match r {
            CategoryRef::Id(id) | CategoryRef::Populated { id } => id,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "name": "Luigi's pizza",
            "url": "www.pizza.fi",
            "id": "1",
            "distance": 1000,
            "coordinates": { "latitude": 60.17, "longitude": 24.94 },
            "placeId": "ChIJxZrtjHj2jUYRUnc7prDjZaI",
            "selectedAmount": 2,
            "resultAmount": 5,
            "notSelectedAmount": 1,
            "categories": ["3", { "id": "4", "name": "salads" }]
        }"#;

        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.id, RestaurantId::new("1"));
        assert_eq!(restaurant.distance, Some(1000.0));
        assert_eq!(restaurant.result_amount, 5);
        assert_eq!(
            restaurant.categories,
            vec![CategoryId::new("3"), CategoryId::new("4")]
        );
        assert_eq!(
            restaurant.place_id.as_deref(),
            Some("ChIJxZrtjHj2jUYRUnc7prDjZaI")
        );
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let restaurant: Restaurant =
            serde_json::from_str(r#"{ "id": "9", "name": "Kebab", "categories": null }"#).unwrap();
        assert_eq!(restaurant.selected_amount, 0);
        assert_eq!(restaurant.not_selected_amount, 0);
        assert!(restaurant.categories.is_empty());
        assert!(restaurant.website_href().is_none());
    }

    #[test]
    fn protocol_relative_urls_are_kept() {
        let r = Restaurant::new("1", "A").with_url("//example.com");
        assert_eq!(r.website_href().as_deref(), Some("//example.com"));

        let r = Restaurant::new("1", "A").with_url("   ");
        assert!(r.website_href().is_none());
    }

    #[test]
    fn acceptance_ratio_needs_results() {
        let mut r = Restaurant::new("1", "A");
        assert!(r.acceptance_ratio().is_none());

        r.result_amount = 4;
        r.selected_amount = 1;
        assert_eq!(r.acceptance_ratio(), Some(0.25));
    }
}
