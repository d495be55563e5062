//! Restaurant filter chosen in the randomizer's filter panel

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CategoryId, DomainError, Restaurant};

/// How the selected categories combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Restaurant needs at least one of the categories
    #[default]
    Some,
    /// Restaurant needs every category
    All,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Some => "some",
            Self::All => "all",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "some" => Ok(Self::Some),
            "all" => Ok(Self::All),
            other => Err(DomainError::parse(format!("Unknown filter type: {}", other))),
        }
    }
}

/// Ephemeral filter state. Created with defaults, changed only by user input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    pub match_type: FilterType,
    pub categories: BTreeSet<CategoryId>,
    /// Maximum distance in metres, `None` for anywhere
    pub distance: Option<u32>,
    /// Whether the filter panel is open
    pub visible: bool,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user narrowed the pool down by category.
    pub fn is_picky(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether `restaurant` passes this filter.
    ///
    /// An empty category set matches everything regardless of the match type.
    /// A distance limit excludes restaurants whose distance is unknown.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let category_match = match self.match_type {
            _ if self.categories.is_empty() => true,
            FilterType::Some => self.categories.iter().any(|c| restaurant.has_category(c)),
            FilterType::All => self.categories.iter().all(|c| restaurant.has_category(c)),
        };

        let distance_match = match (self.distance, restaurant.distance) {
            (None, _) => true,
            (Some(limit), Some(distance)) => distance <= limit as f64,
            (Some(_), None) => false,
        };

        category_match && distance_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str) -> CategoryId {
        CategoryId::new(id)
    }

    fn pizza_and_salad() -> Restaurant {
        Restaurant::new("1", "Luigi's")
            .with_categories([cat("pizza"), cat("salad")])
            .with_distance(800.0)
    }

    #[test]
    fn defaults_match_everything() {
        let filter = Filter::new();
        assert_eq!(filter.match_type, FilterType::Some);
        assert!(!filter.visible);
        assert!(!filter.is_picky());
        assert!(filter.matches(&Restaurant::new("x", "Anything")));
    }

    #[test]
    fn some_needs_one_shared_category() {
        let filter = Filter {
            categories: [cat("pizza"), cat("sushi")].into_iter().collect(),
            ..Filter::default()
        };
        assert!(filter.is_picky());
        assert!(filter.matches(&pizza_and_salad()));

        let filter = Filter {
            categories: [cat("sushi")].into_iter().collect(),
            ..Filter::default()
        };
        assert!(!filter.matches(&pizza_and_salad()));
    }

    #[test]
    fn all_needs_every_category() {
        let mut filter = Filter {
            match_type: FilterType::All,
            categories: [cat("pizza"), cat("salad")].into_iter().collect(),
            ..Filter::default()
        };
        assert!(filter.matches(&pizza_and_salad()));

        filter.categories.insert(cat("sushi"));
        assert!(!filter.matches(&pizza_and_salad()));
    }

    #[test]
    fn empty_categories_match_under_all_too() {
        let filter = Filter {
            match_type: FilterType::All,
            ..Filter::default()
        };
        assert!(filter.matches(&pizza_and_salad()));
    }

    #[test]
    fn distance_limit_excludes_far_and_unknown() {
        let filter = Filter {
            distance: Some(500),
            ..Filter::default()
        };
        assert!(!filter.matches(&pizza_and_salad()));
        assert!(!filter.matches(&Restaurant::new("2", "Unknown distance")));

        let filter = Filter {
            distance: Some(800),
            ..Filter::default()
        };
        assert!(filter.matches(&pizza_and_salad()));
    }

    #[test]
    fn toggling_visibility() {
        let mut filter = Filter::new();
        filter.toggle_visible();
        assert!(filter.visible);
        filter.hide();
        assert!(!filter.visible);
    }

    #[test]
    fn filter_type_parses_case_insensitively() {
        assert_eq!("ALL".parse::<FilterType>().unwrap(), FilterType::All);
        assert_eq!(" some ".parse::<FilterType>().unwrap(), FilterType::Some);
        assert!("any".parse::<FilterType>().is_err());
    }
}
