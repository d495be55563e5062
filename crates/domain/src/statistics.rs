//! Leaderboards computed from the lottery counters.
//!
//! All rankings are stable: entries that compare equal keep their input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{Category, Restaurant, RestaurantId};

/// Default leaderboard length.
pub const DEFAULT_TOP_N: usize = 5;

/// Restaurants people actually go to once they win: highest approval ratio
/// first, ties broken by the number of wins. Restaurants that never won
/// rank below every restaurant that did.
pub fn top_accepted(restaurants: &[Restaurant], n: usize) -> Vec<Restaurant> {
    let mut ranked = restaurants.to_vec();
    ranked.sort_by(|a, b| {
        compare_ratio(b.acceptance_ratio(), a.acceptance_ratio())
            .then_with(|| b.result_amount.cmp(&a.result_amount))
    });
    ranked.truncate(n);
    ranked
}

/// Restaurants the lottery lands on most often.
pub fn top_results(restaurants: &[Restaurant], n: usize) -> Vec<Restaurant> {
    let mut ranked = restaurants.to_vec();
    ranked.sort_by(|a, b| b.result_amount.cmp(&a.result_amount));
    ranked.truncate(n);
    ranked
}

/// Categories with the most restaurants filed under them.
pub fn biggest_categories(categories: &[Category], n: usize) -> Vec<Category> {
    let mut ranked = categories.to_vec();
    ranked.sort_by(|a, b| b.restaurants.len().cmp(&a.restaurants.len()));
    ranked.truncate(n);
    ranked
}

/// Categories whose restaurants keep their wins: sum of
/// `result_amount - not_selected_amount` over member restaurants.
/// Members missing from `restaurants` contribute nothing.
pub fn top_categories(
    categories: &[Category],
    restaurants: &[Restaurant],
    n: usize,
) -> Vec<Category> {
    let by_id: HashMap<&RestaurantId, &Restaurant> =
        restaurants.iter().map(|r| (&r.id, r)).collect();
    let accepted = |category: &Category| -> i64 {
        category
            .restaurants
            .iter()
            .filter_map(|id| by_id.get(id))
            .map(|r| r.accepted_results())
            .sum()
    };

    let mut ranked: Vec<(i64, &Category)> = categories.iter().map(|c| (accepted(c), c)).collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().take(n).map(|(_, c)| c.clone()).collect()
}

fn compare_ratio(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
