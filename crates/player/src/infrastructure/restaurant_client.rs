//! HTTP client for the restaurant backend

use std::time::Duration;

use async_trait::async_trait;
use lunchroll_domain::{Restaurant, RestaurantId};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::ports::outbound::{MatchQuery, RestaurantPort};
use crate::ports::{CounterUpdateError, ServiceError};

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HttpRestaurantClient {
    client: Client,
    base_url: Url,
}

impl HttpRestaurantClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    /// `GET /api/restaurants/filter?type=..&categories=a,b&distance=..`
    fn matches_url(&self, query: &MatchQuery) -> Result<Url, ServiceError> {
        let mut url = self.endpoint(&["api", "restaurants", "filter"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("type", query.match_type.as_str());
            let categories: Vec<&str> = query.categories.iter().map(|c| c.as_str()).collect();
            pairs.append_pair("categories", &categories.join(","));
            if let Some(distance) = query.distance {
                pairs.append_pair("distance", &distance.to_string());
            }
        }
        Ok(url)
    }

    /// `PUT /api/restaurants/{id}/{counter}`
    fn counter_url(&self, id: &RestaurantId, counter: &str) -> Result<Url, ServiceError> {
        self.endpoint(&["api", "restaurants", id.as_str(), counter])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::Request(format!("Base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn increase(&self, id: RestaurantId, counter: &str) -> Result<(), CounterUpdateError> {
        let url = self.counter_url(&id, counter)?;
        let response = self
            .client
            .put(url)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RestaurantPort for HttpRestaurantClient {
    async fn get_all_matches(&self, query: MatchQuery) -> Result<Vec<Restaurant>, ServiceError> {
        let url = self.matches_url(&query)?;
        tracing::debug!(url = %url, "Fetching matching restaurants");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }

    async fn increase_result_amount(&self, id: RestaurantId) -> Result<(), CounterUpdateError> {
        self.increase(id, "resultAmount").await
    }

    async fn increase_not_selected_amount(
        &self,
        id: RestaurantId,
    ) -> Result<(), CounterUpdateError> {
        self.increase(id, "notSelectedAmount").await
    }

    async fn increase_selected_amount(&self, id: RestaurantId) -> Result<(), CounterUpdateError> {
        self.increase(id, "selectedAmount").await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn ensure_success(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Request(e.to_string()))?;
    Err(server_error(status, &body))
}

/// Prefer the backend's `{"error": ".."}` message, then the raw body, then
/// the status reason.
fn server_error(status: StatusCode, body: &str) -> ServiceError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    ServiceError::Server {
        status: status.as_u16(),
        message,
    }
}
