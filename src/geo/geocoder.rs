//! Free-text location lookup against a Nominatim-compatible endpoint.

use serde::Deserialize;

use crate::api::ApiError;

use super::Coordinate;

/// One candidate match from the search endpoint.
///
/// The service reports latitude and longitude as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchHit {
    lat: String,
    lon: String,
}

/// Converts free-text locations into coordinates.
///
/// One lookup request per call: no debouncing, no retries, no caching.
/// Failures are logged and swallowed: an unresolvable location simply has
/// no marker on the map and never blocks form submission.
#[derive(Debug, Clone)]
pub struct Geocoder {
    http: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    /// Creates a geocoder for the given search endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("haulog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Resolves a location string to a coordinate.
    ///
    /// Blank input returns `None` without touching the network. Zero
    /// matches, transport errors, and malformed responses all resolve to
    /// `None`; errors are logged, never surfaced.
    pub async fn resolve(&self, query: &str) -> Option<Coordinate> {
        if query.trim().is_empty() {
            return None;
        }
        match self.lookup(query).await {
            Ok(coord) => coord,
            Err(e) => {
                tracing::warn!(query, error = %e, "geocoding failed");
                None
            }
        }
    }

    async fn lookup(&self, query: &str) -> Result<Option<Coordinate>, ApiError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        let hits: Vec<SearchHit> = response.json().await?;
        Ok(first_coordinate(&hits))
    }
}

/// Picks the first candidate with parseable coordinates.
pub(crate) fn first_coordinate(hits: &[SearchHit]) -> Option<Coordinate> {
    let hit = hits.first()?;
    let lat = hit.lat.parse().ok()?;
    let lon = hit.lon.parse().ok()?;
    Some(Coordinate::new(lat, lon))
}
