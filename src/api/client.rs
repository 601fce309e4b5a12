use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{EntryDraft, EntryRecord, LogsheetDraft, LogsheetRecord, TripDraft, TripRecord};

use super::error::ApiError;

/// Client for the fleet backend.
///
/// Endpoints follow the backend's convention of trailing slashes, e.g.
/// `POST {base}/trips/`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("haulog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { http, base_url })
    }

    /// Joins a relative endpoint path onto the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// `POST trips/`: creates a trip from the draft.
    pub async fn create_trip(&self, draft: &TripDraft) -> Result<TripRecord, ApiError> {
        self.post("trips/", draft).await
    }

    /// `GET trips/`: lists all trips.
    pub async fn trips(&self) -> Result<Vec<TripRecord>, ApiError> {
        self.get("trips/").await
    }

    /// `GET trips/{id}/`: fetches one trip.
    pub async fn trip(&self, id: i64) -> Result<TripRecord, ApiError> {
        self.get(&format!("trips/{id}/")).await
    }

    /// `GET trips/{id}/pdf/`: fetches the rendered trip PDF.
    pub async fn trip_pdf(&self, id: i64) -> Result<Bytes, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("trips/{id}/pdf/")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.bytes().await?)
    }

    /// `POST logsheets/`: creates a logsheet for a trip.
    pub async fn create_logsheet(
        &self,
        draft: &LogsheetDraft,
        trip: i64,
    ) -> Result<LogsheetRecord, ApiError> {
        self.post("logsheets/", &draft.payload(trip)).await
    }

    /// `GET logsheets/{id}/`: fetches one logsheet.
    pub async fn logsheet(&self, id: i64) -> Result<LogsheetRecord, ApiError> {
        self.get(&format!("logsheets/{id}/")).await
    }

    /// `POST entries/`: creates a duty-status entry on a logsheet.
    pub async fn create_entry(
        &self,
        draft: &EntryDraft,
        logsheet: i64,
    ) -> Result<EntryRecord, ApiError> {
        self.post("entries/", &draft.payload(logsheet)).await
    }

    /// `PUT entries/{id}/`: replaces an existing entry.
    pub async fn update_entry(
        &self,
        id: i64,
        draft: &EntryDraft,
        logsheet: i64,
    ) -> Result<EntryRecord, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("entries/{id}/")))
            .json(&draft.payload(logsheet))
            .send()
            .await?;
        Self::decode(response).await
    }
}
