//! Executes wizard commands as tasks on the async runtime.
//!
//! The event loop stays synchronous; every network call runs on the tokio
//! runtime and reports back through the app event channel. Nothing is ever
//! cancelled; a late completion still arrives and the app decides whether
//! it is stale.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use crate::api::ApiClient;
use crate::geo::Geocoder;
use crate::tui::action::{AppEvent, Command};
use crate::tui::error::AppError;

/// Dispatches [`Command`]s onto the runtime and feeds [`AppEvent`]s back.
#[derive(Debug, Clone)]
pub struct Worker {
    handle: tokio::runtime::Handle,
    api: ApiClient,
    geocoder: Geocoder,
    tx: Sender<AppEvent>,
    download_dir: PathBuf,
}

impl Worker {
    /// Creates a worker that spawns onto the given runtime handle.
    pub fn new(
        handle: tokio::runtime::Handle,
        api: ApiClient,
        geocoder: Geocoder,
        tx: Sender<AppEvent>,
    ) -> Self {
        let download_dir = dirs::download_dir()
            .or_else(dirs::data_dir)
            .unwrap_or_else(std::env::temp_dir);
        Self {
            handle,
            api,
            geocoder,
            tx,
            download_dir,
        }
    }

    /// Runs one command in the background.
    ///
    /// Send failures are ignored: they only happen when the event loop has
    /// already shut down.
    pub fn dispatch(&self, command: Command) {
        match command {
            Command::Geocode { slot, seq, query } => {
                let geocoder = self.geocoder.clone();
                let tx = self.tx.clone();
                self.handle.spawn(async move {
                    let coord = geocoder.resolve(&query).await;
                    let _ = tx.send(AppEvent::Geocoded { slot, seq, coord });
                });
            }
            Command::CreateTrip(draft) => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                self.handle.spawn(async move {
                    let result = api.create_trip(&draft).await;
                    let _ = tx.send(AppEvent::TripCreated(result));
                });
            }
            Command::CreateLogsheet { draft, trip } => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                self.handle.spawn(async move {
                    let result = api.create_logsheet(&draft, trip).await;
                    let _ = tx.send(AppEvent::LogsheetCreated(result));
                });
            }
            Command::CreateEntry { draft, logsheet } => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                self.handle.spawn(async move {
                    let result = api.create_entry(&draft, logsheet).await;
                    let _ = tx.send(AppEvent::EntryCreated(result));
                });
            }
            Command::DownloadPdf { trip } => {
                let api = self.api.clone();
                let tx = self.tx.clone();
                let dir = self.download_dir.clone();
                self.handle.spawn(async move {
                    let result = download_pdf(&api, trip, &dir).await;
                    let _ = tx.send(AppEvent::PdfDownloaded(result));
                });
            }
        }
    }
}

/// Fetches a trip's PDF and writes it as `trip-{id}.pdf` in `dir`.
async fn download_pdf(api: &ApiClient, trip: i64, dir: &Path) -> Result<PathBuf, AppError> {
    let bytes = api.trip_pdf(trip).await?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("trip-{trip}.pdf"));
    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn geocode_of_blank_query_reports_absent() {
        let (tx, rx) = mpsc::channel();
        let worker = Worker::new(
            tokio::runtime::Handle::current(),
            ApiClient::new("http://127.0.0.1:0/api/").unwrap(),
            Geocoder::new("http://127.0.0.1:0").unwrap(),
            tx,
        );

        worker.dispatch(Command::Geocode {
            slot: crate::geo::LocationSlot::Pickup,
            seq: 1,
            query: "  ".to_string(),
        });

        // The blank query resolves without any network round trip.
        let event = rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        match event {
            AppEvent::Geocoded { slot, seq, coord } => {
                assert_eq!(slot, crate::geo::LocationSlot::Pickup);
                assert_eq!(seq, 1);
                assert_eq!(coord, None);
            }
            other => panic!("expected Geocoded, got {other:?}"),
        }
    }
}
