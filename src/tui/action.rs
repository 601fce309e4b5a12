//! Actions, commands, and completion events flowing through the wizard.

use std::path::PathBuf;

use crate::api::ApiError;
use crate::geo::{Coordinate, LocationSlot};
use crate::model::{
    DutyStatus, EntryDraft, EntryField, EntryRecord, LogsheetDraft, LogsheetField, LogsheetRecord,
    TripDraft, TripField, TripRecord,
};
use crate::tui::error::AppError;
use crate::tui::state::Step;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update the wizard state, navigate between
/// steps, and issue asynchronous [`Command`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given step, subject to tab gating.
    Navigate(Step),
    /// Replace one trip draft field with its new full value.
    EditTrip(TripField, String),
    /// Replace one logsheet draft field with its new full value.
    EditLogsheet(LogsheetField, String),
    /// Replace one entry draft text field with its new full value.
    EditEntry(EntryField, String),
    /// Set the entry draft's duty status.
    SetEntryStatus(DutyStatus),
    /// Select the logsheet the next entry attaches to.
    SelectLogsheet(i64),
    /// Submit the trip draft.
    SubmitTrip,
    /// Submit the logsheet draft for the active trip.
    SubmitLogsheet,
    /// Submit the entry draft for the selected logsheet.
    SubmitEntry,
    /// Download the active trip's PDF.
    DownloadPdf,
    /// Quit the application.
    Quit,
}

/// Asynchronous work the app hands to the [`Worker`](super::Worker).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Resolve a location string for one map slot.
    Geocode {
        slot: LocationSlot,
        /// Monotonic per-slot sequence; stale completions are dropped.
        seq: u64,
        query: String,
    },
    /// `POST trips/` with the given draft.
    CreateTrip(TripDraft),
    /// `POST logsheets/` with the draft and trip foreign key.
    CreateLogsheet { draft: LogsheetDraft, trip: i64 },
    /// `POST entries/` with the draft and logsheet foreign key.
    CreateEntry { draft: EntryDraft, logsheet: i64 },
    /// Fetch and save the trip PDF.
    DownloadPdf { trip: i64 },
}

/// A completed asynchronous operation, delivered back to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A geocode lookup finished (`None` when unresolvable).
    Geocoded {
        slot: LocationSlot,
        seq: u64,
        coord: Option<Coordinate>,
    },
    /// `POST trips/` finished.
    TripCreated(Result<TripRecord, ApiError>),
    /// `POST logsheets/` finished.
    LogsheetCreated(Result<LogsheetRecord, ApiError>),
    /// `POST entries/` finished.
    EntryCreated(Result<EntryRecord, ApiError>),
    /// The trip PDF was fetched and written (or not).
    PdfDownloaded(Result<PathBuf, AppError>),
}
