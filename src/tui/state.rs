//! Wizard state store: drafts, record collections, step gating, status.

use std::time::{Duration, Instant};

use crate::model::{
    DutyStatus, EntryDraft, EntryField, EntryRecord, LogsheetDraft, LogsheetField, LogsheetRecord,
    TripDraft, TripField, TripRecord,
};

/// How long a status message stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

/// The four wizard steps, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Trip creation form plus the route map.
    Trip,
    /// Logsheet creation form for the active trip.
    Logsheets,
    /// Duty-status entry form for a selected logsheet.
    Entries,
    /// Read-only trip overview.
    Dashboard,
}

static ALL_STEPS: &[Step] = &[Step::Trip, Step::Logsheets, Step::Entries, Step::Dashboard];

impl Step {
    /// Returns all steps in tab order.
    pub fn all() -> &'static [Step] {
        ALL_STEPS
    }

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trip => "Trip",
            Self::Logsheets => "Logsheets",
            Self::Entries => "Entries",
            Self::Dashboard => "Dashboard",
        }
    }
}

/// Whether a status message reports success or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A transient status message; success and error are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    expires_at: Instant,
}

/// Exclusive owner of the wizard's drafts, record collections, step, and
/// transient UI state.
#[derive(Debug, Clone)]
pub struct WizardState {
    trip_draft: TripDraft,
    logsheet_draft: LogsheetDraft,
    entry_draft: EntryDraft,
    trip: Option<TripRecord>,
    logsheets: Vec<LogsheetRecord>,
    entries: Vec<EntryRecord>,
    step: Step,
    status: Option<StatusMessage>,
    loading: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Creates the initial state: empty drafts, no records, Trip step.
    pub fn new() -> Self {
        Self {
            trip_draft: TripDraft::default(),
            logsheet_draft: LogsheetDraft::new(),
            entry_draft: EntryDraft::new(),
            trip: None,
            logsheets: Vec::new(),
            entries: Vec::new(),
            step: Step::Trip,
            status: None,
            loading: false,
        }
    }

    // --- Drafts ---

    /// Returns the trip draft.
    pub fn trip_draft(&self) -> &TripDraft {
        &self.trip_draft
    }

    /// Returns the logsheet draft.
    pub fn logsheet_draft(&self) -> &LogsheetDraft {
        &self.logsheet_draft
    }

    /// Returns the entry draft.
    pub fn entry_draft(&self) -> &EntryDraft {
        &self.entry_draft
    }

    /// Replaces one trip draft field (last-write-wins).
    pub fn set_trip_field(&mut self, field: TripField, value: impl Into<String>) {
        self.trip_draft.set(field, value);
    }

    /// Replaces one logsheet draft field (last-write-wins).
    pub fn set_logsheet_field(&mut self, field: LogsheetField, value: impl Into<String>) {
        self.logsheet_draft.set(field, value);
    }

    /// Replaces one entry draft text field (last-write-wins).
    pub fn set_entry_field(&mut self, field: EntryField, value: impl Into<String>) {
        self.entry_draft.set(field, value);
    }

    /// Sets the entry draft's duty status.
    pub fn set_entry_status(&mut self, status: DutyStatus) {
        self.entry_draft.status = status;
    }

    /// Selects the logsheet the next entry will attach to.
    pub fn select_logsheet(&mut self, id: i64) {
        self.entry_draft.logsheet = Some(id);
    }

    /// Resets the logsheet draft back to defaults.
    pub fn reset_logsheet_draft(&mut self) {
        self.logsheet_draft = LogsheetDraft::new();
    }

    /// Resets the entry draft back to defaults (status Driving, times now),
    /// keeping the logsheet selection for quick consecutive entries.
    pub fn reset_entry_draft(&mut self) {
        let logsheet = self.entry_draft.logsheet;
        self.entry_draft = EntryDraft::new();
        self.entry_draft.logsheet = logsheet;
    }

    // --- Records ---

    /// Returns the confirmed trip, if one was created.
    pub fn trip(&self) -> Option<&TripRecord> {
        self.trip.as_ref()
    }

    /// Stores the confirmed trip record.
    pub fn set_trip(&mut self, record: TripRecord) {
        self.trip = Some(record);
    }

    /// Returns the logsheet records in creation order.
    pub fn logsheets(&self) -> &[LogsheetRecord] {
        &self.logsheets
    }

    /// Appends a confirmed logsheet (creation order is never reordered).
    pub fn append_logsheet(&mut self, record: LogsheetRecord) {
        self.logsheets.push(record);
    }

    /// Returns the entry records in creation order.
    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    /// Appends a confirmed entry.
    pub fn append_entry(&mut self, record: EntryRecord) {
        self.entries.push(record);
    }

    // --- Step gating ---

    /// Returns the current step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Whether a step's tab can currently be visited.
    pub fn step_unlocked(&self, step: Step) -> bool {
        match step {
            Step::Trip => true,
            Step::Logsheets | Step::Dashboard => self.trip.is_some(),
            Step::Entries => !self.logsheets.is_empty(),
        }
    }

    /// Changes the current step; silently keeps the old step when the
    /// target is still locked.
    pub fn set_step(&mut self, step: Step) {
        if self.step_unlocked(step) {
            self.step = step;
        }
    }

    // --- Status & loading ---

    /// Returns the current status message, if one is showing.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Shows a status message for [`STATUS_TTL`] from now.
    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.set_status_at(kind, text, Instant::now());
    }

    /// Shows a status message for [`STATUS_TTL`] from `now`.
    ///
    /// A newer message supersedes the previous one and its deadline; there
    /// is never more than one pending clear.
    pub fn set_status_at(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
            expires_at: now + STATUS_TTL,
        });
    }

    /// Clears the status message once its deadline has passed.
    ///
    /// Driven by the event-loop tick.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .status
            .as_ref()
            .is_some_and(|status| now >= status.expires_at);
        if expired {
            self.status = None;
        }
    }

    /// Returns `true` while a submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Toggles the submission-in-flight flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
