//! Top-level application: wizard shell, submission control, event loop.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::geo::Coordinate;
use crate::tui::action::{Action, AppEvent, Command};
use crate::tui::error::AppError;
use crate::tui::screens::{
    EntryFormState, LogsheetFormState, TripFormState, dashboard, draw_dashboard, draw_entry_form,
    draw_logsheet_form, draw_trip_form,
};
use crate::tui::state::{Step, StatusKind, WizardState};
use crate::tui::widgets::map_view::MapView;
use crate::tui::widgets::status_bar::draw_status_bar;
use crate::tui::widgets::tabs::{TabBarContext, draw_tab_bar};
use crate::tui::worker::Worker;

/// How long the event loop waits for input before running a tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Top-level application state.
pub struct App {
    state: WizardState,
    trip_form: TripFormState,
    logsheet_form: LogsheetFormState,
    entry_form: EntryFormState,
    map: MapView,
    /// Last resolved coordinate per location slot, in route order.
    coords: [Option<Coordinate>; 3],
    /// Latest geocode request sequence per slot; older completions are
    /// stale and dropped.
    geocode_seq: [u64; 3],
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the app on the Trip step with an initialized map surface.
    pub fn new() -> Self {
        let state = WizardState::new();
        let logsheet_form = LogsheetFormState::new(state.logsheet_draft());
        let entry_form = EntryFormState::new(state.entry_draft());
        let mut map = MapView::new();
        map.initialize();

        Self {
            state,
            trip_form: TripFormState::new(),
            logsheet_form,
            entry_form,
            map,
            coords: [None; 3],
            geocode_seq: [0; 3],
            should_quit: false,
        }
    }

    /// Main event loop: draw → poll input → drain completions → tick.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        worker: &Worker,
        events: &Receiver<AppEvent>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(TICK_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                for command in self.handle_key(key) {
                    worker.dispatch(command);
                }
            }

            while let Ok(event) = events.try_recv() {
                self.apply_event(event);
            }

            self.state.tick(Instant::now());
        }
        self.map.dispose();
        Ok(())
    }

    /// Renders the tab bar, status line, and the active step's screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [tabs_area, status_area, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(frame.area());

        let ctx = TabBarContext {
            active: self.state.step(),
            trip_exists: self.state.trip().is_some(),
            has_logsheets: !self.state.logsheets().is_empty(),
        };
        draw_tab_bar(&ctx, frame, tabs_area);
        draw_status_bar(
            self.state.status(),
            self.state.is_loading(),
            frame,
            status_area,
        );

        match self.state.step() {
            Step::Trip => draw_trip_form(&self.trip_form, &self.map, frame, body),
            Step::Logsheets => {
                draw_logsheet_form(&self.logsheet_form, self.state.logsheets(), frame, body);
            }
            Step::Entries => draw_entry_form(&self.entry_form, self.state.entries(), frame, body),
            Step::Dashboard => draw_dashboard(&self.state, frame, body),
        }
    }

    /// Handles a key event: global keys first, then the active screen.
    ///
    /// Returns the asynchronous commands the event produced.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        match key.code {
            // Tab jumps go through the guarded step setter: a locked tab's
            // key is simply inert.
            KeyCode::F(1) => return self.apply_action(Action::Navigate(Step::Trip)),
            KeyCode::F(2) => return self.apply_action(Action::Navigate(Step::Logsheets)),
            KeyCode::F(3) => return self.apply_action(Action::Navigate(Step::Entries)),
            KeyCode::F(4) => return self.apply_action(Action::Navigate(Step::Dashboard)),
            KeyCode::Esc => return self.apply_action(Action::Quit),
            _ => {}
        }

        let action = match self.state.step() {
            Step::Trip => self.trip_form.handle_key(key),
            Step::Logsheets => self.logsheet_form.handle_key(key),
            Step::Entries => self.entry_form.handle_key(key),
            Step::Dashboard => dashboard::handle_key(key),
        };
        self.apply_action(action)
    }

    /// Applies a screen action to the wizard state.
    pub fn apply_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::None => Vec::new(),
            Action::Navigate(step) => {
                self.state.set_step(step);
                Vec::new()
            }
            Action::EditTrip(field, value) => {
                self.state.set_trip_field(field, value.clone());
                match field.location_slot() {
                    Some(slot) => {
                        let index = slot.index();
                        self.geocode_seq[index] += 1;
                        vec![Command::Geocode {
                            slot,
                            seq: self.geocode_seq[index],
                            query: value,
                        }]
                    }
                    None => Vec::new(),
                }
            }
            Action::EditLogsheet(field, value) => {
                self.state.set_logsheet_field(field, value);
                Vec::new()
            }
            Action::EditEntry(field, value) => {
                self.state.set_entry_field(field, value);
                Vec::new()
            }
            Action::SetEntryStatus(status) => {
                self.state.set_entry_status(status);
                Vec::new()
            }
            Action::SelectLogsheet(id) => {
                self.state.select_logsheet(id);
                Vec::new()
            }
            Action::SubmitTrip => self.submit_trip(),
            Action::SubmitLogsheet => self.submit_logsheet(),
            Action::SubmitEntry => self.submit_entry(),
            Action::DownloadPdf => self.download_pdf(),
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
        }
    }

    /// Applies a completed asynchronous operation.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Geocoded { slot, seq, coord } => {
                if seq != self.geocode_seq[slot.index()] {
                    // A newer lookup for this slot is already in flight.
                    return;
                }
                self.coords[slot.index()] = coord;
                self.map
                    .redraw(self.coords[0], self.coords[1], self.coords[2]);
            }
            AppEvent::TripCreated(result) => {
                self.state.set_loading(false);
                match result {
                    Ok(record) => {
                        self.state.set_status(
                            StatusKind::Success,
                            format!(
                                "Trip created successfully! Trip ID: {}. Now add logsheets.",
                                record.id
                            ),
                        );
                        self.state.set_trip(record);
                        self.state.set_step(Step::Logsheets);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "trip creation failed");
                        self.state.set_status(
                            StatusKind::Error,
                            "Error creating trip. Please check your information and try again.",
                        );
                    }
                }
            }
            AppEvent::LogsheetCreated(result) => {
                self.state.set_loading(false);
                match result {
                    Ok(record) => {
                        self.state.set_status(
                            StatusKind::Success,
                            format!(
                                "Logsheet added successfully! Logsheet ID: {}. You can now add entries.",
                                record.id
                            ),
                        );
                        self.state.append_logsheet(record);
                        self.state.reset_logsheet_draft();
                        self.logsheet_form.apply_reset(self.state.logsheet_draft());
                        self.entry_form.sync_logsheets(self.state.logsheets());
                        self.state.set_step(Step::Entries);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "logsheet creation failed");
                        self.state.set_status(
                            StatusKind::Error,
                            "Error creating logsheet. Please check your information and try again.",
                        );
                    }
                }
            }
            AppEvent::EntryCreated(result) => {
                self.state.set_loading(false);
                match result {
                    Ok(record) => {
                        self.state.set_status(
                            StatusKind::Success,
                            format!("Entry added successfully! Entry ID: {}", record.id),
                        );
                        self.state.append_entry(record);
                        self.state.reset_entry_draft();
                        self.entry_form.apply_reset(self.state.entry_draft());
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "entry creation failed");
                        self.state.set_status(
                            StatusKind::Error,
                            "Error creating entry. Please check your information and try again.",
                        );
                    }
                }
            }
            AppEvent::PdfDownloaded(result) => match result {
                Ok(path) => {
                    self.state
                        .set_status(StatusKind::Success, format!("PDF saved to {}", path.display()));
                }
                Err(e) => {
                    tracing::error!(error = %e, "trip PDF download failed");
                    self.state
                        .set_status(StatusKind::Error, "Error downloading trip PDF. Please try again.");
                }
            },
        }
    }

    /// Returns the wizard state.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Returns the map view.
    pub fn map(&self) -> &MapView {
        &self.map
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Starts a trip submission unless one is already outstanding.
    fn submit_trip(&mut self) -> Vec<Command> {
        if self.state.is_loading() {
            return Vec::new();
        }
        self.state.set_loading(true);
        vec![Command::CreateTrip(self.state.trip_draft().clone())]
    }

    /// Starts a logsheet submission; requires a confirmed trip.
    fn submit_logsheet(&mut self) -> Vec<Command> {
        if self.state.is_loading() {
            return Vec::new();
        }
        let Some(trip) = self.state.trip() else {
            self.state
                .set_status(StatusKind::Error, "Please create a trip first!");
            return Vec::new();
        };
        let trip = trip.id;
        self.state.set_loading(true);
        vec![Command::CreateLogsheet {
            draft: self.state.logsheet_draft().clone(),
            trip,
        }]
    }

    /// Starts an entry submission; the screen guarantees a selection, but a
    /// missing one is silently refused here as well.
    fn submit_entry(&mut self) -> Vec<Command> {
        if self.state.is_loading() {
            return Vec::new();
        }
        let Some(logsheet) = self.state.entry_draft().logsheet else {
            return Vec::new();
        };
        self.state.set_loading(true);
        vec![Command::CreateEntry {
            draft: self.state.entry_draft().clone(),
            logsheet,
        }]
    }

    /// Requests the active trip's PDF.
    fn download_pdf(&mut self) -> Vec<Command> {
        match self.state.trip() {
            Some(trip) => vec![Command::DownloadPdf { trip: trip.id }],
            None => Vec::new(),
        }
    }
}
