//! Duty-status entry screen — attaches entries to a selected logsheet.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{
    DutyStatus, EntryDraft, EntryField, EntryRecord, LogsheetRecord, validate_datetime,
    validate_required,
};
use crate::tui::action::Action;
use crate::tui::widgets::form::{Form, FormField, draw_form};

/// Field index for the free-text note.
const NOTE: usize = 0;
/// Field index for the entry start time.
const START_TIME: usize = 1;
/// Field index for the entry end time.
const END_TIME: usize = 2;

/// State for the entry creation screen.
#[derive(Debug, Clone)]
pub struct EntryFormState {
    form: Form,
    status: DutyStatus,
    /// Selector entries: (logsheet id, date label).
    logsheets: Vec<(i64, String)>,
    selected: Option<usize>,
    selection_error: Option<String>,
}

impl EntryFormState {
    /// Creates the entry form seeded from the store's draft defaults.
    pub fn new(draft: &EntryDraft) -> Self {
        Self {
            form: Form::new(
                EntryField::all()
                    .iter()
                    .map(|&f| FormField::with_value(f.label(), f.required(), draft.get(f)))
                    .collect(),
            ),
            status: draft.status,
            logsheets: Vec::new(),
            selected: None,
            selection_error: None,
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Alt+S/L cycle status and logsheet selection forward;
        // Shift+Alt reverses.
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('s') => return self.cycle_status(true),
                KeyCode::Char('l') => return self.cycle_logsheet(true),
                _ => {}
            }
        }
        const ALT_SHIFT: KeyModifiers = KeyModifiers::ALT.union(KeyModifiers::SHIFT);
        if key.modifiers == ALT_SHIFT {
            match key.code {
                KeyCode::Char('S') => return self.cycle_status(false),
                KeyCode::Char('L') => return self.cycle_logsheet(false),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                self.edited()
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                self.edited()
            }
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the currently shown duty status.
    pub fn status(&self) -> DutyStatus {
        self.status
    }

    /// Returns the selected logsheet id, if any.
    pub fn selected_logsheet(&self) -> Option<i64> {
        self.selected.map(|i| self.logsheets[i].0)
    }

    /// Returns the selection error message, if any.
    pub fn selection_error(&self) -> Option<&str> {
        self.selection_error.as_deref()
    }

    /// Refreshes the selector after the logsheet collection changed.
    ///
    /// The collection is append-only, so an existing selection stays valid.
    pub fn sync_logsheets(&mut self, records: &[LogsheetRecord]) {
        self.logsheets = records
            .iter()
            .map(|sheet| (sheet.id, sheet.date.clone()))
            .collect();
        if let Some(i) = self.selected
            && i >= self.logsheets.len()
        {
            self.selected = None;
        }
    }

    /// Re-seeds the form after the store's draft was reset to defaults.
    ///
    /// The logsheet selection is kept for quick consecutive entries.
    pub fn apply_reset(&mut self, draft: &EntryDraft) {
        for (i, &field) in EntryField::all().iter().enumerate() {
            self.form.set_value(i, draft.get(field));
        }
        self.status = draft.status;
        self.form.clear_errors();
        self.form.set_focus(NOTE);
    }

    /// Reports the focused field's new value.
    fn edited(&self) -> Action {
        let field = EntryField::all()[self.form.focus()];
        Action::EditEntry(field, self.form.value(self.form.focus()).to_string())
    }

    /// Cycles the duty status, wrapping around.
    fn cycle_status(&mut self, forward: bool) -> Action {
        self.status = cycle(DutyStatus::all(), self.status, forward);
        Action::SetEntryStatus(self.status)
    }

    /// Cycles the logsheet selection, wrapping around.
    fn cycle_logsheet(&mut self, forward: bool) -> Action {
        if self.logsheets.is_empty() {
            return Action::None;
        }
        let len = self.logsheets.len();
        let next = match self.selected {
            None => 0,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        };
        self.selected = Some(next);
        self.selection_error = None;
        Action::SelectLogsheet(self.logsheets[next].0)
    }

    /// Validates the form and requests submission.
    ///
    /// With no logsheet selected the submission is disallowed outright; no
    /// action leaves this screen.
    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.selection_error = None;

        if self.selected.is_none() {
            self.selection_error = Some("Select a logsheet first (Alt+L)".to_string());
            return Action::None;
        }

        for (i, &field) in EntryField::all().iter().enumerate() {
            let value = self.form.value(i);
            if field.required() {
                if let Err(e) = validate_required(field.label(), value) {
                    self.form.set_error(i, e.to_string());
                } else if let Err(e) = validate_datetime(value) {
                    self.form.set_error(i, e.to_string());
                }
            }
        }

        if self.form.has_errors() {
            return Action::None;
        }
        Action::SubmitEntry
    }
}

/// Cycles through a slice to find the next or previous element.
fn cycle<T: PartialEq + Copy>(items: &[T], current: T, forward: bool) -> T {
    let pos = items.iter().position(|&x| x == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

/// Renders the entry screen: selectors, form, and the most recent entries.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_entry_form(
    state: &EntryFormState,
    entries: &[EntryRecord],
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(" Add Activity Entry ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [selector_area, status_area, form_area, error_area, recent_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(9),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(inner);

    let selector = match state.selected {
        Some(i) => {
            let (id, date) = &state.logsheets[i];
            Line::from(vec![
                Span::styled("Logsheet: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("#{id} - {date}"),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("  (Alt+L cycles)", Style::default().fg(Color::DarkGray)),
            ])
        }
        None => Line::from(Span::styled(
            "Logsheet: none selected  (Alt+L cycles)",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(selector), selector_area);

    let status_line = Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::White)),
        Span::styled(
            state.status().api_str(),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  (Alt+S cycles)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), status_area);

    draw_form(state.form(), frame, form_area);

    if let Some(err) = state.selection_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let mut recent_lines = vec![Line::from(Span::styled(
        format!("Recent Entries ({})", entries.len()),
        Style::default().fg(Color::Cyan),
    ))];
    for entry in entries.iter().rev().take(3) {
        recent_lines.push(Line::from(format!(
            "#{}  {}  {} -> {}  {}",
            entry.id,
            entry.status,
            entry.start_time,
            entry.end_time,
            entry.note.as_deref().unwrap_or(""),
        )));
    }
    frame.render_widget(Paragraph::new(recent_lines), recent_area);

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Enter: add entry  Alt+S/L: status/logsheet  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
