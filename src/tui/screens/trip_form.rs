//! Trip creation screen — the wizard's first step, form beside the route map.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{TripField, validate_required};
use crate::tui::action::Action;
use crate::tui::widgets::form::{Form, FormField, draw_form_grid};
use crate::tui::widgets::map_view::MapView;

/// State for the trip creation screen.
#[derive(Debug, Clone)]
pub struct TripFormState {
    form: Form,
}

impl Default for TripFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl TripFormState {
    /// Creates the trip form with one empty field per [`TripField`].
    pub fn new() -> Self {
        Self {
            form: Form::new(
                TripField::all()
                    .iter()
                    .map(|f| FormField::new(f.label(), f.required()))
                    .collect(),
            ),
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    ///
    /// Every text change is reported as an [`Action::EditTrip`] carrying the
    /// field's full new value, which keeps the store's draft authoritative
    /// and lets location edits trigger a geocode per keystroke.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
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

    /// Reports the focused field's new value.
    fn edited(&self) -> Action {
        let field = TripField::all()[self.form.focus()];
        Action::EditTrip(field, self.form.value(self.form.focus()).to_string())
    }

    /// Validates required fields and requests submission.
    fn submit(&mut self) -> Action {
        self.form.clear_errors();

        for (i, &field) in TripField::all().iter().enumerate() {
            if field.required()
                && let Err(e) = validate_required(field.label(), self.form.value(i))
            {
                self.form.set_error(i, e.to_string());
            }
        }

        if self.form.has_errors() {
            return Action::None;
        }
        Action::SubmitTrip
    }
}

/// Renders the trip creation screen: form on the left, map on the right.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_trip_form(state: &TripFormState, map: &MapView, frame: &mut Frame, area: Rect) {
    let [form_pane, map_pane] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let block = Block::default()
        .title(" Create New Trip ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_pane);
    frame.render_widget(block, form_pane);

    let [form_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(15),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form_grid(state.form(), frame, form_area, 2);

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Enter: create trip  F1-F4: tabs  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    map.draw(frame, map_pane);
}
