//! Dashboard screen — read-only overview of the active trip.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::LogsheetRecord;
use crate::tui::action::Action;
use crate::tui::state::WizardState;

/// Placeholder route figures; no routing engine is wired up.
const EST_DISTANCE: &str = "1,250 mi";
const EST_FUEL_COST: &str = "$538";

/// Handles a key event on the dashboard.
pub fn handle_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('p') => Action::DownloadPdf,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

/// Per-status hour totals summed over all logsheet records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HourTotals {
    pub driving: f64,
    pub on_duty: f64,
    pub off_duty: f64,
    pub sleeper: f64,
}

impl HourTotals {
    /// Sums the hour columns of the given logsheets.
    pub fn sum(logsheets: &[LogsheetRecord]) -> Self {
        logsheets.iter().fold(Self::default(), |acc, sheet| Self {
            driving: acc.driving + sheet.driving_hours,
            on_duty: acc.on_duty + sheet.on_duty_hours,
            off_duty: acc.off_duty + sheet.off_duty_hours,
            sleeper: acc.sleeper + sheet.sleeper_hours,
        })
    }

    /// Total hours across all statuses.
    pub fn total(&self) -> f64 {
        self.driving + self.on_duty + self.off_duty + self.sleeper
    }
}

/// Renders the dashboard: trip summary, hour totals, and record tables.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_dashboard(state: &WizardState, frame: &mut Frame, area: Rect) {
    let Some(trip) = state.trip() else {
        // Unreachable through tab gating, but render something sensible.
        let notice = Paragraph::new("Create a trip first.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(notice, area);
        return;
    };

    let block = Block::default()
        .title(format!(" Trip Dashboard - Trip #{} ", trip.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [summary_area, stats_area, sheets_area, entries_area, footer_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(2),
        Constraint::Min(4),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(inner);

    let details = &trip.details;
    let white = Style::default().fg(Color::White);
    let dim = Style::default().fg(Color::DarkGray);
    let summary = vec![
        Line::from(vec![
            Span::styled("Route: ", dim),
            Span::styled(
                format!(
                    "{} -> {} -> {}",
                    details.current_location, details.pickup_location, details.dropoff_location
                ),
                white,
            ),
        ]),
        Line::from(vec![
            Span::styled("Carrier: ", dim),
            Span::styled(details.carrier_name.clone(), white),
        ]),
        Line::from(vec![
            Span::styled("Equipment: ", dim),
            Span::styled(
                format!(
                    "tractor {}  trailer {}  plate {}",
                    details.tractor_number, details.trailer_number, details.license_plate
                ),
                white,
            ),
        ]),
        Line::from(vec![
            Span::styled("Est. distance: ", dim),
            Span::styled(EST_DISTANCE, white),
            Span::styled("   Est. fuel: ", dim),
            Span::styled(EST_FUEL_COST, white),
        ]),
    ];
    frame.render_widget(Paragraph::new(summary), summary_area);

    let totals = HourTotals::sum(state.logsheets());
    let hours_left = state
        .logsheets()
        .last()
        .map_or(0.0, |sheet| sheet.hours_left_in_cycle);
    let stats = Line::from(Span::styled(
        format!(
            "Logsheets: {}   Entries: {}   Driving: {:.1}h   Total: {:.1}h   Hours left in cycle: {:.1}",
            state.logsheets().len(),
            state.entries().len(),
            totals.driving,
            totals.total(),
            hours_left,
        ),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(Paragraph::new(stats), stats_area);

    let sheet_rows: Vec<Row> = state
        .logsheets()
        .iter()
        .map(|sheet| {
            Row::new(vec![
                format!("#{}", sheet.id),
                sheet.date.clone(),
                format!("{:.1}", sheet.driving_hours),
                format!("{:.1}", sheet.on_duty_hours),
                format!("{:.1}", sheet.off_duty_hours),
                format!("{:.1}", sheet.sleeper_hours),
            ])
        })
        .collect();
    let sheets = Table::new(
        sheet_rows,
        [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["ID", "Date", "Driving", "On Duty", "Off Duty", "Sleeper"])
            .style(Style::default().fg(Color::Cyan)),
    )
    .block(
        Block::default()
            .title(format!(" Logsheets ({}) ", state.logsheets().len()))
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(sheets, sheets_area);

    let entry_rows: Vec<Row> = state
        .entries()
        .iter()
        .map(|entry| {
            Row::new(vec![
                format!("#{}", entry.id),
                format!("#{}", entry.logsheet),
                entry.status.to_string(),
                format!("{} -> {}", entry.start_time, entry.end_time),
                entry.note.clone().unwrap_or_default(),
            ])
        })
        .collect();
    let entries = Table::new(
        entry_rows,
        [
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(36),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["ID", "Logsheet", "Status", "Window", "Note"])
            .style(Style::default().fg(Color::Cyan)),
    )
    .block(
        Block::default()
            .title(format!(" Entries ({}) ", state.entries().len()))
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(entries, entries_area);

    let footer = Paragraph::new(Line::from("p: download trip PDF  F1-F4: tabs  q/Esc: quit"))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn logsheet(id: i64, driving: f64, on_duty: f64) -> LogsheetRecord {
        serde_json::from_str(&format!(
            r#"{{"id": {id}, "trip": 1, "date": "2024-01-01",
                 "driving_hours": {driving}, "on_duty_hours": {on_duty},
                 "hours_left_in_cycle": 63.0}}"#
        ))
        .unwrap()
    }

    #[test]
    fn p_requests_pdf_download() {
        assert_eq!(handle_key(press(KeyCode::Char('p'))), Action::DownloadPdf);
    }

    #[test]
    fn q_quits() {
        assert_eq!(handle_key(press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn other_keys_are_inert() {
        assert_eq!(handle_key(press(KeyCode::Char('x'))), Action::None);
        assert_eq!(handle_key(press(KeyCode::Enter)), Action::None);
    }

    #[test]
    fn hour_totals_sum_across_logsheets() {
        let sheets = vec![logsheet(10, 5.0, 2.0), logsheet(11, 3.0, 1.5)];
        let totals = HourTotals::sum(&sheets);
        assert_eq!(totals.driving, 8.0);
        assert_eq!(totals.on_duty, 3.5);
        assert_eq!(totals.total(), 11.5);
    }

    #[test]
    fn hour_totals_of_nothing_are_zero() {
        let totals = HourTotals::sum(&[]);
        assert_eq!(totals.total(), 0.0);
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use crate::model::TripRecord;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render(state: &WizardState) -> String {
            let backend = TestBackend::new(100, 30);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_dashboard(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        fn trip(id: i64) -> TripRecord {
            serde_json::from_str(&format!(
                r#"{{"id": {id}, "current_location": "Denver, CO",
                     "pickup_location": "Chicago, IL",
                     "dropoff_location": "New York, NY",
                     "carrier_name": "Acme Freight"}}"#
            ))
            .unwrap()
        }

        #[test]
        fn renders_trip_summary_and_stats() {
            let mut state = WizardState::new();
            state.set_trip(trip(1));
            state.append_logsheet(logsheet(10, 5.0, 2.0));

            let output = render(&state);
            assert!(output.contains("Trip Dashboard - Trip #1"));
            assert!(output.contains("Denver, CO -> Chicago, IL -> New York, NY"));
            assert!(output.contains("Acme Freight"));
            assert!(output.contains("Logsheets: 1"));
            assert!(output.contains("Driving: 5.0h"));
            assert!(output.contains("Hours left in cycle: 63.0"));
        }

        #[test]
        fn renders_placeholder_route_figures() {
            let mut state = WizardState::new();
            state.set_trip(trip(1));
            let output = render(&state);
            assert!(output.contains(EST_DISTANCE));
            assert!(output.contains(EST_FUEL_COST));
        }

        #[test]
        fn renders_notice_without_a_trip() {
            let state = WizardState::new();
            let output = render(&state);
            assert!(output.contains("Create a trip first."));
        }
    }
}
