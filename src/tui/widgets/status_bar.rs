//! Status bar widget — one-line transient feedback under the tab bar.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{StatusKind, StatusMessage};

/// Renders the transient status line.
///
/// While a submission is outstanding the loading notice wins; otherwise the
/// current status message is shown (green for success, red for error).
/// Renders nothing when idle with no message.
#[mutants::skip]
pub fn draw_status_bar(
    status: Option<&StatusMessage>,
    loading: bool,
    frame: &mut Frame,
    area: Rect,
) {
    if loading {
        let line = Line::from(Span::styled(
            "Processing your request...",
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if let Some(status) = status {
        let color = match status.kind {
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        let line = Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(color),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}
