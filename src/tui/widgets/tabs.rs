//! Tab navigator bar — shows the four wizard steps and their lock state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::Step;

/// Data passed to the tab bar; decoupled from the full wizard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBarContext {
    /// The step currently shown.
    pub active: Step,
    /// Whether a trip record exists (unlocks Logsheets and Dashboard).
    pub trip_exists: bool,
    /// Whether at least one logsheet record exists (unlocks Entries).
    pub has_logsheets: bool,
}

impl TabBarContext {
    fn unlocked(&self, step: Step) -> bool {
        match step {
            Step::Trip => true,
            Step::Logsheets | Step::Dashboard => self.trip_exists,
            Step::Entries => self.has_logsheets,
        }
    }
}

/// Renders the tab bar: `[F1] Trip  [F2] Logsheets ...`.
///
/// The active tab is highlighted; locked tabs are dimmed. Clicking a locked
/// tab's key is inert in the app, so the dimming is the only affordance
/// needed here.
#[mutants::skip]
pub fn draw_tab_bar(ctx: &TabBarContext, frame: &mut Frame, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();

    for (i, &step) in Step::all().iter().enumerate() {
        let style = if step == ctx.active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if ctx.unlocked(step) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("[F{}] {}", i + 1, step.label()),
            style,
        ));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

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

    fn render(ctx: &TabBarContext) -> String {
        let backend = TestBackend::new(70, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                draw_tab_bar(ctx, frame, frame.area());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn shows_all_four_tabs_with_keys() {
        let ctx = TabBarContext {
            active: Step::Trip,
            trip_exists: false,
            has_logsheets: false,
        };
        let output = render(&ctx);
        assert!(output.contains("[F1] Trip"));
        assert!(output.contains("[F2] Logsheets"));
        assert!(output.contains("[F3] Entries"));
        assert!(output.contains("[F4] Dashboard"));
    }

    #[test]
    fn lock_rules_follow_record_existence() {
        let ctx = TabBarContext {
            active: Step::Trip,
            trip_exists: true,
            has_logsheets: false,
        };
        assert!(ctx.unlocked(Step::Trip));
        assert!(ctx.unlocked(Step::Logsheets));
        assert!(ctx.unlocked(Step::Dashboard));
        assert!(!ctx.unlocked(Step::Entries));
    }

    #[test]
    fn entries_unlock_with_a_logsheet() {
        let ctx = TabBarContext {
            active: Step::Entries,
            trip_exists: true,
            has_logsheets: true,
        };
        assert!(ctx.unlocked(Step::Entries));
    }
}
