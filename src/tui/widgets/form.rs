//! Reusable form widget for text input screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown on the field's border.
    pub label: String,
    /// Current text value.
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field must be non-empty on submit.
    pub required: bool,
}

impl FormField {
    /// Creates a new empty form field.
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: None,
            required,
        }
    }

    /// Creates a form field with an initial value.
    pub fn with_value(label: impl Into<String>, required: bool, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::new(label, required)
        }
    }
}

/// A multi-field text form with focus management.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form with the given fields. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the given field index.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Inserts a character at the end of the focused field.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(ch);
        }
    }

    /// Deletes the last character from the focused field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Replaces the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Sets an error message on a field by index.
    pub fn set_error(&mut self, index: usize, error: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the value of the field at `index`, or an empty string if out of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Resets all field values and errors.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
        self.focus = 0;
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Height of one rendered field row.
const ROW_HEIGHT: u16 = 3;

/// Renders a form as a single column within the given area.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, frame: &mut Frame, area: Rect) {
    draw_form_grid(form, frame, area, 1);
}

/// Renders a form as a grid with `columns` fields per row.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form_grid(form: &Form, frame: &mut Frame, area: Rect, columns: usize) {
    let columns = columns.max(1);
    let row_count = form.fields.len().div_ceil(columns);
    let rows = Layout::vertical(vec![Constraint::Length(ROW_HEIGHT); row_count]).split(area);

    for (row_index, chunk) in form.fields.chunks(columns).enumerate() {
        let cells =
            Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(rows[row_index]);
        for (col_index, field) in chunk.iter().enumerate() {
            let index = row_index * columns + col_index;
            draw_field(field, index == form.focus, frame, cells[col_index]);
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_field(field: &FormField, is_focused: bool, frame: &mut Frame, area: Rect) {
    let border_color = if field.error.is_some() {
        Color::Red
    } else if is_focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut spans = vec![Span::raw(&field.value)];
    if is_focused {
        spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);

    // Draw error overlapping the bottom border if there's space
    if let Some(ref err) = field.error {
        let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        let err_area = Rect {
            x: area.x + 2,
            y: area.y + ROW_HEIGHT.saturating_sub(1),
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(error_line, err_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_form() -> Form {
        Form::new(vec![
            FormField::new("Carrier Name", true),
            FormField::new("Pickup Location", true),
            FormField::new("Trailer Number", false),
        ])
    }

    // --- Focus management ---

    #[test]
    fn focus_starts_at_zero() {
        let form = make_form();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_next_advances() {
        let mut form = make_form();
        form.focus_next();
        assert_eq!(form.focus(), 1);
        form.focus_next();
        assert_eq!(form.focus(), 2);
    }

    #[test]
    fn focus_next_wraps() {
        let mut form = make_form();
        form.focus_next();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_prev_wraps() {
        let mut form = make_form();
        form.focus_prev();
        assert_eq!(form.focus(), 2);
    }

    #[test]
    fn focus_next_empty_form_is_noop() {
        let mut form = Form::new(vec![]);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn set_focus_moves_to_index() {
        let mut form = make_form();
        form.set_focus(2);
        assert_eq!(form.focus(), 2);
    }

    #[test]
    fn set_focus_out_of_bounds_is_noop() {
        let mut form = make_form();
        form.set_focus(99);
        assert_eq!(form.focus(), 0);
    }

    // --- Character insert/delete ---

    #[test]
    fn insert_char_appends_to_focused() {
        let mut form = make_form();
        form.insert_char('A');
        form.insert_char('c');
        assert_eq!(form.value(0), "Ac");
        assert_eq!(form.value(1), "");
    }

    #[test]
    fn insert_char_on_different_focus() {
        let mut form = make_form();
        form.focus_next();
        form.insert_char('X');
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(1), "X");
    }

    #[test]
    fn delete_char_removes_last() {
        let mut form = make_form();
        form.insert_char('A');
        form.insert_char('B');
        form.delete_char();
        assert_eq!(form.value(0), "A");
    }

    #[test]
    fn delete_char_on_empty_is_noop() {
        let mut form = make_form();
        form.delete_char();
        assert_eq!(form.value(0), "");
    }

    // --- Values ---

    #[test]
    fn set_value_replaces() {
        let mut form = make_form();
        form.insert_char('x');
        form.set_value(0, "Acme Freight");
        assert_eq!(form.value(0), "Acme Freight");
    }

    #[test]
    fn set_value_out_of_bounds_is_noop() {
        let mut form = make_form();
        form.set_value(99, "nope");
        assert_eq!(form.value(0), "");
    }

    #[test]
    fn with_value_seeds_initial_text() {
        let field = FormField::with_value("Driving Hours", false, "0");
        assert_eq!(field.value, "0");
        assert!(!field.required);
    }

    #[test]
    fn value_out_of_bounds_returns_empty() {
        let form = make_form();
        assert_eq!(form.value(99), "");
    }

    // --- Error management ---

    #[test]
    fn set_error_on_field() {
        let mut form = make_form();
        form.set_error(0, "Carrier Name is required".into());
        assert!(form.has_errors());
        assert_eq!(
            form.fields()[0].error,
            Some("Carrier Name is required".into())
        );
    }

    #[test]
    fn clear_errors_removes_all() {
        let mut form = make_form();
        form.set_error(0, "err1".into());
        form.set_error(1, "err2".into());
        form.clear_errors();
        assert!(!form.has_errors());
    }

    #[test]
    fn set_error_out_of_bounds_is_noop() {
        let mut form = make_form();
        form.set_error(99, "nope".into());
        assert!(!form.has_errors());
    }

    // --- Reset ---

    #[test]
    fn reset_clears_values_errors_and_focus() {
        let mut form = make_form();
        form.insert_char('X');
        form.focus_next();
        form.set_error(0, "err".into());
        form.reset();
        assert_eq!(form.value(0), "");
        assert_eq!(form.focus(), 0);
        assert!(!form.has_errors());
    }

    // --- Rendering ---

    mod rendering {
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

        fn render(form: &Form, columns: usize, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_form_grid(form, frame, frame.area(), columns);
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn single_column_shows_all_labels() {
            let form = make_form();
            let output = render(&form, 1, 50, 12);
            assert!(output.contains("Carrier Name *"));
            assert!(output.contains("Pickup Location *"));
            assert!(output.contains("Trailer Number"));
        }

        #[test]
        fn two_columns_pair_fields_on_one_row() {
            let form = make_form();
            let output = render(&form, 2, 80, 12);
            let first_row = output.lines().next().unwrap();
            assert!(first_row.contains("Carrier Name *"));
            assert!(first_row.contains("Pickup Location *"));
        }

        #[test]
        fn renders_field_values() {
            let mut form = make_form();
            form.set_value(0, "Acme Freight");
            let output = render(&form, 1, 50, 12);
            assert!(output.contains("Acme Freight"));
        }

        #[test]
        fn renders_error_text() {
            let mut form = make_form();
            form.set_error(1, "Pickup Location is required".into());
            let output = render(&form, 1, 60, 12);
            assert!(output.contains("Pickup Location is required"));
        }
    }
}
