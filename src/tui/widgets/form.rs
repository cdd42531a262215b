//! Reusable form widget for input screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{Choice, cycle_choice, find_choice};

/// Value stored in a [`FieldKind::Toggle`] field when it is on.
pub const CHECKED: &str = "x";

/// How a field takes input and renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed character by character.
    Text,
    /// Free text rendered as asterisks.
    Secret,
    /// A closed set cycled with Left/Right or Space; the value is the code.
    Choice(&'static [Choice]),
    /// An on/off box flipped with Space.
    Toggle,
}

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown in the field border.
    pub label: String,
    /// Current value. Choice fields hold the code, toggles [`CHECKED`] or empty.
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field is marked as mandatory.
    pub required: bool,
    pub kind: FieldKind,
}

impl FormField {
    /// Creates a new text field.
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: None,
            required,
            kind: FieldKind::Text,
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the value as shown to the user.
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Text => self.value.clone(),
            FieldKind::Secret => "*".repeat(self.value.chars().count()),
            FieldKind::Choice(choices) => find_choice(choices, &self.value)
                .map(|c| format!("< {} >", c.label))
                .unwrap_or_else(|| "< pilih >".to_string()),
            FieldKind::Toggle => {
                if self.value == CHECKED {
                    "[x] Ya".to_string()
                } else {
                    "[ ] Belum".to_string()
                }
            }
        }
    }

    fn takes_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Secret)
    }
}

/// A multi-field form with focus management.
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

    /// Moves focus to `index`; out-of-range indices are ignored.
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

    /// Returns the kind of the focused field.
    pub fn focused_kind(&self) -> Option<FieldKind> {
        self.fields.get(self.focus).map(|f| f.kind)
    }

    /// Inserts a character at the end of the focused text field.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.takes_text()
        {
            field.value.push(ch);
        }
    }

    /// Deletes the last character from the focused text field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.takes_text()
        {
            field.value.pop();
        }
    }

    /// Selects the next or previous option of the focused choice field.
    pub fn cycle_choice(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && let FieldKind::Choice(choices) = field.kind
        {
            field.value = cycle_choice(choices, &field.value, forward).to_string();
        }
    }

    /// Flips the focused toggle field.
    pub fn toggle(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind == FieldKind::Toggle
        {
            if field.value == CHECKED {
                field.value.clear();
            } else {
                field.value = CHECKED.to_string();
            }
        }
    }

    /// Replaces the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Returns `true` if the field at `index` is a checked toggle.
    pub fn is_checked(&self, index: usize) -> bool {
        self.value(index) == CHECKED
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

    /// Returns the index of the first field with an error.
    pub fn first_error(&self) -> Option<usize> {
        self.fields.iter().position(|f| f.error.is_some())
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

    /// Rows needed to draw every field.
    pub fn height(&self) -> u16 {
        u16::try_from(self.fields.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(ROW_HEIGHT)
    }
}

const ROW_HEIGHT: u16 = 3;

/// Renders a form within the given area.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let is_focused = i == form.focus;

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

        let mut spans = vec![Span::raw(field.display_value())];
        if is_focused && field.takes_text() {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        // Error sits on the bottom border of its row.
        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + ROW_HEIGHT.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
