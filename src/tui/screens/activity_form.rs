//! Activity form screen: create or edit one "kegiatan" record.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{Activity, ActivityDraft};
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::widgets::{CHECKED, FieldKind, Form, FormField, draw_form};

const TITLE: usize = 0;
const DESCRIPTION: usize = 1;
const DATE: usize = 2;
const IMAGE_URL: usize = 3;
const PUBLISHED: usize = 4;

/// State for the activity form screen.
#[derive(Debug, Clone)]
pub struct ActivityFormState {
    /// ID of the record being edited; `None` when creating.
    editing: Option<String>,
    form: Form,
    general_error: Option<String>,
}

impl Default for ActivityFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityFormState {
    /// Creates an empty form for a new activity.
    pub fn new() -> Self {
        Self {
            editing: None,
            form: Form::new(vec![
                FormField::new("Judul", true),
                FormField::new("Deskripsi", false),
                FormField::new("Tanggal (YYYY-MM-DD)", true),
                FormField::new("URL Gambar", false),
                FormField::new("Tampilkan ke publik", false).with_kind(FieldKind::Toggle),
            ]),
            general_error: None,
        }
    }

    /// Fills the form from an existing record.
    pub fn load(&mut self, activity: &Activity) {
        self.reset();
        self.editing = Some(activity.id.clone());
        self.form.set_value(TITLE, activity.title.as_str());
        self.form.set_value(DESCRIPTION, activity.description.as_str());
        self.form
            .set_value(DATE, activity.date.format("%Y-%m-%d").to_string());
        self.form
            .set_value(IMAGE_URL, activity.image_url.clone().unwrap_or_default());
        if activity.published {
            self.form.set_value(PUBLISHED, CHECKED);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn set_error(&mut self, msg: String) {
        self.general_error = Some(msg);
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Char(' ') if self.form.focused_kind() == Some(FieldKind::Toggle) => {
                self.form.toggle()
            }
            KeyCode::Char(ch) => self.form.insert_char(ch),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Esc => return Action::Navigate(Screen::Activities),
            KeyCode::Enter => return self.submit(),
            _ => {}
        }
        Action::None
    }

    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.general_error = None;

        let title = self.form.value(TITLE).trim().to_string();
        if title.is_empty() {
            self.form.set_error(TITLE, "Judul wajib diisi".into());
        }
        let date = NaiveDate::parse_from_str(self.form.value(DATE).trim(), "%Y-%m-%d");
        if date.is_err() {
            self.form
                .set_error(DATE, "Tanggal wajib diisi dengan format YYYY-MM-DD".into());
        }
        let image_url = self.form.value(IMAGE_URL).trim().to_string();
        if !image_url.is_empty()
            && !(image_url.starts_with("http://") || image_url.starts_with("https://"))
        {
            self.form
                .set_error(IMAGE_URL, "URL gambar harus diawali http:// atau https://".into());
        }

        if let Some(first) = self.form.first_error() {
            self.form.set_focus(first);
            return Action::None;
        }
        let Ok(date) = date else {
            return Action::None;
        };

        Action::SaveActivity {
            id: self.editing.clone(),
            draft: ActivityDraft {
                title,
                description: self.form.value(DESCRIPTION).trim().to_string(),
                date,
                image_url: (!image_url.is_empty()).then_some(image_url),
                published: self.form.is_checked(PUBLISHED),
            },
        }
    }
}

/// Renders the activity form screen.
#[mutants::skip]
pub fn draw_activity_form(state: &ActivityFormState, frame: &mut Frame, area: Rect) {
    let title = if state.editing().is_some() {
        " Ubah Kegiatan "
    } else {
        " Kegiatan Baru "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, error_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(state.form().height()),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(state.form(), frame, form_area);

    if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab: pindah  Spasi: centang  Enter: simpan  Esc: batal",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
