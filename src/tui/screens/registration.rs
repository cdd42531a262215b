//! Registration screen: the five-step wizard, its review page, and the
//! success page.
//!
//! Each step has its own [`Form`]; values are copied into the
//! [`WizardSession`] before every transition and validation errors are
//! copied back for display.

use chrono::{NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::debug;

use crate::intake::{IntakeError, PLACEHOLDER};
use crate::model::{
    Field, FormState, Rule, STEP_COUNT, STEPS, StepDefinition, find_choice, rule_for, step,
};
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::widgets::{FieldKind, Form, FormField, draw_form};
use crate::wizard::{Navigation, Position, WizardError, WizardSession};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// State for the registration screen.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    session: WizardSession,
    /// One form per step; `forms[n - 1]` belongs to step `n`.
    forms: Vec<Form>,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new()
    }
}

fn build_form(definition: &StepDefinition) -> Form {
    Form::new(
        definition
            .fields
            .iter()
            .map(|&field| {
                let rule = rule_for(field);
                let kind = match rule {
                    Rule::OneOf(choices) => FieldKind::Choice(choices),
                    Rule::MustBeTrue => FieldKind::Toggle,
                    _ => FieldKind::Text,
                };
                FormField::new(field.label(), rule.is_required()).with_kind(kind)
            })
            .collect(),
    )
}

impl RegistrationState {
    /// Creates a fresh wizard on step 1.
    pub fn new() -> Self {
        Self {
            session: WizardSession::new(),
            forms: STEPS.iter().map(build_form).collect(),
        }
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Returns the form of the current step, or `None` on the success page.
    pub fn current_form(&self) -> Option<&Form> {
        match self.session.position() {
            Position::Step(n) => self.forms.get(usize::from(n) - 1),
            Position::Success => None,
        }
    }

    /// Discards the session and every typed value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ordinal = match self.session.position() {
            Position::Step(n) => n,
            Position::Success => {
                return match key.code {
                    KeyCode::Enter | KeyCode::Esc => {
                        self.reset();
                        Action::Navigate(Screen::Home)
                    }
                    _ => Action::None,
                };
            }
        };
        if self.session.is_submitting() {
            return Action::None;
        }
        let Some(form) = self.forms.get_mut(usize::from(ordinal) - 1) else {
            return Action::None;
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left => form.cycle_choice(false),
            KeyCode::Right => form.cycle_choice(true),
            KeyCode::Char(' ') if form.focused_kind() == Some(FieldKind::Toggle) => form.toggle(),
            KeyCode::Char(' ') if matches!(form.focused_kind(), Some(FieldKind::Choice(_))) => {
                form.cycle_choice(true)
            }
            KeyCode::Char(ch) => form.insert_char(ch),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Esc => return self.back(ordinal),
            KeyCode::Enter => return self.next(ordinal),
            _ => {}
        }
        Action::None
    }

    /// Applies the outcome of a background delivery.
    pub fn finish_submit(
        &mut self,
        result: Result<(), IntakeError>,
    ) -> Result<Navigation, WizardError> {
        self.session.finish_submit(result)
    }

    fn back(&mut self, ordinal: u8) -> Action {
        self.sync(ordinal);
        if ordinal == 1 {
            return Action::Navigate(Screen::Home);
        }
        if let Err(e) = self.session.retreat() {
            debug!(error = %e, "retreat refused");
        }
        Action::None
    }

    fn next(&mut self, ordinal: u8) -> Action {
        self.sync(ordinal);
        if ordinal < STEP_COUNT {
            if let Err(e) = self.session.advance() {
                debug!(error = %e, "advance refused");
            }
            self.pull_errors(ordinal);
            return Action::None;
        }

        match self.session.begin_submit(Utc::now()) {
            Ok(payload) => Action::SubmitRegistration(payload),
            Err(e) => {
                debug!(error = %e, "submission refused");
                self.pull_errors(ordinal);
                Action::None
            }
        }
    }

    /// Copies the typed values of step `ordinal` into the session.
    fn sync(&mut self, ordinal: u8) {
        let (Some(definition), Some(form)) = (step(ordinal), self.forms.get(usize::from(ordinal) - 1))
        else {
            return;
        };
        for (i, &field) in definition.fields.iter().enumerate() {
            let raw = form.value(i);
            match rule_for(field) {
                Rule::Date => self
                    .session
                    .set_date(field, NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()),
                Rule::MustBeTrue => self.session.set_flag(field, form.is_checked(i)),
                _ => self.session.set_text(field, raw),
            }
        }
    }

    /// Copies the session's errors for step `ordinal` onto its form and
    /// focuses the first invalid field.
    fn pull_errors(&mut self, ordinal: u8) {
        let (Some(definition), Some(form)) =
            (step(ordinal), self.forms.get_mut(usize::from(ordinal) - 1))
        else {
            return;
        };
        form.clear_errors();
        for (i, &field) in definition.fields.iter().enumerate() {
            if let Some(message) = self.session.state().error(field) {
                form.set_error(i, message.to_string());
            }
        }
        if let Some(first) = form.first_error() {
            form.set_focus(first);
        }
    }
}

/// Formats a field value the way the review page shows it.
fn review_value(state: &FormState, field: Field) -> String {
    let value = match rule_for(field) {
        Rule::OneOf(choices) => find_choice(choices, state.text(field))
            .map(|c| c.label.to_string())
            .unwrap_or_default(),
        Rule::Date => state
            .date(field)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        Rule::MustBeTrue => String::new(),
        Rule::Required | Rule::Optional => state.text(field).trim().to_string(),
    };
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}

/// Summary of steps 1 to 4, one section per step.
fn review_lines(state: &FormState) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::DarkGray);

    let mut lines = Vec::new();
    for definition in STEPS.iter().filter(|s| s.ordinal < STEP_COUNT) {
        lines.push(Line::from(Span::styled(definition.label, header_style)));
        for &field in definition.fields {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<28}", field.label()), label_style),
                Span::raw(review_value(state, field)),
            ]));
        }
    }
    lines
}

/// Renders the registration screen.
#[mutants::skip]
pub fn draw_registration(state: &RegistrationState, frame: &mut Frame, area: Rect) {
    let session = state.session();
    let Position::Step(n) = session.position() else {
        draw_success(state, frame, area);
        return;
    };
    let label = step(n).map_or("", |s| s.label);

    let block = Block::default()
        .title(format!(" Pendaftaran Santri Baru: {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form_height = state.current_form().map_or(0, Form::height);
    let [progress_area, review_area, form_area, notice_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(form_height),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(inner);

    let progress: String = (1..=STEP_COUNT)
        .map(|i| if i <= n { '●' } else { '○' })
        .map(|c| format!("{c} "))
        .collect();
    frame.render_widget(
        Paragraph::new(format!("Langkah {n} dari {STEP_COUNT}  {progress}")),
        progress_area,
    );

    if n == STEP_COUNT {
        frame.render_widget(Paragraph::new(review_lines(session.state())), review_area);
    }

    if let Some(form) = state.current_form() {
        draw_form(form, frame, form_area);
    }

    if let Some(notice) = session.notice() {
        let notice = Paragraph::new(Span::styled(notice, Style::default().fg(Color::Red)))
            .wrap(Wrap { trim: true });
        frame.render_widget(notice, notice_area);
    }

    let footer = if session.is_submitting() {
        "Mengirim pendaftaran..."
    } else if n == STEP_COUNT {
        "Spasi: centang  Enter: kirim  Esc: kembali"
    } else {
        "Tab: pindah  ←/→: pilih  Enter: lanjut  Esc: kembali"
    };
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

#[mutants::skip]
fn draw_success(state: &RegistrationState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Pendaftaran Berhasil ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let form = state.session().state();
    let lines = vec![
        Line::from(""),
        Line::styled(
            "Pendaftaran berhasil dikirim!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Terima kasih, {}.", form.text(Field::FullName).trim())),
        Line::from(format!(
            "Panitia akan menghubungi {} untuk informasi selanjutnya.",
            form.text(Field::Phone).trim()
        )),
        Line::from(""),
        Line::styled("Enter: kembali ke menu", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
