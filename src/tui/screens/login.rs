//! Login screen: email and password for content editors.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::widgets::{FieldKind, Form, FormField, draw_form};

const EMAIL: usize = 0;
const PASSWORD: usize = 1;

/// State for the login screen.
#[derive(Debug, Clone)]
pub struct LoginState {
    form: Form,
    general_error: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                FormField::new("Email", true),
                FormField::new("Kata Sandi", true).with_kind(FieldKind::Secret),
            ]),
            general_error: None,
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Esc => Action::Navigate(Screen::Home),
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Shows a message not tied to a field, such as a refused sign-in.
    pub fn set_error(&mut self, msg: String) {
        self.general_error = Some(msg);
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Clears the password and errors, keeping the email.
    pub fn clear_password(&mut self) {
        self.form.set_value(PASSWORD, "");
        self.form.clear_errors();
        self.general_error = None;
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.general_error = None;
    }

    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.general_error = None;

        let email = self.form.value(EMAIL).trim().to_string();
        let password = self.form.value(PASSWORD).to_string();

        if email.is_empty() {
            self.form.set_error(EMAIL, "Email wajib diisi".into());
        } else if !email.contains('@') {
            self.form.set_error(EMAIL, "Format email tidak valid".into());
        }
        if password.is_empty() {
            self.form.set_error(PASSWORD, "Kata sandi wajib diisi".into());
        }
        if let Some(first) = self.form.first_error() {
            self.form.set_focus(first);
            return Action::None;
        }

        Action::SignIn { email, password }
    }
}

/// Renders the login screen.
#[mutants::skip]
pub fn draw_login(state: &LoginState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Masuk Pengelola ")
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

    let footer = Paragraph::new(Line::from("Tab: pindah  Enter: masuk  Esc: batal"))
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

    fn type_string(state: &mut LoginState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn fill(state: &mut LoginState, email: &str, password: &str) {
        type_string(state, email);
        state.handle_key(press(KeyCode::Tab));
        type_string(state, password);
    }

    mod submit {
        use super::*;

        #[test]
        fn emits_sign_in() {
            let mut state = LoginState::new();
            fill(&mut state, " editor@pesantren.id", "rahasia");
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(
                action,
                Action::SignIn {
                    email: "editor@pesantren.id".into(),
                    password: "rahasia".into(),
                }
            );
        }

        #[test]
        fn empty_shows_both_errors() {
            let mut state = LoginState::new();
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(action, Action::None);
            assert!(state.form().fields()[EMAIL].error.is_some());
            assert!(state.form().fields()[PASSWORD].error.is_some());
            assert_eq!(state.form().focus(), EMAIL);
        }

        #[test]
        fn email_without_at_rejected() {
            let mut state = LoginState::new();
            fill(&mut state, "editor", "rahasia");
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
            assert_eq!(
                state.form().fields()[EMAIL].error.as_deref(),
                Some("Format email tidak valid")
            );
        }

        #[test]
        fn submit_clears_general_error() {
            let mut state = LoginState::new();
            state.set_error("Email atau kata sandi salah".into());
            fill(&mut state, "a@b.c", "x");
            state.handle_key(press(KeyCode::Enter));
            assert_eq!(state.general_error(), None);
        }
    }

    #[test]
    fn esc_navigates_home() {
        let mut state = LoginState::new();
        assert_eq!(
            state.handle_key(press(KeyCode::Esc)),
            Action::Navigate(Screen::Home)
        );
    }

    #[test]
    fn clear_password_keeps_email() {
        let mut state = LoginState::new();
        fill(&mut state, "a@b.c", "x");
        state.set_error("salah".into());
        state.clear_password();
        assert_eq!(state.form().value(EMAIL), "a@b.c");
        assert_eq!(state.form().value(PASSWORD), "");
        assert_eq!(state.general_error(), None);
    }

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

        fn render(state: &LoginState) -> String {
            let backend = TestBackend::new(60, 14);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| draw_login(state, frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn password_is_masked() {
            let mut state = LoginState::new();
            fill(&mut state, "a@b.c", "rahasia");
            let output = render(&state);
            assert!(output.contains("a@b.c"));
            assert!(!output.contains("rahasia"));
            assert!(output.contains("*******"));
        }

        #[test]
        fn renders_general_error() {
            let mut state = LoginState::new();
            state.set_error("Silakan masuk terlebih dahulu".into());
            let output = render(&state);
            assert!(output.contains("Silakan masuk terlebih dahulu"));
        }
    }
}
