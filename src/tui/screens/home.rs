//! Home screen: the portal's main menu.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;

/// Menu entries in display order.
const ENTRIES: &[(&str, MenuTarget)] = &[
    ("Pendaftaran Santri Baru", MenuTarget::Screen(Screen::Registration)),
    ("Kelola Kegiatan", MenuTarget::Screen(Screen::Activities)),
    ("Bantuan", MenuTarget::Screen(Screen::Help)),
    ("Keluar", MenuTarget::Quit),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuTarget {
    Screen(Screen),
    Quit,
}

/// State for the home screen.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    selected: usize,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(ENTRIES.len() - 1);
                Action::None
            }
            KeyCode::Enter => self.select_current(),
            KeyCode::Char('d') => Action::Navigate(Screen::Registration),
            KeyCode::Char('k') => Action::Navigate(Screen::Activities),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    /// Returns the highlighted entry index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    fn select_current(&self) -> Action {
        match ENTRIES.get(self.selected).map(|(_, target)| *target) {
            Some(MenuTarget::Screen(screen)) => Action::Navigate(screen),
            Some(MenuTarget::Quit) => Action::Quit,
            None => Action::None,
        }
    }
}

/// Renders the home screen.
#[mutants::skip]
pub fn draw_home(state: &HomeState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Portal Pesantren ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, menu_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let header = Paragraph::new(vec![
        Line::from(""),
        Line::from("Selamat datang di portal pendaftaran santri baru"),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, header_area);

    let lines: Vec<Line> = ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (label, _))| {
            if i == state.selected() {
                Line::styled(
                    format!("> {label}"),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!("  {label}"))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), menu_area);

    let footer = Paragraph::new("↑/↓: pilih  Enter: buka  d: daftar  k: kegiatan  F1: bantuan  q: keluar")
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

    mod navigation {
        use super::*;

        #[test]
        fn enter_on_first_opens_registration() {
            let mut state = HomeState::new();
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(action, Action::Navigate(Screen::Registration));
        }

        #[test]
        fn down_then_enter_opens_activities() {
            let mut state = HomeState::new();
            state.handle_key(press(KeyCode::Down));
            let action = state.handle_key(press(KeyCode::Enter));
            assert_eq!(action, Action::Navigate(Screen::Activities));
        }

        #[test]
        fn last_entry_quits() {
            let mut state = HomeState::new();
            for _ in 0..10 {
                state.handle_key(press(KeyCode::Down));
            }
            assert_eq!(state.selected(), ENTRIES.len() - 1);
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::Quit);
        }

        #[test]
        fn up_at_top_saturates() {
            let mut state = HomeState::new();
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.selected(), 0);
        }

        #[test]
        fn shortcuts() {
            let mut state = HomeState::new();
            assert_eq!(
                state.handle_key(press(KeyCode::Char('d'))),
                Action::Navigate(Screen::Registration)
            );
            assert_eq!(
                state.handle_key(press(KeyCode::Char('k'))),
                Action::Navigate(Screen::Activities)
            );
            assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::Quit);
        }

        #[test]
        fn unhandled_key_returns_none() {
            let mut state = HomeState::new();
            assert_eq!(state.handle_key(press(KeyCode::F(5))), Action::None);
        }
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

        #[test]
        fn renders_menu() {
            let state = HomeState::new();
            let backend = TestBackend::new(90, 14);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| draw_home(&state, frame, frame.area()))
                .unwrap();
            let output = buffer_to_string(terminal.backend().buffer());
            assert!(output.contains("Portal Pesantren"));
            assert!(output.contains("> Pendaftaran Santri Baru"));
            assert!(output.contains("Kelola Kegiatan"));
        }
    }
}
