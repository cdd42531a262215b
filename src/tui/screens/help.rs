//! Help screen: scrollable keybinding reference for the screen it was
//! opened from.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;

static HOME_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "pilih menu"),
    ("Enter", "buka"),
    ("d", "pendaftaran santri baru"),
    ("k", "kelola kegiatan"),
    ("q / Esc", "keluar"),
    ("F1", "bantuan"),
    ("Ctrl+C", "keluar dari mana saja"),
];

static REGISTRATION_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "kolom berikut / sebelumnya"),
    ("←/→ atau Spasi", "ganti pilihan"),
    ("Spasi", "centang persetujuan"),
    ("Enter", "lanjut; di langkah terakhir: kirim"),
    ("Esc", "langkah sebelumnya; di langkah 1: menu"),
    ("F1", "bantuan"),
];

static LOGIN_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "kolom berikut / sebelumnya"),
    ("Enter", "masuk"),
    ("Esc", "batal"),
    ("F1", "bantuan"),
];

static ACTIVITIES_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "pilih kegiatan"),
    ("Enter / e", "ubah kegiatan"),
    ("n", "kegiatan baru"),
    ("p", "tampilkan / sembunyikan dari publik"),
    ("d", "hapus (khusus admin, y/n untuk konfirmasi)"),
    ("r", "muat ulang"),
    ("o", "keluar akun"),
    ("q / Esc", "kembali"),
    ("F1", "bantuan"),
];

static ACTIVITY_FORM_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "kolom berikut / sebelumnya"),
    ("Spasi", "centang tampil publik"),
    ("Enter", "simpan"),
    ("Esc", "batal"),
    ("F1", "bantuan"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "gulir"), ("q / Esc", "kembali")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top with origin [`Screen::Home`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::Home,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the screen to return to and scrolls back to the top.
    pub fn open_from(&mut self, screen: Screen) {
        self.origin = screen;
        self.scroll = 0;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let keys = match origin {
        Screen::Home => HOME_KEYS,
        Screen::Registration => REGISTRATION_KEYS,
        Screen::Login => LOGIN_KEYS,
        Screen::Activities => ACTIVITIES_KEYS,
        Screen::ActivityForm => ACTIVITY_FORM_KEYS,
        Screen::Help => HELP_KEYS,
    };
    build_section(origin.label(), keys)
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Bantuan: {} ", state.origin().label());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = u16::try_from(content_lines.len()).unwrap_or(u16::MAX);
    let capped_scroll = state.scroll().min(total.saturating_sub(content_area.height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: gulir  q/Esc: kembali").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
