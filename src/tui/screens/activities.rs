//! Activities screen: every "kegiatan" record with publish and delete
//! controls.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::{Activity, public_activities};
use crate::tui::action::Action;
use crate::tui::app::Screen;

/// Shown when a non-admin presses the delete key.
pub const DELETE_DENIED: &str = "Hanya admin yang dapat menghapus kegiatan";

/// State for the activities screen.
#[derive(Debug, Clone, Default)]
pub struct ActivitiesState {
    activities: Vec<Activity>,
    selected: Option<usize>,
    /// Whether the signed-in user may delete.
    can_delete: bool,
    /// Set while waiting for y/n on a delete.
    confirm_delete: bool,
    error: Option<String>,
}

impl ActivitiesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list, keeping the selection in range.
    pub fn set_activities(&mut self, activities: Vec<Activity>, can_delete: bool) {
        self.activities = activities;
        self.can_delete = can_delete;
        self.confirm_delete = false;
        self.error = None;
        self.selected = match self.selected {
            _ if self.activities.is_empty() => None,
            Some(i) => Some(i.min(self.activities.len() - 1)),
            None => Some(0),
        };
    }

    /// Forgets the list, e.g. after sign-out.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.confirm_delete {
            return self.handle_delete_confirm(key);
        }
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.map(|i| i.saturating_sub(1));
                Action::None
            }
            KeyCode::Down => {
                self.selected = self
                    .selected
                    .map(|i| (i + 1).min(self.activities.len().saturating_sub(1)));
                Action::None
            }
            KeyCode::Char('n') => Action::NewActivity,
            KeyCode::Char('e') | KeyCode::Enter => self
                .current()
                .map_or(Action::None, |a| Action::EditActivity(a.clone())),
            KeyCode::Char('p') => self.current().map_or(Action::None, |a| {
                Action::TogglePublished {
                    id: a.id.clone(),
                    published: !a.published,
                }
            }),
            KeyCode::Char('d') => {
                if self.current().is_none() {
                    return Action::None;
                }
                if self.can_delete {
                    self.confirm_delete = true;
                    self.error = None;
                } else {
                    self.error = Some(DELETE_DENIED.to_string());
                }
                Action::None
            }
            KeyCode::Char('r') => Action::RefreshActivities,
            KeyCode::Char('o') => Action::SignOut,
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(Screen::Home),
            _ => Action::None,
        }
    }

    fn handle_delete_confirm(&mut self, key: KeyEvent) -> Action {
        self.confirm_delete = false;
        match key.code {
            KeyCode::Char('y') => self
                .current()
                .map_or(Action::None, |a| Action::DeleteActivity(a.id.clone())),
            _ => Action::None,
        }
    }

    fn current(&self) -> Option<&Activity> {
        self.selected.and_then(|i| self.activities.get(i))
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirm_delete
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }
}

/// Renders the activities screen.
#[mutants::skip]
pub fn draw_activities(state: &ActivitiesState, frame: &mut Frame, area: Rect) {
    let published = public_activities(state.activities()).len();
    let block = Block::default()
        .title(format!(
            " Kegiatan ({published}/{} tampil publik) ",
            state.activities().len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, message_area, footer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    if state.activities().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("Belum ada kegiatan."),
            Line::from("Tekan 'n' untuk menambah kegiatan."),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, table_area);
    } else {
        let header = Row::new(vec!["Tanggal", "Judul", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows: Vec<Row> = state
            .activities()
            .iter()
            .enumerate()
            .map(|(i, activity)| {
                let style = if state.selected() == Some(i) {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    activity.date.format("%Y-%m-%d").to_string(),
                    activity.title.clone(),
                    if activity.published { "Publik" } else { "Draf" }.to_string(),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(8),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    if state.is_confirming_delete() {
        let prompt = Paragraph::new("Hapus kegiatan ini? (y/n)")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(prompt, message_area);
    } else if let Some(err) = state.error() {
        let err_line = Paragraph::new(err).style(Style::default().fg(Color::Red));
        frame.render_widget(err_line, message_area);
    }

    let footer = Paragraph::new(
        "n: baru  e: ubah  p: publikasi  d: hapus  r: muat ulang  o: keluar akun  q: kembali",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
