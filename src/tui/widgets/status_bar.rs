//! Status bar widget: one line of session context.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{STEP_COUNT, UserSession, step};
use crate::wizard::Position;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Signed-in user's email, if any.
    pub user: Option<String>,
    /// Highest role of the signed-in user.
    pub role: Option<&'static str>,
    /// Wizard position while a registration is open.
    pub position: Option<Position>,
    /// Whether a registration is being delivered.
    pub submitting: bool,
}

impl StatusBarContext {
    pub fn new(session: Option<&UserSession>, position: Option<Position>, submitting: bool) -> Self {
        let role = session.and_then(|s| {
            if s.can_delete() {
                Some("admin")
            } else if s.can_manage_content() {
                Some("editor")
            } else {
                None
            }
        });
        Self {
            user: session.map(|s| s.email.clone()),
            role,
            position,
            submitting,
        }
    }
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned, Cyan):
/// - Wizard open:  `Langkah 2/5 Alamat`
/// - Delivering:   `Langkah 5/5 Konfirmasi  MENGIRIM...` (Yellow)
/// - Signed in:    `[admin] admin@pesantren.id` appended
///
/// Renders nothing if there is neither a wizard position nor a user.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let yellow = Style::default().fg(Color::Yellow);
    let green = Style::default().fg(Color::Green);

    let mut spans: Vec<Span> = Vec::new();

    match ctx.position {
        Some(Position::Step(n)) => {
            let label = step(n).map_or("", |s| s.label);
            spans.push(Span::styled(format!("Langkah {n}/{STEP_COUNT} {label}"), cyan));
        }
        Some(Position::Success) => spans.push(Span::styled("Pendaftaran terkirim", green)),
        None => {}
    }
    if ctx.submitting {
        spans.push(Span::styled("  MENGIRIM...", yellow));
    }

    if let Some(user) = &ctx.user {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        if let Some(role) = ctx.role {
            spans.push(Span::styled(format!("[{role}] "), cyan));
        }
        spans.push(Span::styled(user.clone(), cyan));
    }

    if spans.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::model::Role;
    use crate::test_support::session_with;

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

    fn render_status_bar(ctx: &StatusBarContext, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                draw_status_bar(ctx, frame, frame.area());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn context_picks_highest_role() {
        let admin = session_with(&[Role::Editor, Role::Admin]);
        assert_eq!(StatusBarContext::new(Some(&admin), None, false).role, Some("admin"));
        let editor = session_with(&[Role::Editor]);
        assert_eq!(StatusBarContext::new(Some(&editor), None, false).role, Some("editor"));
        let guest = session_with(&[]);
        assert_eq!(StatusBarContext::new(Some(&guest), None, false).role, None);
    }

    #[test]
    fn renders_step() {
        let ctx = StatusBarContext::new(None, Some(Position::Step(2)), false);
        let output = render_status_bar(&ctx, 60);
        assert!(output.contains("Langkah 2/5 Alamat"), "should show step");
        assert!(!output.contains("MENGIRIM"));
    }

    #[test]
    fn renders_submitting() {
        let ctx = StatusBarContext::new(None, Some(Position::Step(5)), true);
        let output = render_status_bar(&ctx, 60);
        assert!(output.contains("MENGIRIM"), "should flag delivery");
    }

    #[test]
    fn renders_user() {
        let session = session_with(&[Role::Admin]);
        let ctx = StatusBarContext::new(Some(&session), None, false);
        let output = render_status_bar(&ctx, 60);
        assert!(output.contains("[admin] admin@pesantren.id"));
    }

    #[test]
    fn renders_blank_without_context() {
        let output = render_status_bar(&StatusBarContext::default(), 40);
        assert_eq!(output.trim(), "");
    }
}
