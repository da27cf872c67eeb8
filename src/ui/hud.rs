use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameSession;

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    session: &GameSession,
    theme: &Theme,
) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(session, theme)).alignment(Alignment::Left),
        status_area,
    );

    play_area
}

fn status_line<'a>(session: &GameSession, theme: &'a Theme) -> Line<'a> {
    let label = Style::new().fg(theme.hud_text);
    let value = Style::new().fg(theme.hud_accent);

    let mut spans = vec![
        Span::styled(" Score ", label),
        Span::styled(session.score.to_string(), value),
        Span::styled("  Level ", label),
        Span::styled(session.level.to_string(), value),
    ];

    if let Some(remaining) = session.score_to_next_level() {
        spans.push(Span::styled("  Next ", label));
        spans.push(Span::styled(remaining.to_string(), value));
    }

    spans.push(Span::styled("  Length ", label));
    spans.push(Span::styled(session.snake.len().to_string(), value));
    spans.push(Span::styled("  Speed ", label));
    spans.push(Span::styled(
        format!("{:.0}/s", session.tick_rate()),
        value,
    ));

    Line::from(spans)
}
