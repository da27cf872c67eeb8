use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    GLYPH_FOOD, GLYPH_FOOD_SPECIAL, GLYPH_OBSTACLE, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
    GridSize, Theme,
};
use crate::game::{GameSession, GameStatus};
use crate::input::Direction;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Which modal overlay, if any, the outer loop wants on top of the board.
///
/// Game-over is not listed here; it is derived from the session status.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    None,
    StartMenu,
    PauseMenu,
}

/// Renders one full frame from the immutable session snapshot.
pub fn render(frame: &mut Frame<'_>, session: &GameSession, theme: &Theme, overlay: Overlay) {
    let area = frame.area();
    let play_area = render_hud(frame, area, session, theme);

    let block = Block::bordered().border_style(Style::new().fg(theme.border));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_obstacles(frame, inner, session, theme);
    render_food(frame, inner, session, theme);
    render_snake(frame, inner, session, theme);

    match overlay {
        Overlay::StartMenu => {
            render_start_menu(frame, play_area, theme);
            return;
        }
        Overlay::PauseMenu => {
            render_pause_menu(frame, play_area);
            return;
        }
        Overlay::None => {}
    }

    if matches!(session.status, GameStatus::GameOver | GameStatus::Victory) {
        render_game_over_menu(frame, play_area, session);
    }
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for cell in session.obstacles.iter() {
        let Some((x, y)) = logical_to_terminal(inner, session.config().grid(), *cell) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_OBSTACLE, Style::new().fg(theme.obstacle));
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, session.config().grid(), session.food.position)
    else {
        return;
    };

    let buffer = frame.buffer_mut();
    if session.food.is_special() {
        // Blink in the last stretch of the countdown so the downgrade does
        // not come as a surprise.
        let ticks = session.food.remaining_special_ticks();
        let visible = ticks > 60 || ticks % 2 == 0;
        if visible {
            buffer.set_string(
                x,
                y,
                GLYPH_FOOD_SPECIAL,
                Style::new()
                    .fg(theme.food_special)
                    .add_modifier(Modifier::BOLD),
            );
        }
        return;
    }

    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let grid = session.config().grid();
    let head = session.snake.head();
    let tail = session.snake.segments().last().copied();

    let buffer = frame.buffer_mut();
    for segment in session.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        if *segment == head {
            let glyph = head_glyph(session.snake.direction());
            buffer.set_string(
                x,
                y,
                glyph,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        if Some(*segment) == tail {
            buffer.set_string(x, y, GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail));
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
