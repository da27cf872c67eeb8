use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;
use crate::obstacle::ObstacleField;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighboring position one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (king-move) distance to `other`.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// What stopped the snake on a blocked movement attempt.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BlockedBy {
    Wall,
    SelfCollision,
    Obstacle,
}

/// Outcome of one movement tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveResult {
    Continues,
    Blocked(BlockedBy),
}

/// Mutable snake state: ordered body cells plus movement direction.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    grow: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            grow: false,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        Self {
            body: VecDeque::from(segments),
            direction,
            grow: false,
        }
    }

    /// Queues growth on the next movement tick.
    pub fn grow_next(&mut self) {
        self.grow = true;
    }

    /// Applies a direction change unless it reverses the current direction.
    ///
    /// Reversals are silently ignored. There is no input buffer: several
    /// changes within one tick resolve last-writer-wins, so an opposite-then-
    /// perpendicular sequence inside a single tick can drop the first request.
    pub fn change_direction(&mut self, requested: Direction) {
        if requested == self.direction.opposite() {
            return;
        }
        self.direction = requested;
    }

    /// Attempts one movement step against the grid bounds and obstacle field.
    ///
    /// On `Blocked` the body is left untouched. On `Continues` the new head is
    /// prepended and the tail is dropped unless a growth was pending, in which
    /// case the flag is consumed and the body gains exactly one cell.
    pub fn advance(&mut self, bounds: GridSize, obstacles: &ObstacleField) -> MoveResult {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        let next_head = self.next_head_position();

        if !next_head.is_within_bounds(bounds) {
            return MoveResult::Blocked(BlockedBy::Wall);
        }
        if self.occupies(next_head) {
            return MoveResult::Blocked(BlockedBy::SelfCollision);
        }
        if obstacles.blocks(next_head) {
            return MoveResult::Blocked(BlockedBy::Obstacle);
        }

        self.body.push_front(next_head);
        if self.grow {
            self.grow = false;
        } else {
            let _ = self.body.pop_back();
        }

        MoveResult::Continues
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().stepped(self.direction)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::obstacle::ObstacleField;

    use super::{BlockedBy, MoveResult, Position, Snake};

    fn bounds() -> GridSize {
        GridSize {
            width: 40,
            height: 30,
        }
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        let result = snake.advance(bounds(), &ObstacleField::empty());

        assert_eq!(result, MoveResult::Continues);
        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.grow_next();
        snake.advance(bounds(), &ObstacleField::empty());
        assert_eq!(snake.len(), 2);

        // Grow flag is consumed; the next step must not grow again.
        snake.advance(bounds(), &ObstacleField::empty());
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn reversal_is_ignored_for_all_directions() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let mut snake = Snake::new(Position { x: 5, y: 5 }, direction);
            snake.change_direction(direction.opposite());
            assert_eq!(snake.direction(), direction);
        }
    }

    #[test]
    fn last_direction_change_wins_within_a_tick() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.change_direction(Direction::Up);
        snake.change_direction(Direction::Down);
        snake.advance(bounds(), &ObstacleField::empty());

        assert_eq!(snake.head(), Position { x: 5, y: 6 });
    }

    #[test]
    fn out_of_bounds_move_is_blocked_and_leaves_body_untouched() {
        let mut snake = Snake::new(Position { x: 0, y: 5 }, Direction::Left);

        let result = snake.advance(bounds(), &ObstacleField::empty());

        assert_eq!(result, MoveResult::Blocked(BlockedBy::Wall));
        assert_eq!(snake.head(), Position { x: 0, y: 5 });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn self_collision_is_blocked() {
        // Head at (2,2) turning Left into its own body at (1,2).
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 3 },
                Position { x: 2, y: 3 },
            ],
            Direction::Left,
        );

        let result = snake.advance(bounds(), &ObstacleField::empty());

        assert_eq!(result, MoveResult::Blocked(BlockedBy::SelfCollision));
    }

    #[test]
    fn obstacle_cell_blocks_movement() {
        let obstacles = ObstacleField::from_cells([Position { x: 10, y: 10 }]);
        let mut snake = Snake::new(Position { x: 9, y: 10 }, Direction::Right);

        let result = snake.advance(bounds(), &obstacles);

        assert_eq!(result, MoveResult::Blocked(BlockedBy::Obstacle));
    }

    #[test]
    fn vacated_tail_cell_is_free_for_the_head() {
        // A 2x2 loop: the head moves into the cell the tail leaves this tick.
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 1, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 2, y: 2 },
            ],
            Direction::Down,
        );

        // Next head is (1,2), not currently occupied.
        let result = snake.advance(bounds(), &ObstacleField::empty());
        assert_eq!(result, MoveResult::Continues);
        assert_eq!(snake.head(), Position { x: 1, y: 2 });
    }
}
