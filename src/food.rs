use rand::Rng;

use crate::config::GridSize;
use crate::obstacle::ObstacleField;
use crate::snake::{Position, Snake};

/// Points granted by ordinary food.
pub const NORMAL_FOOD_POINTS: u32 = 10;

/// Points granted by special food.
pub const SPECIAL_FOOD_POINTS: u32 = 25;

/// Special food lifetime in ticks before it reverts to normal.
pub const SPECIAL_FOOD_LIFETIME_TICKS: u16 = 300;

/// Probability that freshly placed food comes up special.
pub const SPECIAL_FOOD_CHANCE: f64 = 0.10;

/// Food type and associated metadata.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Special { remaining_ticks: u16 },
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
        }
    }

    /// Creates a special food at `position` with a full countdown.
    #[must_use]
    pub fn special(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Special {
                remaining_ticks: SPECIAL_FOOD_LIFETIME_TICKS,
            },
        }
    }

    /// Spawns normal food in a cell free of the snake and all obstacles.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        obstacles: &ObstacleField,
    ) -> Self {
        Self::normal(spawn_position(rng, bounds, snake, obstacles))
    }

    /// Returns true when this food is currently special.
    #[must_use]
    pub fn is_special(self) -> bool {
        matches!(self.kind, FoodKind::Special { .. })
    }

    /// Remaining special ticks, zero for normal food.
    #[must_use]
    pub fn remaining_special_ticks(self) -> u16 {
        match self.kind {
            FoodKind::Normal => 0,
            FoodKind::Special { remaining_ticks } => remaining_ticks,
        }
    }

    /// Advances the special countdown by one tick.
    ///
    /// When the countdown reaches zero the food reverts to normal in place;
    /// it is not re-placed. No effect on normal food.
    pub fn tick_special(&mut self) {
        if let FoodKind::Special {
            ref mut remaining_ticks,
        } = self.kind
        {
            *remaining_ticks = remaining_ticks.saturating_sub(1);
            if *remaining_ticks == 0 {
                self.kind = FoodKind::Normal;
            }
        }
    }

    /// Rolls the special designation for freshly placed food.
    pub fn roll_special<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.gen_bool(SPECIAL_FOOD_CHANCE) {
            self.kind = FoodKind::Special {
                remaining_ticks: SPECIAL_FOOD_LIFETIME_TICKS,
            };
        }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self.kind {
            FoodKind::Normal => NORMAL_FOOD_POINTS,
            FoodKind::Special { .. } => SPECIAL_FOOD_POINTS,
        }
    }
}

/// Samples a cell not occupied by the snake body or the obstacle field.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    obstacles: &ObstacleField,
) -> Position {
    let mut candidates = Vec::new();

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) && !obstacles.blocks(position) {
                candidates.push(position);
            }
        }
    }

    assert!(
        !candidates.is_empty(),
        "spawn_position: no free cells on the board ({}×{})",
        bounds.width,
        bounds.height,
    );

    let index = rng.gen_range(0..candidates.len());
    candidates[index]
}
