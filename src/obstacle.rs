use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;

/// Obstacles gained per level.
const OBSTACLES_PER_LEVEL: u32 = 2;

/// Hard cap on scattered obstacle count regardless of level.
const MAX_OBSTACLE_COUNT: u32 = 15;

/// Cells kept free of obstacles along every grid edge.
const EDGE_MARGIN: i32 = 2;

/// Chebyshev radius around the snake spawn kept free on generation.
const SPAWN_GUARD_DISTANCE: i32 = 3;

/// First level at which straight walls appear.
const WALLS_FROM_LEVEL: u32 = 3;

/// Longest wall, regardless of level.
const MAX_WALL_LENGTH: u32 = 6;

/// Per-obstacle sampling attempts before giving up on that obstacle.
///
/// On grids large enough to play on the limit is never reached; it exists so
/// pathological configurations place fewer obstacles instead of spinning.
const PLACEMENT_RETRY_LIMIT: u32 = 128;

/// Static blocked cells, regenerated wholesale on level-up.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    cells: HashSet<Position>,
}

impl ObstacleField {
    /// Returns a field with no blocked cells.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a field from explicit cells, mainly for tests.
    #[must_use]
    pub fn from_cells<I: IntoIterator<Item = Position>>(cells: I) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Generates a fresh field for `level`, keeping clear of `spawn`.
    ///
    /// Scattered obstacles number `min(level * 2, 15)`, sampled uniformly from
    /// the interior (a 2-cell edge margin is excluded) and resampled when they
    /// collide with an existing obstacle or land within Chebyshev distance 3
    /// of the spawn cell. From level 3 one horizontal and one vertical wall of
    /// length `min(level, 6)` are added; wall cells that are already occupied
    /// or inside the spawn guard are skipped, so walls can come out shorter
    /// than requested.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        grid: GridSize,
        level: u32,
        spawn: Position,
    ) -> Self {
        let mut field = Self::empty();

        let count = (level * OBSTACLES_PER_LEVEL).min(MAX_OBSTACLE_COUNT);
        for _ in 0..count {
            field.place_scattered(rng, grid, spawn);
        }

        if level >= WALLS_FROM_LEVEL {
            let length = level.min(MAX_WALL_LENGTH);
            field.place_wall(rng, grid, spawn, length, WallOrientation::Horizontal);
            field.place_wall(rng, grid, spawn, length, WallOrientation::Vertical);
        }

        field
    }

    /// Returns true when `position` is a blocked cell.
    #[must_use]
    pub fn blocks(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Number of blocked cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when no cell is blocked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over blocked cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    fn place_scattered<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: GridSize, spawn: Position) {
        for _ in 0..PLACEMENT_RETRY_LIMIT {
            let candidate = sample_interior(rng, grid);
            if self.cells.contains(&candidate) {
                continue;
            }
            if candidate.chebyshev_distance(spawn) <= SPAWN_GUARD_DISTANCE {
                continue;
            }

            self.cells.insert(candidate);
            return;
        }
        // Retries exhausted: place fewer obstacles rather than livelock.
    }

    fn place_wall<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: GridSize,
        spawn: Position,
        length: u32,
        orientation: WallOrientation,
    ) {
        let length = i32::try_from(length).unwrap_or(i32::MAX);
        let (span_x, span_y) = match orientation {
            WallOrientation::Horizontal => (length, 1),
            WallOrientation::Vertical => (1, length),
        };

        let max_x = i32::from(grid.width) - EDGE_MARGIN - span_x;
        let max_y = i32::from(grid.height) - EDGE_MARGIN - span_y;
        if max_x < EDGE_MARGIN || max_y < EDGE_MARGIN {
            return;
        }

        let origin = Position {
            x: rng.gen_range(EDGE_MARGIN..=max_x),
            y: rng.gen_range(EDGE_MARGIN..=max_y),
        };

        for step in 0..length {
            let cell = match orientation {
                WallOrientation::Horizontal => Position {
                    x: origin.x + step,
                    y: origin.y,
                },
                WallOrientation::Vertical => Position {
                    x: origin.x,
                    y: origin.y + step,
                },
            };

            // Occupied or spawn-adjacent cells are skipped, not re-placed, so
            // the materialized wall may be shorter than `length`.
            if self.cells.contains(&cell) || cell.chebyshev_distance(spawn) <= SPAWN_GUARD_DISTANCE
            {
                continue;
            }
            self.cells.insert(cell);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum WallOrientation {
    Horizontal,
    Vertical,
}

fn sample_interior<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> Position {
    Position {
        x: rng.gen_range(EDGE_MARGIN..i32::from(grid.width) - EDGE_MARGIN),
        y: rng.gen_range(EDGE_MARGIN..i32::from(grid.height) - EDGE_MARGIN),
    }
}
