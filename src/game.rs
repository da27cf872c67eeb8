use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::food::Food;
use crate::input::Direction;
use crate::obstacle::ObstacleField;
use crate::snake::{BlockedBy, MoveResult, Position, Snake};

/// Current high-level gameplay state.
///
/// `GameOver` and `Victory` are both terminal; the only exit is
/// [`GameSession::reset`]. Pausing is owned by the outer loop, which simply
/// stops calling `tick`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

/// One complete game session: snake, obstacles, food, score, and level.
///
/// The session is a synchronous state machine driven by an external loop that
/// calls [`tick`](Self::tick) at the cadence reported by
/// [`tick_rate`](Self::tick_rate) and renders the resulting snapshot. Nothing
/// here blocks or spawns work.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub obstacles: ObstacleField,
    pub food: Food,
    pub score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub death_reason: Option<BlockedBy>,
    pub tick_count: u64,
    config: GameConfig,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session with an entropy-seeded random source.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let (snake, obstacles, food) = spawn_entities(&config, &mut rng);

        Self {
            snake,
            obstacles,
            food,
            score: 0,
            level: 1,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            config,
            rng,
        }
    }

    /// Discards all session state and starts over at level 1.
    pub fn reset(&mut self) {
        let (snake, obstacles, food) = spawn_entities(&self.config, &mut self.rng);

        self.snake = snake;
        self.obstacles = obstacles;
        self.food = food;
        self.score = 0;
        self.level = 1;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.tick_count = 0;
    }

    /// Advances the simulation by one tick, no-op once the session is over.
    ///
    /// `direction` is this tick's (single) direction change request; `None`
    /// keeps the current heading.
    pub fn tick(&mut self, direction: Option<Direction>) {
        if self.status != GameStatus::Playing {
            return;
        }

        if let Some(direction) = direction {
            self.snake.change_direction(direction);
        }

        self.tick_count += 1;

        match self.snake.advance(self.config.grid(), &self.obstacles) {
            MoveResult::Blocked(reason) => {
                self.death_reason = Some(reason);
                self.status = GameStatus::GameOver;
                return;
            }
            MoveResult::Continues => {}
        }

        // The special countdown runs every tick, even the one that eats.
        self.food.tick_special();

        if self.snake.head() == self.food.position {
            self.snake.grow_next();
            self.score += self.food.points();
            self.advance_level();

            // The snake now covers every cell: there is nowhere left to put
            // food, so the session ends as a win instead of asking for a
            // spawn cell that does not exist.
            if self.snake.len() == self.config.grid().total_cells() {
                self.status = GameStatus::Victory;
                return;
            }

            self.food = Food::spawn(
                &mut self.rng,
                self.config.grid(),
                &self.snake,
                &self.obstacles,
            );
            if self.config.features().special_food {
                self.food.roll_special(&mut self.rng);
            }
        }
    }

    /// Tick cadence for the current level, in ticks per second.
    ///
    /// The outer loop re-reads this after every tick since a level-up changes
    /// it mid-session.
    #[must_use]
    pub fn tick_rate(&self) -> f32 {
        self.config.levels().speed_for_level(self.level)
    }

    /// Points still needed for the next level, `None` at the max level or
    /// when level progression is disabled.
    #[must_use]
    pub fn score_to_next_level(&self) -> Option<u32> {
        if !self.config.features().levels {
            return None;
        }
        self.config.levels().score_to_next_level(self.score, self.level)
    }

    /// The session's immutable configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn advance_level(&mut self) {
        if !self.config.features().levels {
            return;
        }

        let reached = self.config.levels().level_for_score(self.score);
        if reached <= self.level {
            return;
        }

        self.level = reached;
        if self.config.features().obstacles {
            // Regenerate around the current head so the new field cannot
            // appear directly in front of the snake.
            self.obstacles = ObstacleField::generate(
                &mut self.rng,
                self.config.grid(),
                self.level,
                self.snake.head(),
            );
        }
    }
}

fn spawn_entities(config: &GameConfig, rng: &mut StdRng) -> (Snake, ObstacleField, Food) {
    let grid = config.grid();
    let spawn = Position {
        x: i32::from(grid.width / 2),
        y: i32::from(grid.height / 2),
    };
    let snake = Snake::new(spawn, Direction::Right);

    let obstacles = if config.features().obstacles {
        ObstacleField::generate(rng, grid, 1, spawn)
    } else {
        ObstacleField::empty()
    };

    let food = Food::spawn(rng, grid, &snake, &obstacles);
    (snake, obstacles, food)
}

#[cfg(test)]
mod tests {
    use crate::config::{Features, GameConfig, GridSize};
    use crate::food::Food;
    use crate::input::Direction;
    use crate::level::LevelTable;
    use crate::obstacle::ObstacleField;
    use crate::snake::{BlockedBy, Position, Snake};

    use super::{GameSession, GameStatus};

    fn config(features: Features) -> GameConfig {
        GameConfig::new(
            GridSize {
                width: 40,
                height: 30,
            },
            features,
            LevelTable::standard(),
        )
        .expect("test config should validate")
    }

    #[test]
    fn session_spawns_at_grid_center_facing_right() {
        let session = GameSession::new_with_seed(config(Features::obstacle()), 1);

        assert_eq!(session.snake.head(), Position { x: 20, y: 15 });
        assert_eq!(session.snake.direction(), Direction::Right);
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.status, GameStatus::Playing);
    }

    #[test]
    fn first_tick_moves_the_single_cell_right() {
        let mut session = GameSession::new_with_seed(config(Features::classic()), 2);

        session.tick(Some(Direction::Right));

        assert_eq!(session.snake.head(), Position { x: 21, y: 15 });
        assert_eq!(session.snake.len(), 1);
    }

    #[test]
    fn eating_food_grows_and_scores() {
        let mut session = GameSession::new_with_seed(config(Features::classic()), 3);
        session.snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ],
            Direction::Right,
        );
        session.food = Food::normal(Position { x: 6, y: 5 });

        session.tick(None);

        assert_eq!(session.snake.head(), Position { x: 6, y: 5 });
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.score, 10);

        // Growth applies on the following movement.
        session.tick(None);
        assert_eq!(session.snake.len(), 4);
        assert_eq!(session.snake.head(), Position { x: 7, y: 5 });
    }

    #[test]
    fn special_food_scores_twenty_five() {
        let mut session = GameSession::new_with_seed(config(Features::obstacle()), 4);
        session.snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        session.obstacles = ObstacleField::empty();
        session.food = Food::special(Position { x: 6, y: 5 });

        session.tick(None);

        assert_eq!(session.score, 25);
    }

    #[test]
    fn crossing_the_first_threshold_regenerates_four_obstacles() {
        let mut session = GameSession::new_with_seed(config(Features::obstacle()), 5);
        session.snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        session.obstacles = ObstacleField::empty();
        session.score = 45;
        session.food = Food::normal(Position { x: 6, y: 5 });

        session.tick(None);

        assert_eq!(session.score, 55);
        assert_eq!(session.level, 2);
        // Level 2: min(2 * 2, 15) scattered obstacles, no walls yet.
        assert_eq!(session.obstacles.len(), 4);
        assert!(!session.obstacles.blocks(session.food.position));
        assert!(!session.snake.occupies(session.food.position));
    }

    #[test]
    fn level_never_advances_before_the_threshold() {
        let mut session = GameSession::new_with_seed(config(Features::obstacle()), 6);
        session.snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        session.obstacles = ObstacleField::empty();
        session.score = 30;
        session.food = Food::normal(Position { x: 6, y: 5 });

        session.tick(None);

        assert_eq!(session.score, 40);
        assert_eq!(session.level, 1);
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn wall_collision_ends_the_session_and_ticks_become_noops() {
        let mut session = GameSession::new_with_seed(config(Features::classic()), 7);
        session.snake = Snake::new(Position { x: 0, y: 5 }, Direction::Left);

        session.tick(None);

        assert_eq!(session.status, GameStatus::GameOver);
        assert_eq!(session.death_reason, Some(BlockedBy::Wall));
        assert_eq!(session.snake.head(), Position { x: 0, y: 5 });

        let ticks_before = session.tick_count;
        session.tick(Some(Direction::Right));
        assert_eq!(session.tick_count, ticks_before);
        assert_eq!(session.status, GameStatus::GameOver);
    }

    #[test]
    fn obstacle_collision_records_its_reason() {
        let mut session = GameSession::new_with_seed(config(Features::obstacle()), 8);
        session.snake = Snake::new(Position { x: 9, y: 10 }, Direction::Right);
        session.obstacles = ObstacleField::from_cells([Position { x: 10, y: 10 }]);
        session.food = Food::normal(Position { x: 0, y: 0 });

        session.tick(None);

        assert_eq!(session.status, GameStatus::GameOver);
        assert_eq!(session.death_reason, Some(BlockedBy::Obstacle));
    }

    #[test]
    fn reset_restores_a_fresh_level_one_session() {
        let mut session = GameSession::new_with_seed(config(Features::obstacle()), 9);
        session.snake = Snake::new(Position { x: 0, y: 5 }, Direction::Left);
        session.score = 200;
        session.level = 3;
        session.tick(None);
        assert_eq!(session.status, GameStatus::GameOver);

        session.reset();

        assert_eq!(session.status, GameStatus::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.snake.head(), Position { x: 20, y: 15 });
        assert_eq!(session.tick_count, 0);
        assert!(!session.obstacles.blocks(session.food.position));
    }

    #[test]
    fn classic_mode_never_levels_or_spawns_obstacles() {
        let mut session = GameSession::new_with_seed(config(Features::classic()), 10);
        assert!(session.obstacles.is_empty());

        session.snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);
        session.score = 200;
        session.food = Food::normal(Position { x: 6, y: 5 });

        session.tick(None);

        assert_eq!(session.level, 1);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.score_to_next_level(), None);
        assert!(!session.food.is_special());
    }

    #[test]
    fn eating_the_last_free_cell_wins_instead_of_panicking() {
        let grid = GridSize {
            width: 10,
            height: 10,
        };
        let mut session = GameSession::new_with_seed(
            GameConfig::new(grid, Features::classic(), LevelTable::standard())
                .expect("test config should validate"),
            13,
        );

        // Snake covering every cell except (0,0), head at (1,0) facing the
        // gap, with a growth already pending from the previous food.
        let mut segments = vec![Position { x: 1, y: 0 }];
        for y in 0..10 {
            for x in 0..10 {
                if (x, y) != (0, 0) && (x, y) != (1, 0) {
                    segments.push(Position { x, y });
                }
            }
        }
        session.snake = Snake::from_segments(segments, Direction::Left);
        session.snake.grow_next();
        session.food = Food::normal(Position { x: 0, y: 0 });

        session.tick(None);

        assert_eq!(session.status, GameStatus::Victory);
        assert_eq!(session.snake.len(), grid.total_cells());
        assert_eq!(session.score, 10);

        // Victory is terminal like any other end state.
        let ticks_before = session.tick_count;
        session.tick(Some(Direction::Down));
        assert_eq!(session.tick_count, ticks_before);
        assert_eq!(session.status, GameStatus::Victory);

        session.reset();
        assert_eq!(session.status, GameStatus::Playing);
        assert_eq!(session.snake.len(), 1);
    }

    #[test]
    fn tick_rate_follows_the_current_level() {
        let mut session = GameSession::new_with_seed(config(Features::obstacle()), 11);
        assert_eq!(session.tick_rate(), 3.0);

        session.level = 2;
        assert_eq!(session.tick_rate(), 5.0);

        session.level = 99;
        assert_eq!(session.tick_rate(), 15.0);
    }

    #[test]
    fn score_to_next_level_reports_remaining_points() {
        let mut session = GameSession::new_with_seed(config(Features::obstacle()), 12);
        assert_eq!(session.score_to_next_level(), Some(50));

        session.score = 30;
        assert_eq!(session.score_to_next_level(), Some(20));

        session.score = 500;
        session.level = 6;
        assert_eq!(session.score_to_next_level(), None);
    }
}
