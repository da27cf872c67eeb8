use ratatui::style::Color;
use thiserror::Error;

use crate::level::LevelTable;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default grid width in cells (matches an 800px window at 20px cells).
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Smallest playable grid edge. Below this the obstacle interior margin and
/// the spawn guard box leave no room to place anything.
pub const MIN_GRID_EDGE: u16 = 10;

/// Capability flags selecting which rule variants a session runs with.
///
/// The three historical game variants collapse into one configurable core:
/// classic (all off), leveled (levels + special food), and obstacle (all on).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Features {
    /// Score-driven level progression; off pins the session to level 1.
    pub levels: bool,
    /// Static obstacle field regenerated on level-up.
    pub obstacles: bool,
    /// Time-limited higher-value food variant.
    pub special_food: bool,
}

impl Features {
    /// Plain snake: fixed speed, no obstacles, normal food only.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            levels: false,
            obstacles: false,
            special_food: false,
        }
    }

    /// Levels and special food, no obstacles.
    #[must_use]
    pub fn leveled() -> Self {
        Self {
            levels: true,
            obstacles: false,
            special_food: true,
        }
    }

    /// The full rule set.
    #[must_use]
    pub fn obstacle() -> Self {
        Self {
            levels: true,
            obstacles: true,
            special_food: true,
        }
    }
}

/// Immutable per-session configuration, validated at construction.
///
/// Fields stay private so a constructed config cannot drift out of the
/// validated state; everything is reachable through the accessors.
#[derive(Debug, Clone)]
pub struct GameConfig {
    grid: GridSize,
    features: Features,
    levels: LevelTable,
}

impl GameConfig {
    /// Builds a validated configuration.
    ///
    /// Fails fast on degenerate grids; the level table validates itself in
    /// [`LevelTable::new`], so a `LevelTable` passed here is already sound.
    pub fn new(
        grid: GridSize,
        features: Features,
        levels: LevelTable,
    ) -> Result<Self, ConfigError> {
        if grid.width < MIN_GRID_EDGE || grid.height < MIN_GRID_EDGE {
            return Err(ConfigError::GridTooSmall {
                width: grid.width,
                height: grid.height,
            });
        }

        Ok(Self {
            grid,
            features,
            levels,
        })
    }

    /// Default full-featured configuration on the standard grid.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(
            GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            Features::obstacle(),
            LevelTable::standard(),
        )
    }

    /// Grid dimensions in cells.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Enabled rule variants.
    #[must_use]
    pub fn features(&self) -> Features {
        self.features
    }

    /// Level progression tables.
    #[must_use]
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }
}

/// Construction-time configuration failures.
///
/// These are programmer/configuration errors; nothing here is recoverable at
/// tick time, so construction refuses the session outright.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small; both edges must be at least {MIN_GRID_EDGE}")]
    GridTooSmall { width: u16, height: u16 },

    #[error("level table must contain at least one entry")]
    EmptyLevelTable,

    #[error("level thresholds must start at 0, found {found}")]
    FirstThresholdNotZero { found: u32 },

    #[error("level thresholds must be strictly increasing at index {index}")]
    ThresholdsNotIncreasing { index: usize },

    #[error("level table has {thresholds} thresholds but {speeds} speeds")]
    SpeedTableLengthMismatch { thresholds: usize, speeds: usize },

    #[error("tick speed for level {level} must be positive")]
    NonPositiveSpeed { level: u32 },
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub food_special: Color,
    pub obstacle: Color,
    pub border: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic green snake on dark theme.
pub const THEME_DEFAULT: Theme = Theme {
    name: "Classic",
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    food_special: Color::Yellow,
    obstacle: Color::Blue,
    border: Color::White,
    hud_text: Color::DarkGray,
    hud_accent: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Snake head glyphs by travel direction.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

/// Solid block for body segments.
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_SNAKE_TAIL: &str = "▒";
pub const GLYPH_OBSTACLE: &str = "▓";

/// Food glyphs.
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_FOOD_SPECIAL: &str = "◆";
