use std::error::Error;
use std::io;
use std::panic;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use gridsnake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, Features, GameConfig, GridSize, THEME_DEFAULT,
};
use gridsnake::game::{GameSession, GameStatus};
use gridsnake::input::{self, Direction, GameInput};
use gridsnake::level::LevelTable;
use gridsnake::renderer::{self, Overlay};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Poll granularity for input and frame pacing.
const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Mode {
    /// Fixed speed, no obstacles, normal food only.
    Classic,
    /// Level progression and special food, no obstacles.
    Leveled,
    /// The full rule set: levels, obstacles, special food.
    Obstacle,
}

impl Mode {
    fn features(self) -> Features {
        match self {
            Self::Classic => Features::classic(),
            Self::Leveled => Features::leveled(),
            Self::Obstacle => Features::obstacle(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Grid-based terminal snake with levels and obstacles")]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Rule variant to play.
    #[arg(long, value_enum, default_value_t = Mode::Obstacle)]
    mode: Mode,

    /// Seed for reproducible obstacle and food placement.
    #[arg(long)]
    seed: Option<u64>,
}

/// Which screen the outer loop is on; the core only knows Playing/GameOver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Screen {
    Start,
    Running,
    Paused,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = GameConfig::new(
        GridSize {
            width: cli.width,
            height: cli.height,
        },
        cli.mode.features(),
        LevelTable::standard(),
    )?;

    let session = match cli.seed {
        Some(seed) => GameSession::new_with_seed(config, seed),
        None => GameSession::new(config),
    };

    install_panic_hook();
    let result = run(session);
    cleanup_terminal()?;
    result?;
    Ok(())
}

fn run(mut session: GameSession) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let mut screen = Screen::Start;
    let mut pending_direction: Option<Direction> = None;
    let mut last_tick = Instant::now();

    loop {
        let overlay = match screen {
            Screen::Start => Overlay::StartMenu,
            Screen::Paused => Overlay::PauseMenu,
            Screen::Running => Overlay::None,
        };
        terminal.draw(|frame| renderer::render(frame, &session, &THEME_DEFAULT, overlay))?;

        if let Some(game_input) = input::poll_input(FRAME_POLL_INTERVAL)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Confirm => match screen {
                    Screen::Start => {
                        screen = Screen::Running;
                        last_tick = Instant::now();
                    }
                    Screen::Running
                        if matches!(
                            session.status,
                            GameStatus::GameOver | GameStatus::Victory
                        ) =>
                    {
                        session.reset();
                        pending_direction = None;
                        last_tick = Instant::now();
                    }
                    _ => {}
                },
                GameInput::Pause => {
                    screen = match screen {
                        Screen::Running if session.status == GameStatus::Playing => Screen::Paused,
                        Screen::Paused => Screen::Running,
                        other => other,
                    };
                }
                GameInput::Direction(direction) => {
                    if screen == Screen::Running {
                        // Last-writer-wins until the next tick consumes it.
                        pending_direction = Some(direction);
                    }
                }
            }
        }

        if screen == Screen::Running && session.status == GameStatus::Playing {
            // The tick rate changes on level-up, so re-read it every pass.
            let tick_interval = Duration::from_secs_f32(1.0 / session.tick_rate());
            if last_tick.elapsed() >= tick_interval {
                session.tick(pending_direction.take());
                last_tick = Instant::now();
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
