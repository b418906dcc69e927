//! Tombs of the Ancient Kings - Entry Point
//!
//! Initializes logging and the terminal, then runs the input/render loop
//! until the player quits.

use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use ancient_tombs::data::GameConfig;
use ancient_tombs::ui::App;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    init_logging();
    log::info!("Starting Tombs of the Ancient Kings v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run_game_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Shut down cleanly");
    result
}

/// Log to a file so the TUI is not overwritten; stderr if it cannot be opened
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("ancient-tombs.log")
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
}

/// Main game loop
fn run_game_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            // Only handle key press events, not releases
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let quit = match app.handle_key(key) {
                    Ok(quit) => quit,
                    Err(e) => {
                        app.shutdown();
                        return Err(e);
                    }
                };
                if quit {
                    break;
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }

    app.shutdown();
    Ok(())
}
