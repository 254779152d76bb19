use color_eyre::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use taskmario_tui::{
    app::App,
    config::Config,
    cycler,
    events::{Event, EventHandler},
    logging,
    models::SEARCH_PHRASES,
    ui,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Instrumentation and safety
    let _log_guard = logging::initialize_logging();
    install_panic_hook();
    color_eyre::install()?;

    let config = Config::load();

    // Ready terminal and state
    let mut terminal = setup_terminal()?;
    let events = EventHandler::new(config.ui.tick_rate_ms);
    let mut app = App::new(&config, events.tx.clone());

    // Background placeholder animation
    let cycler_task = cycler::spawn_cycler(SEARCH_PHRASES, events.tx.clone());
    info!("TaskMario TUI started");

    // Main loop
    let mut event_handler = events;
    while !app.should_quit {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(event) = event_handler.next().await {
            match event {
                Event::Tick => app.on_tick(),
                Event::Input(key) => app.handle_key(key),
                Event::PlaceholderUpdate(text) => app.on_placeholder_update(text),
                Event::LocationUpdate(label) => app.on_location_update(label),
            }
        }
    }

    // The animation must not outlive the screen it draws to. Dropping `app`
    // below aborts any in-flight location resolution the same way.
    cycler_task.abort();

    restore_terminal(terminal)?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Force terminal cleanup!
        crossterm::terminal::disable_raw_mode().ok();
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        )
        .ok();
        original_hook(panic_info);
    }));
}
