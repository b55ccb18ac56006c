use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use kinetic_core::AppConfig;
use kinetic_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{NavBarWidget, PageWidget, ProgressBarWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("Kinetic")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config);

    // Restore terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: Arc<AppConfig>) -> Result<()> {
    let theme = Theme::from_config(&config.ui);
    let mut app = App::new(config.clone(), theme)?;

    let size = terminal.size()?;
    app.resize(size.width, size.height);
    app.start(Instant::now());

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Track if we need high frame rate for running animations
    // This is checked at the END of each iteration to determine NEXT iteration's tick rate
    let mut needs_fast_update = false;

    // Main loop
    loop {
        app.on_frame(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            NavBarWidget::render(frame, app.areas.nav, &app);
            ProgressBarWidget::render(frame, app.areas.progress, &app);
            PageWidget::render(frame, app.areas.body, &app);
            StatusBarWidget::render(frame, app.areas.status, &app);
        })?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key, &app);
                    app.apply(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(width, height) => app.resize(width, height),
                AppEvent::FocusGained => app.set_visible(true),
                AppEvent::FocusLost => app.set_visible(false),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.is_animating();

        if app.should_quit {
            break;
        }
    }

    info!("Preview closed");
    Ok(())
}
