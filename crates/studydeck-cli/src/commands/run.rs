use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use studydeck_core::{ApiClient, AppConfig, Storage};
use studydeck_tui::{
    app::App,
    event::{AppEvent, EventHandler, FetchResult},
    input::{handle_key_event, Action},
    widgets::{DashboardWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let api = Arc::new(ApiClient::new(&config)?);
    let storage = Storage::new(config.data_dir().join("state"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("studydeck"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), Theme::default(), storage);

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.scroll.animation_fps);

    // Channel for async fetch results
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();

    // Initial load
    app.begin_refresh();
    spawn_fetches(api.clone(), tx.clone());

    // Track if we need high frame rate for running animations. Checked at
    // the END of each iteration to decide the NEXT iteration's tick rate.
    let mut needs_fast_update = false;

    let result = loop {
        let now = Instant::now();

        // Fold in any completed fetches (non-blocking)
        while let Ok(fetch) = rx.try_recv() {
            app.apply_fetch(fetch, now);
        }

        if let Err(e) = terminal.draw(|frame| draw(frame, &mut app, now)) {
            break Err(e.into());
        }

        let event = if needs_fast_update {
            event_handler.next_animation()
        } else {
            event_handler.next()
        };
        match event {
            Ok(Some(AppEvent::Key(key))) => {
                let action = handle_key_event(key, app.mode);
                handle_action(&mut app, action, &api, &tx, now);
            }
            Ok(Some(AppEvent::Resize(_, _))) => {
                // Layout is recomputed every frame; nothing to invalidate.
            }
            Ok(Some(AppEvent::Tick)) => app.on_tick(now),
            Ok(None) => {}
            Err(e) => break Err(e),
        }

        needs_fast_update = app.needs_animation();

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let size = frame.area();

    // Main layout: content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    app.update_frame(now, main_layout[0].height);

    DashboardWidget::render(frame, main_layout[0], app, now);
    StatusBarWidget::render(frame, main_layout[1], app);

    // Notifications overlay everything
    app.notifications.render(frame, &app.theme);
}

fn handle_action(
    app: &mut App,
    action: Action,
    api: &Arc<ApiClient>,
    tx: &mpsc::UnboundedSender<FetchResult>,
    now: Instant,
) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_down(),
        Action::ScrollUp => app.scroll_up(),
        Action::HalfPageDown => app.scroll_half_page(true),
        Action::HalfPageUp => app.scroll_half_page(false),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::JumpSection(section) => app.jump_to_section(section, now),
        Action::Refresh => {
            if app.try_refresh(now) {
                spawn_fetches(api.clone(), tx.clone());
            }
        }
        Action::StartFilter => app.start_filter(),
        Action::InputChar(c) => app.filter_push(c, now),
        Action::Backspace => app.filter_backspace(now),
        Action::Confirm => app.confirm_filter(),
        Action::Cancel => {
            app.cancel_filter(now);
            app.status_message = None;
        }
        Action::None => {}
    }
}

/// Fire the three dashboard fetches; each reports back independently.
fn spawn_fetches(api: Arc<ApiClient>, tx: mpsc::UnboundedSender<FetchResult>) {
    {
        let api = api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.student_stats().await.map_err(|e| e.to_string());
            let _ = tx.send(FetchResult::Stats(result));
        });
    }
    {
        let api = api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.recommendations().await.map_err(|e| e.to_string());
            let _ = tx.send(FetchResult::Recommendations(result));
        });
    }
    tokio::spawn(async move {
        let result = api.clustering_insights().await.map_err(|e| e.to_string());
        let _ = tx.send(FetchResult::Insights(result));
    });
}
