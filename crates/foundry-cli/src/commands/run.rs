use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use foundry_core::geometry::Viewport;
use foundry_core::{AppConfig, Deployer, Error, HttpDeployer};
use foundry_tui::{
    app::{App, Command, Mode, Preview},
    event::{AppEvent, DeployResult, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
    widgets::{PageWidget, PopupWidget, PreviewWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, html: Option<PathBuf>) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let deployer: Arc<dyn Deployer> = Arc::new(HttpDeployer::new(&config.deploy)?);

    // Read the preview before the terminal is taken over so errors print normally
    let preview = html.as_deref().map(Preview::load).transpose()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("AI Foundry"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = load_theme(&config.ui.theme);
    let size = terminal.size()?;
    // One row is reserved for the status bar
    let viewport = Viewport::new(f64::from(size.width), f64::from(size.height.saturating_sub(1)));
    let mut app = App::new(config.clone(), theme, viewport);
    if let Some(preview) = preview {
        app = app.with_preview(preview);
    }
    info!("TUI started at {}x{}", size.width, size.height);

    let event_handler = EventHandler::with_animation_fps(
        config.ui.tick_rate_ms,
        config.scroll.animation_fps,
    );

    let (deploy_tx, mut deploy_rx) = mpsc::unbounded_channel::<DeployResult>();

    let mut needs_fast_update = false;

    let result = loop {
        while let Ok(result) = deploy_rx.try_recv() {
            match result {
                DeployResult::Success(deployment) => app.finish_deploy(Ok(deployment)),
                DeployResult::Failure { error } => app.finish_deploy(Err(error)),
            }
        }

        app.tick(Instant::now());

        if let Err(e) = terminal.draw(|frame| {
            let size = frame.area();
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            app.resize(main_layout[0].width, main_layout[0].height);

            if matches!(app.mode, Mode::Preview) {
                PreviewWidget::render(frame, main_layout[0], &mut app);
            } else {
                PageWidget::render(frame, main_layout[0], &app);
            }
            StatusBarWidget::render(frame, main_layout[1], &app);

            if let Mode::Notice(notice) = &app.mode {
                PopupWidget::render_notice(frame, notice, &app.theme);
            }
        }) {
            break Err(e.into());
        }

        let event = if needs_fast_update {
            event_handler.next_animation()
        } else {
            event_handler.next()
        };
        match event {
            Ok(Some(AppEvent::Key(key))) => {
                let action = handle_key_event(key, &app, &keymap);
                if let Some(command) = app.handle_action(action) {
                    execute_command(command, &app, &deployer, deploy_tx.clone());
                }
            }
            Ok(Some(AppEvent::Wheel(notches))) => app.on_wheel(notches),
            Ok(Some(AppEvent::Resize(width, height))) => {
                app.resize(width, height.saturating_sub(1));
            }
            Ok(Some(AppEvent::Tick)) | Ok(None) => {}
            Err(e) => break Err(e),
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break Ok(());
        }
    };

    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("TUI exited");
    result
}

/// Run a command from the app in the background
fn execute_command(
    command: Command,
    app: &App,
    deployer: &Arc<dyn Deployer>,
    tx: mpsc::UnboundedSender<DeployResult>,
) {
    match command {
        Command::Deploy { html } => {
            let deployer = Arc::clone(deployer);
            let project_name = deployer.project_name();
            info!("Deploying {} from {:?}", project_name, app.preview.as_ref().map(|p| p.file_name()));
            tokio::spawn(async move {
                let result = match deployer.deploy(&html, &project_name).await {
                    Ok(deployment) => DeployResult::Success(deployment),
                    Err(Error::Deploy(message)) => DeployResult::Failure { error: message },
                    Err(e) => {
                        warn!("Deployment request failed: {}", e);
                        DeployResult::Failure { error: e.to_string() }
                    }
                };
                let _ = tx.send(result);
            });
        }
    }
}
