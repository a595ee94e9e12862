//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::Event as PipelineEvent;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::PipelineFetcher;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The volcano, boxplot and publication panels.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The API the dashboard reads from.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from the fetch pipelines.
    event_receiver: mpsc::Receiver<PipelineEvent>,

    /// Runs the effects the dashboard asks for.
    fetcher: PipelineFetcher,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<PipelineEvent>,
        fetcher: PipelineFetcher,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            fetcher,
            ui_config,
        }
    }

    /// Leave the splash screen and start loading the volcano plot.
    fn open_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.environment.clone(),
            self.start_time,
            &self.ui_config,
        );
        for effect in state.initialize() {
            self.fetcher.dispatch(effect);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            for effect in state.update() {
                app.fetcher.dispatch(effect);
            }
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        if matches!(app.current_screen, Screen::Splash) && splash_start.elapsed() >= splash_duration
        {
            app.open_dashboard();
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    return Ok(());
                }

                match &mut app.current_screen {
                    // Any key press will skip the splash screen
                    Screen::Splash => app.open_dashboard(),
                    Screen::Dashboard(state) => handle_dashboard_key(state, key.code),
                }
            }
        }
    }
}

fn handle_dashboard_key(state: &mut DashboardState, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(1),
        KeyCode::PageUp => state.move_cursor(-10),
        KeyCode::PageDown => state.move_cursor(10),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => state.switch_series(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.click_cursor();
        }
        _ => {}
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
