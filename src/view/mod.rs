//! TUI rendering and terminal management (impure shell)

pub mod effects;
mod help;
mod helpers;
pub mod layout;
mod modal;
mod styles;
pub mod timer;
mod wizard;

pub use effects::EffectRunner;
pub use helpers::truncate_with_ellipsis;
pub use layout::render_layout;
pub use timer::RepeatingTimer;

use crate::config::ResolvedConfig;
use crate::macros::{default_catalog, Keyboard, TranscriptKeyboard};
use crate::model::MacroCatalog;
use crate::source::{FsLogStore, LogStore};
use crate::state::{AppEvent, AppState, Effect, ViewStateMachine};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Upper bound on how long the loop blocks on terminal input, so background
/// results are picked up promptly.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Countdown tick period.
const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Startup options for the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOptions {
    /// Start with CoreProtect parsing enabled.
    pub coreprotect_mode: bool,
    /// Period of the logs directory rescan.
    pub rescan_interval: Duration,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    machine: ViewStateMachine,
    runner: EffectRunner,
    results: Receiver<AppEvent>,
    rescan: RepeatingTimer,
    countdown: RepeatingTimer,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        store: Arc<dyn LogStore>,
        keyboard: Arc<dyn Keyboard>,
        catalog: Arc<MacroCatalog>,
        options: AppOptions,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, store, keyboard, catalog, options))
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the shell around an existing terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        store: Arc<dyn LogStore>,
        keyboard: Arc<dyn Keyboard>,
        catalog: Arc<MacroCatalog>,
        options: AppOptions,
    ) -> Self {
        let (tx, results) = mpsc::channel();
        Self {
            terminal,
            state: AppState::new(options.coreprotect_mode),
            machine: ViewStateMachine::new(Arc::clone(&catalog)),
            runner: EffectRunner::new(store, keyboard, catalog, tx),
            results,
            rescan: RepeatingTimer::new(options.rescan_interval),
            countdown: RepeatingTimer::new(COUNTDOWN_INTERVAL),
        }
    }

    /// Current state, for inspection.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Whether the countdown timer is armed.
    pub fn countdown_running(&self) -> bool {
        self.countdown.is_active()
    }

    /// Backend, for inspecting rendered output.
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Size the layout to the terminal, scan synchronously and arm the rescan timer.
    pub fn start(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.handle_event(AppEvent::Resize(size.width, size.height));
        let scanned = self.runner.scan_now();
        self.handle_event(scanned);
        self.rescan.start(Instant::now());
        Ok(())
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.start()?;
        self.draw()?;

        loop {
            let timeout = self.poll_timeout(Instant::now());
            if event::poll(timeout)? {
                let quit = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_event(AppEvent::Key(key))
                    }
                    Event::Resize(width, height) => {
                        self.handle_event(AppEvent::Resize(width, height))
                    }
                    _ => false,
                };
                if quit {
                    return Ok(());
                }
            }

            if self.drain_results() || self.fire_timers(Instant::now()) {
                return Ok(());
            }
            self.draw()?;
        }
    }

    /// Feed one event through the state machine and perform its effects.
    ///
    /// Returns true when the application should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        let effects = self.machine.update(&mut self.state, event);
        let mut quit = false;
        for effect in effects {
            debug!(?effect, "Effect");
            match effect {
                Effect::Quit => quit = true,
                Effect::StartCountdown => self.countdown.start(Instant::now()),
                Effect::StopCountdown => self.countdown.stop(),
                other => self.runner.spawn(other),
            }
        }
        quit
    }

    /// Block up to `timeout` for one background result and process it.
    ///
    /// Returns false when nothing arrived in time.
    pub fn wait_for_result(&mut self, timeout: Duration) -> bool {
        match self.results.recv_timeout(timeout) {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Process every background result that has already arrived.
    fn drain_results(&mut self) -> bool {
        let mut quit = false;
        while let Ok(event) = self.results.try_recv() {
            quit |= self.handle_event(event);
        }
        quit
    }

    /// Fire due timers as events.
    fn fire_timers(&mut self, now: Instant) -> bool {
        let mut quit = false;
        if self.rescan.poll(now) {
            quit |= self.handle_event(AppEvent::RescanTick);
        }
        if self.countdown.poll(now) {
            quit |= self.handle_event(AppEvent::CountdownTick);
        }
        quit
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        [self.rescan.time_until(now), self.countdown.time_until(now)]
            .into_iter()
            .flatten()
            .fold(MAX_POLL_INTERVAL, Duration::min)
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.state;
        let catalog = self.machine.catalog();
        self.terminal
            .draw(|frame| render_layout(frame, state, catalog))?;
        Ok(())
    }
}

/// Initialize and run the TUI application with the resolved configuration.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_app(config: &ResolvedConfig) -> Result<(), TuiError> {
    let store: Arc<dyn LogStore> = Arc::new(FsLogStore::new(&config.logs_dir, &config.output_dir));
    let keyboard: Arc<dyn Keyboard> = Arc::new(TranscriptKeyboard::new(&config.transcript_path));
    let catalog = Arc::new(default_catalog());
    info!(
        logs_dir = %config.logs_dir.display(),
        output_dir = %config.output_dir.display(),
        macros = catalog.len(),
        "Starting viewer"
    );

    let mut app = TuiApp::new(
        store,
        keyboard,
        catalog,
        AppOptions {
            coreprotect_mode: config.coreprotect_mode,
            rescan_interval: config.rescan_interval,
        },
    )?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
