//! Background execution of state machine effects.
//!
//! Each effect runs on its own short-lived thread and reports back through an
//! mpsc sender as an [`AppEvent`]. Workers never touch [`crate::state::AppState`].

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::macros::Keyboard;
use crate::model::{MacroCatalog, MacroError, MacroParams};
use crate::parser::{parse_content, parse_log_content};
use crate::source::{LogStore, SaveRequest};
use crate::state::{AppEvent, Effect, LoadedEntries};

/// Runs I/O effects off the event loop.
#[derive(Clone)]
pub struct EffectRunner {
    store: Arc<dyn LogStore>,
    keyboard: Arc<dyn Keyboard>,
    catalog: Arc<MacroCatalog>,
    tx: Sender<AppEvent>,
}

impl EffectRunner {
    /// Runner reporting results on `tx`.
    pub fn new(
        store: Arc<dyn LogStore>,
        keyboard: Arc<dyn Keyboard>,
        catalog: Arc<MacroCatalog>,
        tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            store,
            keyboard,
            catalog,
            tx,
        }
    }

    /// Start a background effect. Loop-control effects are ignored here.
    pub fn spawn(&self, effect: Effect) {
        match effect {
            Effect::Scan => {
                let store = Arc::clone(&self.store);
                self.spawn_worker("scan", move || AppEvent::ScanCompleted(scan(store.as_ref())));
            }
            Effect::LoadLog {
                request_id,
                path,
                filters,
                coreprotect,
            } => {
                let store = Arc::clone(&self.store);
                self.spawn_worker("load", move || {
                    let result = load(store.as_ref(), &path, &filters, coreprotect);
                    AppEvent::EntriesLoaded {
                        request_id,
                        path,
                        result,
                    }
                });
            }
            Effect::Save { request, filename } => {
                let store = Arc::clone(&self.store);
                self.spawn_worker("save", move || {
                    AppEvent::SaveCompleted(save(store.as_ref(), &request, &filename))
                });
            }
            Effect::RunMacro { name, params } => {
                let catalog = Arc::clone(&self.catalog);
                let keyboard = Arc::clone(&self.keyboard);
                self.spawn_worker("macro", move || {
                    let result = run_macro(&catalog, keyboard.as_ref(), &name, &params);
                    AppEvent::MacroFinished { name, result }
                });
            }
            Effect::Quit | Effect::StartCountdown | Effect::StopCountdown => {}
        }
    }

    /// Perform a scan on the calling thread.
    pub fn scan_now(&self) -> AppEvent {
        AppEvent::ScanCompleted(scan(self.store.as_ref()))
    }

    fn spawn_worker<F>(&self, kind: &'static str, work: F)
    where
        F: FnOnce() -> AppEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("mclogview-{kind}"))
            .spawn(move || {
                // The loop may already be gone on shutdown.
                let _ = tx.send(work());
            });
        if let Err(e) = spawned {
            warn!(kind, error = %e, "Failed to spawn worker thread");
        }
    }
}

fn scan(store: &dyn LogStore) -> Result<Vec<String>, String> {
    store.scan().map_err(|e| e.to_string())
}

/// Read and parse a log with the parser for the requested mode.
pub fn load(
    store: &dyn LogStore,
    path: &str,
    filters: &[String],
    coreprotect: bool,
) -> Result<LoadedEntries, String> {
    let text = store.read(path).map_err(|e| e.to_string())?;
    let entries = if coreprotect {
        LoadedEntries::CoreProtect(parse_log_content(&text))
    } else {
        LoadedEntries::Standard(parse_content(&text, filters))
    };
    info!(path, coreprotect, "Log parsed");
    Ok(entries)
}

fn save(
    store: &dyn LogStore,
    request: &SaveRequest,
    filename: &str,
) -> Result<std::path::PathBuf, String> {
    store.save(request, filename).map_err(|e| e.to_string())
}

/// Look up and run a macro against the keyboard.
pub fn run_macro(
    catalog: &MacroCatalog,
    keyboard: &dyn Keyboard,
    name: &str,
    params: &MacroParams,
) -> Result<(), String> {
    let m = catalog
        .find(name)
        .ok_or_else(|| MacroError::UnknownMacro(name.to_string()).to_string())?;
    info!(name, "Running macro");
    debug!(?params, "Macro parameters");
    m.run(params, keyboard).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros::{default_catalog, hello, Keystroke, RecordingKeyboard};
    use crate::model::LogEntry;
    use crate::test_harness::MemoryStore;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use std::time::Duration;

    const TEXT: &str = "[10:00:00] [Server thread/INFO]: Steve joined the game\n\
                        [10:00:01] [Server thread/WARN]: Can't keep up!\n";

    fn runner() -> (EffectRunner, mpsc::Receiver<AppEvent>, Arc<RecordingKeyboard>) {
        let (tx, rx) = mpsc::channel();
        let keyboard = Arc::new(RecordingKeyboard::new());
        let runner = EffectRunner::new(
            Arc::new(MemoryStore::with_files([("logs/latest.log", TEXT)])),
            keyboard.clone(),
            Arc::new(default_catalog()),
            tx,
        );
        (runner, rx, keyboard)
    }

    fn next(rx: &mpsc::Receiver<AppEvent>) -> AppEvent {
        rx.recv_timeout(Duration::from_secs(5)).expect("worker reported back")
    }

    #[test]
    fn scan_reports_files() {
        let (runner, rx, _) = runner();
        runner.spawn(Effect::Scan);
        assert_eq!(
            next(&rx),
            AppEvent::ScanCompleted(Ok(vec!["logs/latest.log".into()]))
        );
    }

    #[test]
    fn load_echoes_request_and_applies_filters() {
        let (runner, rx, _) = runner();
        runner.spawn(Effect::LoadLog {
            request_id: 7,
            path: "logs/latest.log".into(),
            filters: vec!["warn".into()],
            coreprotect: false,
        });
        match next(&rx) {
            AppEvent::EntriesLoaded {
                request_id,
                path,
                result: Ok(LoadedEntries::Standard(entries)),
            } => {
                assert_eq!(request_id, 7);
                assert_eq!(path, "logs/latest.log");
                assert_eq!(
                    entries,
                    vec![LogEntry::new("10:00:01", "Server thread", "WARN", "Can't keep up!")]
                );
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn load_uses_coreprotect_parser_in_coreprotect_mode() {
        let (runner, _rx, _) = runner();
        let result = load(runner.store.as_ref(), "logs/latest.log", &[], true);
        assert_eq!(result, Ok(LoadedEntries::CoreProtect(Vec::new())));
    }

    #[test]
    fn missing_file_reports_error_text() {
        let (runner, _rx, _) = runner();
        let result = load(runner.store.as_ref(), "logs/old.log", &[], false);
        assert!(result.is_err());
    }

    #[test]
    fn save_reports_written_path() {
        let (runner, rx, _) = runner();
        runner.spawn(Effect::Save {
            request: SaveRequest::Standard(vec![LogEntry::new("10:00:00", "main", "INFO", "hi")]),
            filename: "out.log".into(),
        });
        assert_eq!(
            next(&rx),
            AppEvent::SaveCompleted(Ok(PathBuf::from("output").join("out.log")))
        );
    }

    #[test]
    fn macro_runs_against_keyboard() {
        let (runner, rx, keyboard) = runner();
        runner.spawn(Effect::RunMacro {
            name: hello::NAME.into(),
            params: MacroParams::new(),
        });
        assert_eq!(
            next(&rx),
            AppEvent::MacroFinished {
                name: hello::NAME.into(),
                result: Ok(()),
            }
        );
        assert_eq!(
            keyboard.strokes().first(),
            Some(&Keystroke::Text("hello world!".into()))
        );
    }

    #[test]
    fn unknown_macro_fails() {
        let (runner, _rx, keyboard) = runner();
        let result = run_macro(&runner.catalog, keyboard.as_ref(), "nope", &MacroParams::new());
        assert!(result.is_err_and(|e| e.contains("nope")));
    }

    #[test]
    fn loop_control_effects_spawn_nothing() {
        let (runner, rx, _) = runner();
        runner.spawn(Effect::Quit);
        runner.spawn(Effect::StartCountdown);
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
