use pswp::async_preview::SyncPreviewManager;
use pswp::batch::{BatchLoader, DirectoryBatchProvider};
use pswp::cli::{AppConfig, Args};
use pswp::config::UserConfig;
use pswp::deletion::{DeletionMode, DeletionRequest, DeletionWorker};
use pswp::domain::{TriageEngine, TriageState};
use pswp::logging::init_logging;
use pswp::open_photo;
use pswp::tui::{
    format_file_size, handle_confirm_input, handle_key_event, render_app,
    render_confirm_delete_overlay, render_help_overlay, render_welcome_overlay, KeyAction,
    TriageView, ViewState,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

type Engine = TriageEngine<UnboundedSender<DeletionRequest>>;

/// How long a notice stays in the footer if no decision clears it first
const NOTICE_DURATION: Duration = Duration::from_secs(4);
/// How long to wait for in-flight deletions on exit
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    let config = AppConfig::resolve(args, &user_config);

    match init_logging(&config.log_level, config.log_file.as_deref()) {
        Ok(path) => info!(
            log = %path.display(),
            directory = %config.directory.display(),
            "starting pswp"
        ),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    run_app_with_config(&config, &mut user_config)
}

/// Everything the main loop drives
struct App {
    engine: Engine,
    worker: DeletionWorker,
    loader: BatchLoader,
    preview_manager: SyncPreviewManager,
    view_state: ViewState,
    notice: Option<(String, Instant)>,
    /// Deletion requests sent whose outcome has not come back yet
    in_flight: usize,
    /// (epoch, cursor) the next photo was last prefetched for
    prefetched_for: Option<(u64, usize)>,
}

impl App {
    fn new(runtime: &Runtime, config: &AppConfig) -> Self {
        let handle = runtime.handle();
        let worker = DeletionWorker::spawn(handle, config.deletion_mode.deleter());

        let mut engine = TriageEngine::new(worker.requester());
        engine.set_gesture_display(config.gesture_display);

        let provider =
            DirectoryBatchProvider::new(config.directory.clone(), config.discovery, config.order);

        Self {
            engine,
            worker,
            loader: BatchLoader::new(handle.clone(), Arc::new(provider)),
            preview_manager: SyncPreviewManager::new(handle),
            view_state: if config.show_welcome {
                ViewState::Welcome
            } else {
                ViewState::Browsing
            },
            notice: None,
            in_flight: 0,
            prefetched_for: None,
        }
    }

    /// Throws away the current session and asks for a fresh batch
    fn load_batch(&mut self, batch_size: usize) {
        self.engine.begin_loading();
        self.loader.request(batch_size);
        self.preview_manager.reset();
        self.prefetched_for = None;
    }

    fn set_notice(&mut self, message: String) {
        self.notice = Some((message, Instant::now()));
    }

    /// Applies everything that completed in the background since the last tick
    fn tick(&mut self) {
        if let Some(result) = self.loader.poll() {
            match result {
                Ok(items) => {
                    info!(count = items.len(), "batch loaded");
                    if let Err(e) = self.engine.start(items) {
                        warn!(error = %e, "could not start session");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "batch loading failed");
                    if let Err(e) = self.engine.fail(e) {
                        debug!(error = %e, "failure ignored");
                    }
                }
            }
        }

        while let Some(outcome) = self.worker.try_next_outcome() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if let Some(error) = self.engine.apply_deletion_outcome(outcome) {
                self.set_notice(error.to_string());
            }
        }

        self.engine.poll_gesture();

        if let Some((_, shown_at)) = &self.notice {
            if shown_at.elapsed() >= NOTICE_DURATION {
                self.notice = None;
            }
        }

        self.prefetch_next();
    }

    fn prefetch_next(&mut self) {
        if !self.engine.is_active() {
            return;
        }
        let key = (self.engine.epoch(), self.engine.cursor());
        if self.prefetched_for == Some(key) {
            return;
        }
        if let Some(next) = self.engine.items().get(key.1 + 1) {
            self.preview_manager.prefetch(next);
        }
        self.prefetched_for = Some(key);
    }

    fn keep_current(&mut self) {
        match self.engine.decide_keep() {
            Ok(_) => self.notice = None,
            Err(e) => debug!(error = %e, "keep ignored"),
        }
    }

    fn delete_current(&mut self) {
        match self.engine.decide_delete() {
            Ok(_) => {
                self.in_flight += 1;
                self.notice = None;
            }
            Err(e) => debug!(error = %e, "delete ignored"),
        }
    }

    /// Waits briefly for deletions still running so their results are logged
    fn drain_deletions(&mut self, runtime: &Runtime) {
        if self.in_flight == 0 {
            return;
        }
        info!(in_flight = self.in_flight, "waiting for pending deletions");

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let outcome = runtime.block_on(async {
                tokio::time::timeout(remaining, self.worker.next_outcome()).await
            });
            match outcome {
                Ok(Some(outcome)) => {
                    self.in_flight -= 1;
                    self.engine.apply_deletion_outcome(outcome);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(in_flight = self.in_flight, "gave up waiting for deletions");
                    break;
                }
            }
        }
    }
}

/// Runs the TUI application with configuration
pub fn run_app_with_config(config: &AppConfig, user_config: &mut UserConfig) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let mut app = App::new(&runtime, config);
    app.load_batch(config.batch_size);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut app, config, user_config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.drain_deletions(&runtime);
    print_summary(&app.engine, config.deletion_mode);

    result
}

fn print_summary(engine: &Engine, mode: DeletionMode) {
    let stats = engine.statistics();
    if stats.cursor == 0 {
        if let TriageState::Error(e) = engine.state() {
            println!("{}", e);
        }
        return;
    }

    let prefix = if mode == DeletionMode::DryRun { "[DRY RUN] " } else { "" };
    println!(
        "{}Reviewed {} of {} photos: kept {}, deleted {}",
        prefix, stats.cursor, stats.total, stats.kept, stats.deleted
    );
    println!("   Freed: {}", format_file_size(stats.bytes_freed));
    if stats.failed_deletions > 0 {
        println!(
            "   {} deletion(s) failed, see the log for details",
            stats.failed_deletions
        );
    }
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &AppConfig,
    user_config: &mut UserConfig,
) -> io::Result<()> {
    loop {
        app.tick();

        let preview = app
            .engine
            .current_item()
            .map(|photo| app.preview_manager.request_preview(photo).clone());

        // Render based on current view state
        terminal.draw(|frame| {
            let view = TriageView::from_engine(&app.engine)
                .with_notice(app.notice.as_ref().map(|(message, _)| message.as_str()))
                .with_mode(config.deletion_mode);
            render_app(frame, &view, preview.as_ref());

            // Render overlays
            match app.view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::ConfirmDelete => {
                    if let Some(photo) = app.engine.current_item() {
                        render_confirm_delete_overlay(frame, photo, config.deletion_mode);
                    }
                }
                ViewState::Welcome => render_welcome_overlay(frame, config.batch_size),
                ViewState::Browsing => {}
            }
        })?;

        // Short poll so the gesture indicator clears on time
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Handle overlay-specific input
        match app.view_state {
            ViewState::Help => {
                let action = handle_key_event(key);
                if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                    app.view_state = ViewState::Browsing;
                }
                continue;
            }
            ViewState::ConfirmDelete => {
                match handle_confirm_input(key) {
                    KeyAction::ConfirmDelete => {
                        app.delete_current();
                        app.view_state = ViewState::Browsing;
                    }
                    KeyAction::CancelDelete => app.view_state = ViewState::Browsing,
                    _ => {}
                }
                continue;
            }
            ViewState::Welcome => {
                // Any key dismisses welcome
                app.view_state = ViewState::Browsing;

                // Mark welcome as shown and persist
                if let Err(e) = user_config.record_welcome_shown() {
                    warn!(error = %e, "failed to save user config");
                }
                continue;
            }
            ViewState::Browsing => {}
        }

        match handle_key_event(key) {
            KeyAction::Quit => break,
            KeyAction::Keep => app.keep_current(),
            KeyAction::Delete => {
                if !app.engine.is_active() {
                    continue;
                }
                // Skip confirmation if disabled or in dry-run mode
                if config.confirm_delete && config.deletion_mode != DeletionMode::DryRun {
                    app.view_state = ViewState::ConfirmDelete;
                } else {
                    app.delete_current();
                }
            }
            KeyAction::Undo => match app.engine.undo_last_delete() {
                Ok(photo) => app.set_notice(format!(
                    "{} no longer counted as deleted (the file is not restored)",
                    photo.name
                )),
                Err(e) => debug!(error = %e, "undo ignored"),
            },
            KeyAction::Open => {
                if let Some(photo) = app.engine.current_item() {
                    let path = photo.path.clone();
                    if let Err(e) = open_photo(&path) {
                        app.set_notice(format!("Failed to open photo: {}", e));
                    }
                }
            }
            KeyAction::Restart => {
                if matches!(
                    app.engine.state(),
                    TriageState::Complete | TriageState::Error(_)
                ) {
                    app.load_batch(config.batch_size);
                }
            }
            KeyAction::Help => app.view_state = ViewState::Help,
            KeyAction::ConfirmDelete | KeyAction::CancelDelete | KeyAction::None => {}
        }
    }

    Ok(())
}
