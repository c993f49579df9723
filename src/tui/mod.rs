//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading** (fetch in flight): draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Cancellation
//!
//! At most one fetch task exists at a time, tracked by a single
//! `AbortHandle`. Every recomputation effect (`Fetch` or `Cancel`) aborts
//! the previous task before doing anything else, so a superseded request is
//! torn down in the same iteration that superseded it. Loop teardown aborts
//! whatever is still in flight.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, PendingFetch, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Outcome};
use crate::rates::{FrankfurterProvider, RateProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{AmountEvent, AmountInput, cycle_selection};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which input field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Amount,
    From,
    To,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Amount => Focus::From,
            Focus::From => Focus::To,
            Focus::To => Focus::Amount,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Amount => Focus::To,
            Focus::From => Focus::Amount,
            Focus::To => Focus::From,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub amount_input: AmountInput,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            focus: Focus::Amount,
            amount_input: AmountInput::new(&app.amount_text),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for amount editing
            SetCursorStyle::SteadyBlock  // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider: Arc<dyn RateProvider> =
        Arc::new(FrankfurterProvider::new(Some(config.base_url.clone())));
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for completion actions from background fetch tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the in-flight fetch (at most one)
    let mut active_fetch: Option<AbortHandle> = None;

    // Convert the defaults right away, like the original view did on mount.
    let effect = update(&mut app, Action::Refresh);
    let mut should_quit = apply_effect(effect, &app, &mut active_fetch, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        // Sync component props with App/TUI state
        tui.amount_input.focused = tui.focus == Focus::Amount;
        tui.amount_input.invalid = app.outcome == Outcome::InvalidAmount;

        if app.is_loading {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while the spinner runs, long when idle
        let timeout = if app.is_loading {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Quit keys work regardless of focus
            if matches!(tui_event, TuiEvent::ForceQuit | TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            let action = match tui_event {
                TuiEvent::FocusNext => {
                    tui.focus = tui.focus.next();
                    None
                }
                TuiEvent::FocusPrev => {
                    tui.focus = tui.focus.prev();
                    None
                }
                TuiEvent::Refresh => Some(Action::Refresh),
                other => {
                    // Typing always lands in the amount field
                    if tui.focus != Focus::Amount
                        && matches!(other, TuiEvent::InputChar(_) | TuiEvent::Paste(_))
                    {
                        tui.focus = Focus::Amount;
                    }
                    match tui.focus {
                        Focus::Amount => match tui.amount_input.handle_event(&other) {
                            Some(AmountEvent::Changed(text)) => Some(Action::AmountInput(text)),
                            None => None,
                        },
                        Focus::From => {
                            cycle_selection(app.from, &other).map(Action::SetFrom)
                        }
                        Focus::To => cycle_selection(app.to, &other).map(Action::SetTo),
                    }
                }
            };

            if let Some(action) = action {
                let effect = update(&mut app, action);
                if apply_effect(effect, &app, &mut active_fetch, &tx) {
                    should_quit = true;
                }
            }
        }

        // Handle completion actions from background fetch tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut active_fetch, &tx) {
                should_quit = true;
            }
        }
    }

    // Teardown cancels whatever is still in flight
    if let Some(handle) = active_fetch.take() {
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Executes the effect a reducer call returned. Returns true when the loop
/// should exit.
///
/// `Fetch` and `Cancel` both abort the prior task first; this is what makes
/// supersession unconditional and synchronous with the triggering input.
fn apply_effect(
    effect: Effect,
    app: &App,
    active_fetch: &mut Option<AbortHandle>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::Fetch(pending) => {
            if let Some(handle) = active_fetch.take() {
                debug!("Aborting superseded fetch");
                handle.abort();
            }
            *active_fetch = Some(spawn_conversion(app.provider.clone(), pending, tx.clone()));
            false
        }
        Effect::Cancel => {
            if let Some(handle) = active_fetch.take() {
                debug!("Aborting fetch with no replacement");
                handle.abort();
            }
            false
        }
        Effect::Quit => true,
        Effect::None => false,
    }
}

/// Spawns the background task for one conversion fetch and returns its abort
/// handle. The task sends exactly one completion action unless aborted first.
pub fn spawn_conversion(
    provider: Arc<dyn RateProvider>,
    pending: PendingFetch,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning conversion fetch (seq={}): {} {} -> {}",
        pending.seq, pending.request.amount, pending.request.from, pending.request.to
    );

    let handle = tokio::spawn(async move {
        let action = match provider.convert(&pending.request).await {
            Ok(conversion) => Action::ConversionReady {
                seq: pending.seq,
                conversion,
            },
            Err(e) => {
                info!("Fetch failed (seq={}): {}", pending.seq, e);
                Action::ConversionFailed {
                    seq: pending.seq,
                    message: e.to_string(),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send completion (seq={}): receiver dropped", pending.seq);
        }
    });

    handle.abort_handle()
}
