//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::actions::Action;
use crate::consts::cli_consts::{OUTCOME_QUEUE_SIZE, UI_POLL_INTERVAL_MS};
use crate::controller::{Controller, Outcome};
use crate::ui::bindings::{self, Command};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::form::PatchForm;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Automatic refresh period; `None` refreshes only on demand.
    pub refresh_interval: Option<Duration>,
}

impl UIConfig {
    pub fn new(with_background_color: bool, refresh_interval: Option<Duration>) -> Self {
        Self {
            with_background_color,
            refresh_interval,
        }
    }
}

/// What the loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Dispatch(Action),
    Exit,
}

/// Application state
pub struct App {
    /// Runs actions against the runtime API.
    controller: Controller,

    pub(crate) state: DashboardState,

    /// Outcomes of spawned actions, applied on the UI loop.
    outcome_sender: mpsc::Sender<Outcome>,
    outcome_receiver: mpsc::Receiver<Outcome>,

    refresh_interval: Option<Duration>,
    last_auto_refresh: Instant,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(controller: Controller, ui_config: UIConfig) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel(OUTCOME_QUEUE_SIZE);
        let state = DashboardState::new(
            controller.api().environment().clone(),
            Instant::now(),
            &ui_config,
        );
        Self {
            controller,
            state,
            outcome_sender,
            outcome_receiver,
            refresh_interval: ui_config.refresh_interval,
            last_auto_refresh: Instant::now(),
        }
    }

    /// Runs the action on its own task. Overlapping runs are allowed; the last refresh to land wins.
    pub fn dispatch(&mut self, action: Action) {
        self.state.record_dispatch(&action);
        let controller = self.controller.clone();
        let sender = self.outcome_sender.clone();
        tokio::spawn(async move {
            controller.run(action, &sender).await;
        });
    }

    /// Applies every outcome that arrived since the last frame.
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_receiver.try_recv() {
            self.state.apply_outcome(outcome);
        }
    }

    fn auto_refresh_due(&mut self) -> bool {
        match self.refresh_interval {
            Some(interval) if self.last_auto_refresh.elapsed() >= interval => {
                self.last_auto_refresh = Instant::now();
                true
            }
            _ => false,
        }
    }

    /// Maps a key press to what should happen next, updating local UI state on the way.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Exit;
        }

        // The notice blocks everything else until acknowledged
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_notice();
            }
            return Flow::Continue;
        }

        if self.state.form.is_some() && key.code == KeyCode::Esc {
            self.state.form = None;
            return Flow::Continue;
        }
        if let Some(form) = self.state.form.as_mut() {
            return match key.code {
                KeyCode::Enter if !form.is_submitting() => {
                    Flow::Dispatch(Action::CreatePatch(form.to_patch(Utc::now())))
                }
                KeyCode::Tab | KeyCode::Down => {
                    form.focus_next();
                    Flow::Continue
                }
                KeyCode::BackTab | KeyCode::Up => {
                    form.focus_previous();
                    Flow::Continue
                }
                KeyCode::Backspace => {
                    form.delete_char();
                    Flow::Continue
                }
                KeyCode::Char(c) => {
                    form.insert_char(c);
                    Flow::Continue
                }
                _ => Flow::Continue,
            };
        }

        let Some(command) = bindings::lookup(key.code) else {
            return Flow::Continue;
        };
        match command {
            Command::Quit => Flow::Exit,
            Command::Refresh => Flow::Dispatch(Action::Refresh),
            Command::Control(action) => Flow::Dispatch(Action::Control(action)),
            Command::ApplySelected => self
                .state
                .selected_control("apply")
                .map_or(Flow::Continue, |control| Flow::Dispatch(control.action())),
            Command::RollbackSelected => self
                .state
                .selected_control("rollback")
                .map_or(Flow::Continue, |control| Flow::Dispatch(control.action())),
            Command::OpenPatchForm => {
                self.state.form = Some(PatchForm::new());
                Flow::Continue
            }
            Command::SelectNext => {
                self.state.select_next();
                Flow::Continue
            }
            Command::SelectPrevious => {
                self.state.select_previous();
                Flow::Continue
            }
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the dashboard.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    // Initial load
    app.dispatch(Action::Refresh);

    loop {
        app.drain_outcomes();
        if app.auto_refresh_due() {
            app.dispatch(Action::Refresh);
        }

        app.state.update();
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        // Poll for key events
        if event::poll(Duration::from_millis(UI_POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                match app.handle_key(key) {
                    Flow::Exit => return Ok(()),
                    Flow::Dispatch(action) => app.dispatch(action),
                    Flow::Continue => {}
                }
            }
        }
    }
}
