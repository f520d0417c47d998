use std::io;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::disable_raw_mode;
use futures::StreamExt;
use ratatui::prelude::CrosstermBackend;
use ratatui::widgets::Widget;
use ratatui::Terminal;
use ratatui::{
    layout::{Constraint, Layout},
    TerminalOptions, Viewport,
};
use promptforge_core::composer::{Composer, ComposerError, GeneratedPrompt};
use promptforge_core::config::ForgeConfig;
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use ansi_to_tui::IntoText;

use crate::tui::format;
use crate::tui::input::{InputArea, UserAction};

const VIEWPORT_HEIGHT: u16 = 14;

type ComposeOutcome = Result<GeneratedPrompt, ComposerError>;

/// Request lifecycle. Submissions are rejected only while InFlight;
/// an in-flight request cannot be aborted.
pub enum ComposeState {
    Idle,
    InFlight {
        rx: mpsc::Receiver<ComposeOutcome>,
        handle: JoinHandle<()>,
        started: Instant,
    },
    Succeeded {
        result: GeneratedPrompt,
    },
    Failed {
        message: String,
    },
}

pub struct App<'a> {
    pub(crate) terminal: Option<Terminal<CrosstermBackend<io::Stdout>>>,

    pub(crate) composer: Option<Arc<Composer>>,
    pub(crate) state: ComposeState,

    pub(crate) input: InputArea<'a>,
    pub(crate) exit: bool,
}

// Composer-related Internals
impl App<'_> {
    pub async fn start_composer(&mut self) -> Result<(), ComposerError> {
        let (llm, model) = ForgeConfig::get_llm().await?;
        println!("\x1b[2m{} on {}\x1b[0m", model, llm.provider_name());

        self.input.set_model(&model);
        self.composer = Some(Arc::new(Composer::new(Arc::new(llm), model)));
        Ok(())
    }

    fn is_in_flight(&self) -> bool {
        matches!(self.state, ComposeState::InFlight { .. })
    }

    async fn receive_outcome(&mut self) -> Option<ComposeOutcome> {
        match &mut self.state {
            ComposeState::InFlight { rx, .. } => rx.recv().await,
            _ => None,
        }
    }

    fn submit(&mut self, task: String) {
        if self.is_in_flight() {
            self.input.alert_msg(" eine Anfrage läuft bereits", Duration::from_secs(2));
            return;
        }
        if task.trim().is_empty() {
            return;
        }

        let Some(composer) = self.composer.as_ref().map(Arc::clone) else {
            self.input.alert_msg(" kein Provider konfiguriert", Duration::from_secs(3));
            return;
        };

        // Prior result is dropped before the new attempt
        let _ = self.insert_lines(&format::render_task_echo(&task));

        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let outcome = composer.compose(&task).await;
            let _ = tx.send(outcome).await;
        });

        self.state = ComposeState::InFlight {
            rx,
            handle,
            started: Instant::now(),
        };
        self.input.set_composing(true);
    }

    fn handle_outcome(&mut self, outcome: Option<ComposeOutcome>) -> io::Result<()> {
        self.input.set_composing(false);

        // A dropped channel means the compose task died before reporting
        let outcome = outcome.unwrap_or(Err(ComposerError::Unknown));

        match outcome {
            Ok(result) => {
                self.insert_lines(&format::render_result(&result))?;
                self.state = ComposeState::Succeeded { result };
            }
            Err(error) => {
                let message = error.to_string();
                self.insert_lines(&format::render_error(&message))?;
                self.state = ComposeState::Failed { message };
            }
        }
        Ok(())
    }

    pub(crate) fn copy_result(&mut self) {
        match &self.state {
            ComposeState::Succeeded { result } => {
                match ClipboardContext::new().and_then(|mut ctx| ctx.set_contents(result.raw.clone())) {
                    Ok(_) => self.input.alert_msg(" Kopiert!", Duration::from_secs(2)),
                    Err(_) => self.input.alert_msg(" Zwischenablage nicht verfügbar", Duration::from_secs(2)),
                }
            }
            _ => {
                self.input.alert_msg(" kein Prompt zum Kopieren", Duration::from_secs(2));
            }
        }
    }
}

// UI-related Internals
impl App<'_> {
    pub fn new() -> Self {
        Self {
            terminal: None,
            composer: None,
            state: ComposeState::Idle,
            input: InputArea::new()
                .with_placeholder("Ihre Aufgabe oder Ihr Ziel... (? for shortcuts)"),
            exit: false,
        }
    }

    pub async fn run(&mut self) -> io::Result<()> {
        let x = self.try_run().await;
        let _ = disable_raw_mode();

        if let Err(e) = x {
            println!();
            eprintln!("{}\r\n", e);
        }

        println!();
        println!();
        Ok(())
    }

    async fn try_run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        // Fail fast on missing credentials, before any terminal setup
        self.start_composer().await.map_err(|e| -> Box<dyn std::error::Error> {
            format!("{}", e).into()
        })?;

        // create terminal
        self.terminal = Some(ratatui::init_with_options(TerminalOptions {
            viewport: Viewport::Inline(VIEWPORT_HEIGHT)
        }));

        // Create a timer for animation updates
        let mut animation_timer = interval(Duration::from_millis(100));
        let mut reader = crossterm::event::EventStream::new();

        while !self.exit {
            // Always draw the UI first
            self.draw_ui().map_err(|_| -> Box<dyn std::error::Error> {
                format!("oops... (x_x)'").into() })?;

            tokio::select! {
                // Handle compose completion (only while a request is in flight)
                outcome = self.receive_outcome(), if self.is_in_flight() => {
                    self.handle_outcome(outcome)?;
                }

                // Handle keyboard input
                crossterm_event = reader.next() => {
                    if let Some(Ok(event)) = crossterm_event {
                        self.handle_crossterm_event(event).await?;
                    }
                }

                // Handle animation timer (fires when animating OR when checking for pending enter)
                _ = animation_timer.tick() => {
                    // Check for pending enter timeout
                    if let Some(action) = self.input.check_pending_enter() {
                        self.handle_user_action(action).await?;
                    }
                }
            }
        }
        Ok(())
    }

    async fn handle_crossterm_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Resize( .. ) => {
                if let Some(ref mut terminal) = self.terminal {
                    terminal.clear()?;
                }
            }
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event).await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_key_event(&mut self, key_event: KeyEvent) -> io::Result<()> {
        if matches!(key_event.code, KeyCode::Char('c')) && key_event.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
            self.exit = true;
            return Ok(());
        }

        let action = self.input.handle_event(key_event).await;
        self.handle_user_action(action).await?;
        Ok(())
    }

    async fn handle_user_action(&mut self, action: UserAction) -> io::Result<()> {
        match action {
            UserAction::Nope => {}
            UserAction::Submit { task } => {
                self.submit(task);
            }
            UserAction::AppCommand { command } => {
                let _ = self.handle_app_command(&command).await;
            }
            UserAction::CopyResult => {
                self.copy_result();
            }
        }
        Ok(())
    }

    fn insert_lines(&mut self, formatted: &str) -> io::Result<()> {
        let line_count = formatted.lines().count() as u16 + 1;
        if let Some(ref mut terminal) = self.terminal {
            terminal.clear()?; // this is to avoid visual artifact
            terminal.insert_before(line_count, |buf| {
                if let Ok(text) = formatted.into_text() {
                    text.render(buf.area, buf);
                }
            })?;
        }
        Ok(())
    }

    fn draw_ui(&mut self) -> io::Result<()> {
        let modal_height = self.input.height().max(5).min(VIEWPORT_HEIGHT);

        if let Some(ref mut terminal) = self.terminal {
            terminal.draw(|frame| {
                let [_, modal] = Layout::vertical([
                    Constraint::Fill(1),                  // padding
                    Constraint::Length(modal_height)])    // input area
                    .areas(frame.area());

                self.input.draw(frame, modal)
            })?;
        }
        Ok(())
    }
}
