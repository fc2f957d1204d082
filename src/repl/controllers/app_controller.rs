//! # Application Controller
//!
//! Owns the interaction loop. Every key, resize, tick and request outcome is
//! turned into an [`AppEvent`] and handled in arrival order; the only work
//! that leaves the loop is the network exchange, which posts its outcome
//! back through a channel.

use crate::config::AppConfig;
use crate::repl::{
    commands::{CommandEvent, CommandRegistry, ViewModelSnapshot},
    events::AppEvent,
    io::{EventStream, RenderStream},
    services::{ClipboardProvider, EnvSource, HttpDispatcher, ProcessEnv, SystemClipboard},
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long to wait for terminal input before emitting a tick
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The main application controller
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    dispatcher: HttpDispatcher,
    outcomes: mpsc::UnboundedReceiver<AppEvent>,
    clipboard: Box<dyn ClipboardProvider>,
    env: Box<dyn EnvSource>,
    event_stream: ES,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Controller wired to the system clipboard and the process environment
    pub fn with_io_streams(config: AppConfig, event_stream: ES, render_stream: RS) -> Result<Self> {
        Self::with_services(
            config,
            event_stream,
            render_stream,
            Box::new(SystemClipboard::new()),
            Box::new(ProcessEnv),
        )
    }

    pub fn with_services(
        config: AppConfig,
        event_stream: ES,
        render_stream: RS,
        clipboard: Box<dyn ClipboardProvider>,
        env: Box<dyn EnvSource>,
    ) -> Result<Self> {
        let mut view_model = ViewModel::new();
        if !view_model.set_tabs(config.tabs.clone()) {
            tracing::warn!("keeping the default tabs");
        }
        view_model.set_initial_request(config.url.as_deref(), config.method.as_deref());

        let mut view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        view_renderer.set_keymap(&config.keymap);

        // Synchronize view model with actual terminal size
        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);

        let (sender, outcomes) = mpsc::unbounded_channel();
        let dispatcher = HttpDispatcher::new(config.timeout, sender)?;

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::with_keymap(config.keymap),
            dispatcher,
            outcomes,
            clipboard,
            env,
            event_stream,
            should_quit: false,
        })
    }

    /// Run the interaction loop until quit. The terminal is restored even
    /// when the loop fails.
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        let result = self.event_loop().await;
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.view_renderer.render_full(&self.view_model)?;

        while !self.should_quit {
            let event = self.next_terminal_event()?;
            self.handle_event(event)?;

            // Outcomes that arrived meanwhile, in the order they were posted
            while !self.should_quit {
                match self.outcomes.try_recv() {
                    Ok(event) => self.handle_event(event)?,
                    Err(_) => break,
                }
            }

            // Let dispatch tasks progress on a single-threaded runtime
            tokio::task::yield_now().await;
        }

        tracing::info!("quit");
        Ok(())
    }

    /// A key or resize if one arrives within the poll interval, else a tick
    fn next_terminal_event(&mut self) -> Result<AppEvent> {
        if self.event_stream.poll(POLL_INTERVAL)? {
            if let Some(event) = AppEvent::from_terminal(self.event_stream.read()?) {
                return Ok(event);
            }
        }
        Ok(AppEvent::Tick)
    }

    /// Handle one event and redraw if anything visible changed
    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        let changed = match event {
            AppEvent::Key(key) => {
                self.handle_key(key)?;
                true
            }
            AppEvent::Resize { width, height } => {
                self.view_model.update_terminal_size(width, height);
                self.view_renderer.update_size(width, height);
                true
            }
            AppEvent::RequestCompleted { seq, outcome } => {
                self.view_model.apply_success(seq, &outcome)
            }
            AppEvent::RequestFailed { seq, error } => self.view_model.apply_failure(seq, error),
            AppEvent::Tick => self.view_model.tick(),
        };

        if changed && !self.should_quit {
            self.view_renderer.render_full(&self.view_model)?;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let context = self
            .command_registry
            .context_for(ViewModelSnapshot::from_view_model(&self.view_model), &key);
        let events = self.command_registry.process_event(key, &context)?;

        for event in events {
            self.apply_command_event(event);
            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent) {
        match event {
            CommandEvent::ViewCycleRequested { direction } => self.view_model.cycle_view(direction),
            CommandEvent::TabCycleRequested { direction } => self.view_model.cycle_tab(direction),
            CommandEvent::CursorMoveRequested { direction } => {
                self.view_model.move_cursor(direction)
            }
            CommandEvent::ScrollRequested { direction } => self.view_model.scroll_viewer(direction),
            CommandEvent::CharInsertRequested { ch } => self.view_model.insert_char(ch),
            CommandEvent::BackspaceRequested => self.view_model.backspace(),
            CommandEvent::NewlineRequested => self.view_model.insert_newline(),
            CommandEvent::PasteRequested => match self.clipboard.read_text() {
                Ok(text) => {
                    let inserted = self.view_model.paste_text(&text);
                    tracing::debug!("pasted {} characters", inserted);
                }
                Err(error) => self.view_model.report_error(error),
            },
            CommandEvent::RunRequested => {
                let draft = self.view_model.build_draft(self.env.as_ref());
                let seq = self.dispatcher.dispatch(draft);
                self.view_model.begin_request(seq);
            }
            CommandEvent::AddToCollectionRequested => {
                self.view_model.add_to_collection(self.env.as_ref())
            }
            CommandEvent::ExtractFromCollectionRequested => {
                self.view_model.extract_from_collection()
            }
            CommandEvent::QuitRequested => {
                self.should_quit = true;
            }
            CommandEvent::NoAction => {}
        }
    }

    /// Process a single key event without running the loop
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        self.handle_event(AppEvent::Key(key_event))
    }

    /// Wait for the next posted request outcome
    pub async fn next_outcome(&mut self) -> Option<AppEvent> {
        self.outcomes.recv().await
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut ViewModel {
        &mut self.view_model
    }

    pub fn renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    pub fn event_stream(&self) -> &ES {
        &self.event_stream
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::error::ReqlineError;
    use crate::repl::events::{Focus, Tab};
    use crate::repl::io::{MockEventStream, MockRenderStream};
    use crate::repl::services::StaticClipboard;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::collections::HashMap;

    fn controller(clipboard: StaticClipboard) -> AppController<MockEventStream, MockRenderStream> {
        AppController::with_services(
            AppConfig::default(),
            MockEventStream::empty(),
            MockRenderStream::new(),
            Box::new(clipboard),
            Box::new(HashMap::<String, String>::new()),
        )
        .unwrap()
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[tokio::test]
    async fn paste_should_insert_clipboard_text_into_focused_slot() {
        let mut app = controller(StaticClipboard::with_text("&lang=en\n"));
        app.process_key_event(key(KeyCode::Char('v'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(
            app.view_model().url(),
            "https://v2.jokeapi.dev/joke/Any?type=twopart&lang=en"
        );
    }

    #[tokio::test]
    async fn paste_without_clipboard_should_report_error() {
        let mut app = controller(StaticClipboard::unavailable());
        app.process_key_event(key(KeyCode::Char('v'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(
            app.view_model().response().error(),
            Some(ReqlineError::Clipboard(_))
        ));
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn run_should_mark_busy_until_outcome_applies() {
        let mut app = controller(StaticClipboard::default());
        app.view_model_mut()
            .set_initial_request(Some("not a url"), Some("GET"));
        app.process_key_event(key(KeyCode::Char('r'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.view_model().is_busy());
        assert_eq!(app.view_model().latest_seq(), 1);

        let outcome = app.next_outcome().await.unwrap();
        app.handle_event(outcome).unwrap();
        assert!(!app.view_model().is_busy());
        assert!(matches!(
            app.view_model().response().error(),
            Some(ReqlineError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn ticks_should_redraw_only_while_busy() {
        let mut app = controller(StaticClipboard::default());
        let screen = app.renderer().stream().screen();

        app.handle_event(AppEvent::Tick).unwrap();
        assert_eq!(screen.frames(), 0);

        app.view_model_mut().begin_request(7);
        app.handle_event(AppEvent::Tick).unwrap();
        assert_eq!(screen.frames(), 1);
    }

    #[tokio::test]
    async fn resize_should_reach_renderer_and_view_model() {
        let mut app = controller(StaticClipboard::default());
        app.handle_event(AppEvent::Resize {
            width: 120,
            height: 40,
        })
        .unwrap();
        assert_eq!(app.view_model().terminal_size(), (120, 40));
        assert_eq!(app.renderer().terminal_size(), (120, 40));
    }

    #[tokio::test]
    async fn collection_keys_should_round_trip_the_request() {
        let mut app = controller(StaticClipboard::default());
        app.view_model_mut()
            .set_initial_request(Some("http://localhost:9000/health"), Some("HEAD"));
        app.process_key_event(key(KeyCode::Char('a'), KeyModifiers::ALT))
            .unwrap();
        assert!(app
            .view_model()
            .collection()
            .is_some_and(|c| c.has_endpoint("HEAD", "/health")));

        // focus the collection editor, leaving its cursor on the last line
        app.process_key_event(key(KeyCode::Tab, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.view_model().focus(), Focus::ResponseRegion);
        assert_eq!(app.view_model().active_tab(), Tab::Collection);
        assert!(app.view_model().status_message().is_some());
    }

    #[tokio::test]
    async fn quit_should_stop_applying_further_events() {
        let mut app = controller(StaticClipboard::default());
        app.process_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit());
    }
}
