// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod action;
mod state;
pub mod ui;

pub use action::{Action, ActionContext, action_for_key, public_url};
pub use state::MenuState;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::Config;
use crate::error::MenuError;
use crate::http::{HttpClient, ReqwestClient};
use crate::storage::{ObjectStore, S3Store};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The menu's update loop
pub struct App<C> {
    state: MenuState,
    context: Arc<ActionContext<C>>,
    results_tx: UnboundedSender<String>,
    results_rx: UnboundedReceiver<String>,
    clipboard: Option<arboard::Clipboard>,
}

impl<C: HttpClient + 'static> App<C> {
    pub fn new(state: MenuState, context: ActionContext<C>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            state,
            context: Arc::new(context),
            results_tx,
            results_rx,
            clipboard: None,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// Draw, read input and apply finished actions until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), MenuError> {
        while !self.state.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && let Some(action) = action_for_key(key)
            {
                self.handle(action);
            }

            self.drain_results();
        }
        Ok(())
    }

    /// Apply one user action
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.quit(),
            Action::Up => self.state.select_previous(),
            Action::Down => self.state.select_next(),
            Action::CopyUrl if !self.state.busy => self.copy_url(),
            Action::Upload if !self.state.upload_enabled => {}
            action if action.is_background() => self.start(action),
            _ => {}
        }
    }

    fn start(&mut self, action: Action) {
        let Some(entry) = self.state.selected().cloned() else {
            return;
        };
        if !self.state.begin_action() {
            return;
        }
        self.context.spawn(action, entry, self.results_tx.clone());
    }

    /// Move finished action results into the status line
    pub fn drain_results(&mut self) {
        while let Ok(status) = self.results_rx.try_recv() {
            self.state.finish_action(status);
        }
    }

    fn copy_url(&mut self) {
        let Some(entry) = self.state.selected() else {
            return;
        };

        let status = match public_url(entry) {
            Ok(url) => match self.write_clipboard(&url) {
                Ok(()) => format!("URL copied to clipboard: {url}"),
                Err(e) => e.to_string(),
            },
            Err(e) => format!("Error generating URL: {e}"),
        };
        self.state.set_status(status);
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), MenuError> {
        // Kept alive so the selection survives on X11
        if self.clipboard.is_none() {
            self.clipboard = Some(arboard::Clipboard::new()?);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard.set_text(text.to_string())?;
        }
        Ok(())
    }
}

/// Runs its closure when dropped, on every exit path
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    // Nothing left to report to once the terminal itself fails
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Run the menu for a loaded config on the real terminal
///
/// Uploading is offered only when the AWS credential chain resolves.
pub async fn run(config: Config) -> Result<(), MenuError> {
    let store: Option<Arc<dyn ObjectStore>> =
        match S3Store::connect(config.region.as_deref()).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                warn!("S3 upload disabled: {e}");
                None
            }
        };

    let context = ActionContext::new(
        ReqwestClient::new(),
        config.endpoint(),
        store.clone(),
        config.output_dir.clone(),
    );
    let mut app = App::new(MenuState::new(config.series, store.is_some()), context);

    enable_raw_mode()?;
    let _restore = RestoreGuard {
        restore: restore_terminal,
    };
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    app.run(&mut terminal)
}
