// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::SeriesEntry;
use crate::error::{PipelineError, StorageError};
use crate::http::HttpClient;
use crate::pipeline::{generate_and_upload, generate_to_file, latest_for_series};
use crate::progress::{LogReporter, SharedProgressReporter};
use crate::series::SeriesEndpoint;
use crate::storage::{ObjectStore, StorageLocation, local_feed_filename};

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Generate,
    Upload,
    CopyUrl,
    ShowLatest,
    Quit,
}

impl Action {
    /// Whether the action runs in the background and blocks other actions
    pub fn is_background(self) -> bool {
        matches!(self, Action::Generate | Action::Upload | Action::ShowLatest)
    }
}

/// Map a key press to an action
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Generate),
        KeyCode::Char('u') => Some(Action::Upload),
        KeyCode::Char('c') => Some(Action::CopyUrl),
        KeyCode::Char('d') => Some(Action::ShowLatest),
        _ => None,
    }
}

/// Public URL of a series' published feed
pub fn public_url(entry: &SeriesEntry) -> Result<String, StorageError> {
    Ok(StorageLocation::parse(&entry.s3_path)?.public_url())
}

/// Shared collaborators for background actions
pub struct ActionContext<C> {
    pub client: C,
    pub endpoint: SeriesEndpoint,
    pub store: Option<Arc<dyn ObjectStore>>,
    pub output_dir: PathBuf,
    reporter: SharedProgressReporter,
}

impl<C: HttpClient + 'static> ActionContext<C> {
    pub fn new(
        client: C,
        endpoint: SeriesEndpoint,
        store: Option<Arc<dyn ObjectStore>>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            endpoint,
            store,
            output_dir,
            reporter: LogReporter::shared(),
        }
    }

    /// Run `action` on a tokio task and send its status line to `results`
    pub fn spawn(
        self: &Arc<Self>,
        action: Action,
        entry: SeriesEntry,
        results: UnboundedSender<String>,
    ) {
        let context = Arc::clone(self);
        tokio::spawn(async move {
            let status = context.run(action, &entry).await;
            // The receiver is gone only when the menu has exited
            let _ = results.send(status);
        });
    }

    /// Run a background action to completion and describe the outcome
    pub async fn run(&self, action: Action, entry: &SeriesEntry) -> String {
        match action {
            Action::Generate => {
                let filename = local_feed_filename(&entry.guid, Some(&entry.s3_path));
                generate_to_file(
                    &self.client,
                    &self.endpoint,
                    &entry.guid,
                    &self.output_dir,
                    &filename,
                    &self.reporter,
                )
                .await
                .map(|outcome| outcome.summary())
                .unwrap_or_else(|e| e.to_string())
            }
            Action::Upload => self.upload(entry).await.unwrap_or_else(|e| e.to_string()),
            Action::ShowLatest => {
                latest_for_series(&self.client, &self.endpoint, &entry.guid, &self.reporter)
                    .await
                    .map(|date| format!("Latest episode date: {date}"))
                    .unwrap_or_else(|e| e.to_string())
            }
            Action::Up | Action::Down | Action::CopyUrl | Action::Quit => String::new(),
        }
    }

    async fn upload(&self, entry: &SeriesEntry) -> Result<String, PipelineError> {
        let Some(store) = &self.store else {
            return Ok("S3 upload is not available".to_string());
        };

        let location = StorageLocation::parse(&entry.s3_path)?;
        let outcome = generate_and_upload(
            &self.client,
            &self.endpoint,
            store.as_ref(),
            &entry.guid,
            &location,
            &self.reporter,
        )
        .await?;

        Ok(outcome.summary())
    }
}
