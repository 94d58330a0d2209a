use crate::config::SeriesEntry;
use crate::storage::display_name;

/// Everything the menu renders
#[derive(Debug, Clone)]
pub struct MenuState {
    pub series: Vec<SeriesEntry>,
    pub cursor: usize,
    /// An action is in flight; further actions are rejected
    pub busy: bool,
    /// Result line of the last finished action
    pub status: Option<String>,
    /// Uploading is offered only when an object store is available
    pub upload_enabled: bool,
    pub should_quit: bool,
}

impl MenuState {
    pub fn new(series: Vec<SeriesEntry>, upload_enabled: bool) -> Self {
        Self {
            series,
            cursor: 0,
            busy: false,
            status: None,
            upload_enabled,
            should_quit: false,
        }
    }

    pub fn selected(&self) -> Option<&SeriesEntry> {
        self.series.get(self.cursor)
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.series.len() {
            self.cursor += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Mark an action as started; false if one is already running
    pub fn begin_action(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Record the outcome of the running action
    pub fn finish_action(&mut self, status: impl Into<String>) {
        self.busy = false;
        self.status = Some(status.into());
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Label shown for each series in the list
    pub fn labels(&self) -> Vec<&str> {
        self.series
            .iter()
            .map(|entry| display_name(&entry.s3_path))
            .collect()
    }
}
