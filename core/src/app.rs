//! The single-screen controller.
//!
//! `App` holds the in-memory list of tasks as a cache of remote state: it
//! is loaded once at startup and updated optimistically after each store
//! call resolves. User intents spawn exactly one remote call each; the
//! completion comes back as a [`StoreEvent`] over a bounded channel and
//! [`App::process_store_events`], called from the frame loop, applies the
//! matching local mutation. Completions apply in whatever order the
//! transport delivers them; in-flight calls are never cancelled and
//! failures never roll local state back.

use tokio::sync::mpsc;

use taskdeck_store::TaskStore;
use taskdeck_types::{Task, TaskId, TaskName};

use crate::draft::DraftInput;

const STORE_EVENT_CAPACITY: usize = 64; // bounded: no OOM

const VALIDATION_MESSAGE: &str = "Please enter a task name.";

/// Which store operation a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Load,
    Create,
    Update,
    Delete,
}

impl StoreAction {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            StoreAction::Load => "load tasks",
            StoreAction::Create => "add the task",
            StoreAction::Update => "update the task",
            StoreAction::Delete => "delete the task",
        }
    }
}

/// Completion of a spawned store call.
#[derive(Debug)]
pub enum StoreEvent {
    Loaded(Vec<Task>),
    Created(Task),
    Updated { id: TaskId, name: TaskName },
    Deleted(TaskId),
    Failed { action: StoreAction, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// User-visible message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Application state for the task screen.
pub struct App<S> {
    store: S,
    tasks: Vec<Task>,
    draft: DraftInput,
    editing: Option<TaskId>,
    selected: usize,
    status: Option<StatusLine>,
    events_tx: mpsc::Sender<StoreEvent>,
    events_rx: mpsc::Receiver<StoreEvent>,
}

impl<S: TaskStore> App<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        let (events_tx, events_rx) = mpsc::channel(STORE_EVENT_CAPACITY);
        Self {
            store,
            tasks: Vec::new(),
            draft: DraftInput::default(),
            editing: None,
            selected: 0,
            status: None,
            events_tx,
            events_rx,
        }
    }

    // ------------------------------------------------------------------
    // User intents
    // ------------------------------------------------------------------

    /// Fetch the full list. Issued once on startup; the result replaces
    /// `tasks` wholesale when it arrives.
    pub fn load(&self) {
        let store = self.store.clone();
        self.spawn_store_call(async move {
            match store.list_all().await {
                Ok(tasks) => StoreEvent::Loaded(tasks),
                Err(e) => StoreEvent::Failed {
                    action: StoreAction::Load,
                    message: e.to_string(),
                },
            }
        });
    }

    /// Submit the form: create when no edit is pending, update otherwise.
    ///
    /// The blank-input guard is asymmetric on purpose, mirroring the
    /// behavior this screen has always had: create surfaces a validation
    /// message, update silently does nothing.
    pub fn submit(&mut self) {
        match self.editing.clone() {
            None => {
                let Ok(name) = TaskName::new(self.draft.text()) else {
                    self.status = Some(StatusLine::error(VALIDATION_MESSAGE));
                    return;
                };
                let store = self.store.clone();
                self.spawn_store_call(async move {
                    match store.create(&name).await {
                        Ok(task) => StoreEvent::Created(task),
                        Err(e) => StoreEvent::Failed {
                            action: StoreAction::Create,
                            message: e.to_string(),
                        },
                    }
                });
            }
            Some(id) => {
                let Ok(name) = TaskName::new(self.draft.text()) else {
                    return;
                };
                let store = self.store.clone();
                self.spawn_store_call(async move {
                    match store.update(&id, &name).await {
                        Ok(()) => StoreEvent::Updated { id, name },
                        Err(e) => StoreEvent::Failed {
                            action: StoreAction::Update,
                            message: e.to_string(),
                        },
                    }
                });
            }
        }
    }

    /// Pre-fill the form with the selected task and arm update mode.
    /// Pure local state change, no remote call.
    pub fn begin_edit_selected(&mut self) {
        let Some(task) = self.tasks.get(self.selected) else {
            return;
        };
        self.draft.set_text(task.name.as_str());
        self.editing = Some(task.id.clone());
        self.status = None;
    }

    /// Drop a pending edit and dismiss any status message.
    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.draft.clear();
        }
        self.status = None;
    }

    /// Delete the selected task remotely; the row disappears when the
    /// call resolves.
    pub fn delete_selected(&self) {
        let Some(task) = self.tasks.get(self.selected) else {
            return;
        };
        let id = task.id.clone();
        let store = self.store.clone();
        self.spawn_store_call(async move {
            match store.delete(&id).await {
                Ok(()) => StoreEvent::Deleted(id),
                Err(e) => StoreEvent::Failed {
                    action: StoreAction::Delete,
                    message: e.to_string(),
                },
            }
        });
    }

    fn spawn_store_call<F>(&self, call: F)
    where
        F: Future<Output = StoreEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            // The receiver only disappears on shutdown; a dropped
            // completion is fine then.
            let _ = tx.send(call.await).await;
        });
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Drain completed store calls and mirror them into local state.
    /// Called once per frame.
    pub fn process_store_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Loaded(tasks) => {
                self.tasks = tasks;
                self.clamp_selection();
            }
            StoreEvent::Created(task) => {
                self.tasks.push(task);
                self.draft.clear();
                self.status = None;
            }
            StoreEvent::Updated { id, name } => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.name = name;
                }
                self.draft.clear();
                self.editing = None;
                self.status = None;
            }
            StoreEvent::Deleted(id) => {
                self.tasks.retain(|task| task.id != id);
                self.clamp_selection();
            }
            StoreEvent::Failed { action, message } => {
                tracing::warn!(action = action.describe(), %message, "Store call failed");
                self.status = Some(StatusLine::error(format!(
                    "Couldn't {}: {}",
                    action.describe(),
                    message
                )));
            }
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ------------------------------------------------------------------
    // Draft editing (delegated to the form field)
    // ------------------------------------------------------------------

    pub fn enter_char(&mut self, ch: char) {
        self.draft.enter_char(ch);
    }

    pub fn insert_str(&mut self, text: &str) {
        self.draft.insert_str(text);
    }

    pub fn delete_char(&mut self) {
        self.draft.delete_char();
    }

    pub fn delete_char_forward(&mut self) {
        self.draft.delete_char_forward();
    }

    pub fn delete_word_backwards(&mut self) {
        self.draft.delete_word_backwards();
    }

    pub fn move_cursor_left(&mut self) {
        self.draft.move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.draft.move_cursor_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.draft.move_cursor_home();
    }

    pub fn move_cursor_end(&mut self) {
        self.draft.move_cursor_end();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    #[must_use]
    pub fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    /// Index of the selected row, when the list is non-empty.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        if self.tasks.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }
}
