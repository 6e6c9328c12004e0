//! Document lifetime as seen by an editor front end.

use crate::document::{DocumentModel, LoadError, LoadOptions};
use std::path::{Path, PathBuf};

/// Where a session is in its load cycle.
///
/// `Invalid` is terminal for one attempt: the only way out is another
/// [`Session::open`].
#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Unloaded,
    /// A load is in progress for this path.
    Loading(PathBuf),
    Valid(DocumentModel),
    Invalid(LoadError),
}

impl SessionState {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionState::Valid(_))
    }
}

/// Owns at most one document and the outcome of the last load.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    options: LoadOptions,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            state: SessionState::Unloaded,
            options,
        }
    }

    /// Start a session on a new, unsaved document.
    pub fn with_model(model: DocumentModel) -> Self {
        Self {
            state: SessionState::Valid(model),
            options: LoadOptions::default(),
        }
    }

    /// Load `path`, discarding any current document.
    ///
    /// Returns whether the document is valid; on failure [`error`](Self::error)
    /// holds the reason.
    pub fn open(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.state = SessionState::Loading(path.to_path_buf());
        self.state = match DocumentModel::open(path, &self.options) {
            Ok(model) => SessionState::Valid(model),
            Err(err) => {
                tracing::warn!("Cannot load {}: {}", path.display(), err);
                SessionState::Invalid(err)
            }
        };
        self.state.is_valid()
    }

    /// Drop the current document.
    pub fn close(&mut self) {
        self.state = SessionState::Unloaded;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Why the last load failed.
    pub fn error(&self) -> Option<&LoadError> {
        match &self.state {
            SessionState::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// The document, only when the last load succeeded.
    pub fn model(&self) -> Option<&DocumentModel> {
        match &self.state {
            SessionState::Valid(model) => Some(model),
            _ => None,
        }
    }

    pub fn model_mut(&mut self) -> Option<&mut DocumentModel> {
        match &mut self.state {
            SessionState::Valid(model) => Some(model),
            _ => None,
        }
    }

    /// Whether the open document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.model().is_some_and(DocumentModel::is_dirty)
    }
}
