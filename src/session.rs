//! Project session state.
//!
//! A [`ProjectSession`] owns everything tied to one loaded project: the
//! root path, the in-memory vector index, and the append-only conversation
//! history. It is created by project load, passed by reference into each
//! command handler, and dropped wholesale when a new project is loaded.
//! Nothing is shared across sessions.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::index::VectorIndex;
use crate::models::ConversationTurn;

pub struct ProjectSession {
    /// Root of the loaded project on disk.
    pub root: PathBuf,
    /// Number of source files that were ingested.
    pub file_count: usize,
    /// Similarity index over the project's embedded segments.
    pub index: VectorIndex,
    /// Chat history, appended to for the lifetime of the session.
    pub history: Vec<ConversationTurn>,
    /// Keeps a cloned repository checkout alive for the session. Dropping
    /// the session removes the temporary clone.
    _checkout: Option<TempDir>,
}

impl ProjectSession {
    pub fn new(root: PathBuf, file_count: usize, index: VectorIndex) -> Self {
        Self {
            root,
            file_count,
            index,
            history: Vec::new(),
            _checkout: None,
        }
    }

    /// Attach a temporary checkout whose lifetime must match the session.
    pub fn with_checkout(mut self, checkout: TempDir) -> Self {
        self._checkout = Some(checkout);
        self
    }

    /// Record a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.history.push(ConversationTurn::user(content));
    }

    /// Record an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.history.push(ConversationTurn::assistant(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_history_is_append_only_and_ordered() {
        let mut session = ProjectSession::new(PathBuf::from("/tmp/p"), 0, VectorIndex::new());
        session.push_user("first question");
        session.push_assistant("first answer");
        session.push_user("second question");

        assert_eq!(session.history.len(), 3);
        assert_eq!(session.history[0].role, Role::User);
        assert_eq!(session.history[1].role, Role::Assistant);
        assert_eq!(session.history[2].content, "second question");
    }

    #[test]
    fn test_fresh_session_has_empty_history() {
        let session = ProjectSession::new(PathBuf::from("/tmp/p"), 3, VectorIndex::new());
        assert!(session.history.is_empty());
        assert_eq!(session.file_count, 3);
    }
}
