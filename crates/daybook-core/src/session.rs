//! Editing session
//!
//! Tracks one entry being composed: its document, its title, and where it
//! is in the save lifecycle. The session is the only writer of its own
//! state, so a save can never race an edit, and a failed save always
//! leaves the typed content in place.

use thiserror::Error;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::content::{self, Document};
use crate::models::{JournalEntry, NewEntry, UNTITLED};

/// Longest title derived from entry content
const DERIVED_TITLE_LIMIT: usize = 64;

/// Where the session is in the save lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No content worth saving yet
    Empty,
    /// Unsaved content present
    Dirty,
    /// A save is in flight
    Saving,
    /// The last save landed; the next edit or reset clears it
    Saved,
}

/// Why a save did not happen
#[derive(Error, Debug)]
pub enum SaveError {
    /// Both title and content are empty; nothing was sent
    #[error("Nothing to save: the entry has no title and no content")]
    EmptyEntry,

    /// This session already has a save in flight
    #[error("A save is already in progress")]
    SaveInFlight,

    /// The API rejected or never received the entry
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One entry being written
pub struct EditingSession {
    state: SessionState,
    document: Document,
    manual_title: Option<String>,
    derived_title: Option<String>,
    folder: Option<i64>,
}

impl EditingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Empty,
            document: Document::new(),
            manual_title: None,
            derived_title: None,
            folder: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Effective title: manual if set, else derived from content
    pub fn title(&self) -> &str {
        if let Some(title) = &self.manual_title {
            return title;
        }
        if let Some(title) = &self.derived_title {
            return title;
        }
        UNTITLED
    }

    /// Replace the session's document with a new edit
    ///
    /// Recomputes `Empty`/`Dirty` and the derived title. Ignored while a
    /// save is in flight so the payload being sent stays coherent.
    pub fn on_content_change(&mut self, document: Document) {
        if self.state == SessionState::Saving {
            debug!("content change ignored while a save is in flight");
            return;
        }
        self.derived_title = derive_title(&document);
        self.document = document;
        self.state = self.content_state();
    }

    /// Set a manual title. Blank input restores title derivation.
    pub fn set_title(&mut self, title: &str) {
        if self.state == SessionState::Saving {
            debug!("title change ignored while a save is in flight");
            return;
        }
        let trimmed = title.trim();
        self.manual_title = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.state = self.content_state();
    }

    /// Folder the next save lands in
    pub fn set_folder(&mut self, folder: Option<i64>) {
        self.folder = folder;
    }

    /// Gate and stage a save
    ///
    /// Fails locally, before anything touches the network: an entry with
    /// no title and no content is rejected, as is a second save while one
    /// is in flight. On success the session moves to `Saving` and the
    /// returned payload is ready to POST. A title-only entry is allowed
    /// and carries a serialized empty document.
    pub fn begin_save(&mut self) -> Result<NewEntry, SaveError> {
        if self.state == SessionState::Saving {
            return Err(SaveError::SaveInFlight);
        }

        let title = self.effective_title();
        if title.is_none() && self.document.is_empty_content() {
            return Err(SaveError::EmptyEntry);
        }

        let stored = content::serialize(&self.document);
        let entry = NewEntry::new(
            title.unwrap_or_else(|| UNTITLED.to_string()),
            stored.into_string(),
        )
        .in_folder(self.folder);

        self.state = SessionState::Saving;
        Ok(entry)
    }

    /// Mark the in-flight save as landed
    pub fn complete_save(&mut self) {
        if self.state == SessionState::Saving {
            self.state = SessionState::Saved;
        }
    }

    /// Mark the in-flight save as failed, keeping the typed content
    pub fn fail_save(&mut self) {
        if self.state == SessionState::Saving {
            self.state = self.content_state();
        }
    }

    /// Clear content and title back to an empty session
    pub fn reset(&mut self) {
        self.document = Document::new();
        self.manual_title = None;
        self.derived_title = None;
        self.state = SessionState::Empty;
    }

    /// Run the whole save lifecycle against the API
    ///
    /// Gate, POST, then either complete and reset, or roll back to the
    /// pre-save state with the content intact.
    pub async fn save(&mut self, client: &ApiClient) -> Result<JournalEntry, SaveError> {
        let entry = self.begin_save()?;
        match client.create_entry(&entry).await {
            Ok(saved) => {
                debug!("entry {} saved", saved.id);
                self.complete_save();
                self.reset();
                Ok(saved)
            }
            Err(err) => {
                self.fail_save();
                Err(err.into())
            }
        }
    }

    fn content_state(&self) -> SessionState {
        if self.document.is_empty_content() {
            SessionState::Empty
        } else {
            SessionState::Dirty
        }
    }

    fn effective_title(&self) -> Option<String> {
        self.manual_title
            .clone()
            .or_else(|| self.derived_title.clone())
    }
}

impl Default for EditingSession {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_title(document: &Document) -> Option<String> {
    let first = document.first_text()?.trim();
    if first.is_empty() {
        return None;
    }
    if first.chars().count() <= DERIVED_TITLE_LIMIT {
        return Some(first.to_string());
    }
    let cut: String = first.chars().take(DERIVED_TITLE_LIMIT).collect();
    Some(format!("{}...", cut))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::Node;

    fn doc(text: &str) -> Document {
        Document::from_blocks(vec![Node::paragraph(text)])
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = EditingSession::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.title(), UNTITLED);
    }

    #[test]
    fn test_content_change_tracks_emptiness() {
        let mut session = EditingSession::new();

        session.on_content_change(doc("hello"));
        assert_eq!(session.state(), SessionState::Dirty);

        session.on_content_change(doc(""));
        assert_eq!(session.state(), SessionState::Empty);

        session.on_content_change(doc("   "));
        assert_eq!(session.state(), SessionState::Empty);

        session.on_content_change(doc(" a"));
        assert_eq!(session.state(), SessionState::Dirty);
    }

    #[test]
    fn test_title_derived_from_first_text() {
        let mut session = EditingSession::new();
        session.on_content_change(Document::from_blocks(vec![
            Node::heading(1, "Morning pages"),
            Node::paragraph("the rest"),
        ]));
        assert_eq!(session.title(), "Morning pages");
    }

    #[test]
    fn test_derived_title_is_capped() {
        let mut session = EditingSession::new();
        let long = "x".repeat(100);
        session.on_content_change(doc(&long));

        let title = session.title().to_string();
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), DERIVED_TITLE_LIMIT + 3);
    }

    #[test]
    fn test_manual_title_wins_until_cleared() {
        let mut session = EditingSession::new();
        session.on_content_change(doc("derived"));
        session.set_title("Chosen");
        assert_eq!(session.title(), "Chosen");

        // Blank restores derivation
        session.set_title("   ");
        assert_eq!(session.title(), "derived");
    }

    #[test]
    fn test_begin_save_rejects_empty_entry() {
        let mut session = EditingSession::new();
        let result = session.begin_save();
        assert!(matches!(result, Err(SaveError::EmptyEntry)));
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_begin_save_title_only_sends_empty_document() {
        let mut session = EditingSession::new();
        session.set_title("Just a title");

        let entry = session.begin_save().unwrap();
        assert_eq!(entry.title, "Just a title");
        assert!(content::deserialize(&entry.content).blocks.is_empty());
        assert_eq!(session.state(), SessionState::Saving);
    }

    #[test]
    fn test_begin_save_carries_folder() {
        let mut session = EditingSession::new();
        session.on_content_change(doc("filed away"));
        session.set_folder(Some(4));

        let entry = session.begin_save().unwrap();
        assert_eq!(entry.folder, Some(4));
    }

    #[test]
    fn test_second_save_rejected_while_in_flight() {
        let mut session = EditingSession::new();
        session.on_content_change(doc("hello"));

        session.begin_save().unwrap();
        let result = session.begin_save();
        assert!(matches!(result, Err(SaveError::SaveInFlight)));
    }

    #[test]
    fn test_edits_ignored_while_saving() {
        let mut session = EditingSession::new();
        session.on_content_change(doc("original"));
        session.begin_save().unwrap();

        session.on_content_change(doc("changed"));
        session.set_title("changed");
        assert_eq!(session.document().plain_text(), "original");
        assert_eq!(session.title(), "original");
    }

    #[test]
    fn test_fail_save_keeps_content() {
        let mut session = EditingSession::new();
        session.on_content_change(doc("precious words"));
        session.begin_save().unwrap();

        session.fail_save();
        assert_eq!(session.state(), SessionState::Dirty);
        assert_eq!(session.document().plain_text(), "precious words");
    }

    #[test]
    fn test_complete_save_then_reset() {
        let mut session = EditingSession::new();
        session.on_content_change(doc("done"));
        session.begin_save().unwrap();

        session.complete_save();
        assert_eq!(session.state(), SessionState::Saved);

        session.reset();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.title(), UNTITLED);
        assert!(session.document().blocks.is_empty());
    }

    #[tokio::test]
    async fn test_save_empty_session_never_touches_network() {
        // Port 1 would refuse instantly; the gate must fire before any
        // connection is attempted, so the error is EmptyEntry.
        let config = Config {
            api_url: "http://127.0.0.1:1/api".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config, None).unwrap();

        let mut session = EditingSession::new();
        let result = session.save(&client).await;
        assert!(matches!(result, Err(SaveError::EmptyEntry)));
        assert_eq!(session.state(), SessionState::Empty);
    }
}
