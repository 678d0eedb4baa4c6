//! Daybook Core Library
//!
//! This crate provides the core functionality for daybook, a client for a
//! journaling service with rich-text entries, folders, and comic
//! generation.
//!
//! # Architecture
//!
//! - **Content pipeline**: a typed document model, a versioned stored
//!   encoding, and an HTML projection. Writes are total; reads never fail,
//!   they degrade to an empty document.
//! - **Editing session**: the save lifecycle for one entry, with a local
//!   gate that refuses to send an entry that has nothing in it.
//! - **API client**: async REST access with an explicitly injected
//!   credential.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let credential = CredentialStore::new(&config).load()?;
//! let client = ApiClient::new(&config, credential)?;
//!
//! let mut session = EditingSession::new();
//! session.on_content_change(Document::from_plain_text("Dear diary"));
//! let entry = session.save(&client).await?;
//! ```
//!
//! # Modules
//!
//! - `content`: document model, stored format, HTML projection
//! - `session`: editing session state machine
//! - `api`: journal API client and error taxonomy
//! - `models`: wire models for entries, folders, characters, streaks
//! - `credential`: token pair persistence
//! - `config`: application configuration

pub mod api;
pub mod config;
pub mod content;
pub mod credential;
pub mod models;
pub mod session;

pub use api::{ApiClient, ApiError, ApiResult};
pub use config::Config;
pub use content::{project_to_html, Document, ListKind, Node, StoredDocument};
pub use credential::{Credential, CredentialStore};
pub use models::{Folder, JournalEntry, NewEntry};
pub use session::{EditingSession, SaveError, SessionState};
