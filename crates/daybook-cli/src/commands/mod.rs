//! Command handlers

pub mod auth;
pub mod character;
pub mod comic;
pub mod config;
pub mod entry;
pub mod folder;
pub mod status;

use daybook_core::ApiError;

/// Turn an API failure into an error with its recovery hint attached
pub(crate) fn describe(err: ApiError) -> anyhow::Error {
    match err.recovery_suggestion() {
        Some(hint) => anyhow::anyhow!("{}\n{}", err, hint),
        None => anyhow::Error::new(err),
    }
}
