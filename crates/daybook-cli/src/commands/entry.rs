//! Entry command handlers
//!
//! Writing goes through the editing session so the CLI gets the same save
//! gate as any other front end: an entry with no title and no content is
//! refused locally, and a failed save never loses the composed text.

use anyhow::{Context, Result};

use daybook_core::content::{self, Document};
use daybook_core::models::EntryPatch;
use daybook_core::{ApiClient, ApiError, EditingSession, SaveError};

use super::describe;
use crate::editor::{confirm, edit_text};
use crate::output::Output;

/// Compose a new entry in the editor and save it
pub async fn write(
    client: &ApiClient,
    title: Option<String>,
    folder: Option<i64>,
    output: &Output,
) -> Result<()> {
    // Fail before the editor opens, not after the entry is written
    if !client.has_credential() {
        return Err(describe(ApiError::MissingCredential));
    }

    let draft = edit_text("").context("Failed to compose entry")?;

    let mut session = EditingSession::new();
    session.on_content_change(Document::from_plain_text(draft.content()));
    if let Some(title) = title {
        session.set_title(&title);
    }
    session.set_folder(folder);

    let entry = match session.save(client).await {
        Ok(entry) => entry,
        Err(SaveError::EmptyEntry) => {
            draft.discard();
            output.message("Nothing to save.");
            return Ok(());
        }
        Err(err) => {
            let kept = format!(
                "Entry not saved. Your draft is kept at {}",
                draft.path().display()
            );
            let err = match err {
                SaveError::Api(err) => describe(err),
                other => anyhow::Error::new(other),
            };
            return Err(err.context(kept));
        }
    };

    draft.discard();
    output.success(&format!(
        "Saved entry {}: {}",
        entry.id,
        entry.display_title()
    ));
    Ok(())
}

/// List entries, optionally narrowed to one folder
pub async fn list(client: &ApiClient, folder: Option<i64>, output: &Output) -> Result<()> {
    let entries = client.list_entries(folder).await.map_err(describe)?;
    output.print_entries(&entries);
    Ok(())
}

/// Show one entry, rendered as HTML or reduced to plain text
pub async fn show(client: &ApiClient, id: i64, text: bool, output: &Output) -> Result<()> {
    let entry = client.get_entry(id).await.map_err(describe)?;

    let body = if text {
        content::deserialize(&entry.content).plain_text()
    } else {
        content::project_to_html(&entry.content)
    };

    output.print_entry(&entry, &body);
    Ok(())
}

/// Rename an entry
pub async fn rename(client: &ApiClient, id: i64, title: String, output: &Output) -> Result<()> {
    let entry = client
        .update_entry(id, &EntryPatch::rename(title))
        .await
        .map_err(describe)?;

    output.success(&format!(
        "Renamed entry {} to \"{}\"",
        entry.id,
        entry.display_title()
    ));
    Ok(())
}

/// Move an entry into a folder
pub async fn move_to_folder(
    client: &ApiClient,
    id: i64,
    folder: i64,
    output: &Output,
) -> Result<()> {
    let entry = client
        .update_entry(id, &EntryPatch::move_to(folder))
        .await
        .map_err(describe)?;

    output.success(&format!("Moved entry {} to folder {}", entry.id, folder));
    Ok(())
}

/// Delete an entry after showing what it is
pub async fn delete(client: &ApiClient, id: i64, output: &Output) -> Result<()> {
    let entry = client.get_entry(id).await.map_err(describe)?;

    if output.should_prompt() {
        println!("Delete entry {}: {}", entry.id, entry.display_title());
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    client.delete_entry(id).await.map_err(describe)?;
    output.success(&format!("Deleted entry {}", id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use daybook_core::{Config, Credential};

    // Port 1 refuses connections immediately, so a save fails without
    // needing a server.
    fn refused_client() -> ApiClient {
        let config = Config {
            api_url: "http://127.0.0.1:1/api".to_string(),
            ..Config::default()
        };
        ApiClient::new(&config, Some(Credential::new("access", "refresh"))).unwrap()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_save_keeps_draft_on_disk() {
        use crate::editor::test_support::{stub_editor, EditorGuard};

        let dir = tempfile::tempdir().unwrap();
        let editor = stub_editor(dir.path(), "#!/bin/sh\necho precious words > \"$1\"\n");

        let _guard = EditorGuard::set(&editor);
        let output = Output::new(OutputFormat::Quiet);
        let err = write(&refused_client(), None, None, &output)
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Your draft is kept at"));

        let path = message.rsplit("kept at ").next().unwrap().trim();
        let kept = std::fs::read_to_string(path).unwrap();
        assert!(kept.contains("precious words"));
        std::fs::remove_file(path).unwrap();
    }
}
