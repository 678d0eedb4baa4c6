//! Comic command handlers

use anyhow::{Context, Result};

use daybook_core::ApiClient;

use super::describe;
use crate::output::Output;

/// Ask the backend to generate a comic for an entry
pub async fn create(
    client: &ApiClient,
    entry_id: i64,
    character_id: i64,
    open_image: bool,
    output: &Output,
) -> Result<()> {
    let comic = client
        .create_comic(entry_id, character_id)
        .await
        .map_err(describe)?;

    output.success(&format!(
        "Created comic {} for entry {}",
        comic.id, entry_id
    ));
    output.print_comic(&comic);

    if open_image && !comic.comic_image.is_empty() {
        open::that(&comic.comic_image).context("Failed to open comic image")?;
    }
    Ok(())
}

/// Show a comic
pub async fn show(client: &ApiClient, id: i64, open_image: bool, output: &Output) -> Result<()> {
    let comic = client.get_comic(id).await.map_err(describe)?;
    output.print_comic(&comic);

    if open_image && !comic.comic_image.is_empty() {
        open::that(&comic.comic_image).context("Failed to open comic image")?;
    }
    Ok(())
}
