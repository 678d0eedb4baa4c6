//! Folder command handlers
//!
//! Locked folders refuse renames and deletes until unlocked. The check
//! runs here as well as on the server so the refusal is explained before
//! anything is sent.

use anyhow::{bail, Result};

use daybook_core::models::{Folder, FolderPatch, NewFolder};
use daybook_core::ApiClient;

use super::describe;
use crate::editor::confirm;
use crate::output::Output;

/// List folders
pub async fn list(client: &ApiClient, output: &Output) -> Result<()> {
    let folders = client.list_folders().await.map_err(describe)?;
    output.print_folders(&folders);
    Ok(())
}

/// Create a folder
pub async fn create(
    client: &ApiClient,
    name: String,
    color: Option<String>,
    parent: Option<i64>,
    output: &Output,
) -> Result<()> {
    let mut folder = NewFolder::new(name);
    folder.color = color;
    folder.parent = parent;

    let created = client.create_folder(&folder).await.map_err(describe)?;
    output.success(&format!("Created folder {}: {}", created.id, created.name));
    Ok(())
}

/// Rename a folder
pub async fn rename(client: &ApiClient, id: i64, name: String, output: &Output) -> Result<()> {
    let folder = find_folder(client, id).await?;
    ensure_unlocked(&folder)?;

    let renamed = client
        .update_folder(id, &FolderPatch::rename(name))
        .await
        .map_err(describe)?;

    output.success(&format!("Renamed folder {} to {}", id, renamed.name));
    Ok(())
}

/// Delete a folder after confirmation
pub async fn delete(client: &ApiClient, id: i64, output: &Output) -> Result<()> {
    let folder = find_folder(client, id).await?;
    ensure_unlocked(&folder)?;

    if output.should_prompt() {
        println!("Delete folder {}: {}", folder.id, folder.name);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    client.delete_folder(id).await.map_err(describe)?;
    output.success(&format!("Deleted folder {}", id));
    Ok(())
}

/// Lock or unlock a folder
pub async fn set_locked(client: &ApiClient, id: i64, locked: bool, output: &Output) -> Result<()> {
    let folder = client
        .update_folder(id, &FolderPatch::locked(locked))
        .await
        .map_err(describe)?;

    let verb = if locked { "Locked" } else { "Unlocked" };
    output.success(&format!("{} folder {}: {}", verb, id, folder.name));
    Ok(())
}

/// Find a folder by ID
///
/// The API has no single-folder read, so this goes through the list.
async fn find_folder(client: &ApiClient, id: i64) -> Result<Folder> {
    let folders = client.list_folders().await.map_err(describe)?;
    folders
        .into_iter()
        .find(|folder| folder.id == id)
        .ok_or_else(|| anyhow::anyhow!("Folder not found: {}", id))
}

fn ensure_unlocked(folder: &Folder) -> Result<()> {
    if folder.is_locked {
        bail!(
            "Folder '{}' is locked. Unlock it first: daybook folder unlock {}",
            folder.name,
            folder.id
        );
    }
    Ok(())
}
