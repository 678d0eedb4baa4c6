//! Character command handlers
//!
//! Characters are the comic cast. Mappings link the people who appear in
//! entries to characters so generated comics can draw them.

use anyhow::Result;

use daybook_core::models::{CharacterMapping, NewCharacter};
use daybook_core::ApiClient;

use super::describe;
use crate::output::Output;

/// List characters and the user's mappings
pub async fn list(client: &ApiClient, output: &Output) -> Result<()> {
    let characters = client.list_characters().await.map_err(describe)?;
    let mappings = client.list_character_mappings().await.map_err(describe)?;

    output.print_characters(&characters, &mappings);
    Ok(())
}

/// Create a character
pub async fn create(
    client: &ApiClient,
    name: String,
    description: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut character = NewCharacter::new(name);
    character.description = description;

    let created = client.create_character(&character).await.map_err(describe)?;
    output.success(&format!(
        "Created character {}: {}",
        created.id, created.name
    ));
    Ok(())
}

/// Map a real-life person to a character
#[allow(clippy::too_many_arguments)]
pub async fn map(
    client: &ApiClient,
    character_id: i64,
    real_life_name: String,
    relationship: String,
    gender: String,
    age_group: String,
    output: &Output,
) -> Result<()> {
    let mapping = CharacterMapping {
        id: None,
        character: character_id,
        real_life_name,
        relationship,
        gender,
        age_group,
    };

    let saved = client
        .create_character_mapping(&mapping)
        .await
        .map_err(describe)?;

    output.success(&format!(
        "Mapped {} to character {}",
        saved.real_life_name, saved.character
    ));
    Ok(())
}
