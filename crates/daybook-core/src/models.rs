//! Wire models for the journal API
//!
//! Shapes mirror what the backend actually sends. Deserialization is
//! forgiving where the backend is inconsistent: optional fields default,
//! `comic_entry` arrives as a number, string, `null`, `false`, or `0`
//! depending on the endpoint, and list endpoints may or may not paginate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title shown for entries saved without one
pub const UNTITLED: &str = "Untitled Entry";

// ==================== Entries ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Stored document body, opaque to the backend
    #[serde(default)]
    pub content: String,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub folder: Option<i64>,
    #[serde(default, deserialize_with = "falsy_id_as_none")]
    pub comic_entry: Option<i64>,
}

impl JournalEntry {
    /// Title for display, falling back when the entry has none
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}

/// The backend emits `comic_entry` in several falsy spellings. All of
/// them, plus `0`, mean "no comic".
fn falsy_id_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().filter(|id| *id != 0),
        Some(Value::String(s)) => s.parse::<i64>().ok().filter(|id| *id != 0),
        _ => None,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<i64>,
}

impl NewEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            folder: None,
        }
    }

    pub fn in_folder(mut self, folder: Option<i64>) -> Self {
        self.folder = folder;
        self
    }
}

/// Partial update for an entry. Absent fields are not sent, so a `PATCH`
/// never clears a field by accident.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<i64>,
}

impl EntryPatch {
    pub fn rename(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn move_to(folder: i64) -> Self {
        Self {
            folder: Some(folder),
            ..Self::default()
        }
    }
}

// ==================== Folders ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub is_locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFolder {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            parent: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

impl FolderPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn locked(is_locked: bool) -> Self {
        Self {
            is_locked: Some(is_locked),
            ..Self::default()
        }
    }
}

// ==================== Characters & comics ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCharacter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewCharacter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Links one of the user's real-life people to a comic character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub character: i64,
    pub real_life_name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicEntry {
    pub id: i64,
    #[serde(default)]
    pub comic_image: String,
}

// ==================== Gamification ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    #[serde(default)]
    pub current_streak: i64,
    #[serde(default)]
    pub longest_streak: Option<i64>,
}

// ==================== List envelopes ====================

/// List endpoints answer with either a bare array or a paginated
/// `{"results": [...]}` wrapper depending on backend settings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPage<T> {
    Paginated { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListPage<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPage::Paginated { results } => results,
            ListPage::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_json(comic_entry: Value) -> Value {
        json!({
            "id": 12,
            "title": "A day",
            "content": "",
            "date_created": "2024-05-01T09:30:00Z",
            "folder": null,
            "comic_entry": comic_entry,
        })
    }

    #[test]
    fn test_comic_entry_falsy_spellings_are_none() {
        for falsy in [json!(null), json!(0), json!(false), json!("")] {
            let entry: JournalEntry = serde_json::from_value(entry_json(falsy)).unwrap();
            assert_eq!(entry.comic_entry, None);
        }
    }

    #[test]
    fn test_comic_entry_present_id_survives() {
        let entry: JournalEntry = serde_json::from_value(entry_json(json!(7))).unwrap();
        assert_eq!(entry.comic_entry, Some(7));
        let entry: JournalEntry = serde_json::from_value(entry_json(json!("7"))).unwrap();
        assert_eq!(entry.comic_entry, Some(7));
    }

    #[test]
    fn test_comic_entry_absent_is_none() {
        let entry: JournalEntry = serde_json::from_value(json!({
            "id": 1,
            "date_created": "2024-05-01T09:30:00Z",
        }))
        .unwrap();
        assert_eq!(entry.comic_entry, None);
        assert_eq!(entry.title, "");
        assert_eq!(entry.folder, None);
    }

    #[test]
    fn test_display_title_falls_back_when_blank() {
        let mut entry: JournalEntry = serde_json::from_value(entry_json(json!(null))).unwrap();
        assert_eq!(entry.display_title(), "A day");
        entry.title = "   ".to_string();
        assert_eq!(entry.display_title(), UNTITLED);
    }

    #[test]
    fn test_entry_patch_omits_unset_fields() {
        let patch = EntryPatch::rename("New title");
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"title": "New title"})
        );
        assert_eq!(
            serde_json::to_value(EntryPatch::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_new_entry_folder_only_sent_when_set() {
        let entry = NewEntry::new("t", "c");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"title": "t", "content": "c"})
        );
        let entry = NewEntry::new("t", "c").in_folder(Some(3));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"title": "t", "content": "c", "folder": 3})
        );
    }

    #[test]
    fn test_folder_minimal_json_decodes() {
        let folder: Folder = serde_json::from_value(json!({"id": 2, "name": "Work"})).unwrap();
        assert_eq!(folder.color, None);
        assert!(!folder.is_locked);
    }

    #[test]
    fn test_list_page_decodes_both_envelopes() {
        let bare: ListPage<Folder> =
            serde_json::from_value(json!([{"id": 1, "name": "a"}])).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let paginated: ListPage<Folder> = serde_json::from_value(json!({
            "count": 1,
            "results": [{"id": 1, "name": "a"}],
        }))
        .unwrap();
        assert_eq!(paginated.into_vec().len(), 1);
    }

    #[test]
    fn test_streak_tolerates_missing_fields() {
        let streak: Streak = serde_json::from_value(json!({})).unwrap();
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, None);
    }
}
