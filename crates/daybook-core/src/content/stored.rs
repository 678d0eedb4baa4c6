//! Stored document format
//!
//! Journal bodies travel through the API as opaque strings in the entry's
//! `content` field. The current writer emits a versioned node tree; readers
//! additionally accept the two shapes earlier releases produced (block
//! arrays and markup strings). Reads never fail: anything unrecognized
//! degrades to an empty document with a logged diagnostic so one bad entry
//! cannot take a whole journal down.

use serde_json::{json, Value};
use tracing::debug;

use super::legacy;
use super::node::{Document, ListKind, Node};

/// Version discriminator written into new stored documents
pub const FORMAT_VERSION: u64 = 3;

/// A serialized journal body, exactly as persisted by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument(String);

impl StoredDocument {
    /// Wrap a raw stored string without validation
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw string, suitable for an entry's `content` field
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for StoredDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a stored string will be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Current node-tree format: an object with a `root` key, with or
    /// without the `version` discriminator
    Tree,
    /// Block-array format from the second editor generation
    Blocks,
    /// Markup string from the first editor generation
    Markup,
    /// Nothing renderable
    Empty,
}

/// Decide which reader applies to a stored string
///
/// Structural sniffing covers entries written before the version
/// discriminator existed: `root` means tree, a `blocks` array means the
/// block format, and a leading `<` means markup.
pub fn classify(raw: &str) -> Generation {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Generation::Empty;
    }
    if trimmed.starts_with('<') {
        return Generation::Markup;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if value.get("root").is_some() => Generation::Tree,
        Ok(value) if value.get("blocks").map_or(false, Value::is_array) => Generation::Blocks,
        Ok(_) => Generation::Empty,
        Err(_) => Generation::Empty,
    }
}

/// Encode a document into the current stored format
///
/// Total and deterministic: every node type, `Unknown` included, has a
/// wire form, so saving can never fail.
pub fn serialize(document: &Document) -> StoredDocument {
    let children: Vec<Value> = document.blocks.iter().map(node_to_value).collect();
    let value = json!({
        "version": FORMAT_VERSION,
        "root": { "children": children },
    });
    StoredDocument(value.to_string())
}

/// Decode a stored string into a document
///
/// Accepts all three generations. Never fails: malformed or unrecognized
/// input yields an empty document rather than an error.
pub fn deserialize(raw: &str) -> Document {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Document::new();
    }
    if trimmed.starts_with('<') {
        return legacy::document_from_markup(trimmed);
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            debug!("stored content is not JSON, reading as empty: {}", err);
            return Document::new();
        }
    };

    if let Some(root) = value.get("root") {
        let blocks = root
            .get("children")
            .and_then(Value::as_array)
            .map(|children| children.iter().filter_map(node_from_value).collect())
            .unwrap_or_default();
        return Document::from_blocks(blocks);
    }

    if let Some(blocks) = value.get("blocks").and_then(Value::as_array) {
        return legacy::document_from_blocks(blocks);
    }

    debug!("stored content has no recognized shape, reading as empty");
    Document::new()
}

fn node_to_value(node: &Node) -> Value {
    match node {
        Node::Text { text } => json!({ "type": "text", "text": text }),
        Node::Paragraph { children } => json!({
            "type": "paragraph",
            "children": child_values(children),
        }),
        Node::Heading { level, children } => json!({
            "type": "heading",
            "tag": format!("h{}", (*level).clamp(1, 6)),
            "children": child_values(children),
        }),
        Node::List { kind, children } => json!({
            "type": "list",
            "listType": match kind {
                ListKind::Bullet => "bullet",
                ListKind::Number => "number",
            },
            "children": child_values(children),
        }),
        Node::ListItem { children } => json!({
            "type": "listitem",
            "children": child_values(children),
        }),
        Node::Unknown {
            node_type,
            children,
        } => json!({
            "type": node_type,
            "children": child_values(children),
        }),
    }
}

fn child_values(children: &[Node]) -> Vec<Value> {
    children.iter().map(node_to_value).collect()
}

fn node_from_value(value: &Value) -> Option<Node> {
    let obj = value.as_object()?;
    let node_type = obj.get("type").and_then(Value::as_str).unwrap_or_default();
    let children: Vec<Node> = obj
        .get("children")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(node_from_value).collect())
        .unwrap_or_default();

    let node = match node_type {
        "text" => Node::Text {
            text: obj
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        "paragraph" => Node::Paragraph { children },
        "heading" => Node::Heading {
            level: heading_level(obj),
            children,
        },
        "list" => Node::List {
            kind: list_kind(obj),
            children,
        },
        "listitem" => Node::ListItem { children },
        other => Node::Unknown {
            node_type: other.to_string(),
            children,
        },
    };
    Some(node)
}

/// Heading level from either the `tag` ("h1".."h6") or `level` key
fn heading_level(obj: &serde_json::Map<String, Value>) -> u8 {
    if let Some(tag) = obj.get("tag").and_then(Value::as_str) {
        if let Some(level) = tag.strip_prefix('h').and_then(|n| n.parse::<u8>().ok()) {
            return level.clamp(1, 6);
        }
    }
    if let Some(level) = obj.get("level").and_then(Value::as_u64) {
        return level.clamp(1, 6) as u8;
    }
    1
}

fn list_kind(obj: &serde_json::Map<String, Value>) -> ListKind {
    let tag = obj
        .get("listType")
        .or_else(|| obj.get("kind"))
        .and_then(Value::as_str);
    match tag {
        Some("number") | Some("ordered") => ListKind::Number,
        Some(_) => ListKind::Bullet,
        None => {
            if obj.get("ordered").and_then(Value::as_bool).unwrap_or(false) {
                ListKind::Number
            } else {
                ListKind::Bullet
            }
        }
    }
}
