//! HTML projection of stored journal bodies
//!
//! Turns a raw stored string into display HTML for previews and exports.
//! The projection walks the stored JSON directly rather than going through
//! the typed document model, so a node the model does not know yet still
//! renders its children. Output is deterministic for a given input, and
//! every text fragment is escaped on the way out, including bodies from the
//! markup generation, whose tags are stripped and never passed through.

use serde_json::Value;

use super::legacy;

/// Placeholder emitted when a body has nothing renderable
pub const EMPTY_CONTENT_HTML: &str = "<p>No content</p>";

/// Render a raw stored body to HTML
///
/// Accepts all stored generations. Unreadable input renders as the
/// placeholder, never as an error.
pub fn project_to_html(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return EMPTY_CONTENT_HTML.to_string();
    }
    if trimmed.starts_with('<') {
        return finish(render_markup(trimmed));
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return EMPTY_CONTENT_HTML.to_string(),
    };

    let html = if let Some(root) = value.get("root") {
        render_tree(root)
    } else if let Some(blocks) = value.get("blocks").and_then(Value::as_array) {
        render_blocks(blocks)
    } else {
        String::new()
    };
    finish(html)
}

fn finish(html: String) -> String {
    if html.is_empty() {
        EMPTY_CONTENT_HTML.to_string()
    } else {
        html
    }
}

fn render_tree(root: &Value) -> String {
    root.get("children")
        .and_then(Value::as_array)
        .map(|children| render_children(children))
        .unwrap_or_default()
}

fn render_children(children: &[Value]) -> String {
    children.iter().map(render_node).collect()
}

fn render_node(node: &Value) -> String {
    let node_type = node.get("type").and_then(Value::as_str).unwrap_or_default();
    let children = node
        .get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    match node_type {
        "text" => escape_html(node.get("text").and_then(Value::as_str).unwrap_or_default()),
        "paragraph" => wrap("p", &render_children(children)),
        "heading" => wrap(&heading_tag(node), &render_children(children)),
        "list" => render_list(list_tag(node), children),
        "listitem" => wrap("li", &render_children(children)),
        // Unrecognized containers contribute their children without a wrapper
        _ => render_children(children),
    }
}

/// Every direct child of a list gets its own item, so a stray non-item
/// child still lands inside an `<li>` instead of corrupting the list.
fn render_list(tag: &str, children: &[Value]) -> String {
    let items: String = children
        .iter()
        .map(|child| {
            let child_type = child.get("type").and_then(Value::as_str).unwrap_or_default();
            if child_type == "listitem" {
                render_node(child)
            } else {
                wrap("li", &render_node(child))
            }
        })
        .collect();
    wrap(tag, &items)
}

fn heading_tag(node: &Value) -> String {
    if let Some(tag) = node.get("tag").and_then(Value::as_str) {
        if let Some(level) = tag.strip_prefix('h').and_then(|n| n.parse::<u8>().ok()) {
            return format!("h{}", level.clamp(1, 6));
        }
    }
    let level = node
        .get("level")
        .and_then(Value::as_u64)
        .unwrap_or(1)
        .clamp(1, 6);
    format!("h{}", level)
}

fn list_tag(node: &Value) -> &'static str {
    let kind = node
        .get("listType")
        .or_else(|| node.get("kind"))
        .and_then(Value::as_str);
    match kind {
        Some("number") | Some("ordered") => "ol",
        Some(_) => "ul",
        None => {
            if node.get("ordered").and_then(Value::as_bool).unwrap_or(false) {
                "ol"
            } else {
                "ul"
            }
        }
    }
}

/// Block-array bodies: headers and paragraphs map straight through, and
/// consecutive list items collapse into one `<ul>` or `<ol>`.
fn render_blocks(blocks: &[Value]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&str> = None;

    for block in blocks {
        let text = block.get("text").and_then(Value::as_str).unwrap_or_default();
        let style = block
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unstyled");
        let list = match style {
            "unordered-list-item" => Some("ul"),
            "ordered-list-item" => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        let tag = if list.is_some() { "li" } else { block_tag(style) };
        html.push_str(&wrap(tag, &escape_html(text)));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }
    html
}

fn block_tag(style: &str) -> &'static str {
    match style {
        "header-one" => "h1",
        "header-two" => "h2",
        "header-three" => "h3",
        "header-four" => "h4",
        "header-five" => "h5",
        "header-six" => "h6",
        _ => "p",
    }
}

/// Markup bodies are reduced to their text and re-emitted as escaped
/// paragraphs. The original tags are dropped entirely.
fn render_markup(markup: &str) -> String {
    legacy::markup_paragraphs(markup)
        .iter()
        .map(|text| wrap("p", &escape_html(text)))
        .collect()
}

fn wrap(tag: &str, inner: &str) -> String {
    format!("<{}>{}</{}>", tag, inner, tag)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::node::{Document, ListKind, Node};
    use crate::content::stored;

    #[test]
    fn test_empty_body_renders_placeholder() {
        assert_eq!(project_to_html(""), EMPTY_CONTENT_HTML);
        assert_eq!(project_to_html("   "), EMPTY_CONTENT_HTML);
    }

    #[test]
    fn test_unreadable_body_renders_placeholder() {
        assert_eq!(project_to_html("not json"), EMPTY_CONTENT_HTML);
    }

    #[test]
    fn test_bare_root_renders_placeholder() {
        assert_eq!(project_to_html(r#"{"root":{}}"#), EMPTY_CONTENT_HTML);
        assert_eq!(
            project_to_html(r#"{"root":{"children":[]}}"#),
            EMPTY_CONTENT_HTML
        );
    }

    #[test]
    fn test_heading_renders_with_level_tag() {
        let raw = r#"{"root":{"children":[{"type":"heading","tag":"h3","children":[{"type":"text","text":"Hi"}]}]}}"#;
        assert_eq!(project_to_html(raw), "<h3>Hi</h3>");
    }

    #[test]
    fn test_bullet_list_renders_items() {
        let raw = r#"{"root":{"children":[{"type":"list","listType":"bullet","children":[
            {"type":"listitem","children":[{"type":"text","text":"A"}]},
            {"type":"listitem","children":[{"type":"text","text":"B"}]}
        ]}]}}"#;
        assert_eq!(project_to_html(raw), "<ul><li>A</li><li>B</li></ul>");
    }

    #[test]
    fn test_numbered_list_renders_ordered() {
        let raw = r#"{"root":{"children":[{"type":"list","listType":"number","children":[
            {"type":"listitem","children":[{"type":"text","text":"first"}]}
        ]}]}}"#;
        assert_eq!(project_to_html(raw), "<ol><li>first</li></ol>");
    }

    #[test]
    fn test_bare_text_list_child_gets_own_item() {
        let raw = r#"{"root":{"children":[{"type":"list","listType":"bullet","children":[
            {"type":"text","text":"loose"}
        ]}]}}"#;
        assert_eq!(project_to_html(raw), "<ul><li>loose</li></ul>");
    }

    #[test]
    fn test_unknown_node_renders_children_unwrapped() {
        let raw = r#"{"root":{"children":[{"type":"callout","children":[
            {"type":"paragraph","children":[{"type":"text","text":"kept"}]}
        ]}]}}"#;
        assert_eq!(project_to_html(raw), "<p>kept</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let raw = r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"a < b & \"c\" > 'd'"}]}]}}"#;
        assert_eq!(
            project_to_html(raw),
            "<p>a &lt; b &amp; &quot;c&quot; &gt; &#39;d&#39;</p>"
        );
    }

    #[test]
    fn test_projection_is_deterministic() {
        let raw = r#"{"root":{"children":[{"type":"paragraph","children":[{"type":"text","text":"same"}]}]}}"#;
        assert_eq!(project_to_html(raw), project_to_html(raw));
    }

    #[test]
    fn test_block_array_body_renders() {
        let raw = r#"{"blocks":[
            {"text":"Hi","type":"header-one"},
            {"text":"Body","type":"unstyled"},
            {"text":"A","type":"unordered-list-item"},
            {"text":"B","type":"unordered-list-item"},
            {"text":"C","type":"ordered-list-item"}
        ],"entityMap":{}}"#;
        assert_eq!(
            project_to_html(raw),
            "<h1>Hi</h1><p>Body</p><ul><li>A</li><li>B</li></ul><ol><li>C</li></ol>"
        );
    }

    #[test]
    fn test_block_list_closes_before_plain_block() {
        let raw = r#"{"blocks":[
            {"text":"A","type":"unordered-list-item"},
            {"text":"after","type":"unstyled"}
        ]}"#;
        assert_eq!(project_to_html(raw), "<ul><li>A</li></ul><p>after</p>");
    }

    #[test]
    fn test_markup_body_is_rebuilt_not_passed_through() {
        let html = project_to_html(r#"<p onclick="steal()">hello <b>there</b></p>"#);
        assert_eq!(html, "<p>hello there</p>");
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn test_markup_text_is_escaped() {
        let html = project_to_html("<p>5 < 6 & true</p>");
        assert_eq!(html, "<p>5 &lt; 6 &amp; true</p>");
    }

    #[test]
    fn test_serialized_document_projects() {
        let doc = Document::from_blocks(vec![
            Node::heading(2, "Today"),
            Node::paragraph("It rained."),
            Node::List {
                kind: ListKind::Number,
                children: vec![Node::list_item("tea"), Node::list_item("a walk")],
            },
        ]);
        let stored = stored::serialize(&doc);
        assert_eq!(
            project_to_html(stored.as_str()),
            "<h2>Today</h2><p>It rained.</p><ol><li>tea</li><li>a walk</li></ol>"
        );
    }
}
