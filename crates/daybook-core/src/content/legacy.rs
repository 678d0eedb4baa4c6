//! Readers for retired content formats
//!
//! Two earlier editors wrote journal bodies in shapes the tree format
//! replaced: a flat block array with per-block style tags, and before that
//! raw markup strings. Old entries are never rewritten on the server, so
//! both shapes stay readable forever.

use scraper::{Html, Selector};
use serde_json::Value;

use super::node::{Document, ListKind, Node};

/// Convert a block-array body into a document
///
/// Consecutive list-item blocks of the same kind collapse into a single
/// list. Block styles without a mapping fall back to paragraphs.
pub fn document_from_blocks(blocks: &[Value]) -> Document {
    let mut out = Vec::new();
    let mut list: Option<(ListKind, Vec<Node>)> = None;

    for block in blocks {
        let text = block.get("text").and_then(Value::as_str).unwrap_or_default();
        let style = block
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unstyled");

        let item_kind = match style {
            "unordered-list-item" => Some(ListKind::Bullet),
            "ordered-list-item" => Some(ListKind::Number),
            _ => None,
        };

        if let Some(kind) = item_kind {
            let item = Node::list_item(text);
            match &mut list {
                Some((current, items)) if *current == kind => items.push(item),
                _ => {
                    close_list(&mut list, &mut out);
                    list = Some((kind, vec![item]));
                }
            }
            continue;
        }

        close_list(&mut list, &mut out);
        match header_level(style) {
            Some(level) => out.push(Node::heading(level, text)),
            None => out.push(Node::paragraph(text)),
        }
    }

    close_list(&mut list, &mut out);
    Document::from_blocks(out)
}

/// Convert a markup body into a document of plain paragraphs
///
/// Tag-level fidelity is not attempted: each block-level element becomes
/// one paragraph of its text content, which re-escapes cleanly on render.
pub fn document_from_markup(markup: &str) -> Document {
    let blocks = markup_paragraphs(markup)
        .into_iter()
        .map(Node::paragraph)
        .collect();
    Document::from_blocks(blocks)
}

/// Text content of each block-level element in a markup string
///
/// Markup with no block-level elements yields its whole text as a single
/// entry. Blocks whose text is blank are dropped.
pub fn markup_paragraphs(markup: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(markup);
    let Ok(selector) = Selector::parse("p, h1, h2, h3, h4, h5, h6, li, blockquote, pre") else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for element in fragment.select(&selector) {
        let text = element.text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            out.push(text.to_string());
        }
    }

    if out.is_empty() {
        let text = fragment.root_element().text().collect::<String>();
        let text = text.trim();
        if !text.is_empty() {
            out.push(text.to_string());
        }
    }

    out
}

fn close_list(list: &mut Option<(ListKind, Vec<Node>)>, out: &mut Vec<Node>) {
    if let Some((kind, children)) = list.take() {
        out.push(Node::List { kind, children });
    }
}

fn header_level(style: &str) -> Option<u8> {
    match style {
        "header-one" => Some(1),
        "header-two" => Some(2),
        "header-three" => Some(3),
        "header-four" => Some(4),
        "header-five" => Some(5),
        "header-six" => Some(6),
        _ => None,
    }
}
