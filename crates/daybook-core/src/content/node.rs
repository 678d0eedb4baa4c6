//! Journal document model
//!
//! A `Document` is an ordered sequence of block nodes: paragraphs,
//! headings, lists, and plain text runs. Node types the current release
//! does not recognize survive as `Unknown` so entries written by newer
//! editors keep their structure through a round trip.

/// Ordering style of a list block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Unordered list, rendered as `<ul>`
    Bullet,
    /// Ordered list, rendered as `<ol>`
    Number,
}

/// A node in the document tree
///
/// Children are owned exclusively by their parent; the tree has no back
/// references.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A run of plain text
    Text { text: String },
    /// A paragraph block
    Paragraph { children: Vec<Node> },
    /// A heading block, level 1 through 6
    Heading { level: u8, children: Vec<Node> },
    /// A list block
    List { kind: ListKind, children: Vec<Node> },
    /// One item of a list
    ListItem { children: Vec<Node> },
    /// A node type this release does not recognize
    Unknown { node_type: String, children: Vec<Node> },
}

impl Node {
    /// Create a text run
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            text: content.into(),
        }
    }

    /// Create a paragraph holding a single text run
    pub fn paragraph(content: impl Into<String>) -> Self {
        Node::Paragraph {
            children: vec![Node::text(content)],
        }
    }

    /// Create a heading holding a single text run
    ///
    /// Levels outside 1..=6 are clamped.
    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        Node::Heading {
            level: level.clamp(1, 6),
            children: vec![Node::text(content)],
        }
    }

    /// Create a list item holding a single text run
    pub fn list_item(content: impl Into<String>) -> Self {
        Node::ListItem {
            children: vec![Node::text(content)],
        }
    }

    /// Child nodes, if this node type carries any
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text { .. } => &[],
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Unknown { children, .. } => children,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(text),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// A journal entry body: an ordered sequence of block nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Top-level blocks in display order
    pub blocks: Vec<Node>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pre-built blocks
    pub fn from_blocks(blocks: Vec<Node>) -> Self {
        Self { blocks }
    }

    /// True when the document carries no visible text
    ///
    /// Structure alone does not count: a paragraph holding one empty text
    /// run is still empty, and whitespace-only text is empty.
    pub fn is_empty_content(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Plain text of the whole document, blocks separated by newlines
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            let mut text = String::new();
            block.collect_text(&mut text);
            parts.push(text);
        }
        parts.join("\n")
    }

    /// First non-blank text run, trimmed
    ///
    /// Used to derive a display title for entries saved without one.
    pub fn first_text(&self) -> Option<&str> {
        first_text_in(&self.blocks)
    }

    /// Build a document from plain text
    ///
    /// Recognizes a light structure: `#` through `######` heading
    /// prefixes, `-` or `*` bullet items, `1.` style ordered items, and
    /// blank-line separated paragraphs. Consecutive plain lines join into
    /// one paragraph.
    pub fn from_plain_text(input: &str) -> Self {
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();
        let mut list: Option<(ListKind, Vec<Node>)> = None;

        for line in input.lines() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                flush_list(&mut list, &mut blocks);
                continue;
            }

            if let Some((level, text)) = heading_line(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                flush_list(&mut list, &mut blocks);
                blocks.push(Node::heading(level, text));
                continue;
            }

            if let Some(item) = bullet_item(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                push_list_item(&mut list, &mut blocks, ListKind::Bullet, item);
                continue;
            }

            if let Some(item) = ordered_item(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                push_list_item(&mut list, &mut blocks, ListKind::Number, item);
                continue;
            }

            flush_list(&mut list, &mut blocks);
            paragraph.push(line);
        }

        flush_paragraph(&mut paragraph, &mut blocks);
        flush_list(&mut list, &mut blocks);

        Self { blocks }
    }
}

fn first_text_in(nodes: &[Node]) -> Option<&str> {
    for node in nodes {
        match node {
            Node::Text { text } => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed);
                }
            }
            _ => {
                if let Some(found) = first_text_in(node.children()) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Node>) {
    if !lines.is_empty() {
        blocks.push(Node::paragraph(lines.join(" ")));
        lines.clear();
    }
}

fn flush_list(list: &mut Option<(ListKind, Vec<Node>)>, blocks: &mut Vec<Node>) {
    if let Some((kind, children)) = list.take() {
        blocks.push(Node::List { kind, children });
    }
}

fn push_list_item(
    list: &mut Option<(ListKind, Vec<Node>)>,
    blocks: &mut Vec<Node>,
    kind: ListKind,
    item: &str,
) {
    match list {
        Some((current, items)) if *current == kind => items.push(Node::list_item(item)),
        _ => {
            flush_list(list, blocks);
            *list = Some((kind, vec![Node::list_item(item)]));
        }
    }
}

/// Parse a `# heading` line into its level and text
fn heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    line[hashes..]
        .strip_prefix(' ')
        .map(|rest| (hashes as u8, rest.trim_start()))
}

fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim_start)
}

fn ordered_item(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix(". ").map(str::trim_start)
}
