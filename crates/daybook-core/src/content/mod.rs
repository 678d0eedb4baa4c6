//! Journal body content: the document model, its stored encoding, and
//! the HTML projection used for previews.

pub mod html;
pub mod legacy;
pub mod node;
pub mod stored;

pub use html::{project_to_html, EMPTY_CONTENT_HTML};
pub use node::{Document, ListKind, Node};
pub use stored::{classify, deserialize, serialize, Generation, StoredDocument, FORMAT_VERSION};
