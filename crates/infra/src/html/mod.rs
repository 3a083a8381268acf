//! HTML document tree and path queries
//!
//! Console exports are hand-formatted HTML: unclosed cells, upper-case tags,
//! unquoted attributes and `&nbsp;` everywhere. The loader is forgiving about
//! all of that; the query engine understands the XPath subset the extraction
//! profiles use.

pub mod loader;
pub mod query;
pub mod tree;

pub use loader::LoadError;
pub use query::Path;
pub use tree::{HtmlDocument, NodeId};
