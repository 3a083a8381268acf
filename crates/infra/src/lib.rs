//! Document loading for VENUE reports
//!
//! Provides the tree and query engine the core parsers run against:
//! - A lenient HTML loader built on quick-xml
//! - An XPath-like path expression engine over the loaded tree

pub mod html;

pub use html::{HtmlDocument, LoadError, NodeId};
