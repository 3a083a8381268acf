//! Document query abstraction
//!
//! The parsers never look at HTML directly. They go through [`Document`],
//! which only has to resolve path expressions and hand back node text.
//! The HTML implementation lives in the `infra` crate.

use std::fmt;
use thiserror::Error;

/// A path expression that could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid query `{expression}`: {message}")]
pub struct QueryError {
    pub expression: String,
    pub message: String,
}

impl QueryError {
    pub fn new(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            message: message.into(),
        }
    }
}

/// Navigable, already-loaded document tree
///
/// Implementations must return nodes in document order without duplicates.
/// Absolute expressions (`/…`, `//…`) start at the root whatever the context.
pub trait Document {
    type Node: Copy + fmt::Debug;

    /// Root of the tree
    fn root(&self) -> Self::Node;

    /// Evaluate `expression` relative to `context`
    fn select(&self, context: Self::Node, expression: &str)
        -> Result<Vec<Self::Node>, QueryError>;

    /// Concatenated descendant text, entities decoded, whitespace untouched
    fn text(&self, node: Self::Node) -> String;
}

/// Collapse whitespace runs (U+00A0 included) to one space and trim
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}

/// Nodes matched by the first candidate expression that matches anything
pub(crate) fn select_first<D: Document>(
    doc: &D,
    context: D::Node,
    candidates: &[String],
) -> Result<Vec<D::Node>, QueryError> {
    for expression in candidates {
        let nodes = doc.select(context, expression)?;
        if !nodes.is_empty() {
            return Ok(nodes);
        }
    }
    Ok(Vec::new())
}

/// Normalized text of the first candidate match whose text is non-empty
pub(crate) fn first_text<D: Document>(
    doc: &D,
    context: D::Node,
    candidates: &[String],
) -> Result<Option<String>, QueryError> {
    for expression in candidates {
        for node in doc.select(context, expression)? {
            let text = normalize_ws(&doc.text(node));
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }
    }
    Ok(None)
}
