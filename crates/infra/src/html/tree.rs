//! Arena-backed HTML tree

use super::loader;
use super::query::Path;
use venue_core::domain::document::{Document, QueryError};

/// Index of a node in its [`HtmlDocument`]
///
/// Nodes are allocated in document order, so ordering ids orders nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Root,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A loaded HTML document
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    nodes: Vec<NodeData>,
}

impl HtmlDocument {
    /// Parse an HTML export
    pub fn parse(html: &str) -> loader::Result<Self> {
        loader::build(html)
    }

    pub(crate) fn empty() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0]
    }

    /// Number of nodes, root and text nodes included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Lower-cased tag name, `None` for the root and text nodes
    pub fn name(&self, node: NodeId) -> Option<&str> {
        match &self.data(node).kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attr(&self, node: NodeId, key: &str) -> Option<&str> {
        match &self.data(node).kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).parent
    }

    /// Element children in document order
    pub fn child_elements(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.data(node)
            .children
            .iter()
            .copied()
            .filter(move |&c| self.name(c).is_some())
    }

    /// `node` followed by all of its descendant elements, in document order
    pub(crate) fn self_and_descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.child_elements(n).collect::<Vec<_>>().into_iter().rev());
        }
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.data(node).kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { name, .. } if name == "br" => out.push(' '),
            _ => {
                for &child in &self.data(node).children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

impl Document for HtmlDocument {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn select(&self, context: NodeId, expression: &str) -> Result<Vec<NodeId>, QueryError> {
        let path = Path::parse(expression)?;
        Ok(path.evaluate(self, context))
    }

    fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }
}
