//! Lenient HTML to tree loader
//!
//! quick-xml does the tokenizing with every well-formedness check it allows
//! switched off. The HTML-specific bits (void elements, implied cell and row
//! ends, entities) are handled here while building the tree.

use super::tree::{HtmlDocument, NodeId, NodeKind};
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur while loading a report
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTML error at byte {position}: {source}")]
    Html {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is not part of the text model
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn resolve_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        "nbsp" => Some("\u{a0}"),
        "copy" => Some("\u{a9}"),
        "reg" => Some("\u{ae}"),
        "deg" => Some("\u{b0}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        _ => None,
    }
}

/// Longest reference considered, `&` and `;` included
const MAX_REFERENCE_LEN: usize = 32;

/// Decode entity references one at a time; a bare `&` or an unknown
/// reference stays as written without affecting its neighbours
fn decode_text(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    let mut out = String::with_capacity(raw.len());
    let mut rest: &str = &raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let reference = rest
            .char_indices()
            .take(MAX_REFERENCE_LEN)
            .skip(1)
            .take_while(|&(_, c)| c == '#' || c.is_ascii_alphanumeric() || c == ';')
            .find(|&(_, c)| c == ';')
            .map(|(end, _)| &rest[..=end]);
        let decoded = reference.and_then(|r| unescape_with(r, resolve_entity).ok());
        match (reference, decoded) {
            (Some(reference), Some(decoded)) => {
                out.push_str(&decoded);
                rest = &rest[reference.len()..];
            }
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn lowercase_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_ascii_lowercase()
}

fn element(start: &BytesStart<'_>) -> (String, NodeKind) {
    let name = lowercase_name(start.name().as_ref());
    let attrs = start
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = lowercase_name(attr.key.as_ref());
            let value = decode_text(&attr.value);
            (key, value)
        })
        .collect();
    (name.clone(), NodeKind::Element { name, attrs })
}

/// Open-element stack; index 0 is always the document root
struct OpenElements<'a> {
    doc: &'a mut HtmlDocument,
    stack: Vec<NodeId>,
    raw_text_depth: usize,
}

impl<'a> OpenElements<'a> {
    fn new(doc: &'a mut HtmlDocument) -> Self {
        let root = NodeId(0);
        Self {
            doc,
            stack: vec![root],
            raw_text_depth: 0,
        }
    }

    fn current(&self) -> NodeId {
        self.stack[self.stack.len() - 1]
    }

    /// Topmost open element named in `targets`, unless a `boundary` comes first
    fn find_open(&self, targets: &[&str], boundary: &[&str]) -> Option<usize> {
        for (idx, &node) in self.stack.iter().enumerate().skip(1).rev() {
            let name = self.doc.name(node).unwrap_or_default();
            if targets.contains(&name) {
                return Some(idx);
            }
            if boundary.contains(&name) {
                return None;
            }
        }
        None
    }

    fn close_from(&mut self, idx: usize) {
        for node in self.stack.drain(idx..) {
            if let Some(name) = self.doc.name(node) {
                if RAW_TEXT_ELEMENTS.contains(&name) {
                    self.raw_text_depth = self.raw_text_depth.saturating_sub(1);
                }
            }
        }
    }

    /// Close cells and rows left open by the export
    fn close_implied(&mut self, name: &str) {
        let implied = match name {
            "td" | "th" => self.find_open(&["td", "th"], &["tr", "table"]),
            "tr" => self.find_open(&["tr"], &["table"]),
            "thead" | "tbody" | "tfoot" => self.find_open(&["thead", "tbody", "tfoot"], &["table"]),
            _ => None,
        };
        if let Some(idx) = implied {
            trace!(tag = name, "Implied end tag");
            self.close_from(idx);
        }
    }

    fn open(&mut self, name: &str, kind: NodeKind) {
        self.close_implied(name);
        let parent = self.current();
        let node = self.doc.append(parent, kind);
        if VOID_ELEMENTS.contains(&name) {
            return;
        }
        if RAW_TEXT_ELEMENTS.contains(&name) {
            self.raw_text_depth += 1;
        }
        self.stack.push(node);
    }

    fn leaf(&mut self, kind: NodeKind) {
        let parent = self.current();
        self.doc.append(parent, kind);
    }

    fn close(&mut self, name: &str) {
        // Stray end tags are ignored.
        if let Some(idx) = self.find_open(&[name], &[]) {
            self.close_from(idx);
        }
    }

    fn text(&mut self, text: String) {
        if self.raw_text_depth == 0 && !text.is_empty() {
            let parent = self.current();
            self.doc.append(parent, NodeKind::Text(text));
        }
    }
}

pub(crate) fn build(html: &str) -> Result<HtmlDocument> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.check_comments = false;
    config.trim_text(false);

    let mut doc = HtmlDocument::empty();
    let mut open = OpenElements::new(&mut doc);

    loop {
        let event = reader.read_event().map_err(|source| LoadError::Html {
            position: reader.buffer_position() as u64,
            source,
        })?;
        match event {
            Event::Start(ref e) => {
                let (name, kind) = element(e);
                open.open(&name, kind);
            }
            Event::Empty(ref e) => {
                let (name, kind) = element(e);
                open.close_implied(&name);
                open.leaf(kind);
            }
            Event::End(ref e) => {
                open.close(&lowercase_name(e.name().as_ref()));
            }
            Event::Text(ref e) => open.text(decode_text(e)),
            Event::CData(ref e) => open.text(String::from_utf8_lossy(e).into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(nodes = doc.len(), "HTML document loaded");
    Ok(doc)
}
