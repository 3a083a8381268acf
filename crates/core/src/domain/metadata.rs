//! Show metadata parser
//!
//! VENUE 4.x puts the product name and the version in adjacent header
//! cells ("Avid VENUE" | "VENUE 4.5.3"), which are taken as recorded.
//! D-Show 3.x writes them as a single heading ("Avid VENUE D-Show 3.1.1"),
//! split on the trailing `<line> <number>` pair.

use crate::domain::config::MetadataQueries;
use crate::domain::document::{first_text, Document};
use crate::domain::venue::{ParseError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

static IDENTIFICATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<console>.*?)\s*(?P<version>\S+ \d+(?:\.\d+)+\S*)$")
        .expect("identification pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Metadata {
    pub console: String,
    pub version: String,
    pub show: String,
}

/// Split "Avid VENUE VENUE 4.5.3" into ("Avid VENUE", "VENUE 4.5.3")
fn split_identification(ident: &str) -> Result<(String, String)> {
    let caps = IDENTIFICATION
        .captures(ident)
        .ok_or_else(|| ParseError::missing("version"))?;
    let console = caps["console"].to_string();
    if console.is_empty() {
        return Err(ParseError::missing("console"));
    }
    Ok((console, caps["version"].to_string()))
}

fn strip_label<'a>(text: &'a str, labels: &[String]) -> &'a str {
    labels
        .iter()
        .find_map(|label| text.strip_prefix(label.as_str()))
        .map(str::trim_start)
        .unwrap_or(text)
}

#[instrument(skip_all)]
pub(crate) fn parse_metadata<D: Document>(doc: &D, queries: &MetadataQueries) -> Result<Metadata> {
    let root = doc.root();

    let ident =
        first_text(doc, root, &queries.console)?.ok_or_else(|| ParseError::missing("console"))?;
    let (console, version) = match first_text(doc, root, &queries.version)? {
        Some(version) => (ident, version),
        None => split_identification(&ident)?,
    };
    debug!(%console, %version, "Console identified");

    let show = first_text(doc, root, &queries.show)?.unwrap_or_default();
    let show = strip_label(&show, &queries.show_labels).to_string();
    if show.is_empty() {
        return Err(ParseError::missing("show"));
    }
    debug!(%show, "Show path found");

    Ok(Metadata {
        console,
        version,
        show,
    })
}
