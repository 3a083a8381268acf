//! Channel labels and stereo-pair normalization

use serde::{Deserialize, Serialize};

const PAIR_SEPARATOR: &str = ", ";
const LEFT_SUFFIX: &str = "-L";
const RIGHT_SUFFIX: &str = "-R";

/// Canonical display name of a raw channel label
///
/// A linked stereo pair is exported as `"Name-L, Name-R"`; that collapses to
/// `"Name"`. Anything else, including comma lists without the exact
/// `-L`/`-R` markers, is returned as-is.
pub fn clean_name(raw: &str) -> &str {
    let Some((left, right)) = raw.split_once(PAIR_SEPARATOR) else {
        return raw;
    };
    if right.contains(PAIR_SEPARATOR) {
        return raw;
    }
    match (left.strip_suffix(LEFT_SUFFIX), right.strip_suffix(RIGHT_SUFFIX)) {
        (Some(base), Some(other)) if !base.is_empty() && base == other => base,
        _ => raw,
    }
}

/// A channel row of a device table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    name: String,
}

impl Channel {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    /// Label as written in the report
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clean_name(&self) -> &str {
        clean_name(&self.name)
    }
}
