//! I/O hardware classes

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static STAGE_BOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Stage\s+\d+$").expect("stage box pattern"));

/// Physical or logical class of an I/O device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hardware {
    /// Remote stage rack ("Stage 1", "Stage 2", …)
    StageBox,
    /// Console surface or engine I/O
    Local,
    /// Pro Tools recording interface
    ProTools,
}

impl Hardware {
    pub const ALL: [Hardware; 3] = [Hardware::StageBox, Hardware::Local, Hardware::ProTools];

    /// Classify a device by its report name
    pub fn classify(name: &str) -> Option<Self> {
        if STAGE_BOX.is_match(name) {
            return Some(Hardware::StageBox);
        }
        match name {
            "Console" | "Local" | "Engine" => Some(Hardware::Local),
            _ if name.contains("Pro Tools") => Some(Hardware::ProTools),
            _ => None,
        }
    }

    /// Stable external encoding
    pub fn ordinal(self) -> u8 {
        match self {
            Hardware::StageBox => 0,
            Hardware::Local => 1,
            Hardware::ProTools => 2,
        }
    }
}

impl TryFrom<u8> for Hardware {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Hardware::ALL
            .into_iter()
            .find(|hw| hw.ordinal() == value)
            .ok_or(value)
    }
}

impl fmt::Display for Hardware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hardware::StageBox => "StageBox",
            Hardware::Local => "Local",
            Hardware::ProTools => "ProTools",
        };
        f.pad(name)
    }
}
