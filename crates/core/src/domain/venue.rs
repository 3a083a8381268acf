//! Venue aggregate and parse errors

use crate::domain::config::ExtractorConfig;
use crate::domain::device::{ChannelTable, DeviceRegistry};
use crate::domain::discovery::discover_devices;
use crate::domain::document::{Document, QueryError};
use crate::domain::metadata::{parse_metadata, Metadata};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

/// Errors raised while extracting data from a report
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required metadata node is absent or its text is empty
    #[error("Missing field: {field}")]
    MissingField { field: String },

    /// A device's channel table cannot be counted
    #[error("Malformed {table} table for device {device:?}: {reason}")]
    MalformedTable {
        device: String,
        table: ChannelTable,
        reason: String,
    },

    /// The device name matches none of the known hardware classes
    #[error("Unknown device type for {device:?}")]
    UnknownDeviceType { device: String },

    /// Two device blocks carry the same name
    #[error("Duplicate device {device:?}")]
    DuplicateDevice { device: String },

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ParseError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ParseError::MissingField {
            field: field.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Show metadata plus the devices of one report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    console: String,
    version: String,
    show: String,
    devices: DeviceRegistry,
}

impl Venue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse metadata and devices in one go
    #[instrument(skip_all)]
    pub fn from_document<D: Document>(doc: &D, config: &ExtractorConfig) -> Result<Self> {
        let mut venue = Self::new();
        venue.parse_metadata(doc, config)?;
        venue.attach_devices(discover_devices(doc, &config.devices)?);
        info!(
            console = %venue.console,
            version = %venue.version,
            devices = venue.devices.len(),
            "Report parsed"
        );
        Ok(venue)
    }

    /// Fill console, version and show from `doc`
    ///
    /// Nothing is overwritten unless all three fields were found.
    pub fn parse_metadata<D: Document>(&mut self, doc: &D, config: &ExtractorConfig) -> Result<()> {
        let Metadata {
            console,
            version,
            show,
        } = parse_metadata(doc, &config.metadata)?;
        self.console = console;
        self.version = version;
        self.show = show;
        Ok(())
    }

    /// Replace the device registry
    pub fn attach_devices(&mut self, devices: DeviceRegistry) {
        self.devices = devices;
    }

    /// Console product name, e.g. "Avid VENUE"
    pub fn console(&self) -> &str {
        &self.console
    }

    /// Software version, e.g. "VENUE 4.5.3"
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Show path as recorded by the console, backslashes included
    pub fn show(&self) -> &str {
        &self.show
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }
}
