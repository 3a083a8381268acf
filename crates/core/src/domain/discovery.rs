//! Device discovery
//!
//! Walks the device blocks of a report, classifies each device by name and
//! reads its input and output tables. Either every block parses or the
//! whole document is rejected.

use crate::domain::channel::Channel;
use crate::domain::config::DeviceQueries;
use crate::domain::device::{ChannelTable, Device, DeviceRegistry};
use crate::domain::document::{first_text, normalize_ws, select_first, Document};
use crate::domain::hardware::Hardware;
use crate::domain::venue::{ParseError, Result};
use std::collections::btree_map::Entry;
use tracing::{debug, info, instrument, warn};

/// Build the device registry of `doc`
///
/// Does not touch any [`Venue`](crate::domain::venue::Venue); callers attach
/// the result themselves.
#[instrument(skip_all)]
pub fn discover_devices<D: Document>(doc: &D, queries: &DeviceQueries) -> Result<DeviceRegistry> {
    let blocks = select_first(doc, doc.root(), &queries.blocks)?;
    if blocks.is_empty() {
        warn!("No device blocks found");
    }

    let mut registry = DeviceRegistry::new();
    for (index, block) in blocks.into_iter().enumerate() {
        let device = read_block(doc, block, index + 1, queries)?;
        match registry.entry(device.name().to_string()) {
            Entry::Occupied(entry) => {
                return Err(ParseError::DuplicateDevice {
                    device: entry.key().clone(),
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(device);
            }
        }
    }

    info!(count = registry.len(), "Devices discovered");
    Ok(registry)
}

fn read_block<D: Document>(
    doc: &D,
    block: D::Node,
    position: usize,
    queries: &DeviceQueries,
) -> Result<Device> {
    let name = first_text(doc, block, &queries.name)?
        .ok_or_else(|| ParseError::missing(format!("device name (block {position})")))?;

    let hardware = Hardware::classify(&name).ok_or_else(|| ParseError::UnknownDeviceType {
        device: name.clone(),
    })?;

    let inputs = read_table(doc, block, &name, ChannelTable::Inputs, queries)?;
    let outputs = read_table(doc, block, &name, ChannelTable::Outputs, queries)?;

    debug!(
        device = %name,
        %hardware,
        inputs = inputs.len(),
        outputs = outputs.len(),
        "Device found"
    );
    Ok(Device::new(name, hardware, inputs, outputs))
}

fn read_table<D: Document>(
    doc: &D,
    block: D::Node,
    device: &str,
    table: ChannelTable,
    queries: &DeviceQueries,
) -> Result<Vec<Channel>> {
    let candidates = match table {
        ChannelTable::Inputs => &queries.inputs,
        ChannelTable::Outputs => &queries.outputs,
    };
    // No table at all is a device without channels on that side.
    let Some(&node) = select_first(doc, block, candidates)?.first() else {
        return Ok(Vec::new());
    };

    let malformed = |reason: String| ParseError::MalformedTable {
        device: device.to_string(),
        table,
        reason,
    };

    let rows = doc.select(node, &queries.rows)?;
    let mut channels = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let Some(&cell) = doc.select(row, &queries.index_cell)?.first() else {
            return Err(malformed(format!("row {} has no channel number", i + 1)));
        };
        let index = normalize_ws(&doc.text(cell));
        match index.parse::<u32>() {
            Ok(n) if n > 0 => {}
            _ => {
                return Err(malformed(format!(
                    "row {} has channel number {index:?}",
                    i + 1
                )))
            }
        }

        let name = match doc.select(row, &queries.name_cell)?.first() {
            Some(&cell) => normalize_ws(&doc.text(cell)),
            None => String::new(),
        };
        channels.push(Channel::new(name));
    }
    Ok(channels)
}
