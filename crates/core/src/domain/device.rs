//! Connected I/O devices

use crate::domain::channel::Channel;
use crate::domain::hardware::Hardware;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Devices of one report, keyed by display name
pub type DeviceRegistry = BTreeMap<String, Device>;

/// Which side of a device a channel table describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelTable {
    Inputs,
    Outputs,
}

impl fmt::Display for ChannelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelTable::Inputs => f.write_str("inputs"),
            ChannelTable::Outputs => f.write_str("outputs"),
        }
    }
}

/// An I/O device as listed in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    name: String,
    hardware: Hardware,
    inputs: Vec<Channel>,
    outputs: Vec<Channel>,
}

impl Device {
    pub fn new(name: String, hardware: Hardware, inputs: Vec<Channel>, outputs: Vec<Channel>) -> Self {
        Self {
            name,
            hardware,
            inputs,
            outputs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hardware(&self) -> Hardware {
        self.hardware
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn inputs(&self) -> &[Channel] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Channel] {
        &self.outputs
    }

    pub fn channels(&self, table: ChannelTable) -> &[Channel] {
        match table {
            ChannelTable::Inputs => &self.inputs,
            ChannelTable::Outputs => &self.outputs,
        }
    }
}
