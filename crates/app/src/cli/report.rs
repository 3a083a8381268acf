//! Output formatting

use serde::Serialize;
use std::path::Path;
use venue_core::{Device, Hardware, Venue};

/// One device line of the JSON output
#[derive(Debug, Serialize)]
pub struct DeviceSummary<'a> {
    pub name: &'a str,
    pub hardware: Hardware,
    pub inputs: usize,
    pub outputs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<&'a str>>,
}

/// JSON output for one report
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub file: String,
    pub console: &'a str,
    pub version: &'a str,
    pub show: &'a str,
    pub devices: Vec<DeviceSummary<'a>>,
}

impl<'a> Summary<'a> {
    pub fn new(path: &Path, venue: &'a Venue, with_channels: bool) -> Self {
        let devices = venue
            .devices()
            .values()
            .map(|device| DeviceSummary {
                name: device.name(),
                hardware: device.hardware(),
                inputs: device.num_inputs(),
                outputs: device.num_outputs(),
                channels: with_channels.then(|| clean_inputs(device)),
            })
            .collect();
        Self {
            file: path.display().to_string(),
            console: venue.console(),
            version: venue.version(),
            show: venue.show(),
            devices,
        }
    }
}

/// Input channel names with stereo pairs collapsed, blanks skipped
fn clean_inputs(device: &Device) -> Vec<&str> {
    device
        .inputs()
        .iter()
        .map(|ch| ch.clean_name())
        .filter(|name| !name.is_empty())
        .collect()
}

pub fn render_text(path: &Path, venue: &Venue, with_channels: bool) -> String {
    let mut lines = vec![
        path.display().to_string(),
        format!("  console: {}", venue.console()),
        format!("  version: {}", venue.version()),
        format!("  show:    {}", venue.show()),
    ];
    for device in venue.devices().values() {
        lines.push(format!(
            "  {:<12} {:<9} {:>3} in / {:>3} out",
            device.name(),
            device.hardware(),
            device.num_inputs(),
            device.num_outputs()
        ));
        if with_channels {
            lines.extend(clean_inputs(device).into_iter().map(|name| format!("      {name}")));
        }
    }
    lines.join("\n")
}
