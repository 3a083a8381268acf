//! Extraction core for VENUE console reports
//!
//! Recovers show metadata, connected I/O hardware and channel names from the
//! Patch List and System Info exports. Tree building lives in `venue-infra`;
//! this crate only needs something implementing [`domain::Document`].

pub mod domain;

pub use domain::{
    clean_name, Channel, ChannelTable, Device, DeviceRegistry, Document, ExtractorConfig,
    Hardware, ParseError, QueryError, Venue,
};
