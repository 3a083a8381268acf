//! Domain entities and extraction rules

pub mod channel;
pub mod config;
pub mod device;
pub mod discovery;
pub mod document;
pub mod hardware;
mod metadata;
pub mod venue;

// Re-export specific items to avoid ambiguous glob imports
pub use channel::{clean_name, Channel};
pub use config::{ConfigError, DeviceQueries, ExtractorConfig, MetadataQueries};
pub use device::{ChannelTable, Device, DeviceRegistry};
pub use discovery::discover_devices;
pub use document::{normalize_ws, Document, QueryError};
pub use hardware::Hardware;
pub use venue::{ParseError, Venue};
