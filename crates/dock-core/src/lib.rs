// ABOUTME: Shared types and configuration for panel-dock.
// ABOUTME: Defines regions, pixel sizes, settings, and layout persistence.

pub mod config;
pub mod record;
pub mod region;
pub mod store;

pub use config::{ConfigError, DockConfig};
pub use record::{LayoutRecord, PersistError};
pub use region::{Axis, Pixels, Region, RegionName, RegionSizes, UnknownRegion};
pub use store::{FileStore, LayoutStore, MemoryStore, StoreError};
