//! Pages that describe what can be scanned: the track index and the
//! component catalog.

pub mod catalog;
pub mod tracks;

pub use catalog::{parse_component_catalog, ComponentCatalog, CATALOG_TABLE_ID};
pub use tracks::{default_selection, discover_tracks, DiscoveryRules};
