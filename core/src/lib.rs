//! Core site-catalog, map-geometry, and widget-state library for the Rust
//! GNSS plot client.
//!
//! The modules mirror the page widgets of the legacy GeoNet web front end
//! while providing typed records and explicit state machines in place of
//! ambient globals and DOM attributes.

pub mod applink;
pub mod catalog;
pub mod map;
pub mod plot;
pub mod prelude;
pub mod search;
pub mod telemetry;

pub use prelude::{WidgetError, WidgetResult};
