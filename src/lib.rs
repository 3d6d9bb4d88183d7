//! filter-cam library crate.
//!
//! Live webcam viewer with switchable image filters. The binary wires these
//! modules together; they are public for integration testing.

pub mod camera;
pub mod cli;
pub mod config;
pub mod display;
pub mod filters;
pub mod input;
pub mod overlay;
pub mod terminal;
pub mod viewer;
