//! Core module - configuration, logging and CSV loading around the kit model

pub mod config;
pub mod loader;
pub mod logging;

pub use config::Config;
pub use loader::{load_kit, load_kit_from_path, LoadError, LoadOptions, LoadReport, RowError};
