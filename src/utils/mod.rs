//! Utility functions shared by the CLI, loader and interactive view.
//!
//! - [`app_data`] - Configuration and application data directories
//! - [`progress`] - Spinner for long loads (no-op without the `progress` feature)
//! - [`timing`] - Elapsed-time logging for load steps

pub mod app_data;
pub mod progress;
pub mod timing;

pub use app_data::*;
pub use timing::timed;
