//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Path resolution for the data documents, settings and audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
