// esddrop - Drag-and-drop option builder for the ESD talk script converter
//
// This is the library crate containing path classification, grouping and
// argument synthesis. The binary crate (main.rs) provides the console entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, SetupPrompt};
pub use models::{ClassifiedEntry, Operation, OperationKey, OptionsConfig};
pub use services::{build_options, OverridePrompt, Synthesis};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
