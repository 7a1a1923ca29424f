//! Data models for esddrop.
//!
//! - [`OptionsConfig`]: Drag-and-drop options loaded from `esdtoolconfig.json`
//! - [`Operation`]: Converter operations (`-writebnd`, `-writepy`, ...)
//! - [`ClassifiedEntry`] / [`OperationKey`]: One classified path and the group it belongs to
//!
//! The file naming constants (`.py`, `.esd`, `.talkesdbnd`, `.dcx`, `-only`, `%e`)
//! live in [`operation`] and are shared by the classifier and resolver.

pub mod config;
pub mod operation;

pub use config::OptionsConfig;
pub use operation::{ClassifiedEntry, Operation, OperationKey};
