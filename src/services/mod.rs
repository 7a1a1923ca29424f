//! Services module - Option inference for drag-and-drop converter runs.
//!
//! Everything here is free of console I/O: the only interactive step goes
//! through the injected [`OverridePrompt`], so the whole pass can be driven
//! by a scripted fake in tests.
//!
//! # Components
//!
//! - [`tokenize`]: Splits the free-form `other_options` string into arguments
//! - [`PathClassifier`]: Maps one dropped file or directory to an [`Operation`](crate::models::Operation)
//!   and an output path or `%e` template
//! - [`resolve_overrides`]: Asks once per directory of dropped bundles for a shared
//!   decompile directory ([`DirectoryOverrides`])
//! - [`OperationAggregator`]: Groups classified paths by `(operation, output)` in first-seen order
//! - [`synthesize`]: Renders config flags and `-i <inputs> -<operation> <output>` groups
//! - [`build_options`]: Runs all of the above for one batch
//!
//! # Usage Example
//!
//! ```ignore
//! use esddrop::services::{build_options, Synthesis};
//!
//! match build_options(&config, &paths, &mut prompt) {
//!     Synthesis::Ready(args) => run_converter(&args),
//!     Synthesis::Rejected(_) => std::process::exit(1),
//!     Synthesis::Aborted => {}
//! }
//! ```

pub mod aggregator;
pub mod classifier;
pub mod pipeline;
pub mod resolver;
pub mod synthesis;
pub mod tokenizer;

pub use aggregator::OperationAggregator;
pub use classifier::{ClassifyError, PathClassifier};
pub use pipeline::{build_options, Synthesis};
pub use resolver::{
    bundles_by_directory, resolve_overrides, validate_directory_name, BundleRequest,
    DirectoryOverrides, InvalidDirectoryName, OverridePrompt,
};
pub use synthesis::{config_arguments, synthesize};
pub use tokenizer::tokenize;
