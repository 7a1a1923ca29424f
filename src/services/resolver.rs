use crate::models::operation::{strip_compressible, BUNDLE_EXTENSION};
use crate::services::classifier::absolutize;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use thiserror::Error;

/// How many bundles were dropped from one directory.
///
/// Only affects how the question is phrased to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleRequest {
    /// One bundle: offer to merge it into a shared directory
    Single,
    /// Several bundles: offer one shared directory or per-bundle defaults
    Multiple,
}

/// Interactive collaborator consulted while building options.
///
/// Implemented by the console front end; tests use scripted fakes.
#[cfg_attr(test, mockall::automock)]
pub trait OverridePrompt {
    /// Ask for a shared output directory name for the bundles in `directory`.
    ///
    /// Returns the raw answer, or `None` once input is exhausted.
    fn request_directory_override(
        &mut self,
        directory: &Utf8Path,
        candidates: &[Utf8PathBuf],
        request: BundleRequest,
    ) -> Option<String>;

    /// Show a batch of error messages.
    fn report_errors(&mut self, messages: &[String]);
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid directory name \"{0}\"")]
pub struct InvalidDirectoryName(pub String);

/// Characters rejected in a single path component.
///
/// This is the Windows set, which is a superset of what Unix rejects.
const INVALID_NAME_CHARS: &[char] = &['"', '<', '>', '|', ':', '*', '?', '\\', '/'];

/// Check that `name` can be used as one directory name.
pub fn validate_directory_name(name: &str) -> Result<(), InvalidDirectoryName> {
    let invalid = name
        .chars()
        .any(|ch| (ch.is_ascii_control() && ch != '\u{7f}') || INVALID_NAME_CHARS.contains(&ch));
    if invalid {
        Err(InvalidDirectoryName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Shared decompile directories chosen per source directory.
///
/// Entries are only ever added: the first answer for a directory wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryOverrides {
    targets: IndexMap<Utf8PathBuf, String>,
}

impl DirectoryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, directory: &Utf8Path) -> Option<&str> {
        self.targets.get(directory).map(String::as_str)
    }

    /// Record `name` for `directory` unless one is already recorded.
    ///
    /// Returns whether the entry was added.
    pub fn insert_if_absent(&mut self, directory: &Utf8Path, name: impl Into<String>) -> bool {
        if self.targets.contains_key(directory) {
            return false;
        }
        self.targets.insert(directory.to_path_buf(), name.into());
        true
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Group the dropped bundle files by the directory holding them.
///
/// Directories keep the order in which their first bundle was dropped.
/// Paths that are not existing files are skipped; classification reports them.
pub fn bundles_by_directory(paths: &[Utf8PathBuf]) -> IndexMap<Utf8PathBuf, Vec<Utf8PathBuf>> {
    let mut groups: IndexMap<Utf8PathBuf, Vec<Utf8PathBuf>> = IndexMap::new();

    for path in paths {
        let path = absolutize(path);
        if !path.is_file() {
            continue;
        }
        let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
            continue;
        };
        if strip_compressible(name, BUNDLE_EXTENSION).is_none() {
            continue;
        }
        groups.entry(dir.to_path_buf()).or_default().push(path.clone());
    }

    groups
}

/// Ask once per directory for a shared decompile directory.
///
/// Returns `None` when the prompt runs out of input, which aborts the whole
/// run. Invalid names are reported and asked again.
pub fn resolve_overrides(
    paths: &[Utf8PathBuf],
    prompt: &mut dyn OverridePrompt,
) -> Option<DirectoryOverrides> {
    let mut overrides = DirectoryOverrides::new();

    for (directory, candidates) in bundles_by_directory(paths) {
        let request = if candidates.len() == 1 {
            BundleRequest::Single
        } else {
            BundleRequest::Multiple
        };

        loop {
            let answer = prompt.request_directory_override(&directory, &candidates, request)?;
            let answer = answer.trim();
            if answer.is_empty() {
                tracing::debug!("No shared directory for {}, using per-bundle defaults", directory);
                break;
            }
            match validate_directory_name(answer) {
                Ok(()) => {
                    tracing::info!("Bundles in {} decompile to {}", directory, answer);
                    overrides.insert_if_absent(&directory, answer);
                    break;
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    prompt.report_errors(&[e.to_string()]);
                }
            }
        }
    }

    Some(overrides)
}
