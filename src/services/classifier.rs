use crate::models::operation::{
    strip_compressible, ARCHIVE_EXTENSION, BUNDLE_EXTENSION, NAME_PLACEHOLDER, ONLY_SUFFIX,
    SCRIPT_EXTENSION,
};
use crate::models::{ClassifiedEntry, Operation};
use crate::services::resolver::DirectoryOverrides;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use std::io;
use thiserror::Error;

/// Errors collected while classifying dropped paths
///
/// None of these stop classification; they are gathered and reported together.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("{0} not found")]
    NotFound(Utf8PathBuf),

    #[error("{0} is not named like a Python file, ESD, or talk ESD BND")]
    Unrecognized(Utf8PathBuf),

    #[error("Can't pack {dir}: No ESD files for {prefix} found in {parent} directory")]
    NoBundleMatch {
        dir: Utf8PathBuf,
        prefix: String,
        parent: String,
    },

    #[error("Can't pack {dir}: Multiple ESD files matching {prefix} found in {parent} directory")]
    MultipleBundleMatches {
        dir: Utf8PathBuf,
        prefix: String,
        parent: String,
        matches: Vec<Utf8PathBuf>,
    },

    #[error("Can't pack {0}: directory has no parent")]
    NoParent(Utf8PathBuf),

    #[error("Can't read {path}: {reason}")]
    ScanFailed { path: Utf8PathBuf, reason: String },
}

impl ClassifyError {
    /// The dropped path this error refers to
    pub fn path(&self) -> &Utf8Path {
        match self {
            ClassifyError::NotFound(path)
            | ClassifyError::Unrecognized(path)
            | ClassifyError::NoParent(path) => path,
            ClassifyError::NoBundleMatch { dir, .. }
            | ClassifyError::MultipleBundleMatches { dir, .. } => dir,
            ClassifyError::ScanFailed { path, .. } => path,
        }
    }
}

/// Maps one dropped file or directory to a converter operation.
///
/// Borrowing the resolved [`DirectoryOverrides`] keeps classification pure
/// apart from reading the filesystem.
pub struct PathClassifier<'a> {
    overrides: &'a DirectoryOverrides,
}

impl<'a> PathClassifier<'a> {
    pub fn new(overrides: &'a DirectoryOverrides) -> Self {
        Self { overrides }
    }

    /// Classify a single path.
    ///
    /// Relative paths are resolved against the current directory first and
    /// `..` components are folded away, so every input and output in the
    /// entry is absolute and normalized.
    pub fn classify(&self, path: &Utf8Path) -> Result<ClassifiedEntry, ClassifyError> {
        let path = absolutize(path);

        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => self.classify_directory(&path),
            Ok(meta) if meta.is_file() => self.classify_file(&path),
            Ok(_) => Err(ClassifyError::Unrecognized(path)),
            Err(_) => Err(ClassifyError::NotFound(path)),
        }
    }

    fn classify_directory(&self, dir: &Utf8Path) -> Result<ClassifiedEntry, ClassifyError> {
        let parent = dir
            .parent()
            .ok_or_else(|| ClassifyError::NoParent(dir.to_path_buf()))?;
        let scripts = list_files(dir, |name| {
            name.to_ascii_lowercase().ends_with(SCRIPT_EXTENSION)
        })?;

        let name = dir.file_name().unwrap_or_default();
        let Some(prefix) = name.strip_suffix(ONLY_SUFFIX) else {
            // A parent without any bundles yet is fine; the converter creates one
            return Ok(ClassifiedEntry::new(Operation::WriteBnd, parent.as_str(), scripts));
        };

        let bundle_name = bundle_name_pattern(prefix).map_err(|e| ClassifyError::ScanFailed {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut matches = list_files(parent, |name| bundle_name.is_match(name))?;
        let parent_name = parent.file_name().unwrap_or(parent.as_str()).to_string();

        match matches.len() {
            0 => Err(ClassifyError::NoBundleMatch {
                dir: dir.to_path_buf(),
                prefix: prefix.to_string(),
                parent: parent_name,
            }),
            1 => {
                let bundle = matches.remove(0);
                Ok(ClassifiedEntry::new(Operation::WriteBndFile, bundle.as_str(), scripts))
            }
            _ => Err(ClassifyError::MultipleBundleMatches {
                dir: dir.to_path_buf(),
                prefix: prefix.to_string(),
                parent: parent_name,
                matches,
            }),
        }
    }

    fn classify_file(&self, file: &Utf8Path) -> Result<ClassifiedEntry, ClassifyError> {
        let (Some(dir), Some(name)) = (file.parent(), file.file_name()) else {
            return Err(ClassifyError::Unrecognized(file.to_path_buf()));
        };
        let inputs = vec![file.to_path_buf()];

        if name.ends_with(SCRIPT_EXTENSION) {
            let output = dir.join(format!("{NAME_PLACEHOLDER}{ARCHIVE_EXTENSION}"));
            Ok(ClassifiedEntry::new(Operation::WriteLoose, output.as_str(), inputs))
        } else if strip_compressible(name, ARCHIVE_EXTENSION).is_some() {
            let output = dir.join(format!("{NAME_PLACEHOLDER}{SCRIPT_EXTENSION}"));
            Ok(ClassifiedEntry::new(Operation::WritePy, output.as_str(), inputs))
        } else if let Some(base) = strip_compressible(name, BUNDLE_EXTENSION) {
            let subdir = match self.overrides.get(dir) {
                Some(shared) => shared.to_string(),
                None => format!("{base}{ONLY_SUFFIX}"),
            };
            let output = dir
                .join(subdir)
                .join(format!("{NAME_PLACEHOLDER}{SCRIPT_EXTENSION}"));
            Ok(ClassifiedEntry::new(Operation::WritePy, output.as_str(), inputs))
        } else {
            Err(ClassifyError::Unrecognized(file.to_path_buf()))
        }
    }
}

/// Resolve a path against the current directory and fold `.` and `..`
/// components lexically, without touching symlinks.
pub(crate) fn absolutize(path: &Utf8Path) -> Utf8PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::path::absolute(path)
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .unwrap_or_else(|| path.to_path_buf())
    };
    normalize(&absolute)
}

fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalized = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            // Popping the root is a no-op, so `/..` stays `/`
            Utf8Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_str()),
        }
    }
    normalized
}

/// Bundle files belonging to a `-only` directory: `<prefix>.*esdbnd[.dcx]`
///
/// Case-insensitive, like a directory search on Windows.
fn bundle_name_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)^{}\..*esdbnd(\.dcx)?$", regex::escape(prefix)))
}

/// List regular files directly inside `dir` whose names pass `filter`, sorted by name.
fn list_files(
    dir: &Utf8Path,
    filter: impl Fn(&str) -> bool,
) -> Result<Vec<Utf8PathBuf>, ClassifyError> {
    let scan_failed = |reason: String| ClassifyError::ScanFailed {
        path: dir.to_path_buf(),
        reason,
    };

    let mut files = Vec::new();
    for entry in dir.read_dir_utf8().map_err(|e| scan_failed(e.to_string()))? {
        let entry = match entry {
            Ok(entry) => entry,
            // Non UTF-8 names can't be passed to the converter anyway
            Err(e) if e.kind() == io::ErrorKind::InvalidData => continue,
            Err(e) => return Err(scan_failed(e.to_string())),
        };
        if entry.path().is_file() && filter(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    tracing::debug!("Listed {} matching files in {}", files.len(), dir);
    Ok(files)
}
