use camino::Utf8PathBuf;
use std::fmt;

/// Decompiled talk script extension
pub const SCRIPT_EXTENSION: &str = ".py";

/// Compiled ESD extension
pub const ARCHIVE_EXTENSION: &str = ".esd";

/// Talk ESD bundle extension
pub const BUNDLE_EXTENSION: &str = ".talkesdbnd";

/// DCX compression suffix, appended after the archive or bundle extension
pub const COMPRESSED_SUFFIX: &str = ".dcx";

/// Suffix marking a script directory bound to a single bundle
pub const ONLY_SUFFIX: &str = "-only";

/// Output file name placeholder, expanded by the converter per input
pub const NAME_PLACEHOLDER: &str = "%e";

/// Converter operation selected for a group of inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Write scripts into one existing bundle
    WriteBndFile,
    /// Write scripts into every bundle in a directory that contains them
    WriteBnd,
    /// Compile scripts into loose ESD files
    WriteLoose,
    /// Decompile ESDs or bundles into scripts
    WritePy,
}

impl Operation {
    /// Flag name without the leading dash
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::WriteBndFile => "writebndfile",
            Operation::WriteBnd => "writebnd",
            Operation::WriteLoose => "writeloose",
            Operation::WritePy => "writepy",
        }
    }

    /// Flag as passed to the converter, e.g. `-writepy`
    pub fn flag(self) -> String {
        format!("-{}", self.as_str())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one aggregated converter invocation group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
    pub operation: Operation,
    /// Output path, or a template containing [`NAME_PLACEHOLDER`]
    pub output: String,
}

/// Result of classifying one dropped path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub operation: Operation,
    pub output: String,
    pub inputs: Vec<Utf8PathBuf>,
}

impl ClassifiedEntry {
    pub fn new(operation: Operation, output: impl Into<String>, inputs: Vec<Utf8PathBuf>) -> Self {
        Self {
            operation,
            output: output.into(),
            inputs,
        }
    }

    pub fn key(&self) -> OperationKey {
        OperationKey {
            operation: self.operation,
            output: self.output.clone(),
        }
    }
}

/// Strips an extension, accepting both the plain and the DCX-compressed form.
///
/// Returns the base name in front of the extension.
pub fn strip_compressible<'a>(name: &'a str, extension: &str) -> Option<&'a str> {
    let name = name.strip_suffix(COMPRESSED_SUFFIX).unwrap_or(name);
    name.strip_suffix(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_flags() {
        assert_eq!(Operation::WriteBndFile.flag(), "-writebndfile");
        assert_eq!(Operation::WriteBnd.flag(), "-writebnd");
        assert_eq!(Operation::WriteLoose.flag(), "-writeloose");
        assert_eq!(Operation::WritePy.to_string(), "writepy");
    }

    #[test]
    fn test_strip_compressible() {
        assert_eq!(strip_compressible("t400.esd", ARCHIVE_EXTENSION), Some("t400"));
        assert_eq!(strip_compressible("t400.esd.dcx", ARCHIVE_EXTENSION), Some("t400"));
        assert_eq!(
            strip_compressible("m10_00.talkesdbnd.dcx", BUNDLE_EXTENSION),
            Some("m10_00")
        );
        assert_eq!(strip_compressible("t400.py", ARCHIVE_EXTENSION), None);
        assert_eq!(strip_compressible("m10.talkesdbnd", ARCHIVE_EXTENSION), None);
    }
}
