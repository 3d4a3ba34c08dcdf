use crate::solution::InvalidContent;
use crate::version::Version;

/// The only file format version this tool writes.
pub const SUPPORTED_FILE_FORMAT_VERSION: &str = "12.00";

/// Written when a solution has no `MinimumVisualStudioVersion` line yet.
pub const DEFAULT_MINIMUM_VERSION: Version = Version::full(10, 0, 40219, 1);

/// The version header of a solution file.
///
/// Every field but the file format version may be missing from a file on
/// disk; the last major version and the last full version are required to
/// write the header back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionHeader {
    file_format_version: String,
    pub last_major_version: Option<u32>,
    pub last_full_version: Option<Version>,
    pub minimum_version: Option<Version>,
}

impl SolutionHeader {
    pub fn new(file_format_version: impl Into<String>) -> Result<Self, InvalidContent> {
        let file_format_version = file_format_version.into();
        if file_format_version != SUPPORTED_FILE_FORMAT_VERSION {
            return Err(InvalidContent::UnsupportedFileFormat(file_format_version));
        }

        Ok(SolutionHeader {
            file_format_version,
            last_major_version: None,
            last_full_version: None,
            minimum_version: None,
        })
    }

    /// A complete header for the given build version.
    pub fn for_build(build_version: Version) -> Self {
        SolutionHeader {
            file_format_version: SUPPORTED_FILE_FORMAT_VERSION.to_string(),
            last_major_version: None,
            last_full_version: None,
            minimum_version: None,
        }
        .with_build_version(build_version)
    }

    pub fn file_format_version(&self) -> &str {
        &self.file_format_version
    }

    pub fn with_last_major_version(mut self, major: Option<u32>) -> Self {
        self.last_major_version = major;
        self
    }

    pub fn with_last_full_version(mut self, version: Option<Version>) -> Self {
        self.last_full_version = version;
        self
    }

    pub fn with_minimum_version(mut self, version: Option<Version>) -> Self {
        self.minimum_version = version;
        self
    }

    /// Copies this header, pointing it at a new build. The file format and
    /// minimum version are kept.
    pub fn with_build_version(&self, build_version: Version) -> Self {
        SolutionHeader {
            last_major_version: Some(build_version.major),
            last_full_version: Some(build_version),
            ..self.clone()
        }
    }
}
