use crate::version::Version;
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod header;
pub mod parser;
pub mod rewriter;
pub mod store;

use header::{SUPPORTED_FILE_FORMAT_VERSION, SolutionHeader};
use parser::HeaderParser;
use store::{BackingStore, FileStore, LineBuffer};

/// Content that cannot be read as, or written to, a solution header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidContent {
    #[error("The file does not contain a valid file format: '{}'", .0.display())]
    MissingFileFormat(PathBuf),
    #[error("Only file format version {supported} is supported, found '{0}'", supported = SUPPORTED_FILE_FORMAT_VERSION)]
    UnsupportedFileFormat(String),
    #[error("The {0} cannot be empty")]
    MissingField(&'static str),
    #[error("Expected a full 4-part version number, found '{0}'")]
    IncompleteVersion(Version),
    #[error("A header at line {anchor} does not fit a document of {lines} lines")]
    HeaderOutOfRange { anchor: usize, lines: usize },
}

#[derive(Debug, Error)]
pub enum SolutionError {
    #[error("The solution file could not be found: '{}'", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    ContentInvalid(#[from] InvalidContent),
    #[error("Failed to access solution file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid header pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A solution file and its parsed version header.
///
/// The header is parsed eagerly when the document is opened and replaced
/// after every successful update or reload.
#[derive(Debug)]
pub struct SolutionDocument<S: BackingStore = FileStore> {
    store: S,
    path: PathBuf,
    lines: LineBuffer,
    anchor: usize,
    header: SolutionHeader,
}

impl SolutionDocument<FileStore> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SolutionError> {
        Self::open_with(FileStore, path)
    }
}

impl<S: BackingStore> SolutionDocument<S> {
    pub fn open_with(store: S, path: impl AsRef<Path>) -> Result<Self, SolutionError> {
        let path = path.as_ref();
        if !store.exists(path) {
            return Err(SolutionError::NotFound(path.to_path_buf()));
        }

        let (lines, anchor, header) = load(&store, path)?;
        Ok(SolutionDocument {
            store,
            path: path.to_path_buf(),
            lines,
            anchor,
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &SolutionHeader {
        &self.header
    }

    /// Line index of the file format declaration.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn lines(&self) -> &[String] {
        self.lines.lines()
    }

    /// Points the header at `build_version`, keeping the file format and
    /// minimum version, and writes it back.
    ///
    /// The backing file is read again first, so changes made to it since the
    /// document was opened are kept.
    pub fn update_version(&mut self, build_version: &Version) -> Result<(), SolutionError> {
        let (lines, anchor, previous) = load(&self.store, &self.path)?;
        let header = previous.with_build_version(*build_version);
        self.write_header(lines, anchor, &previous, header)
    }

    /// Replaces the header with `header`. Like [`update_version`](Self::update_version),
    /// this starts from the current content of the backing file.
    pub fn update_header(&mut self, header: SolutionHeader) -> Result<(), SolutionError> {
        let (lines, anchor, previous) = load(&self.store, &self.path)?;
        self.write_header(lines, anchor, &previous, header)
    }

    fn write_header(
        &mut self,
        mut lines: LineBuffer,
        anchor: usize,
        previous: &SolutionHeader,
        header: SolutionHeader,
    ) -> Result<(), SolutionError> {
        let header = rewriter::prepare(header)?;
        rewriter::rewrite(&mut lines, anchor, previous, &header)?;
        self.store.write_lines(&self.path, &lines)?;

        info!(
            "Updated '{}' to Visual Studio {}",
            self.path.display(),
            header.last_full_version.map(|v| v.to_string()).unwrap_or_default()
        );
        self.lines = lines;
        self.anchor = anchor;
        self.header = header;
        Ok(())
    }

    /// The current content of the backing file.
    pub fn read_content(&self) -> Result<String, SolutionError> {
        Ok(self.store.read_text(&self.path)?)
    }

    /// Parses the backing file again, picking up changes made outside this document.
    pub fn reload(&mut self) -> Result<(), SolutionError> {
        let (lines, anchor, header) = load(&self.store, &self.path)?;
        self.lines = lines;
        self.anchor = anchor;
        self.header = header;
        Ok(())
    }
}

fn load<S: BackingStore>(store: &S, path: &Path) -> Result<(LineBuffer, usize, SolutionHeader), SolutionError> {
    debug!("Loading solution header from '{}'", path.display());
    let lines = store.read_lines(path)?;
    let parsed = HeaderParser::new()?
        .parse(lines.lines())
        .ok_or_else(|| InvalidContent::MissingFileFormat(path.to_path_buf()))?;
    let anchor = parsed.anchor;
    let header = parsed.into_header()?;
    Ok((lines, anchor, header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::header::DEFAULT_MINIMUM_VERSION;
    use crate::solution::store::MemoryStore;

    const PATH: &str = "/solutions/MyProject.sln";

    const FULL_HEADER: &str = "\r
Microsoft Visual Studio Solution File, Format Version 12.00\r
# Visual Studio Version 16\r
VisualStudioVersion = 16.0.30114.105\r
MinimumVisualStudioVersion = 10.0.40219.1\r
Global\r
EndGlobal\r
";

    fn open(text: &str) -> SolutionDocument<MemoryStore> {
        SolutionDocument::open_with(MemoryStore::new().with_file(PATH, text), PATH).unwrap()
    }

    #[test]
    fn test_open_missing_file() {
        let err = SolutionDocument::open_with(MemoryStore::new(), PATH).unwrap_err();
        match err {
            SolutionError::NotFound(path) => assert_eq!(path, Path::new(PATH)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_empty_file() {
        let err = SolutionDocument::open_with(MemoryStore::new().with_file(PATH, ""), PATH).unwrap_err();
        assert!(matches!(err, SolutionError::ContentInvalid(InvalidContent::MissingFileFormat(_))));
    }

    #[test]
    fn test_open_unsupported_format() {
        let text = "Microsoft Visual Studio Solution File, Format Version 11.00\nGlobal\n";
        let err = SolutionDocument::open_with(MemoryStore::new().with_file(PATH, text), PATH).unwrap_err();
        assert!(matches!(err, SolutionError::ContentInvalid(InvalidContent::UnsupportedFileFormat(_))));
    }

    #[test]
    fn test_open_reads_header() {
        let document = open(FULL_HEADER);
        assert_eq!(document.anchor(), 1);
        assert_eq!(document.header().last_major_version, Some(16));
        assert_eq!(document.header().minimum_version, Some(DEFAULT_MINIMUM_VERSION));
    }

    #[test]
    fn test_update_keeps_crlf() {
        let mut document = open(FULL_HEADER);
        document.update_version(&"17.0.31903.59".parse().unwrap()).unwrap();

        let expected = FULL_HEADER
            .replace("Version 16", "Version 17")
            .replace("16.0.30114.105", "17.0.31903.59");
        assert_eq!(document.read_content().unwrap(), expected);
        assert_eq!(document.header().last_major_version, Some(17));
    }

    #[test]
    fn test_update_to_same_build_is_identical() {
        let mut document = open(FULL_HEADER);
        document.update_version(&"16.0.30114.105".parse().unwrap()).unwrap();
        assert_eq!(document.read_content().unwrap(), FULL_HEADER);
    }

    #[test]
    fn test_update_twice_after_insertions() {
        let mut document = open("Microsoft Visual Studio Solution File, Format Version 12.00\nGlobal\nEndGlobal\n");
        document.update_version(&"16.0.30114.105".parse().unwrap()).unwrap();
        assert_eq!(document.lines().len(), 6);

        document.update_version(&"17.0.31903.59".parse().unwrap()).unwrap();
        assert_eq!(document.lines().len(), 6);
        assert_eq!(
            document.read_content().unwrap(),
            "Microsoft Visual Studio Solution File, Format Version 12.00
# Visual Studio Version 17
VisualStudioVersion = 17.0.31903.59
MinimumVisualStudioVersion = 10.0.40219.1
Global
EndGlobal
"
        );
    }

    #[test]
    fn test_failed_update_leaves_document_untouched() {
        let mut document = open(FULL_HEADER);
        let header = document.header().clone().with_last_major_version(None);

        let err = document.update_header(header).unwrap_err();

        assert!(matches!(err, SolutionError::ContentInvalid(InvalidContent::MissingField(_))));
        assert_eq!(document.read_content().unwrap(), FULL_HEADER);
        assert_eq!(document.header().last_major_version, Some(16));
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let store = MemoryStore::new().with_file(PATH, FULL_HEADER);
        let mut document = SolutionDocument::open_with(&store, PATH).unwrap();

        store
            .write_text(Path::new(PATH), &FULL_HEADER.replace("Version 16", "Version 15"))
            .unwrap();
        assert_eq!(document.header().last_major_version, Some(16));

        document.reload().unwrap();
        assert_eq!(document.header().last_major_version, Some(15));
    }

    #[test]
    fn test_byte_order_mark_on_format_line() {
        let text = String::from("\u{feff}") + FULL_HEADER.trim_start();
        let mut document = open(&text);
        assert_eq!(document.anchor(), 0);
        assert_eq!(document.header().last_major_version, Some(16));

        document.update_version(&"16.0.30114.105".parse().unwrap()).unwrap();
        assert_eq!(document.read_content().unwrap(), text);

        document.update_version(&"17.0.31903.59".parse().unwrap()).unwrap();
        let content = document.read_content().unwrap();
        assert!(content.starts_with("\u{feff}Microsoft Visual Studio Solution File, Format Version 12.00\r\n"));
        assert!(content.contains("\r\n# Visual Studio Version 17\r\n"));
    }

    #[test]
    fn test_update_keeps_mixed_line_endings() {
        let text = "\r
Microsoft Visual Studio Solution File, Format Version 12.00\r
# Visual Studio Version 16\r
VisualStudioVersion = 16.0.30114.105\r
MinimumVisualStudioVersion = 10.0.40219.1\r
Global
EndGlobal
";
        let mut document = open(text);

        document.update_version(&"16.0.30114.105".parse().unwrap()).unwrap();
        assert_eq!(document.read_content().unwrap(), text);

        document.update_version(&"17.0.31903.59".parse().unwrap()).unwrap();
        assert_eq!(
            document.read_content().unwrap(),
            text.replace("Version 16", "Version 17").replace("16.0.30114.105", "17.0.31903.59")
        );
    }

    #[test]
    fn test_update_keeps_changes_made_after_open() {
        let store = MemoryStore::new().with_file(PATH, FULL_HEADER);
        let mut document = SolutionDocument::open_with(&store, PATH).unwrap();

        let edited = FULL_HEADER.replace(
            "\r\nGlobal\r\n",
            "\r\nGlobal\r\n\tGlobalSection(ExtensibilityGlobals) = postSolution\r\n",
        );
        store.write_text(Path::new(PATH), &edited).unwrap();

        document.update_version(&"17.0.31903.59".parse().unwrap()).unwrap();

        assert_eq!(
            document.read_content().unwrap(),
            edited.replace("Version 16", "Version 17").replace("16.0.30114.105", "17.0.31903.59")
        );
        assert_eq!(document.lines().len(), 8);
    }
}
