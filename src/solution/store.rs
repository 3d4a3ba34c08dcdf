use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A document split into lines, remembering how to join them back together.
///
/// Each line keeps its own terminator, so files with mixed line endings are
/// written back byte for byte. A leading byte order mark is held apart from
/// the first line and written again by [`LineBuffer::join`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    /// `None` only for a last line without a terminator.
    endings: Vec<Option<LineEnding>>,
    byte_order_mark: bool,
}

impl LineBuffer {
    pub fn split(text: &str) -> Self {
        let (byte_order_mark, text) = match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let mut buffer = LineBuffer {
            byte_order_mark,
            ..Default::default()
        };
        for piece in text.split_inclusive('\n') {
            let (line, ending) = if let Some(line) = piece.strip_suffix("\r\n") {
                (line, Some(LineEnding::CrLf))
            } else if let Some(line) = piece.strip_suffix('\n') {
                (line, Some(LineEnding::Lf))
            } else {
                (piece, None)
            };
            buffer.lines.push(line.to_string());
            buffer.endings.push(ending);
        }
        buffer
    }

    pub fn join(&self) -> String {
        let mut text = String::new();
        if self.byte_order_mark {
            text.push(BYTE_ORDER_MARK);
        }
        for (line, ending) in self.lines.iter().zip(&self.endings) {
            text.push_str(line);
            if let Some(ending) = ending {
                text.push_str(ending.as_str());
            }
        }
        text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn has_byte_order_mark(&self) -> bool {
        self.byte_order_mark
    }

    /// The terminator of line `index`, `None` for an unterminated last line.
    pub fn ending(&self, index: usize) -> Option<LineEnding> {
        self.endings.get(index).copied().flatten()
    }

    /// Replaces the text of line `index`, keeping its terminator.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, line: String) {
        self.lines[index] = line;
    }

    /// Inserts a line before `index`, terminated like the line above it.
    ///
    /// Appending after an unterminated last line terminates that line and
    /// leaves the new last line unterminated.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, line: String) {
        let ending = index
            .checked_sub(1)
            .and_then(|above| self.ending(above))
            .or_else(|| self.endings.iter().copied().flatten().next())
            .unwrap_or_default();

        if index == self.lines.len() && self.endings.last() == Some(&None) {
            self.endings[index - 1] = Some(ending);
            self.lines.push(line);
            self.endings.push(None);
            return;
        }

        self.lines.insert(index, line);
        self.endings.insert(index, Some(ending));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Whole-document storage a [`SolutionDocument`](super::SolutionDocument) reads from and writes to.
pub trait BackingStore {
    fn exists(&self, path: &Path) -> bool;
    fn read_text(&self, path: &Path) -> io::Result<String>;
    fn write_text(&self, path: &Path, text: &str) -> io::Result<()>;

    fn read_lines(&self, path: &Path) -> io::Result<LineBuffer> {
        Ok(LineBuffer::split(&self.read_text(path)?))
    }

    fn write_lines(&self, path: &Path, lines: &LineBuffer) -> io::Result<()> {
        self.write_text(path, &lines.join())
    }
}

/// The local file system.
#[derive(Debug, Copy, Clone, Default)]
pub struct FileStore;

impl BackingStore for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        debug!("Reading '{}'", path.display());
        std::fs::read_to_string(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        debug!("Writing '{}'", path.display());
        std::fs::write(path, text)
    }
}

/// Documents held in memory, keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<PathBuf, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), text.into());
        self
    }
}

impl BackingStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        self.files.borrow_mut().insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

impl<S: BackingStore + ?Sized> BackingStore for &S {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        (**self).read_text(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        (**self).write_text(path, text)
    }

    fn read_lines(&self, path: &Path) -> io::Result<LineBuffer> {
        (**self).read_lines(path)
    }

    fn write_lines(&self, path: &Path, lines: &LineBuffer) -> io::Result<()> {
        (**self).write_lines(path, lines)
    }
}
