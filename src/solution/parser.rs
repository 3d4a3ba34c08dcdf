use crate::solution::InvalidContent;
use crate::solution::header::SolutionHeader;
use crate::version::Version;
use log::debug;
use regex::Regex;

/// Header fields found in a document, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    /// Index of the `Microsoft Visual Studio Solution File` line.
    pub anchor: usize,
    pub file_format_version: String,
    pub last_major_version: Option<u32>,
    pub last_full_version: Option<Version>,
    pub minimum_version: Option<Version>,
}

impl ParsedHeader {
    pub fn into_header(self) -> Result<SolutionHeader, InvalidContent> {
        Ok(SolutionHeader::new(self.file_format_version)?
            .with_last_major_version(self.last_major_version)
            .with_last_full_version(self.last_full_version)
            .with_minimum_version(self.minimum_version))
    }
}

pub struct HeaderParser {
    file_format: Regex,
    major_version: Regex,
    full_version: Regex,
    minimum_version: Regex,
}

impl HeaderParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(HeaderParser {
            file_format: Regex::new(r"^Microsoft Visual Studio Solution File, Format Version (\d+\.\d+)$")?,
            major_version: Regex::new(r"^# Visual Studio (?:Version )?(\d+)$")?,
            full_version: Regex::new(r"^VisualStudioVersion = (\d+\.\d+\.\d+\.\d+)$")?,
            minimum_version: Regex::new(r"^MinimumVisualStudioVersion = (\d+\.\d+\.\d+\.\d+)$")?,
        })
    }

    /// Finds the header in `lines`.
    ///
    /// The first format line anywhere in the document is the anchor. The
    /// optional lines are then matched strictly in order below it: the cursor
    /// only moves past a line that matched, so a missing field shifts where
    /// the following fields are looked for. A line is only examined when at
    /// least one more line follows it.
    ///
    /// Returns `None` when no format line exists.
    pub fn parse(&self, lines: &[String]) -> Option<ParsedHeader> {
        let (anchor, file_format_version) = lines
            .iter()
            .enumerate()
            .find_map(|(index, line)| capture(&self.file_format, line).map(|format| (index, format.to_string())))?;
        debug!("Found file format version {} on line {}", file_format_version, anchor);

        let mut header = ParsedHeader {
            anchor,
            file_format_version,
            last_major_version: None,
            last_full_version: None,
            minimum_version: None,
        };

        let mut next = anchor + 1;
        let examinable = |index: usize| lines.len() > index + 1;

        if examinable(next) {
            if let Some(major) = capture(&self.major_version, &lines[next]).and_then(|m| m.parse::<u32>().ok()) {
                header.last_major_version = Some(major);
                next += 1;
            }
        }

        if examinable(next) {
            if let Some(version) = capture(&self.full_version, &lines[next]).and_then(|v| v.parse::<Version>().ok()) {
                header.last_full_version = Some(version);
                next += 1;
            }
        }

        if examinable(next) {
            if let Some(version) = capture(&self.minimum_version, &lines[next]).and_then(|v| v.parse::<Version>().ok()) {
                header.minimum_version = Some(version);
            }
        }

        debug!(
            "Parsed header: major={:?}, full={:?}, minimum={:?}",
            header.last_major_version, header.last_full_version, header.minimum_version
        );
        Some(header)
    }
}

fn capture<'l>(regex: &Regex, line: &'l str) -> Option<&'l str> {
    regex.captures(line).and_then(|captures| captures.get(1)).map(|m| m.as_str())
}
