use crate::solution::InvalidContent;
use crate::solution::header::{DEFAULT_MINIMUM_VERSION, SolutionHeader};
use crate::solution::store::LineBuffer;
use crate::version::Version;

pub fn file_format_line(file_format_version: &str) -> String {
    format!("Microsoft Visual Studio Solution File, Format Version {file_format_version}")
}

/// Visual Studio 2019 (16) introduced the `Version` wording; older releases
/// write the bare number.
pub fn major_version_line(major: u32) -> String {
    if major >= 16 {
        format!("# Visual Studio Version {major}")
    } else {
        format!("# Visual Studio {major}")
    }
}

pub fn full_version_line(version: &Version) -> String {
    format!("VisualStudioVersion = {version}")
}

pub fn minimum_version_line(version: &Version) -> String {
    format!("MinimumVisualStudioVersion = {version}")
}

/// Checks that `header` can be written and fills in the default minimum
/// version when it has none.
pub fn prepare(header: SolutionHeader) -> Result<SolutionHeader, InvalidContent> {
    if header.last_major_version.is_none() {
        return Err(InvalidContent::MissingField("last Visual Studio major version"));
    }

    match header.last_full_version {
        None => return Err(InvalidContent::MissingField("last Visual Studio version")),
        Some(version) if !version.is_four_part() => return Err(InvalidContent::IncompleteVersion(version)),
        Some(_) => {}
    }

    match header.minimum_version {
        None => Ok(header.with_minimum_version(Some(DEFAULT_MINIMUM_VERSION))),
        Some(version) if !version.is_four_part() => Err(InvalidContent::IncompleteVersion(version)),
        Some(_) => Ok(header),
    }
}

/// Writes `header` into `lines` at `anchor`.
///
/// `previous` is the header as it was parsed from these lines. Each optional
/// field it lacks gets a blank line inserted at its slot below the anchor
/// (major, then full, then minimum) before the four header lines are
/// overwritten, so only missing fields change the line count. Overwritten
/// lines keep their terminators; inserted ones take the anchor's.
///
/// `header` must already have gone through [`prepare`]. Fails without
/// touching `lines` when `previous` does not fit them.
pub fn rewrite(
    lines: &mut LineBuffer,
    anchor: usize,
    previous: &SolutionHeader,
    header: &SolutionHeader,
) -> Result<(), InvalidContent> {
    let missing = [
        previous.last_major_version.is_none(),
        previous.last_full_version.is_none(),
        previous.minimum_version.is_none(),
    ];

    let mut len = lines.len();
    let out_of_range = InvalidContent::HeaderOutOfRange { anchor, lines: len };
    for (offset, is_missing) in missing.into_iter().enumerate() {
        if is_missing {
            if anchor + 1 + offset > len {
                return Err(out_of_range);
            }
            len += 1;
        }
    }
    if anchor + 3 >= len {
        return Err(out_of_range);
    }

    for (offset, is_missing) in missing.into_iter().enumerate() {
        if is_missing {
            lines.insert(anchor + 1 + offset, String::new());
        }
    }

    let mut set = |offset: usize, text: Option<String>| {
        if let Some(text) = text {
            lines.set(anchor + offset, text);
        }
    };
    set(0, Some(file_format_line(header.file_format_version())));
    set(1, header.last_major_version.map(major_version_line));
    set(2, header.last_full_version.as_ref().map(full_version_line));
    set(3, header.minimum_version.as_ref().map(minimum_version_line));
    Ok(())
}
