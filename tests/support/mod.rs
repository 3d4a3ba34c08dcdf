//! Builds solution file text with any combination of header lines.

#![allow(dead_code)]

use slnup::solution::header::{DEFAULT_MINIMUM_VERSION, SUPPORTED_FILE_FORMAT_VERSION};
use slnup::version::Version;

pub const BODY: &str = "Global
\tGlobalSection(SolutionConfigurationPlatforms) = preSolution
\t\tDebug|Any CPU = Debug|Any CPU
\t\tRelease|Any CPU = Release|Any CPU
\tEndGlobalSection
\tGlobalSection(SolutionProperties) = preSolution
\t\tHideSolutionNode = FALSE
\tEndGlobalSection
EndGlobal";

pub struct SolutionBuilder {
    file_format_version: String,
    major_version: u32,
    full_version: Version,
    minimum_version: Version,
    include_file_format: bool,
    include_major: bool,
    include_full: bool,
    include_minimum: bool,
    include_body: bool,
}

impl SolutionBuilder {
    pub fn new(full_version: &str) -> Self {
        let full_version: Version = full_version.parse().unwrap();
        SolutionBuilder {
            file_format_version: SUPPORTED_FILE_FORMAT_VERSION.to_string(),
            major_version: full_version.major,
            full_version,
            minimum_version: DEFAULT_MINIMUM_VERSION,
            include_file_format: true,
            include_major: true,
            include_full: true,
            include_minimum: true,
            include_body: true,
        }
    }

    pub fn file_format_version(mut self, version: &str) -> Self {
        self.file_format_version = version.to_string();
        self
    }

    pub fn minimum_version(mut self, version: &str) -> Self {
        self.minimum_version = version.parse().unwrap();
        self
    }

    pub fn minimal_header(self) -> Self {
        self.without_major().without_full().without_minimum()
    }

    pub fn without_file_format(mut self) -> Self {
        self.include_file_format = false;
        self
    }

    pub fn without_major(mut self) -> Self {
        self.include_major = false;
        self
    }

    pub fn without_full(mut self) -> Self {
        self.include_full = false;
        self
    }

    pub fn without_minimum(mut self) -> Self {
        self.include_minimum = false;
        self
    }

    pub fn without_body(mut self) -> Self {
        self.include_body = false;
        self
    }

    pub fn build(&self) -> String {
        let mut text = String::from("\n");

        if self.include_file_format {
            text.push_str(&format!(
                "Microsoft Visual Studio Solution File, Format Version {}\n",
                self.file_format_version
            ));
        }
        if self.include_major {
            if self.major_version >= 16 {
                text.push_str(&format!("# Visual Studio Version {}\n", self.major_version));
            } else {
                text.push_str(&format!("# Visual Studio {}\n", self.major_version));
            }
        }
        if self.include_full {
            text.push_str(&format!("VisualStudioVersion = {}\n", self.full_version));
        }
        if self.include_minimum {
            text.push_str(&format!("MinimumVisualStudioVersion = {}\n", self.minimum_version));
        }
        if self.include_body {
            text.push_str(BODY);
            text.push('\n');
        }

        text
    }
}
