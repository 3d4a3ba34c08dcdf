use crate::version::Version;
use clap::Parser;
use clap::error::ErrorKind;

#[derive(Debug, Parser)]
#[command(author, version, about, bin_name = "slnup")]
pub struct Arguments {
    /// The path to the solution file
    #[arg(long, short)]
    pub path: Option<String>,
    /// Uses version information as specified with this build version number
    #[arg(long = "build-version", value_name = "BUILD_VERSION")]
    pub build_version: Option<Version>,
    /// Load the release catalog from a json file instead of the bundled one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<String>,
    #[arg(long, short)]
    pub verbose: bool,
    /// The Visual Studio version to update the solution file with. Can be either a
    /// product year (ex. 2017, 2019, or 2022) or a 2 or 3-part version number
    /// (ex. 16.9 or 17.0.1). Defaults to the latest known product.
    #[arg(value_name = "VERSION")]
    pub target: Option<String>,
}

/// Exit status for an argument error: 0 when help or the version was
/// requested, 1 for anything else.
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
