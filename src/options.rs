use crate::arguments::Arguments;
use crate::catalog::Product;
use crate::resolver::{VersionResolver, parse_marketing_version};
use crate::version::Version;
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("No solution (.sln) files could be found in '{}'", .0.display())]
    NoSolutionFound(PathBuf),
    #[error(
        "More than one solution (.sln) files were found in the current directory. Use the -p or --path parameter to specify one:{}",
        list_paths(.0)
    )]
    MultipleSolutionsFound(Vec<PathBuf>),
    #[error("The solution file could not be found: '{}'", .0.display())]
    SolutionNotFound(PathBuf),
    #[error("The build version must be a full 4-part version number")]
    IncompleteBuildVersion,
    #[error("The version specified was not a valid 2 or 3-part version number: '{0}'")]
    InvalidVersion(String),
    #[error("The version specified could not be resolved to a supported Visual Studio product version: '{0}'")]
    Unresolved(String),
    #[error("Failed to search for solution files: {0}")]
    Discovery(#[from] walkdir::Error),
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|path| format!("\n - '{}'", path.display())).collect()
}

/// What to write and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    pub solution_path: PathBuf,
    pub version: Version,
    pub build_version: Version,
}

/// Turns parsed arguments into an [`UpdatePlan`].
///
/// An explicit build version bypasses the catalog. Otherwise the positional
/// token (or the latest product year when absent) is resolved through
/// `resolver`.
pub fn plan_update(args: &Arguments, resolver: &VersionResolver, current_dir: &Path) -> Result<UpdatePlan, OptionsError> {
    let solution_path = resolve_solution_path(args.path.as_deref().map(Path::new), current_dir)?;
    if !solution_path.is_file() {
        return Err(OptionsError::SolutionNotFound(solution_path));
    }

    if let Some(build_version) = args.build_version {
        if !build_version.is_four_part() {
            return Err(OptionsError::IncompleteBuildVersion);
        }

        let version = match args.target.as_deref() {
            Some(token) => {
                parse_marketing_version(token).ok_or_else(|| OptionsError::InvalidVersion(token.to_string()))?
            }
            None => Version::new(build_version.major, build_version.minor),
        };
        debug!("Using build version {} as given", build_version);

        return Ok(UpdatePlan { solution_path, version, build_version });
    }

    let token = match args.target.as_deref() {
        Some(token) => token.to_string(),
        None => default_version_token(),
    };
    let release = resolver.resolve(token.as_str()).ok_or_else(|| OptionsError::Unresolved(token.clone()))?;

    Ok(UpdatePlan {
        solution_path,
        version: release.version,
        build_version: release.build_version,
    })
}

/// The positional version used when none is given: the latest product year.
pub fn default_version_token() -> String {
    Product::LATEST.year().map(|year| year.to_string()).unwrap_or_default()
}

/// Resolves the solution path from `--path`, or finds the single `.sln`
/// directly inside `current_dir`.
pub fn resolve_solution_path(input: Option<&Path>, current_dir: &Path) -> Result<PathBuf, OptionsError> {
    if let Some(input) = input {
        return Ok(if input.is_absolute() { input.to_path_buf() } else { current_dir.join(input) });
    }

    let mut solutions = find_solution_files(current_dir)?;
    match solutions.len() {
        0 => Err(OptionsError::NoSolutionFound(current_dir.to_path_buf())),
        1 => Ok(solutions.remove(0)),
        _ => Err(OptionsError::MultipleSolutionsFound(solutions)),
    }
}

fn find_solution_files(directory: &Path) -> Result<Vec<PathBuf>, OptionsError> {
    let mut files = vec![];
    for item in walkdir::WalkDir::new(directory).min_depth(1).max_depth(1).sort_by_file_name() {
        let item = item?;
        let path = item.path();
        let is_solution = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("sln"));
        if item.file_type().is_file() && is_solution {
            files.push(path.to_path_buf());
        }
    }

    debug!("Found solution files: {:?}", files);
    Ok(files)
}
