use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use slnup::{
    arguments::{Arguments, exit_code},
    catalog::ReleaseCatalog,
    options::plan_update,
    resolver::VersionResolver,
    solution::SolutionDocument,
};

fn main() -> Result<()> {
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(exit_code(&err));
        }
    };
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let resolver = match &args.catalog {
        Some(path) => VersionResolver::new(
            ReleaseCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load version catalog from '{}'", path))?,
        ),
        None => VersionResolver::bundled()?,
    };

    let current_dir = std::env::current_dir()?;
    let plan = plan_update(&args, &resolver, &current_dir)?;
    info!(
        "Updating '{}' to Visual Studio {} ({})",
        plan.solution_path.display(),
        plan.version,
        plan.build_version
    );

    let mut document = SolutionDocument::open(&plan.solution_path)?;
    document.update_version(&plan.build_version)?;

    Ok(())
}
