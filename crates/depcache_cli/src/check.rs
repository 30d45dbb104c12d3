//! `depcache check` — reconcile and, when stale, rewrite the dependency files.

use depcache_common::load_records;
use depcache_config::DependsConfig;
use depcache_deps::{
    save_dependencies, CompilerDepends, DependencyMap, MakePolicy, OutsideProject, PathFilter,
};
use tracing::debug;

use crate::{resolve_config, CheckArgs, GlobalArgs};

/// Runs the `depcache check` command.
///
/// Returns exit code 0 whether or not the files had to be rewritten.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global, &std::env::current_dir()?)?;
    let verbose = global.verbose || config.scan.verbose;

    match update(args, &config, verbose)? {
        Some(targets) if !global.quiet => {
            eprintln!("   Updated dependencies for {targets} target(s)");
        }
        None if !global.quiet => eprintln!("   Dependencies up to date"),
        _ => {}
    }
    Ok(0)
}

/// Reconciles and writes both files if needed. Returns the number of targets
/// written, or `None` when the existing files were kept.
pub(crate) fn update(
    args: &CheckArgs,
    config: &DependsConfig,
    verbose: bool,
) -> Result<Option<usize>, Box<dyn std::error::Error>> {
    let records = load_records(&args.records)?;
    debug!(records = records.len(), internal = %args.internal.display(), "checking dependencies");
    let filter = config
        .scan
        .in_project_only
        .then(|| OutsideProject::new(config.project.roots()));

    let mut dependencies = DependencyMap::new();
    let valid = CompilerDepends::new().with_verbose(verbose).check_dependencies(
        &args.internal,
        &records,
        &mut dependencies,
        filter.as_ref().map(|f| f as &dyn PathFilter),
    );

    if valid && !args.force_write && args.make.exists() {
        return Ok(None);
    }
    save_dependencies(
        &dependencies,
        &args.make,
        &args.internal,
        &MakePolicy::from_config(config),
    )?;
    Ok(Some(dependencies.len()))
}
