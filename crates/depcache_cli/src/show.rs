//! `depcache show` — print an internal dependency file as JSON.

use depcache_deps::load_internal;

use crate::{GlobalArgs, ShowArgs};

/// Runs the `depcache show` command.
///
/// Returns exit code 1 if the file does not exist.
pub fn run(args: &ShowArgs, _global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !args.internal.exists() {
        eprintln!("error: {} does not exist", args.internal.display());
        return Ok(1);
    }
    let cache = load_internal(&args.internal);
    println!("{}", serde_json::to_string_pretty(&cache.dependencies)?);
    Ok(0)
}
