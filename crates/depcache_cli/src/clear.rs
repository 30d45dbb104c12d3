//! `depcache clear` — delete the depfiles of a record batch.

use depcache_common::load_records;
use depcache_deps::CompilerDepends;

use crate::{ClearArgs, GlobalArgs};

/// Runs the `depcache clear` command.
pub fn run(args: &ClearArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let records = load_records(&args.records)?;
    CompilerDepends::new().clear_dependencies(&records);
    if !global.quiet {
        eprintln!("   Cleared {} depfile(s)", records.len());
    }
    Ok(0)
}
