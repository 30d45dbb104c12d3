//! End-to-end reconciliation tests: depfiles and internal files on disk,
//! timestamps pinned with `filetime` so staleness is deterministic.

use std::path::{Path, PathBuf};

use depcache_common::{CompileRecord, DepFormat};
use depcache_config::DependsConfig;
use depcache_deps::{
    load_internal, save_dependencies, CompilerDepends, DependencyMap, MakePolicy, OutsideProject,
    PathFilter,
};
use filetime::{set_file_mtime, FileTime};

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str, mtime: i64) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
        path
    }

    fn internal(&self) -> PathBuf {
        self.path("compiler_depend.internal")
    }
}

fn gcc(source: &str, target: &str, depfile: &Path) -> CompileRecord {
    CompileRecord::new(source, target, DepFormat::GccDepfile, depfile)
}

fn flat(source: &str, target: &str, depfile: &Path) -> CompileRecord {
    CompileRecord::new(source, target, DepFormat::FlatListing, depfile)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn missing_internal_file_forces_parse() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o: a.c b.h\n", 1_000);
    let mut deps = DependencyMap::new();

    let valid = CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &depfile)],
        &mut deps,
        None,
    );

    assert!(!valid);
    assert_eq!(deps["a.o"], strings(&["a.c", "b.h"]));
}

#[test]
fn empty_depfile_is_skipped() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "", 1_000);
    let mut deps = DependencyMap::new();

    let valid = CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &depfile)],
        &mut deps,
        None,
    );

    assert!(!valid);
    assert!(deps.is_empty());
}

#[test]
fn internal_file_newer_than_depfile_is_valid() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o: a.c b.h c.h\n", 1_000);
    ws.write("compiler_depend.internal", "a.o\n a.c\n b.h\n\n", 2_000);
    let mut deps = DependencyMap::new();

    let valid = CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &depfile)],
        &mut deps,
        None,
    );

    assert!(valid);
    assert_eq!(deps["a.o"], strings(&["a.c", "b.h"]));
}

#[test]
fn depfile_newer_than_internal_file_replaces_entry() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o: a.c c.h\n", 3_000);
    ws.write("compiler_depend.internal", "a.o\n a.c\n b.h\n\nz.o\n z.c\n\n", 2_000);
    let mut deps = DependencyMap::new();

    let valid = CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &depfile)],
        &mut deps,
        None,
    );

    assert!(!valid);
    assert_eq!(deps["a.o"], strings(&["a.c", "c.h"]));
    assert_eq!(deps["z.o"], strings(&["z.c"]));
}

#[test]
fn equal_timestamps_are_not_stale() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o: a.c c.h\n", 2_000);
    ws.write("compiler_depend.internal", "a.o\n a.c\n\n", 2_000);
    let mut deps = DependencyMap::new();

    assert!(CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &depfile)],
        &mut deps,
        None,
    ));
}

#[test]
fn missing_depfile_keeps_cached_entry() {
    let ws = Workspace::new();
    ws.write("compiler_depend.internal", "a.o\n a.c\n b.h\n\n", 2_000);
    let mut deps = DependencyMap::new();

    let valid = CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &ws.path("a.d"))],
        &mut deps,
        None,
    );

    assert!(valid);
    assert_eq!(deps["a.o"], strings(&["a.c", "b.h"]));
}

#[test]
fn malformed_depfile_keeps_cached_entry() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o a.c b.h\n", 3_000);
    ws.write("compiler_depend.internal", "a.o\n a.c\n b.h\n\n", 2_000);
    let mut deps = DependencyMap::new();

    let valid = CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &depfile)],
        &mut deps,
        None,
    );

    assert!(!valid);
    assert_eq!(deps["a.o"], strings(&["a.c", "b.h"]));
}

#[test]
fn source_moved_to_front_for_gcc() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o: a.o b.h a.c c.h\n", 1_000);
    let mut deps = DependencyMap::new();

    CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &depfile)],
        &mut deps,
        None,
    );

    assert_eq!(deps["a.o"], strings(&["a.c", "b.h", "c.h"]));
}

#[test]
fn flat_listing_gets_source_first() {
    let ws = Workspace::new();
    let depfile = ws.write("a.obj.d", "b.h\r\nc.h\r\n", 1_000);
    let mut deps = DependencyMap::new();

    CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[flat("a.c", "a.obj", &depfile)],
        &mut deps,
        None,
    );

    assert_eq!(deps["a.obj"], strings(&["a.c", "b.h", "c.h"]));
}

#[test]
fn filter_applies_to_both_formats() {
    let ws = Workspace::new();
    let gcc_dep = ws.write("a.d", "a.o: a.c /usr/include/stdio.h b.h\n", 1_000);
    let flat_dep = ws.write("c.d", "/usr/include/stdlib.h\nc.c\nd.h\n", 1_000);
    let filter = |p: &str| p.starts_with("/usr/");
    let mut deps = DependencyMap::new();

    CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &gcc_dep), flat("c.c", "c.o", &flat_dep)],
        &mut deps,
        Some(&filter),
    );

    assert_eq!(deps["a.o"], strings(&["a.c", "b.h"]));
    assert_eq!(deps["c.o"], strings(&["c.c", "d.h"]));
}

#[test]
fn filter_cannot_remove_source() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "/usr/src/a.o: /usr/src/a.c /usr/include/x.h\n", 1_000);
    let filter = OutsideProject::new(["/home/user/proj"]);
    let mut deps = DependencyMap::new();

    CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("/usr/src/a.c", "/usr/src/a.o", &depfile)],
        &mut deps,
        Some(&filter as &dyn PathFilter),
    );

    assert_eq!(deps["/usr/src/a.o"], strings(&["/usr/src/a.c"]));
}

#[test]
fn second_run_is_a_no_op() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o: a.c b.h\n", 1_000);
    let make = ws.path("compiler_depend.make");
    let config = DependsConfig::default();
    let policy = MakePolicy::from_config(&config);
    let depends = CompilerDepends::new();
    let records = [gcc("a.c", "a.o", &depfile)];

    let mut first = DependencyMap::new();
    assert!(!depends.check_dependencies(&ws.internal(), &records, &mut first, None));
    save_dependencies(&first, &make, &ws.internal(), &policy).unwrap();
    set_file_mtime(ws.internal(), FileTime::from_unix_time(2_000, 0)).unwrap();

    let mut second = DependencyMap::new();
    assert!(depends.check_dependencies(&ws.internal(), &records, &mut second, None));
    assert_eq!(first, second);
}

#[test]
fn saved_internal_file_round_trips() {
    let ws = Workspace::new();
    let config = DependsConfig::default();
    let mut deps = DependencyMap::new();
    deps.insert("a.o".to_string(), strings(&["a.c", "b.h", "dir with space/c.h"]));
    deps.insert("b.o".to_string(), strings(&["b.c"]));

    save_dependencies(
        &deps,
        &ws.path("compiler_depend.make"),
        &ws.internal(),
        &MakePolicy::from_config(&config),
    )
    .unwrap();

    assert_eq!(load_internal(&ws.internal()).dependencies, deps);
}

#[test]
fn every_discovered_dependency_gets_one_phony_rule() {
    let ws = Workspace::new();
    let a = ws.write("a.d", "a.o: a.c common.h a.h\n", 1_000);
    let b = ws.write("b.d", "b.o: b.c common.h\n", 1_000);
    let config = DependsConfig::default();
    let mut deps = DependencyMap::new();
    CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("a.c", "a.o", &a), gcc("b.c", "b.o", &b)],
        &mut deps,
        None,
    );

    let make = ws.path("compiler_depend.make");
    save_dependencies(&deps, &make, &ws.internal(), &MakePolicy::from_config(&config)).unwrap();
    let text = std::fs::read_to_string(&make).unwrap();

    let phony: Vec<&str> = text
        .lines()
        .filter(|l| l.ends_with(':') && !l.contains(' '))
        .collect();
    assert_eq!(phony, vec!["a.h:", "common.h:"]);
    assert!(!text.contains("\na.c:"));
    assert!(!text.contains("\nb.c:"));
}

#[test]
fn dot_prefixed_record_paths_match_normalized_depfile() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "./a.o: ./a.o ./a.c b.h\n", 1_000);
    let config = DependsConfig::default();
    let mut deps = DependencyMap::new();
    CompilerDepends::new().check_dependencies(
        &ws.internal(),
        &[gcc("./a.c", "./a.o", &depfile)],
        &mut deps,
        None,
    );
    assert_eq!(deps["./a.o"], strings(&["./a.c", "b.h"]));

    let make = ws.path("compiler_depend.make");
    save_dependencies(&deps, &make, &ws.internal(), &MakePolicy::from_config(&config)).unwrap();
    let text = std::fs::read_to_string(&make).unwrap();
    let phony: Vec<&str> = text
        .lines()
        .filter(|l| l.ends_with(':') && !l.contains(' '))
        .collect();
    assert_eq!(phony, vec!["b.h:"]);
}

#[test]
fn clear_then_check_keeps_cache() {
    let ws = Workspace::new();
    let depfile = ws.write("a.d", "a.o: a.c new.h\n", 3_000);
    ws.write("compiler_depend.internal", "a.o\n a.c\n old.h\n\n", 2_000);
    let records = [gcc("a.c", "a.o", &depfile)];
    let depends = CompilerDepends::new();

    depends.clear_dependencies(&records);
    let mut deps = DependencyMap::new();
    assert!(depends.check_dependencies(&ws.internal(), &records, &mut deps, None));
    assert_eq!(deps["a.o"], strings(&["a.c", "old.h"]));
}
