//! Keeps `tests/unit` a file-for-file mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    // Binary and library roots, plus module declaration files, hold no logic of their own
    const WIRING_FILES: [&str; 3] = ["lib.rs", "main.rs", "mod.rs"];

    fn is_wiring(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| WIRING_FILES.contains(&name))
    }

    /// Every `.rs` file under `root`, relative to it
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path
                        .strip_prefix(root)
                        .map_err(|e| io::Error::other(e.to_string()))?;
                    found.insert(relative.to_path_buf());
                }
            }
        }

        Ok(found)
    }

    fn logic_files(root: &str) -> BTreeSet<PathBuf> {
        match rust_files(Path::new(root)) {
            Ok(files) => files.into_iter().filter(|path| !is_wiring(path)).collect(),
            Err(e) => unreachable!("cannot scan {root}: {e}"),
        }
    }

    fn listing(paths: &[&PathBuf], prefix: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {prefix}/{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source module has a unit test file at the mirrored path
    // Verified by deleting tests/unit/math/segment.rs
    #[test]
    fn test_every_module_is_mirrored() {
        let sources = logic_files(SRC_ROOT);
        let tests = logic_files(UNIT_ROOT);

        let untested: Vec<_> = sources.difference(&tests).collect();
        assert!(
            untested.is_empty(),
            "modules without unit tests:\n{}",
            listing(&untested, SRC_ROOT)
        );
    }

    // Tests no unit test file outlives the module it covered
    // Verified by adding tests/unit/spatial/tiles.rs
    #[test]
    fn test_no_orphaned_unit_tests() {
        let sources = logic_files(SRC_ROOT);
        let tests = logic_files(UNIT_ROOT);

        let orphaned: Vec<_> = tests.difference(&sources).collect();
        assert!(
            orphaned.is_empty(),
            "unit tests for modules that no longer exist:\n{}",
            listing(&orphaned, UNIT_ROOT)
        );
    }

    // Tests each test file outside the wiring files declares at least one test
    // Verified by emptying tests/algorithm.rs
    #[test]
    fn test_test_files_declare_tests() {
        let files = match rust_files(Path::new("tests")) {
            Ok(files) => files,
            Err(e) => unreachable!("cannot scan tests: {e}"),
        };

        let empty: Vec<_> = files
            .iter()
            .filter(|path| !is_wiring(path))
            .filter(|path| {
                !fs::read_to_string(Path::new("tests").join(path))
                    .is_ok_and(|content| content.contains("#[test]"))
            })
            .collect();
        assert!(
            empty.is_empty(),
            "test files without a #[test] function:\n{}",
            listing(&empty, "tests")
        );
    }
}
