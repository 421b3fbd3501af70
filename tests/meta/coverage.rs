//! Keeps `tests/unit` in lockstep with the `src` module tree

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SOURCE_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    // Entry points and module declarations carry no logic of their own
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn relative_paths(root: &Path) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let relative = path
                    .strip_prefix(root)
                    .map_err(io::Error::other)?
                    .to_string_lossy()
                    .replace('\\', "/");

                if path.is_dir() {
                    found.insert(relative);
                    pending.push(path);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    found.insert(relative);
                }
            }
        }

        Ok(found)
    }

    // Tests that every source file and directory has a unit test counterpart
    #[test]
    fn test_every_source_file_has_unit_tests() {
        let sources = relative_paths(Path::new(SOURCE_ROOT)).unwrap_or_default();
        let units = relative_paths(Path::new(UNIT_ROOT)).unwrap_or_default();
        assert!(!sources.is_empty(), "no sources found under {SOURCE_ROOT}");

        let missing: Vec<String> = sources
            .iter()
            .filter(|path| !is_exempt(path) && !units.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests that no unit test file outlives the source it covered
    #[test]
    fn test_every_unit_test_has_a_source() {
        let sources = relative_paths(Path::new(SOURCE_ROOT)).unwrap_or_default();
        let units = relative_paths(Path::new(UNIT_ROOT)).unwrap_or_default();

        let orphaned: Vec<String> = units
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !sources.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit tests without a source file:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests that every test file other than harness and module files defines tests
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_root = Path::new("tests");
        let files = relative_paths(tests_root).unwrap_or_default();

        let empty: Vec<&String> = files
            .iter()
            .filter(|path| path.ends_with(".rs"))
            .filter(|path| path.as_str() != "main.rs" && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(tests_root.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{empty:#?}"
        );
    }
}
