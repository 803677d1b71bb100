//! Checks that every source file has a unit test file at the mirrored path

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Entry points and module files carry no logic of their own
    fn is_structural(relative: &str) -> bool {
        relative == "lib.rs" || relative == "main.rs" || relative.ends_with("mod.rs")
    }

    fn rust_files(root: &Path) -> io::Result<BTreeSet<String>> {
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
                        .map_err(|error| io::Error::other(error.to_string()))?;
                    found.insert(relative.to_string_lossy().replace('\\', "/"));
                }
            }
        }

        Ok(found)
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let sources = rust_files(Path::new(SRC_DIR)).unwrap();
        let units = rust_files(Path::new(UNIT_DIR)).unwrap();

        let missing: Vec<&String> = sources
            .iter()
            .filter(|relative| !is_structural(relative) && !units.contains(*relative))
            .collect();

        assert!(
            missing.is_empty(),
            "source files without a unit test counterpart:\n{}",
            missing
                .iter()
                .map(|relative| format!("  - src/{relative} -> {UNIT_DIR}/{relative}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = rust_files(Path::new(SRC_DIR)).unwrap();
        let units = rust_files(Path::new(UNIT_DIR)).unwrap();

        let orphaned: Vec<&String> = units
            .iter()
            .filter(|relative| !is_structural(relative) && !sources.contains(*relative))
            .collect();

        assert!(
            orphaned.is_empty(),
            "unit test files without a source file:\n{}",
            orphaned
                .iter()
                .map(|relative| format!("  - {UNIT_DIR}/{relative}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_files(Path::new("tests")).unwrap();

        let empty: Vec<&String> = files
            .iter()
            .filter(|relative| !is_structural(relative.rsplit('/').next().unwrap_or(relative)))
            .filter(|relative| {
                fs::read_to_string(Path::new("tests").join(relative))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();

        assert!(
            empty.is_empty(),
            "test files without any #[test] functions:\n{}",
            empty
                .iter()
                .map(|relative| format!("  - tests/{relative}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
