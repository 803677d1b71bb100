//! Checks source layout conventions shared by every Rust file in the crate

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const MAX_LINE_WIDTH: usize = 100;
    const SOURCE_ROOTS: [&str; 3] = ["src", "tests", "benches"];

    fn rust_files(root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    found.push(path);
                }
            }
        }

        found.sort();
        Ok(found)
    }

    fn all_rust_files() -> Vec<PathBuf> {
        SOURCE_ROOTS
            .iter()
            .flat_map(|root| rust_files(Path::new(root)).unwrap())
            .collect()
    }

    // Tests no line runs past the formatter width or carries stray whitespace
    // Verified by adding an overlong assertion to a test file
    #[test]
    fn test_lines_fit_formatter_width() {
        let mut offending = Vec::new();

        for path in all_rust_files() {
            let content = fs::read_to_string(&path).unwrap();
            for (number, line) in content.lines().enumerate() {
                let too_wide = line.chars().count() > MAX_LINE_WIDTH;
                let untidy = line.ends_with(char::is_whitespace) || line.contains('\t');
                if too_wide || untidy {
                    offending.push(format!("  - {}:{}", path.display(), number + 1));
                }
            }
        }

        assert!(
            offending.is_empty(),
            "lines wider than {MAX_LINE_WIDTH} columns or with stray whitespace:\n{}",
            offending.join("\n")
        );
    }

    // Tests unit test module files expose their children the same way
    // Verified by declaring one child module without `pub`
    #[test]
    fn test_unit_module_files_use_pub_mod() {
        let mut private = Vec::new();

        for path in rust_files(Path::new("tests/unit")).unwrap() {
            if !path.ends_with("mod.rs") {
                continue;
            }
            let content = fs::read_to_string(&path).unwrap();
            for line in content.lines().filter(|line| line.starts_with("mod ")) {
                private.push(format!("  - {}: {line}", path.display()));
            }
        }

        assert!(
            private.is_empty(),
            "unit test module files declaring private children:\n{}",
            private.join("\n")
        );
    }
}
