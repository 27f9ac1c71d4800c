//! Discovery collaborators: lazy iteration over files and directories in a
//! tree whose names match a shell-style wildcard pattern.

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use glob::Pattern;
use walkdir::WalkDir;

/// Files under `root` whose file name matches `pattern`.
pub fn find_files(
    root: impl AsRef<Path>,
    pattern: &str,
) -> anyhow::Result<impl Iterator<Item = PathBuf>> {
    let pattern = compile(pattern)?;
    Ok(WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| name_matches(entry.file_name(), &pattern))
        .map(|entry| entry.into_path()))
}

/// Directories under `root` (the root included) whose direct children
/// contain at least one file matching `pattern`. Lets callers process a
/// tree-structured dataset one directory at a time.
pub fn find_dirs(
    root: impl AsRef<Path>,
    pattern: &str,
) -> anyhow::Result<impl Iterator<Item = PathBuf>> {
    let pattern = compile(pattern)?;
    Ok(WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter(move |entry| dir_has_match(entry.path(), &pattern))
        .map(|entry| entry.into_path()))
}

fn compile(pattern: &str) -> anyhow::Result<Pattern> {
    Pattern::new(pattern)
        .with_context(|| format!("invalid wildcard pattern {pattern:?}"))
}

fn name_matches(
    name: &std::ffi::OsStr,
    pattern: &Pattern,
) -> bool {
    name.to_str().is_some_and(|name| pattern.matches(name))
}

fn dir_has_match(
    dir: &Path,
    pattern: &Pattern,
) -> bool {
    fs::read_dir(dir).is_ok_and(|entries| {
        entries
            .filter_map(Result::ok)
            .any(|entry| {
                entry
                    .file_type()
                    .is_ok_and(|file_type| file_type.is_file())
                    && name_matches(&entry.file_name(), pattern)
            })
    })
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use itertools::Itertools;

    use super::*;

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    fn demo_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/sub")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        touch(&dir.path().join("a/x.txt"));
        touch(&dir.path().join("a/sub/y.txt"));
        touch(&dir.path().join("b/z.dat"));
        dir
    }

    #[test]
    fn find_files_matches_names_recursively() {
        let root = demo_tree();
        let found = find_files(root.path(), "*.txt")
            .unwrap()
            .sorted()
            .collect_vec();
        assert_eq!(found, vec![
            root.path().join("a/sub/y.txt"),
            root.path().join("a/x.txt"),
        ]);
    }

    #[test]
    fn find_dirs_requires_a_direct_child_match() {
        let root = demo_tree();
        let found = find_dirs(root.path(), "*.txt")
            .unwrap()
            .sorted()
            .collect_vec();
        // The root itself holds no matching file, only its subdirectories do
        assert_eq!(found, vec![
            root.path().join("a"),
            root.path().join("a/sub"),
        ]);
    }

    #[test]
    fn bad_pattern_is_rejected() {
        assert!(find_files(".", "[").is_err());
    }
}
