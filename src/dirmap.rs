//! Tabular mapping of dataset directories.
//!
//! A [`DirMap`] walks a directory tree, keeps every directory that holds a
//! file matching a wildcard pattern, collects one tabular record per
//! directory through a caller-supplied info getter, and remembers an
//! id-to-absolute-path mapping alongside the table. The pair persists as a
//! CSV file plus a binary blob and can be reloaded later without
//! re-scanning the tree.

use std::fs::File;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    ensure,
    Context,
};
use indexmap::IndexMap;
use log::debug;

use crate::io::discover::find_dirs;

/// Info table plus id-to-directory mapping for one scanned tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirMap {
    description: String,
    columns:     Vec<String>,
    records:     Vec<Vec<String>>,
    dirs:        IndexMap<u64, PathBuf>,
}

impl DirMap {
    /// Scans the tree under `top` for directories holding a file matching
    /// `pattern`. `info_getter` receives each directory's absolute path and
    /// returns one record with exactly `columns.len()` values.
    pub fn scan<F>(
        top: &Path,
        pattern: &str,
        columns: Vec<String>,
        description: impl Into<String>,
        mut info_getter: F,
    ) -> anyhow::Result<Self>
    where
        F: FnMut(&Path) -> anyhow::Result<Vec<String>>, {
        let mut dirs = IndexMap::new();
        let mut records = Vec::new();
        let mut id = 0u64;

        for dir in find_dirs(top, pattern)? {
            let abs = dir.canonicalize().with_context(|| {
                format!("failed to resolve {}", dir.display())
            })?;
            debug!("collecting info for {}", abs.display());

            let record = info_getter(&abs)?;
            ensure!(
                record.len() == columns.len(),
                "info getter returned {} values for {} columns ({})",
                record.len(),
                columns.len(),
                abs.display()
            );

            id += 1;
            dirs.insert(id, abs);
            records.push(record);
        }

        Ok(Self {
            description: description.into(),
            columns,
            records,
            dirs,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Iterates `(id, directory, record)` in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Path, &[String])> {
        self.dirs
            .iter()
            .zip(&self.records)
            .map(|((id, dir), record)| (*id, dir.as_path(), record.as_slice()))
    }

    fn table_path(
        &self,
        out_dir: &Path,
    ) -> PathBuf {
        out_dir.join(format!("dirmap_{}_table.csv", self.description))
    }

    fn dirs_path(
        &self,
        out_dir: &Path,
    ) -> PathBuf {
        out_dir.join(format!("dirmap_{}_dirs.bin", self.description))
    }

    /// Persists the table as CSV and the id-to-path mapping as a binary
    /// blob under `out_dir`. Returns the two written paths.
    pub fn to_files(
        &self,
        out_dir: &Path,
    ) -> anyhow::Result<(PathBuf, PathBuf)> {
        let table_path = self.table_path(out_dir);
        let mut writer = csv::Writer::from_path(&table_path)
            .with_context(|| format!("failed to create {}", table_path.display()))?;
        writer.write_record(&self.columns)?;
        for record in &self.records {
            writer.write_record(record)?;
        }
        writer.flush()?;

        let dirs_path = self.dirs_path(out_dir);
        let file = File::create(&dirs_path)
            .with_context(|| format!("failed to create {}", dirs_path.display()))?;
        bincode::serialize_into(file, &self.dirs)
            .context("failed to encode directory mapping")?;

        Ok((table_path, dirs_path))
    }

    /// Reloads a persisted pair written by [`DirMap::to_files`].
    pub fn from_files(
        table_path: &Path,
        dirs_path: &Path,
        description: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let mut reader = csv::Reader::from_path(table_path)
            .with_context(|| format!("failed to open {}", table_path.display()))?;
        let columns = reader
            .headers()?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        let records = reader
            .records()
            .map(|record| {
                record.map(|r| r.iter().map(str::to_owned).collect::<Vec<_>>())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let file = File::open(dirs_path)
            .with_context(|| format!("failed to open {}", dirs_path.display()))?;
        let dirs: IndexMap<u64, PathBuf> = bincode::deserialize_from(file)
            .context("failed to decode directory mapping")?;

        ensure!(
            dirs.len() == records.len(),
            "directory mapping holds {} entries but the table has {} rows",
            dirs.len(),
            records.len()
        );

        Ok(Self {
            description: description.into(),
            columns,
            records,
            dirs,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn demo_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["set_a", "set_b"] {
            let sub = dir.path().join(name);
            fs::create_dir(&sub).unwrap();
            fs::write(sub.join("table.csv"), "x").unwrap();
        }
        fs::create_dir(dir.path().join("empty")).unwrap();
        dir
    }

    fn dir_name_getter(dir: &Path) -> anyhow::Result<Vec<String>> {
        Ok(vec![dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned()])
    }

    #[test]
    fn scan_collects_matching_dirs_in_order() {
        let tree = demo_tree();
        let map = DirMap::scan(
            tree.path(),
            "table.csv",
            vec!["name".to_string()],
            "demo",
            dir_name_getter,
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        let names = map
            .iter()
            .map(|(_, _, record)| record[0].clone())
            .collect::<Vec<_>>();
        assert!(names.contains(&"set_a".to_string()));
        assert!(names.contains(&"set_b".to_string()));
        // ids are assigned in scan order starting from 1
        assert_eq!(map.iter().map(|(id, _, _)| id).min(), Some(1));
    }

    #[test]
    fn wrong_arity_from_info_getter_is_rejected() {
        let tree = demo_tree();
        let result = DirMap::scan(
            tree.path(),
            "table.csv",
            vec!["name".to_string(), "size".to_string()],
            "demo",
            dir_name_getter,
        );
        assert!(result.is_err());
    }

    #[test]
    fn persisted_pair_round_trips() {
        let tree = demo_tree();
        let out = tempfile::tempdir().unwrap();

        let map = DirMap::scan(
            tree.path(),
            "table.csv",
            vec!["name".to_string()],
            "demo",
            dir_name_getter,
        )
        .unwrap();
        let (table_path, dirs_path) = map.to_files(out.path()).unwrap();
        assert!(table_path.ends_with("dirmap_demo_table.csv"));
        assert!(dirs_path.ends_with("dirmap_demo_dirs.bin"));

        let reloaded =
            DirMap::from_files(&table_path, &dirs_path, "demo").unwrap();
        assert_eq!(reloaded, map);
    }
}
