//! Small helpers shared across the crate: output-path derivation for the
//! segment naming scheme and create-only file opening.

use std::ffi::OsString;
use std::fs::{
    File,
    OpenOptions,
};
use std::io;
use std::path::{
    Path,
    PathBuf,
};

use crate::error::SplitError;

/// Path of the `index`-th segment for an output prefix:
/// `{prefix}_{index}.txt`.
pub fn segment_path(
    prefix: &Path,
    index: u64,
) -> PathBuf {
    suffixed_path(prefix, &index.to_string())
}

/// Path of the run log for an output prefix: `{prefix}_log.txt`.
pub fn run_log_path(prefix: &Path) -> PathBuf {
    suffixed_path(prefix, "log")
}

fn suffixed_path(
    prefix: &Path,
    suffix: &str,
) -> PathBuf {
    let mut name = prefix
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(format!("_{suffix}.txt"));
    prefix.with_file_name(name)
}

/// RFC 3339 timestamp of the current instant, UTC.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Opens `path` for writing with create-new semantics. An existing target
/// is a [`SplitError::OutputExists`], never an overwrite.
pub(crate) fn create_new(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| {
            if err.kind() == io::ErrorKind::AlreadyExists {
                SplitError::OutputExists(path.to_path_buf()).into()
            }
            else {
                anyhow::Error::new(err)
                    .context(format!("failed to create {}", path.display()))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_paths_follow_prefix() {
        assert_eq!(
            segment_path(Path::new("out/chunk"), 3),
            PathBuf::from("out/chunk_3.txt")
        );
        assert_eq!(segment_path(Path::new("chunk"), 1), PathBuf::from("chunk_1.txt"));
        assert_eq!(
            run_log_path(Path::new("out/chunk")),
            PathBuf::from("out/chunk_log.txt")
        );
    }

    #[test]
    fn create_new_refuses_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("chunk_1.txt");

        create_new(&target).unwrap();
        let err = create_new(&target).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::OutputExists(_))
        ));
    }
}
