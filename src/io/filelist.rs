//! Directory manifests and query-driven file copying.
//!
//! A dataset directory carries a `0.filelist` manifest: an `itemnum: N`
//! header followed by one entry name per line. Listing skips dotfiles and
//! `0`-prefixed entries, which keeps the manifest itself out of its own
//! listing. Reading validates the declared count when the header is
//! present.

use std::fs::{
    self,
    File,
};
use std::io::{
    BufRead,
    BufReader,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    anyhow,
    Context,
};
use itertools::Itertools;
use log::warn;

use crate::error::SplitError;
use crate::io::discover::find_files;

/// Manifest file name inside a dataset directory.
pub const MANIFEST_NAME: &str = "0.filelist";

const ITEMNUM_KEY: &str = "itemnum:";

/// Writes the `0.filelist` manifest for `dir` and returns the listed entry
/// names, sorted. Dotfiles and `0`-prefixed entries are excluded.
pub fn write_manifest(dir: &Path) -> anyhow::Result<Vec<String>> {
    let names = fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.') && !name.starts_with('0'))
        .sorted()
        .collect_vec();

    let path = dir.join(MANIFEST_NAME);
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "{ITEMNUM_KEY} {}", names.len())?;
    for name in &names {
        writeln!(file, "{name}")?;
    }

    Ok(names)
}

/// Reads a manifest (or any plain one-name-per-line list) from `path`.
pub fn read_manifest(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    parse_manifest(BufReader::new(file))
        .with_context(|| format!("invalid manifest {}", path.display()))
}

/// Parses manifest lines, validating the `itemnum:` count when present.
pub(crate) fn parse_manifest<R: BufRead>(reader: R) -> anyhow::Result<Vec<String>> {
    let mut expected = None;
    let mut names = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(ITEMNUM_KEY) {
            expected = Some(
                rest.trim()
                    .parse::<usize>()
                    .with_context(|| format!("bad itemnum value {rest:?}"))?,
            );
        }
        else {
            names.push(line.to_owned());
        }
    }

    if let Some(expected) = expected {
        if expected != names.len() {
            return Err(SplitError::ManifestMismatch {
                expected,
                found: names.len(),
            }
            .into());
        }
    }
    Ok(names)
}

/// Wildcard pattern around a query string: absent sides become `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternParts {
    prefix: Option<String>,
    suffix: Option<String>,
}

impl PatternParts {
    pub fn new(
        prefix: Option<String>,
        suffix: Option<String>,
    ) -> Self {
        Self { prefix, suffix }
    }

    pub fn pattern(
        &self,
        query: &str,
    ) -> String {
        match (self.prefix.as_deref(), self.suffix.as_deref()) {
            (None, None) => format!("*{query}*"),
            (None, Some(suffix)) => format!("*{query}{suffix}"),
            (Some(prefix), None) => format!("{prefix}{query}*"),
            (Some(prefix), Some(suffix)) => format!("{prefix}{query}{suffix}"),
        }
    }
}

/// Copies every file under `top` matching one of the `queries` (expanded
/// through `parts`) into `out_dir`. Queries without a single hit are
/// reported with a warning, not an error. Returns the copied file count.
pub fn copy_matching(
    queries: &[String],
    top: &Path,
    out_dir: &Path,
    parts: &PatternParts,
) -> anyhow::Result<usize> {
    let mut copied = 0usize;

    for query in queries {
        let pattern = parts.pattern(query);
        let mut found = 0usize;

        for source in find_files(top, &pattern)? {
            let name = source
                .file_name()
                .map(PathBuf::from)
                .ok_or_else(|| {
                    anyhow!("source {} has no file name", source.display())
                })?;
            let target = out_dir.join(name);
            fs::copy(&source, &target).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    source.display(),
                    target.display()
                )
            })?;
            found += 1;
        }

        if found == 0 {
            warn!("{} not found under {}", pattern, top.display());
        }
        copied += found;
    }

    Ok(copied)
}
