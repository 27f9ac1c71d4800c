use std::path::PathBuf;

use thiserror::Error;

/// Invariant violations of the segmenter and its collaborators.
///
/// Everything else (unreadable input, unwritable output directory) flows as
/// plain I/O errors wrapped with the failing path via [`anyhow::Context`].
/// None of these conditions are retried.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Rejected before any I/O happens.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A data line did not match the expected field layout. Fatal to the
    /// run: skipping or misaligning fields would corrupt downstream
    /// positional semantics.
    #[error(
        "line {line_no}: fields of {line:?} do not match expected prefixes \
         {expected:?}"
    )]
    FieldMismatch {
        line_no:  u64,
        line:     String,
        expected: Vec<String>,
    },

    /// A create-only target already exists. Protects artifacts of a
    /// previous run from silent corruption.
    #[error("output target already exists: {0}")]
    OutputExists(PathBuf),

    /// A manifest header declared a different entry count than was listed.
    #[error("manifest declares {expected} entries but {found} were listed")]
    ManifestMismatch { expected: usize, found: usize },
}
