use std::io::BufRead;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::SplitError;
use crate::io::split::SegmentReader;
use crate::io::transform::FieldStripper;

/// Default maximum number of items per segment.
pub const DEFAULT_MAX_ITEMS: usize = 500;
/// Default separator joining transformed field values.
pub const DEFAULT_SEPARATOR: &str = "\t";

/// Settings of one split run.
///
/// `max_items` bounds the number of item markers per segment; once a group's
/// running item counter reaches it, the next item marker opens a fresh
/// segment seeded with the group header. `field_prefixes`, when non-empty,
/// enable the per-data-line [`FieldStripper`] with `separator` joining the
/// stripped values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    max_items:      usize,
    field_prefixes: Vec<String>,
    separator:      String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_items:      DEFAULT_MAX_ITEMS,
            field_prefixes: Vec::new(),
            separator:      DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl SplitConfig {
    pub fn with_max_items(
        mut self,
        max_items: usize,
    ) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_field_prefixes(
        mut self,
        field_prefixes: Vec<String>,
    ) -> Self {
        self.field_prefixes = field_prefixes;
        self
    }

    pub fn with_separator(
        mut self,
        separator: impl Into<String>,
    ) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn field_prefixes(&self) -> &[String] {
        &self.field_prefixes
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Rejects unusable settings before any I/O happens.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_items == 0 {
            return Err(SplitError::InvalidConfig(
                "max_items must be greater than zero".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// The configured line transformer, or `None` for pass-through.
    pub fn transformer(&self) -> Option<FieldStripper> {
        if self.field_prefixes.is_empty() {
            None
        }
        else {
            Some(FieldStripper::new(
                self.field_prefixes.clone(),
                self.separator.clone(),
            ))
        }
    }

    /// Consumes the config into a [`SegmentReader`] over `source`.
    pub fn into_reader<B: BufRead>(
        self,
        source: B,
    ) -> anyhow::Result<SegmentReader<B>> {
        SegmentReader::new(source, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_items_is_rejected() {
        let err = SplitConfig::default()
            .with_max_items(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_prefix_list_means_no_transformer() {
        assert!(SplitConfig::default().transformer().is_none());
        assert!(SplitConfig::default()
            .with_field_prefixes(vec!["id:".to_string()])
            .transformer()
            .is_some());
    }
}
