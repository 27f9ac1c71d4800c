//! Optional per-data-line field extraction.
//!
//! When a run configures expected field prefixes, every data line must
//! consist of exactly that many whitespace-delimited parts, each starting
//! with its positional prefix. The prefixes are stripped exactly once and
//! the remaining values re-joined with the configured separator. Any
//! mismatch is fatal to the run.

use crate::error::SplitError;

/// Validating line transformer. See the module docs for the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStripper {
    prefixes:  Vec<String>,
    separator: String,
}

impl FieldStripper {
    pub fn new(
        prefixes: Vec<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            prefixes,
            separator: separator.into(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Transforms one data line, or fails with the raw line and the
    /// expected prefixes for diagnostics. `line_no` is 1-based.
    pub fn transform(
        &self,
        line: &str,
        line_no: u64,
    ) -> anyhow::Result<String> {
        let parts = line.split_whitespace().collect::<Vec<_>>();
        if parts.len() != self.prefixes.len() {
            return Err(self.mismatch(line, line_no).into());
        }

        let mut values = Vec::with_capacity(parts.len());
        for (part, prefix) in parts.iter().zip(&self.prefixes) {
            match part.strip_prefix(prefix.as_str()) {
                Some(value) => values.push(value),
                None => return Err(self.mismatch(line, line_no).into()),
            }
        }

        Ok(values.join(&self.separator))
    }

    fn mismatch(
        &self,
        line: &str,
        line_no: u64,
    ) -> SplitError {
        SplitError::FieldMismatch {
            line_no,
            line: line.to_owned(),
            expected: self.prefixes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripper() -> FieldStripper {
        FieldStripper::new(vec!["id:".to_string(), "val:".to_string()], "-")
    }

    #[test]
    fn strips_each_prefix_once_and_joins() {
        assert_eq!(stripper().transform("id:7 val:9", 1).unwrap(), "7-9");
        // Repeated prefix substrings in the value survive untouched
        assert_eq!(
            stripper().transform("id:id:7 val:9", 1).unwrap(),
            "id:7-9"
        );
    }

    #[test]
    fn missing_prefix_fails() {
        let err = stripper().transform("id:7 9", 3).unwrap_err();
        match err.downcast_ref::<SplitError>() {
            Some(SplitError::FieldMismatch {
                line_no,
                line,
                expected,
            }) => {
                assert_eq!(*line_no, 3);
                assert_eq!(line, "id:7 9");
                assert_eq!(expected, &["id:", "val:"]);
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_field_count_fails() {
        assert!(stripper().transform("id:7", 1).is_err());
        assert!(stripper().transform("id:7 val:9 extra", 1).is_err());
    }

    #[test]
    fn transform_is_deterministic() {
        let first = stripper().transform("id:7 val:9", 1).unwrap();
        let second = stripper().transform("id:7 val:9", 99).unwrap();
        assert_eq!(first, second);
    }
}
