/// Sigil introducing a new top-level group.
pub const GROUP_SIGIL: &str = ">>";
/// Sigil introducing a new item within the current group.
pub const ITEM_SIGIL: &str = ">";

/// Classification of one trimmed, non-blank input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Starts with [`GROUP_SIGIL`]; the line itself becomes the group
    /// header carried into every segment of that group.
    Group,
    /// Starts with [`ITEM_SIGIL`] (but not [`GROUP_SIGIL`]).
    Item,
    /// Any other non-blank line; belongs to the most recent item.
    Data,
}

impl LineKind {
    /// The group sigil is a strict prefix-superset of the item sigil, so
    /// group must be tested first.
    pub fn classify(line: &str) -> LineKind {
        if line.starts_with(GROUP_SIGIL) {
            LineKind::Group
        }
        else if line.starts_with(ITEM_SIGIL) {
            LineKind::Item
        }
        else {
            LineKind::Data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_precedence() {
        assert_eq!(LineKind::classify(">>ID1"), LineKind::Group);
        assert_eq!(LineKind::classify(">1"), LineKind::Item);
        assert_eq!(LineKind::classify("id:7 val:9"), LineKind::Data);
        // A bare item sigil is still an item marker, not data
        assert_eq!(LineKind::classify(">"), LineKind::Item);
        assert_eq!(LineKind::classify(">>"), LineKind::Group);
    }
}
