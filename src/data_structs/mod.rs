mod marker;
mod segment;

pub use marker::{
    LineKind,
    GROUP_SIGIL,
    ITEM_SIGIL,
};
pub use segment::Segment;
