mod config;
mod read;
mod write;

pub use config::{
    SplitConfig,
    DEFAULT_MAX_ITEMS,
    DEFAULT_SEPARATOR,
};
pub use read::SegmentReader;
pub use write::{
    split_file,
    split_to_sink,
    FsSegmentSink,
    MemorySink,
    SegmentSink,
    SplitSummary,
};
