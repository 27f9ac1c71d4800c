pub use crate::data_structs::{
    LineKind,
    Segment,
    GROUP_SIGIL,
    ITEM_SIGIL,
};
pub use crate::dirmap::DirMap;
pub use crate::error::SplitError;
#[cfg(feature = "compression")]
pub use crate::io::compression::{
    compress_file,
    zipped_lines,
    zipped_manifest,
    DEFAULT_LEVEL,
};
pub use crate::io::discover::{
    find_dirs,
    find_files,
};
pub use crate::io::filelist::{
    copy_matching,
    read_manifest,
    write_manifest,
    PatternParts,
    MANIFEST_NAME,
};
pub use crate::io::split::{
    split_file,
    split_to_sink,
    FsSegmentSink,
    MemorySink,
    SegmentReader,
    SegmentSink,
    SplitConfig,
    SplitSummary,
    DEFAULT_MAX_ITEMS,
    DEFAULT_SEPARATOR,
};
pub use crate::io::transform::FieldStripper;
pub use crate::run_log::{
    FileRunLog,
    MemoryRunLog,
    RunLog,
    SplitEvent,
};
pub use crate::utils::{
    run_log_path,
    segment_path,
    timestamp,
};
