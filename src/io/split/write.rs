use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use log::info;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::Segment;
use crate::error::SplitError;
use crate::io::split::{
    SegmentReader,
    SplitConfig,
};
use crate::run_log::{
    FileRunLog,
    RunLog,
    SplitEvent,
};
use crate::utils::{
    create_new,
    run_log_path,
    segment_path,
};

/// Totals of one completed split run, mirroring the per-run summary written
/// to the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Non-blank lines consumed from the input.
    pub lines_total:    u64,
    /// Segments flushed to the sink.
    pub segments_total: u64,
}

/// Destination of flushed segments.
///
/// Returns a label identifying where the segment went (a path for
/// filesystem sinks), recorded in the run log.
pub trait SegmentSink {
    fn write_segment(
        &mut self,
        segment: &Segment,
    ) -> anyhow::Result<String>;

    /// Identity of the destination recorded in the run-started event, if
    /// the sink has one.
    fn describe(&self) -> Option<String> {
        None
    }
}

/// Writes each segment to `{prefix}_{index}.txt` with create-new semantics:
/// an existing target aborts the run instead of being overwritten.
pub struct FsSegmentSink {
    prefix: PathBuf,
}

impl FsSegmentSink {
    pub fn new(prefix: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let prefix = prefix.into();
        if prefix.file_name().is_none() {
            return Err(SplitError::InvalidConfig(format!(
                "output prefix {} must end in a file name stem",
                prefix.display()
            ))
            .into());
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }
}

impl SegmentSink for FsSegmentSink {
    fn write_segment(
        &mut self,
        segment: &Segment,
    ) -> anyhow::Result<String> {
        let path = segment_path(&self.prefix, segment.index());
        let file = create_new(&path)?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(segment.contents().as_bytes())
            .and_then(|_| writer.flush())
            .with_context(|| {
                format!(
                    "failed to write segment {} to {}",
                    segment.index(),
                    path.display()
                )
            })?;

        Ok(path.display().to_string())
    }

    fn describe(&self) -> Option<String> {
        Some(self.prefix.display().to_string())
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    segments: Vec<Segment>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

impl SegmentSink for MemorySink {
    fn write_segment(
        &mut self,
        segment: &Segment,
    ) -> anyhow::Result<String> {
        let label = format!("memory:{}", segment.index());
        self.segments.push(segment.clone());
        Ok(label)
    }
}

/// Drives one split run: reads `source`, writes every flushed segment
/// through `sink` and records one event per flush in `log`. `input` is the
/// identity of the source for the run-started record, when it has one.
///
/// Configuration errors abort before any I/O or logging. A validation error
/// mid-stream is recorded in the log and propagated; segments flushed
/// before it remain valid and immutable.
pub fn split_to_sink<B, S, L>(
    source: B,
    input: Option<&Path>,
    config: SplitConfig,
    sink: &mut S,
    log: &mut L,
) -> anyhow::Result<SplitSummary>
where
    B: BufRead,
    S: SegmentSink + ?Sized,
    L: RunLog + ?Sized, {
    config.validate()?;
    log.record(SplitEvent::started(
        &config,
        input.map(|path| path.display().to_string()),
        sink.describe(),
    ))?;

    let mut reader = SegmentReader::new(source, config)?;
    let mut segments_total = 0u64;

    for next in reader.by_ref() {
        match next {
            Ok(segment) => {
                let label = sink.write_segment(&segment)?;
                log.record(SplitEvent::segment(&segment, label))?;
                segments_total += 1;
            },
            Err(err) => {
                log.record(SplitEvent::failed(&err))?;
                return Err(err);
            },
        }
    }

    let summary = SplitSummary {
        lines_total: reader.lines_total(),
        segments_total,
    };
    info!(
        "recognized {} non-blank lines, saved into {} segments",
        summary.lines_total, summary.segments_total
    );
    log.record(SplitEvent::finished(&summary))?;
    Ok(summary)
}

/// Splits `input` into `{prefix}_{n}.txt` segment files with the run log at
/// `{prefix}_log.txt`, both create-only.
pub fn split_file(
    input: &Path,
    prefix: &Path,
    config: SplitConfig,
) -> anyhow::Result<SplitSummary> {
    config.validate()?;

    let mut log = FileRunLog::create(run_log_path(prefix))?;
    let mut sink = FsSegmentSink::new(prefix)?;
    let source = BufReader::new(
        File::open(input)
            .with_context(|| format!("failed to open {}", input.display()))?,
    );

    split_to_sink(source, Some(input), config, &mut sink, &mut log)
}
