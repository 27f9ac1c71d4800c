//! Structured run metadata sinks.
//!
//! A split run appends one [`SplitEvent`] per lifecycle step to an injected
//! [`RunLog`]: the settings it started with, one record per flushed
//! segment, and a final summary (or the failure that ended the run). Event
//! order matches processing order exactly. The log is append-only and has
//! no further lifecycle.

use std::fs::{
    File,
    OpenOptions,
};
use std::io::{
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::Segment;
use crate::io::split::{
    SplitConfig,
    SplitSummary,
};
use crate::utils::{
    create_new,
    timestamp,
};

/// One run-log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SplitEvent {
    /// Run accepted: the exact settings and the package that produced the
    /// artifacts. `input` and `output_prefix` are absent for sinks and
    /// sources without a filesystem identity.
    Started {
        package:       String,
        version:       String,
        started_at:    String,
        input:         Option<String>,
        output_prefix: Option<String>,
        settings:      SplitConfig,
    },
    /// One segment flushed to the sink.
    SegmentWritten {
        index: u64,
        label: String,
        lines: usize,
        items: usize,
    },
    /// The run ended early; prior segments remain valid and immutable.
    Failed { message: String },
    /// Run completed with the final totals.
    Finished {
        finished_at: String,
        summary:     SplitSummary,
    },
}

impl SplitEvent {
    pub fn started(
        config: &SplitConfig,
        input: Option<String>,
        output_prefix: Option<String>,
    ) -> Self {
        SplitEvent::Started {
            package: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: timestamp(),
            input,
            output_prefix,
            settings: config.clone(),
        }
    }

    pub fn segment(
        segment: &Segment,
        label: String,
    ) -> Self {
        SplitEvent::SegmentWritten {
            index: segment.index(),
            label,
            lines: segment.len(),
            items: segment.item_count(),
        }
    }

    pub fn failed(err: &anyhow::Error) -> Self {
        SplitEvent::Failed {
            message: format!("{err:#}"),
        }
    }

    pub fn finished(summary: &SplitSummary) -> Self {
        SplitEvent::Finished {
            finished_at: timestamp(),
            summary:     *summary,
        }
    }
}

/// Append-only sink for run events. There is only ever one writer per run,
/// so implementations need no coordination.
pub trait RunLog {
    fn record(
        &mut self,
        event: SplitEvent,
    ) -> anyhow::Result<()>;
}

/// JSON-lines run log on disk, one event per line, flushed per record.
#[derive(Debug)]
pub struct FileRunLog {
    path:   PathBuf,
    writer: BufWriter<File>,
}

impl FileRunLog {
    /// Creates the log with create-new semantics; an existing file aborts
    /// instead of being overwritten.
    pub fn create(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let file = create_new(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Opens an existing log for appending, creating it if absent.
    pub fn append(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunLog for FileRunLog {
    fn record(
        &mut self,
        event: SplitEvent,
    ) -> anyhow::Result<()> {
        let line = serde_json::to_string(&event)?;
        writeln!(self.writer, "{line}")
            .and_then(|_| self.writer.flush())
            .with_context(|| {
                format!("failed to append to {}", self.path.display())
            })
    }
}

/// In-memory log for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRunLog {
    events: Vec<SplitEvent>,
}

impl MemoryRunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SplitEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SplitEvent> {
        self.events
    }
}

impl RunLog for MemoryRunLog {
    fn record(
        &mut self,
        event: SplitEvent,
    ) -> anyhow::Result<()> {
        self.events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::BufRead;

    use super::*;

    #[test]
    fn file_log_appends_parseable_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_log.txt");

        let mut log = FileRunLog::create(&path).unwrap();
        log.record(SplitEvent::started(&SplitConfig::default(), None, None))
            .unwrap();
        log.record(SplitEvent::finished(&SplitSummary {
            lines_total:    0,
            segments_total: 0,
        }))
        .unwrap();
        drop(log);

        let lines = std::io::BufReader::new(File::open(&path).unwrap())
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(lines.len(), 2);

        let first: SplitEvent = serde_json::from_str(&lines[0]).unwrap();
        assert!(matches!(first, SplitEvent::Started { .. }));
        let last: SplitEvent = serde_json::from_str(&lines[1]).unwrap();
        assert!(matches!(last, SplitEvent::Finished { .. }));
    }

    #[test]
    fn create_refuses_existing_log() {
        use crate::error::SplitError;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_log.txt");
        std::fs::write(&path, "previous run").unwrap();

        let err = FileRunLog::create(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::OutputExists(_))
        ));
    }
}
