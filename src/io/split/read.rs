use std::io::{
    self,
    BufRead,
};

use log::debug;

use crate::data_structs::{
    LineKind,
    Segment,
};
use crate::io::split::SplitConfig;
use crate::io::transform::FieldStripper;

/// Single-pass segmenter over a line source.
///
/// Yields [`Segment`]s in flush order. A segment is closed exactly when a
/// new group marker arrives while the buffer is non-empty, when an item
/// marker overflows the configured maximum (the arriving item line then
/// opens the next segment, seeded with the current group header), or when
/// the stream is exhausted. The iterator fuses after the first error.
pub struct SegmentReader<B> {
    source:         B,
    max_items:      usize,
    transformer:    Option<FieldStripper>,
    group_header:   Option<String>,
    items_in_group: usize,
    pending:        Vec<String>,
    pending_items:  usize,
    next_index:     u64,
    line_no:        u64,
    lines_total:    u64,
    done:           bool,
}

impl<B: BufRead> SegmentReader<B> {
    pub fn new(
        source: B,
        config: SplitConfig,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            max_items: config.max_items(),
            transformer: config.transformer(),
            group_header: None,
            items_in_group: 0,
            pending: Vec::new(),
            pending_items: 0,
            next_index: 1,
            line_no: 0,
            lines_total: 0,
            done: false,
        })
    }

    /// Non-blank lines consumed so far.
    pub fn lines_total(&self) -> u64 {
        self.lines_total
    }

    /// Input lines read so far, blank ones included.
    pub fn line_no(&self) -> u64 {
        self.line_no
    }

    /// Next non-blank line, trimmed of enclosing whitespace. `None` on
    /// stream exhaustion.
    fn read_trimmed(&mut self) -> io::Result<Option<String>> {
        let mut raw = String::new();
        loop {
            raw.clear();
            if self.source.read_line(&mut raw)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
    }

    /// Closes the segment under construction, if any, assigning it the next
    /// sequence number.
    fn take_pending(&mut self) -> Option<Segment> {
        if self.pending.is_empty() {
            return None;
        }

        let lines = std::mem::take(&mut self.pending);
        let item_count = std::mem::take(&mut self.pending_items);
        let index = self.next_index;
        self.next_index += 1;

        debug!(
            "closing segment {index} with {} lines ({item_count} items)",
            lines.len()
        );
        Some(Segment::new(index, lines, item_count))
    }
}

impl<B: BufRead> Iterator for SegmentReader<B> {
    type Item = anyhow::Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = match self.read_trimmed() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.done = true;
                    return self.take_pending().map(Ok);
                },
                Err(err) => {
                    self.done = true;
                    return Some(Err(anyhow::Error::new(err).context(format!(
                        "failed to read input line {}",
                        self.line_no + 1
                    ))));
                },
            };

            let flushed = match LineKind::classify(&line) {
                LineKind::Group => {
                    // Flush before touching state: the marker itself belongs
                    // to the next segment.
                    let flushed = self.take_pending();
                    self.items_in_group = 0;
                    self.group_header = Some(line.clone());
                    self.pending.push(line);
                    flushed
                },
                LineKind::Item => {
                    let mut flushed = None;
                    if self.items_in_group >= self.max_items {
                        flushed = self.take_pending();
                        // Continuation segments repeat the group header so
                        // every output file stays independently parseable.
                        if let Some(header) = &self.group_header {
                            self.pending.push(header.clone());
                        }
                        self.items_in_group = 0;
                    }
                    self.items_in_group += 1;
                    self.pending_items += 1;
                    self.pending.push(line);
                    flushed
                },
                LineKind::Data => {
                    let text = if let Some(transformer) = &self.transformer {
                        match transformer.transform(&line, self.line_no) {
                            Ok(text) => text,
                            Err(err) => {
                                self.done = true;
                                return Some(Err(err));
                            },
                        }
                    }
                    else {
                        line
                    };
                    self.pending.push(text);
                    None
                },
            };
            self.lines_total += 1;

            if let Some(segment) = flushed {
                return Some(Ok(segment));
            }
        }
    }
}
