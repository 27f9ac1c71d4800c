//! # nestsplit
//!
//! `nestsplit` is a Rust library and command-line tool for splitting huge
//! line-oriented record files into bounded segments and for managing the
//! tree-structured dataset directories those files live in.
//!
//! The input format is a two-level nested record stream: a group marker line
//! (`>>` sigil) introduces a top-level record, item marker lines (`>` sigil)
//! introduce sub-records within it, and every other non-blank line is data
//! belonging to the most recent item. The segmenter re-emits such a stream as
//! a sequence of bounded output files without ever corrupting the logical
//! structure: output switches on group boundaries, and when a single group
//! holds more items than the configured maximum, the group marker line is
//! repeated at the top of every continuation segment so each output file
//! remains independently parseable.
//!
//! ## Key Features
//!
//! * **Streaming segmentation**: a single forward pass over inputs far too
//!   large to buffer, with O(segment) memory ([`SegmentReader`],
//!   [`split_to_sink`]).
//! * **Strict output safety**: segment files and run logs are created with
//!   create-new semantics and never overwrite artifacts of a previous run.
//! * **Fail-fast field validation**: an optional per-data-line transformer
//!   strips expected positional prefixes and aborts the whole run on the
//!   first malformed line ([`FieldStripper`]).
//! * **Injectable collaborators**: output sinks ([`SegmentSink`]) and run
//!   logs ([`RunLog`]) are traits, so the core is testable without touching
//!   the filesystem.
//! * **Dataset plumbing**: pattern-driven file and directory discovery,
//!   `0.filelist` directory manifests, query-based file copying, and a
//!   [`DirMap`] table persisted as CSV plus a binary id-to-path mapping.
//! * **Compression utilities** (feature `compression`): whole-file bzip2
//!   compression and listing of zipped dataset folders.
//!
//! ## Structure
//!
//! * [`data_structs`]: line classification ([`LineKind`]) and the bounded
//!   output unit ([`Segment`]).
//! * [`io`]: the segmenter ([`io::split`]), the line transformer
//!   ([`io::transform`]), discovery ([`io::discover`]), directory manifests
//!   ([`io::filelist`]) and compression utilities ([`io::compression`],
//!   feature-gated).
//! * [`dirmap`]: tabular mapping of dataset directories.
//! * [`run_log`]: structured run metadata sinks.
//!
//! ## Usage
//!
//! ### Splitting a stream in memory
//!
//! ```
//! use std::io::Cursor;
//!
//! use nestsplit::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = ">>G1\n>1\nA B\n>2\nC D\n>>G2\n>1\nE F\n";
//!
//!     let config = SplitConfig::default().with_max_items(1);
//!     let mut sink = MemorySink::default();
//!     let mut log = MemoryRunLog::default();
//!
//!     let summary =
//!         split_to_sink(Cursor::new(input), None, config, &mut sink, &mut log)?;
//!     assert_eq!(summary.segments_total, 3);
//!     assert_eq!(summary.lines_total, 8);
//!
//!     // Continuation of G1 repeats the group header.
//!     assert_eq!(sink.segments()[1].lines(), [">>G1", ">2", "C D"]);
//!     Ok(())
//! }
//! ```
//!
//! ### Splitting a file on disk
//!
//! ```no_run
//! use std::path::Path;
//!
//! use nestsplit::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SplitConfig::default()
//!         .with_max_items(500)
//!         .with_field_prefixes(vec!["id:".to_string(), "val:".to_string()])
//!         .with_separator("\t");
//!
//!     let summary = split_file(
//!         Path::new("data/huge_records.txt"),
//!         Path::new("out/chunk"),
//!         config,
//!     )?;
//!     println!(
//!         "{} lines saved into {} segments",
//!         summary.lines_total, summary.segments_total
//!     );
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod dirmap;
pub mod error;
pub mod io;
pub mod prelude;
pub mod run_log;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
