use std::fs;
use std::io::Cursor;

use nestsplit::prelude::*;

const DEMO_INPUT: &str = ">>G1\n>1\nA B\n>2\nC D\n>>G2\n>1\nE F\n";

#[test]
fn split_file_writes_segments_and_run_log() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.txt");
    fs::write(&input, DEMO_INPUT).unwrap();
    let prefix = dir.path().join("chunk");

    let config = SplitConfig::default().with_max_items(1);
    let summary = split_file(&input, &prefix, config).unwrap();
    assert_eq!(summary.segments_total, 3);

    assert_eq!(
        fs::read_to_string(dir.path().join("chunk_1.txt")).unwrap(),
        ">>G1\n>1\nA B\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("chunk_2.txt")).unwrap(),
        ">>G1\n>2\nC D\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("chunk_3.txt")).unwrap(),
        ">>G2\n>1\nE F\n"
    );
    assert!(!dir.path().join("chunk_4.txt").exists());

    let log = fs::read_to_string(dir.path().join("chunk_log.txt")).unwrap();
    let events = log
        .lines()
        .map(serde_json::from_str::<SplitEvent>)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    match events.first() {
        Some(SplitEvent::Started {
            input,
            output_prefix,
            ..
        }) => {
            assert!(input.as_deref().is_some_and(|p| p.ends_with("records.txt")));
            assert!(output_prefix
                .as_deref()
                .is_some_and(|p| p.ends_with("chunk")));
        },
        other => panic!("unexpected first event: {other:?}"),
    }
    assert!(matches!(
        events.last(),
        Some(SplitEvent::Finished { summary, .. }) if summary.segments_total == 3
    ));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, SplitEvent::SegmentWritten { .. }))
            .count(),
        3
    );
}

/// A second run with the same prefix must fail on the first collision
/// instead of silently overwriting artifacts of the first run.
#[test]
fn rerun_with_same_prefix_collides() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.txt");
    fs::write(&input, DEMO_INPUT).unwrap();
    let prefix = dir.path().join("chunk");

    split_file(&input, &prefix, SplitConfig::default()).unwrap();
    let err =
        split_file(&input, &prefix, SplitConfig::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SplitError>(),
        Some(SplitError::OutputExists(_))
    ));
}

#[test]
fn existing_segment_target_aborts_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("chunk");
    fs::write(dir.path().join("chunk_2.txt"), "previous run").unwrap();

    let mut sink = FsSegmentSink::new(&prefix).unwrap();
    let mut log = MemoryRunLog::default();
    let err = split_to_sink(
        Cursor::new(DEMO_INPUT.to_owned()),
        None,
        SplitConfig::default().with_max_items(1),
        &mut sink,
        &mut log,
    )
    .unwrap_err();

    match err.downcast_ref::<SplitError>() {
        Some(SplitError::OutputExists(path)) => {
            assert!(path.ends_with("chunk_2.txt"));
        },
        other => panic!("unexpected error: {other:?}"),
    }

    // The colliding file is untouched and the first segment stays valid
    assert_eq!(
        fs::read_to_string(dir.path().join("chunk_2.txt")).unwrap(),
        "previous run"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("chunk_1.txt")).unwrap(),
        ">>G1\n>1\nA B\n"
    );
}
