//! Whole-file compression and zipped dataset listing.
//!
//! Both operations treat the archive formats as opaque sinks/sources: a
//! file is bzip2-compressed to a create-only target, and a zipped dataset
//! folder is listed through the `0.filelist` manifest it carries.

use std::fs::File;
use std::io::{
    self,
    BufRead,
    BufReader,
};
use std::path::Path;

use anyhow::{
    anyhow,
    Context,
};
use bzip2::write::BzEncoder;
use zip::ZipArchive;

use crate::io::filelist::{
    parse_manifest,
    MANIFEST_NAME,
};
use crate::utils::create_new;

/// Default bzip2 compression level.
pub const DEFAULT_LEVEL: u32 = 9;

/// Compresses `src` into `dst` with bzip2. The target is created with
/// create-new semantics. Returns the number of input bytes consumed.
pub fn compress_file(
    src: &Path,
    dst: &Path,
    level: u32,
) -> anyhow::Result<u64> {
    let mut input = File::open(src)
        .with_context(|| format!("failed to open {}", src.display()))?;
    let output = create_new(dst)?;

    let mut encoder = BzEncoder::new(output, bzip2::Compression::new(level));
    let bytes = io::copy(&mut input, &mut encoder)
        .with_context(|| format!("failed to compress {}", src.display()))?;
    encoder.finish()?;

    Ok(bytes)
}

/// Entry names listed by the `0.filelist` manifest inside a zipped dataset
/// folder. The archive `{stem}.zip` is expected to contain
/// `{stem}/0.filelist`; the declared count is validated.
pub fn zipped_manifest(zip_path: &Path) -> anyhow::Result<Vec<String>> {
    let stem = zip_stem(zip_path)?;
    let member = format!("{stem}/{MANIFEST_NAME}");

    let mut archive = open_archive(zip_path)?;
    let entry = archive.by_name(&member).with_context(|| {
        format!("{member} missing from {}", zip_path.display())
    })?;

    parse_manifest(BufReader::new(entry))
        .with_context(|| format!("invalid manifest in {}", zip_path.display()))
}

/// Lines of one file inside a zipped dataset folder.
pub fn zipped_lines(
    zip_path: &Path,
    member: &str,
) -> anyhow::Result<Vec<String>> {
    let mut archive = open_archive(zip_path)?;
    let entry = archive.by_name(member).with_context(|| {
        format!("{member} missing from {}", zip_path.display())
    })?;

    BufReader::new(entry)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to read {member} from {}", zip_path.display()))
}

fn zip_stem(zip_path: &Path) -> anyhow::Result<&str> {
    zip_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            anyhow!("zip path {} has no usable stem", zip_path.display())
        })
}

fn open_archive(zip_path: &Path) -> anyhow::Result<ZipArchive<File>> {
    let file = File::open(zip_path)
        .with_context(|| format!("failed to open {}", zip_path.display()))?;
    ZipArchive::new(file)
        .with_context(|| format!("failed to read archive {}", zip_path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::{
        Read,
        Write,
    };

    use bzip2::read::BzDecoder;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    #[test]
    fn bzip2_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("data.txt");
        let dst = dir.path().join("data.txt.bz2");
        std::fs::write(&src, ">>G1\n>1\nA B\n").unwrap();

        let bytes = compress_file(&src, &dst, DEFAULT_LEVEL).unwrap();
        assert_eq!(bytes, 12);

        let mut decoded = String::new();
        BzDecoder::new(File::open(&dst).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, ">>G1\n>1\nA B\n");
    }

    #[test]
    fn existing_compression_target_aborts() {
        use crate::error::SplitError;

        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("data.txt");
        let dst = dir.path().join("data.txt.bz2");
        std::fs::write(&src, "x").unwrap();
        std::fs::write(&dst, "stale").unwrap();

        let err = compress_file(&src, &dst, DEFAULT_LEVEL).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::OutputExists(_))
        ));
    }

    fn demo_archive(dir: &Path) -> std::path::PathBuf {
        let zip_path = dir.join("dataset.zip");
        let mut writer = ZipWriter::new(File::create(&zip_path).unwrap());
        let options = SimpleFileOptions::default();

        writer
            .start_file("dataset/0.filelist", options)
            .unwrap();
        writer
            .write_all(b"itemnum: 2\na.txt\nb.txt\n")
            .unwrap();
        writer.start_file("dataset/a.txt", options).unwrap();
        writer.write_all(b"line1\nline2\n").unwrap();
        writer.finish().unwrap();

        zip_path
    }

    #[test]
    fn zipped_manifest_lists_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = demo_archive(dir.path());

        let names = zipped_manifest(&zip_path).unwrap();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn zipped_lines_reads_a_member() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = demo_archive(dir.path());

        let lines = zipped_lines(&zip_path, "dataset/a.txt").unwrap();
        assert_eq!(lines, ["line1", "line2"]);
    }
}
