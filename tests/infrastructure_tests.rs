//! Infrastructure layer tests
//!
//! Tests for discovery, reading, payload writing and report output
//! against a temporary directory.

use motioncarve::application::ExtractVideosUseCase;
use motioncarve::application::dto::{BatchReport, FileReport, FileStatus};
use motioncarve::domain::entities::{
    ContainerKind, ExtractionOutcome, PayloadSpan, ScanConfig, SourceFile,
};
use motioncarve::domain::repositories::{PayloadWriter, SourceReadError, SourceReader};
use motioncarve::infrastructure::persistence::{JsonReportWriter, LocalPayloadWriter};
use motioncarve::infrastructure::source::{JpegDirectoryLister, MmapSourceReader, is_jpeg_path};
use rstest::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn motion_photo() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend_from_slice(b"<GCamera:MotionPhoto>1</GCamera:MotionPhoto>");
    data.extend_from_slice(&[0x42; 128]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data.extend_from_slice(&[0, 0, 0, 20]);
    data.extend_from_slice(b"ftypmp42");
    data.extend_from_slice(&[0x33; 8]);
    data
}

fn outcome_for(name: &str) -> ExtractionOutcome {
    let source = SourceFile::from_vec(name, motion_photo());
    let start = source.len() - 20;
    let span = PayloadSpan::new(start, source.len(), ContainerKind::Mp4, source.len()).unwrap();
    ExtractionOutcome::carve(&source, span)
}

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn photo_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("a.jpg"), motion_photo()).unwrap();
    fs::write(root.join("B.JPEG"), [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
    fs::write(root.join("notes.txt"), b"hello").unwrap();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("c.Jpg"), motion_photo()).unwrap();
    fs::create_dir(root.join("_extracted_videos")).unwrap();
    fs::write(root.join("_extracted_videos").join("old.jpg"), b"x").unwrap();

    temp
}

fn names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

// ============================================================================
// JpegDirectoryLister Tests
// ============================================================================

#[rstest]
#[case("a.jpg", true)]
#[case("a.JPG", true)]
#[case("a.jpeg", true)]
#[case("a.JpEg", true)]
#[case("a.png", false)]
#[case("jpg", false)]
#[case("a.jpg.bak", false)]
fn test_is_jpeg_path(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(is_jpeg_path(Path::new(path)), expected);
}

#[rstest]
fn test_lister_flat(photo_dir: TempDir) {
    let files = JpegDirectoryLister::new().list(photo_dir.path()).unwrap();
    assert_eq!(names(&files), vec!["B.JPEG", "a.jpg"]);
}

#[rstest]
fn test_lister_recursive_skips_output(photo_dir: TempDir) {
    let output = photo_dir.path().join("_extracted_videos");
    let files = JpegDirectoryLister::new()
        .recursive(true)
        .excluding(&output)
        .list(photo_dir.path())
        .unwrap();

    assert_eq!(names(&files), vec!["B.JPEG", "a.jpg", "c.Jpg"]);
}

#[rstest]
fn test_lister_walks_deep_trees(photo_dir: TempDir) {
    let deep = photo_dir.path().join("nested").join("2024").join("07");
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("d.jpeg"), motion_photo()).unwrap();
    let nested_output = photo_dir.path().join("nested").join("_extracted_videos");
    fs::create_dir(&nested_output).unwrap();
    fs::write(nested_output.join("skip.jpg"), b"x").unwrap();

    let files = JpegDirectoryLister::new()
        .recursive(true)
        .excluding(&nested_output)
        .list(photo_dir.path())
        .unwrap();

    assert_eq!(names(&files), vec!["B.JPEG", "old.jpg", "a.jpg", "d.jpeg", "c.Jpg"]);
}

#[rstest]
fn test_lister_single_file(photo_dir: TempDir) {
    let file = photo_dir.path().join("notes.txt");
    let files = JpegDirectoryLister::new().list(&file).unwrap();
    assert_eq!(files, vec![file]);
}

#[rstest]
fn test_lister_missing_input() {
    let temp = TempDir::new().unwrap();
    assert!(JpegDirectoryLister::new().list(&temp.path().join("missing")).is_err());
}

// ============================================================================
// MmapSourceReader Tests
// ============================================================================

#[rstest]
#[case(1)]
#[case(1 << 20)]
fn test_reader_round_trip(photo_dir: TempDir, #[case] min_map_len: u64) {
    let path = photo_dir.path().join("a.jpg");
    let source = MmapSourceReader::new()
        .with_min_map_len(min_map_len)
        .read(&path)
        .unwrap();

    assert_eq!(source.as_slice(), motion_photo().as_slice());
    assert_eq!(source.path(), path.as_path());
}

#[rstest]
fn test_reader_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = MmapSourceReader::new().read(&temp.path().join("nope.jpg"));
    assert!(matches!(result, Err(SourceReadError::NotFound(_))));
}

// ============================================================================
// LocalPayloadWriter Tests
// ============================================================================

#[rstest]
fn test_writer_creates_directory() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("deep").join("videos");

    let writer = LocalPayloadWriter::new(&out, false).unwrap();
    assert!(out.is_dir());
    assert_eq!(writer.output_dir(), out.as_path());
}

#[rstest]
fn test_writer_writes_payload() {
    let temp = TempDir::new().unwrap();
    let writer = LocalPayloadWriter::new(temp.path(), false).unwrap();
    let outcome = outcome_for("/photos/PXL_0001.MP.jpg");

    let path = writer.write(&outcome).unwrap();

    assert_eq!(path, temp.path().join("PXL_0001.MP.mp4"));
    assert_eq!(fs::read(&path).unwrap(), outcome.payload());
    assert_eq!(writer.files_written(), 1);
    assert_eq!(writer.bytes_written(), 20);
}

#[rstest]
fn test_writer_same_stem_gets_suffix() {
    let temp = TempDir::new().unwrap();
    let writer = LocalPayloadWriter::new(temp.path(), false).unwrap();

    let first = writer.write(&outcome_for("/a/photo.jpg")).unwrap();
    let second = writer.write(&outcome_for("/b/photo.JPEG")).unwrap();

    assert_eq!(first, temp.path().join("photo.mp4"));
    assert_eq!(second, temp.path().join("photo_1.mp4"));
}

#[rstest]
#[case(false, "photo_1.mp4")]
#[case(true, "photo.mp4")]
fn test_writer_existing_file(#[case] overwrite: bool, #[case] expected: &str) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("photo.mp4"), b"previous run").unwrap();

    let writer = LocalPayloadWriter::new(temp.path(), overwrite).unwrap();
    let path = writer.write(&outcome_for("photo.jpg")).unwrap();

    assert_eq!(path, temp.path().join(expected));
}

#[rstest]
fn test_writer_unknown_container_is_still_mp4() {
    let temp = TempDir::new().unwrap();
    let writer = LocalPayloadWriter::new(temp.path(), false).unwrap();

    let source = SourceFile::from_vec("odd.jpg", vec![0xFF, 0xD9, 1, 2, 3]);
    let span = PayloadSpan::new(2, 5, ContainerKind::Unknown, 5).unwrap();
    let path = writer.write(&ExtractionOutcome::carve(&source, span)).unwrap();

    assert_eq!(path, temp.path().join("odd.mp4"));
}

#[rstest]
fn test_writer_failure_leaves_no_partial_file() {
    let temp = TempDir::new().unwrap();
    // A directory squatting on the output name makes the final rename fail
    fs::create_dir(temp.path().join("photo.mp4")).unwrap();

    let writer = LocalPayloadWriter::new(temp.path(), true).unwrap();
    assert!(writer.write(&outcome_for("photo.jpg")).is_err());

    let leftovers: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(leftovers, vec!["photo.mp4"]);
    assert!(temp.path().join("photo.mp4").is_dir());
    assert_eq!(writer.files_written(), 0);
}

// ============================================================================
// JsonReportWriter Tests
// ============================================================================

#[rstest]
fn test_report_json_shape() {
    let mut report = BatchReport::new("/photos", "/photos/_extracted_videos", ScanConfig::default());
    report.add_file(FileReport::new(
        "/photos/a.jpg",
        FileStatus::Extracted {
            output: PathBuf::from("/photos/_extracted_videos/a.mp4"),
            bytes: 20,
        },
    ));
    report.add_file(FileReport::new("/photos/b.jpg", FileStatus::NotAJpeg));

    let json = JsonReportWriter.render(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["summary"]["extracted"], 1);
    assert_eq!(value["files"][0]["status"]["kind"], "extracted");
    assert_eq!(value["files"][1]["status"]["kind"], "not_a_jpeg");
    assert_eq!(value["config"]["max_tail_search_bytes"], 512_000);
    assert_eq!(value["config"]["eoi_search"], "last");
}

#[rstest]
fn test_report_written_to_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("reports").join("run.json");
    let report = BatchReport::new(temp.path(), temp.path(), ScanConfig::default());

    JsonReportWriter.write(&path, &report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["summary"]["total"], 0);
}

// ============================================================================
// End-to-end Tests
// ============================================================================

#[rstest]
fn test_extract_directory(photo_dir: TempDir) {
    let output = photo_dir.path().join("_extracted_videos");
    let files = JpegDirectoryLister::new()
        .recursive(true)
        .excluding(&output)
        .list(photo_dir.path())
        .unwrap();

    let writer = LocalPayloadWriter::new(&output, false).unwrap();
    let use_case = ExtractVideosUseCase::new(
        MmapSourceReader::new(),
        writer,
        ScanConfig::default().with_required_motion_tag(true),
    );
    let report = use_case.execute(photo_dir.path(), &files, None);

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.extracted, 2);
    assert_eq!(report.summary.skipped_no_tag, 1);

    let video = fs::read(output.join("a.mp4")).unwrap();
    assert_eq!(&video[4..12], b"ftypmp42");
    assert_eq!(video.len(), 20);
    assert!(output.join("c.mp4").is_file());
}

#[rstest]
fn test_clamped_payload_keeps_kind_in_report() {
    let temp = TempDir::new().unwrap();
    let mut data = vec![0xFF, 0xD8];
    data.extend_from_slice(&[0x42; 32]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data.extend_from_slice(b"ftypisom");
    data.extend_from_slice(&[0x33; 8]);
    let photo = temp.path().join("clamped.jpg");
    fs::write(&photo, &data).unwrap();

    let output = temp.path().join("out");
    let writer = LocalPayloadWriter::new(&output, false).unwrap();
    let use_case = ExtractVideosUseCase::new(MmapSourceReader::new(), writer, ScanConfig::default());
    let report = use_case.execute(temp.path(), &[photo.clone()], None);

    let file = report.file(&photo).unwrap();
    assert_eq!(file.span.unwrap().container_kind(), ContainerKind::Unknown);
    assert_eq!(report.extracted_outputs(), vec![output.join("clamped.mp4")]);
    assert_eq!(fs::read(output.join("clamped.mp4")).unwrap(), &data[36..]);
}
