//! Property tests for the scanner
//!
//! Generated image bytes stay below 0x60, so they never contain `FF D9`
//! or the `ftyp` signature by accident.

use motioncarve::domain::entities::{ContainerKind, ScanConfig, ScanStatus, SourceFile};
use motioncarve::domain::services::{MotionPhotoScanner, ScanError, locate_eoi};
use proptest::prelude::*;

const EOI: [u8; 2] = [0xFF, 0xD9];

fn image_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..0x60, 0..max_len)
}

fn mp4_box(body_len: usize) -> Vec<u8> {
    let mut data = ((body_len + 8) as u32).to_be_bytes().to_vec();
    data.extend_from_slice(b"ftyp");
    data.extend(std::iter::repeat_n(0x11, body_len));
    data
}

proptest! {
    #[test]
    fn marker_at_end_means_no_payload(image in image_bytes(2048)) {
        let mut data = image;
        data.extend_from_slice(&EOI);

        let result = MotionPhotoScanner::default().scan(&data).unwrap();
        prop_assert_eq!(result.eoi_offset(), Some(data.len()));
        prop_assert_eq!(result.status(), ScanStatus::NoPayloadFound);
        prop_assert!(result.payload().is_none());
    }

    #[test]
    fn last_marker_ends_the_image(parts in prop::collection::vec(image_bytes(256), 1..6)) {
        let mut data = Vec::new();
        let mut expected = 0;
        for part in &parts {
            data.extend_from_slice(part);
            data.extend_from_slice(&EOI);
            expected = data.len();
        }
        data.extend_from_slice(&[0x00; 3]);

        prop_assert_eq!(locate_eoi(&data), Ok(expected));
    }

    #[test]
    fn missing_marker_is_not_a_jpeg(image in image_bytes(4096)) {
        prop_assert_eq!(MotionPhotoScanner::default().scan(&image), Err(ScanError::NotAJpeg));
    }

    #[test]
    fn carved_payload_is_the_exact_tail(
        image in image_bytes(1024),
        padding in 0usize..64,
        body_len in 0usize..512,
    ) {
        let mut data = image;
        data.extend_from_slice(&EOI);
        let eoi = data.len();
        data.extend(std::iter::repeat_n(0u8, padding));
        let box_start = data.len();
        data.extend(mp4_box(body_len));

        let source = SourceFile::from_vec("p.jpg", data.clone());
        let outcome = MotionPhotoScanner::default().extract(&source).unwrap().unwrap();
        let span = *outcome.span();

        prop_assert!(span.start_offset() >= eoi);
        prop_assert_eq!(span.start_offset(), box_start);
        prop_assert_eq!(span.end_offset(), data.len());
        prop_assert_eq!(span.container_kind(), ContainerKind::Mp4);
        prop_assert_eq!(outcome.payload(), &data[box_start..]);
    }

    #[test]
    fn signature_outside_window_is_not_found(
        padding in 0usize..256,
        max_tail in 1usize..300,
    ) {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&EOI);
        data.extend(std::iter::repeat_n(0u8, padding));
        data.extend(mp4_box(16));

        let scanner = MotionPhotoScanner::new(ScanConfig::default().with_max_tail_search(max_tail));
        let result = scanner.scan(&data).unwrap();

        // `ftyp` occupies tail offsets padding + 4 .. padding + 8
        let inside = padding + 8 <= max_tail;
        prop_assert_eq!(result.payload().is_some(), inside);
        if let Some(span) = result.payload() {
            prop_assert_eq!(span.start_offset(), 4 + padding);
        }
    }

    #[test]
    fn untagged_files_are_skipped_when_tag_required(
        image in image_bytes(1024),
        body_len in 0usize..128,
    ) {
        let mut data = image;
        data.extend_from_slice(&EOI);
        data.extend(mp4_box(body_len));

        let scanner = MotionPhotoScanner::new(ScanConfig::default().with_required_motion_tag(true));
        let result = scanner.scan(&data).unwrap();

        prop_assert_eq!(result.status(), ScanStatus::SkippedNoMotionTag);
        prop_assert!(result.payload().is_none());
    }
}
