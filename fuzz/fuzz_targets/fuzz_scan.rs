#![no_main]

use libfuzzer_sys::fuzz_target;
use motioncarve::domain::entities::{EoiSearch, ScanConfig};
use motioncarve::domain::services::MotionPhotoScanner;

fuzz_target!(|data: &[u8]| {
    for search in [EoiSearch::Last, EoiSearch::First] {
        let config = ScanConfig::default()
            .with_max_tail_search(4096)
            .with_eoi_search(search);
        let scanner = MotionPhotoScanner::new(config);

        if let Ok(result) = scanner.scan(data) {
            let eoi = result.eoi_offset().unwrap_or(0);
            assert!(eoi >= 2 && eoi <= data.len());
            assert_eq!(&data[eoi - 2..eoi], &[0xFF, 0xD9]);

            if let Some(span) = result.payload() {
                assert!(span.start_offset() >= eoi);
                assert!(span.start_offset() < span.end_offset());
                assert_eq!(span.end_offset(), data.len());
            }
        }
    }
});
