//! Boundary locator
//!
//! Finds where the primary JPEG image stream ends.

use super::scanner::ScanError;
use crate::domain::entities::EoiSearch;
use memchr::memmem;

/// JPEG start-of-image marker
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
/// JPEG end-of-image marker
pub const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Returns the offset immediately after the last end-of-image marker
///
/// Thumbnails and previews stored in the metadata carry their own
/// `FF D9`, so only the final occurrence ends the primary image. A buffer
/// that ends exactly on the marker yields `data.len()`.
///
/// # Example
///
/// ```
/// use motioncarve::domain::services::locate_eoi;
///
/// let data = [0xFF, 0xD8, 0xFF, 0xD9, 0x00, 0xFF, 0xD9];
/// assert_eq!(locate_eoi(&data), Ok(7));
/// ```
pub fn locate_eoi(data: &[u8]) -> Result<usize, ScanError> {
    locate_eoi_with(data, EoiSearch::Last)
}

/// Same as [`locate_eoi`] with an explicit marker selection
pub fn locate_eoi_with(data: &[u8], search: EoiSearch) -> Result<usize, ScanError> {
    let position = match search {
        EoiSearch::Last => memmem::rfind(data, &JPEG_EOI),
        EoiSearch::First => memmem::find(data, &JPEG_EOI),
    };

    position
        .map(|pos| pos + JPEG_EOI.len())
        .ok_or(ScanError::NotAJpeg)
}
