//! Domain services
//!
//! The three scanning stages and the scanner that chains them.

mod boundary_locator;
mod motion_tag_validator;
mod payload_carver;
mod scanner;
mod xmp;

pub use boundary_locator::{JPEG_EOI, JPEG_SOI, locate_eoi, locate_eoi_with};
pub use motion_tag_validator::{MOTION_TAGS, MotionTagValidator};
pub use payload_carver::{PayloadCarver, TailProbe, VIDEO_BOX_NAMES};
pub use scanner::{MotionPhotoScanner, ScanError};
pub use xmp::{XMP_NAMESPACE, xmp_packets};
