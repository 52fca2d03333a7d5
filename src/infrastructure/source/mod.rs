//! Source file discovery and loading

mod jpeg_directory_lister;
mod mmap_source_reader;

pub use jpeg_directory_lister::{JPEG_EXTENSIONS, JpegDirectoryLister, is_jpeg_path};
pub use mmap_source_reader::MmapSourceReader;
