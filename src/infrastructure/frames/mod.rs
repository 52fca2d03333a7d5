//! Frame extraction adapters

mod ffmpeg_frame_extractor;

pub use ffmpeg_frame_extractor::FfmpegFrameExtractor;
