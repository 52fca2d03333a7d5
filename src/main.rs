use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use motioncarve::application::dto::{BatchOptions, BatchReport, FileStatus, FrameMode};
use motioncarve::application::{ExtractFramesUseCase, ExtractVideosUseCase};
use motioncarve::infrastructure::frames::FfmpegFrameExtractor;
use motioncarve::infrastructure::persistence::{JsonReportWriter, LocalPayloadWriter};
use motioncarve::infrastructure::source::{JpegDirectoryLister, MmapSourceReader};
use motioncarve::presentation::cli::{Cli, ProgressReporter, confirm_frame_extraction};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let options = cli.batch_options();
    options.validate()?;

    if options.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    run(&options, cli.verbose || cli.debug)
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(options: &BatchOptions, list_files: bool) -> Result<()> {
    let output_dir = options.resolved_output_dir();

    let files = JpegDirectoryLister::new()
        .recursive(options.recursive)
        .excluding(&output_dir)
        .list(&options.input)
        .with_context(|| format!("Failed to list {}", options.input.display()))?;

    println!("Scanning for JPEG files in: {}", options.input.display());
    println!(
        "Motion tag requirement: {}",
        if options.scan.require_motion_tag { "ON" } else { "OFF" }
    );

    if files.is_empty() {
        println!("\n[!] No JPEG files found.");
        return Ok(());
    }

    let writer = LocalPayloadWriter::new(&output_dir, options.overwrite)
        .with_context(|| format!("Failed to prepare output directory {}", output_dir.display()))?;
    let use_case = ExtractVideosUseCase::new(MmapSourceReader::new(), writer, options.scan);

    let progress = ProgressReporter::for_files(files.len() as u64);
    let mut report = use_case.execute(&options.input, &files, Some(progress.batch_callback()));
    progress.finish("Scan complete");

    print_file_lines(&report, list_files);

    let videos = report.extracted_outputs();
    if !videos.is_empty() && should_extract_frames(options, videos.len())? {
        let extractor =
            FfmpegFrameExtractor::new(options.frames.ffmpeg_path.clone(), options.frames.timeout);
        let summary = ExtractFramesUseCase::new(extractor).execute(&videos, &options.frames_dir());
        report.frames = Some(summary);
    }

    if let Some(path) = &options.report_path {
        JsonReportWriter
            .write(path, &report)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    println!();
    print!("{}", report.summary_text());

    Ok(())
}

fn should_extract_frames(options: &BatchOptions, video_count: usize) -> Result<bool> {
    match options.frames.mode {
        FrameMode::Always => Ok(true),
        FrameMode::Never => Ok(false),
        FrameMode::Ask if std::io::stdin().is_terminal() => confirm_frame_extraction(video_count),
        FrameMode::Ask => Ok(false),
    }
}

fn print_file_lines(report: &BatchReport, list_all: bool) {
    println!();
    for file in &report.files {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());

        match &file.status {
            FileStatus::Extracted { .. } => {
                if list_all {
                    println!("[+] {}: {}", name, file.status);
                }
            }
            FileStatus::SkippedNoMotionTag | FileStatus::SkippedNoPayload => {
                if list_all {
                    println!("[-] {}: {}", name, file.status);
                }
            }
            _ => println!("[!] {}: {}", name, file.status),
        }
    }
}
