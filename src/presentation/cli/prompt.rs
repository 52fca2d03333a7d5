//! Interactive prompts

use anyhow::{Context, Result};
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;

/// Asks whether frames should be extracted from the recovered videos
pub fn confirm_frame_extraction(video_count: usize) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Extract one frame per second from {} video(s)?",
            video_count
        ))
        .default(false)
        .interact()
        .context("Failed to read frame extraction answer")
}
