use std::path::Path;
use std::process::Stdio;
use tracing::{debug, info};

use crate::config::AudioConfig;
use crate::error::{Result, TranscribeError};

/// Extracts the audio track of a video file into a standalone file
/// suitable for the recognition service.
#[derive(Debug, Clone)]
pub struct AudioExtractor {
    config: AudioConfig,
}

impl AudioExtractor {
    pub fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    /// Pull the audio track out of `video_path` into `audio_path`.
    ///
    /// Writes exactly one file at the destination and never touches the
    /// source. Cleanup of the destination is the caller's responsibility.
    pub async fn extract(&self, video_path: &Path, audio_path: &Path) -> Result<()> {
        if !video_path.exists() {
            return Err(TranscribeError::FileNotFound(video_path.to_path_buf()));
        }

        info!("Extracting audio: {}", video_path.display());

        let sample_rate = self.config.sample_rate.to_string();
        let output = tokio::process::Command::new("ffmpeg")
            .arg("-i")
            .arg(video_path)
            .arg("-vn") // no video stream
            .arg("-acodec")
            .arg(&self.config.codec)
            .arg("-ar")
            .arg(&sample_rate)
            .arg("-ac")
            .arg("1") // mono
            .arg("-y") // overwrite existing
            .arg(audio_path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .last()
                .unwrap_or("ffmpeg exited with an error")
                .to_string();
            return Err(TranscribeError::ExtractionFailed {
                path: video_path.to_path_buf(),
                reason,
            });
        }

        if !audio_path.exists() {
            return Err(TranscribeError::ExtractionFailed {
                path: video_path.to_path_buf(),
                reason: "ffmpeg produced no output file".to_string(),
            });
        }

        debug!("Audio extracted to {}", audio_path.display());
        Ok(())
    }
}
