use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use super::{BatchItem, Segment, TranscriptionResult};
use crate::audio::AudioExtractor;
use crate::config::{AudioConfig, WhisperConfig};
use crate::error::{Result, TranscribeError};

/// Client for the external speech-recognition service.
///
/// Audio files are submitted directly; video files are composed through
/// [`AudioExtractor`] with the intermediate audio file removed on every
/// exit path, including cancellation.
pub struct TranscriptionClient {
    config: WhisperConfig,
    extractor: AudioExtractor,
    temp_dir: PathBuf,
    http: reqwest::Client,
}

/// Extensions routed straight to the recognition service.
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "flac", "ogg", "aac", "opus"];

/// Extensions routed through audio extraction first.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "m4v"];

impl TranscriptionClient {
    pub fn new(whisper: WhisperConfig, audio: AudioConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(whisper.timeout_seconds))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config: whisper,
            temp_dir: audio.temp_dir.clone(),
            extractor: AudioExtractor::new(audio),
            http,
        }
    }

    /// Submit an audio file for transcription.
    ///
    /// Segment-level timing is requested from the service only when
    /// `verbose` is true.
    pub async fn transcribe_audio(&self, path: &Path, verbose: bool) -> Result<TranscriptionResult> {
        if !path.exists() {
            return Err(TranscribeError::FileNotFound(path.to_path_buf()));
        }

        info!("Transcribing audio: {}", path.display());

        let audio_data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        let response_format = if verbose { "verbose_json" } else { "json" };

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio_data).file_name(file_name),
            )
            .text("model", self.config.model.clone())
            .text("temperature", self.config.temperature.to_string())
            .text("response_format", response_format.to_string());

        if let Some(language) = &self.config.language {
            // "auto" is a caller-side catch-all, not a service language code
            if language != "auto" {
                form = form.text("language", language.clone());
            }
        }

        let mut request = self.http.post(&self.config.endpoint).multipart(form);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::TranscriptionFailed(format!(
                "service returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let wire: WhisperResponse = serde_json::from_str(&body).map_err(|e| {
            TranscribeError::TranscriptionFailed(format!("unparsable service response: {}", e))
        })?;

        let result = wire.normalize();
        info!(
            "Transcription completed: {} characters, {} segments",
            result.text.len(),
            result.segments.as_ref().map_or(0, |s| s.len())
        );

        Ok(result)
    }

    /// Extract audio from a video file and transcribe it.
    ///
    /// The intermediate audio file is deleted unconditionally; a deletion
    /// failure is logged and never masks the primary result or error.
    pub async fn transcribe_video(&self, path: &Path, verbose: bool) -> Result<TranscriptionResult> {
        if !path.exists() {
            return Err(TranscribeError::FileNotFound(path.to_path_buf()));
        }

        let temp_audio = TempAudio::new(&self.temp_dir);
        self.extractor.extract(path, temp_audio.path()).await?;
        self.transcribe_audio(temp_audio.path(), verbose).await
    }

    /// Transcribe a batch of media files, selecting the audio or video path
    /// per item by extension.
    ///
    /// Items are processed sequentially in input order and failures are
    /// isolated: a failing item yields an `Err` outcome at its index while
    /// the rest of the batch proceeds.
    pub async fn transcribe_multiple(&self, paths: &[PathBuf], verbose: bool) -> Vec<BatchItem> {
        let mut items = Vec::with_capacity(paths.len());

        for path in paths {
            let outcome = match classify_media(path) {
                MediaKind::Audio => self.transcribe_audio(path, verbose).await,
                MediaKind::Video => self.transcribe_video(path, verbose).await,
                MediaKind::Unknown => {
                    warn!(
                        "Unrecognized extension for {}, attempting video transcription",
                        path.display()
                    );
                    self.transcribe_video(path, verbose).await
                }
            };

            if let Err(e) = &outcome {
                warn!("Batch item {} failed: {}", path.display(), e);
            }

            items.push(BatchItem {
                path: path.clone(),
                outcome,
            });
        }

        items
    }
}

/// Media kind inferred from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Unknown,
}

/// Classify a path as audio or video input by extension.
pub fn classify_media(path: &Path) -> MediaKind {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Audio
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Unknown
    }
}

/// Owns an intermediate audio path for the lifetime of one video
/// transcription and removes the file when dropped.
struct TempAudio {
    path: PathBuf,
}

impl TempAudio {
    fn new(temp_dir: &Path) -> Self {
        // Timestamp plus random token keeps concurrent invocations from
        // colliding in the shared temp directory.
        let name = format!(
            "transcribe_{}_{}.wav",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        );
        Self {
            path: temp_dir.join(name),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            // Extraction may have failed before the file ever appeared.
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove temp audio {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Whisper API response body for both `json` and `verbose_json` formats.
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    segments: Option<Vec<WhisperSegment>>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    #[serde(default)]
    id: u32,
    start: f64,
    end: f64,
    text: String,
    #[serde(default)]
    avg_logprob: Option<f64>,
    #[serde(default)]
    no_speech_prob: Option<f64>,
}

impl WhisperResponse {
    fn normalize(self) -> TranscriptionResult {
        let segments = self.segments.map(|segments| {
            segments
                .into_iter()
                .map(|seg| Segment {
                    id: seg.id,
                    start: seg.start,
                    end: seg.end,
                    text: seg.text.trim().to_string(),
                    avg_logprob: seg.avg_logprob,
                    no_speech_prob: seg.no_speech_prob,
                })
                .collect()
        });

        TranscriptionResult {
            text: self.text.trim().to_string(),
            language: self.language,
            duration: self.duration,
            segments,
        }
    }
}
