use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the transcription pipeline.
///
/// Temp-file cleanup failures are deliberately not represented here:
/// they are logged and swallowed so they can never mask the primary
/// result or error of a call.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// The input path did not exist when transcription or extraction began.
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    /// ffmpeg exited non-zero or produced no output file.
    #[error("audio extraction failed for {path}: {reason}")]
    ExtractionFailed { path: PathBuf, reason: String },

    /// The recognition service returned a non-success response or a body
    /// that could not be parsed into the canonical shape.
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transcription request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TranscribeError>;
