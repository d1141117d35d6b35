pub mod client;

pub use client::TranscriptionClient;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TranscribeError;

/// A time-bounded span of recognized speech.
///
/// Segments arrive ordered by `start` with `start <= end`; overlap is not
/// enforced by the service, so consumers must tolerate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Segment ID
    pub id: u32,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Transcribed text
    pub text: String,
    /// Average log probability
    pub avg_logprob: Option<f64>,
    /// No speech probability
    pub no_speech_prob: Option<f64>,
}

/// Canonical transcription produced by one recognition call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Full transcription text
    pub text: String,
    /// Detected or hinted language
    pub language: Option<String>,
    /// Audio duration in seconds, when the service reports it
    pub duration: Option<f64>,
    /// Timed segments; absent when verbose timing was not requested or the
    /// service did not return any
    pub segments: Option<Vec<Segment>>,
}

/// One entry of a batch transcription, in input order.
///
/// A failing item carries its error instead of aborting the remaining batch;
/// callers inspect per-item status.
#[derive(Debug)]
pub struct BatchItem {
    pub path: PathBuf,
    pub outcome: Result<TranscriptionResult, TranscribeError>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
