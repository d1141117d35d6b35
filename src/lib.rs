/// Media Transcriber
///
/// Transcription-and-formatting pipeline: extracts audio from video,
/// obtains a time-coded transcript from an external recognition service,
/// and renders it as plain text, markdown, SubRip subtitles, a timed
/// script, or a bundled artifact with an extractive summary.

pub mod audio;
pub mod config;
pub mod error;
pub mod format;
pub mod timecode;
pub mod transcription;

// Re-export main types for easy access
pub use crate::audio::AudioExtractor;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Result, TranscribeError};
pub use crate::format::{
    FormatDispatcher, FormattedTranscript, OutputFormat, RenderedOutput, ScriptEntry,
    SubtitleEntry,
};
pub use crate::transcription::{
    BatchItem, Segment, TranscriptionClient, TranscriptionResult,
};
