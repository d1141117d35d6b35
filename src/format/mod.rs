pub mod script;
pub mod srt;
pub mod summary;

pub use script::{to_script, ScriptEntry};
pub use srt::{render_srt, SubtitleChunker, SubtitleEntry};
pub use summary::summarize;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::config::FormatConfig;
use crate::timecode::to_clock;
use crate::transcription::TranscriptionResult;

/// Output shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Markdown,
    Srt,
    Script,
    Complete,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "srt" => Ok(Self::Srt),
            "script" => Ok(Self::Script),
            "complete" => Ok(Self::Complete),
            other => Err(format!(
                "unknown format '{}', expected text|markdown|srt|script|complete",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Srt => "srt",
            Self::Script => "script",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Bundled artifact with every rendering of one transcription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedTranscript {
    pub raw: String,
    pub markdown: String,
    pub srt: String,
    pub script: Vec<ScriptEntry>,
    pub duration: Option<f64>,
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A single rendered output shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RenderedOutput {
    Text(String),
    Script(Vec<ScriptEntry>),
    Complete(FormattedTranscript),
}

/// Renders a [`TranscriptionResult`] into the requested output shape.
///
/// Each format is an independent pure transform of the same result; there
/// is no state carried between calls.
#[derive(Debug, Clone)]
pub struct FormatDispatcher {
    config: FormatConfig,
}

impl FormatDispatcher {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, result: &TranscriptionResult, format: OutputFormat) -> RenderedOutput {
        match format {
            OutputFormat::Text => RenderedOutput::Text(result.text.trim().to_string()),
            OutputFormat::Markdown => RenderedOutput::Text(self.to_markdown(result)),
            OutputFormat::Srt => RenderedOutput::Text(self.to_srt(result)),
            OutputFormat::Script => RenderedOutput::Script(to_script(result)),
            OutputFormat::Complete => RenderedOutput::Complete(self.to_complete(result)),
        }
    }

    /// Render the SRT document, chunking segments when timing exists and
    /// falling back to fixed sentence windows over the raw text otherwise.
    pub fn to_srt(&self, result: &TranscriptionResult) -> String {
        let chunker = SubtitleChunker::new(
            self.config.words_per_line,
            self.config.fallback_sentence_seconds,
        );

        let entries = match result.segments.as_deref() {
            Some(segments) if !segments.is_empty() => chunker.chunk_segments(segments),
            _ => chunker.chunk_text(&result.text),
        };

        render_srt(&entries)
    }

    /// Render a markdown document: header lines for language and duration
    /// when known, then timestamped bullets per segment or the raw text
    /// under a Transcript heading.
    pub fn to_markdown(&self, result: &TranscriptionResult) -> String {
        let mut doc = String::from("# Transcription\n\n");

        if let Some(language) = &result.language {
            doc.push_str(&format!("**Language:** {}\n", language));
        }
        if let Some(duration) = result.duration {
            doc.push_str(&format!("**Duration:** {}\n", to_clock(duration)));
        }
        if result.language.is_some() || result.duration.is_some() {
            doc.push('\n');
        }

        match result.segments.as_deref() {
            Some(segments) if !segments.is_empty() => {
                for segment in segments {
                    doc.push_str(&format!(
                        "- **[{}]** {}\n",
                        to_clock(segment.start),
                        segment.text.trim()
                    ));
                }
            }
            _ => {
                doc.push_str("## Transcript\n\n");
                doc.push_str(result.text.trim());
                doc.push('\n');
            }
        }

        doc
    }

    fn to_complete(&self, result: &TranscriptionResult) -> FormattedTranscript {
        let summary = if self.config.include_summary {
            Some(summarize(&result.text, self.config.summary_max_length))
        } else {
            None
        };

        FormattedTranscript {
            raw: result.text.trim().to_string(),
            markdown: self.to_markdown(result),
            srt: self.to_srt(result),
            script: to_script(result),
            duration: result.duration,
            language: result.language.clone(),
            summary,
        }
    }
}

/// Split text into sentences on terminal punctuation (`.`, `!`, `?`).
///
/// Locale-naive by design: abbreviations, decimals and non-Latin
/// punctuation are all mishandled. Text without any terminal punctuation
/// comes back as a single sentence.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    static SENTENCE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SENTENCE_RE.get_or_init(|| Regex::new(r"[^.!?]+[.!?]*").expect("valid regex"));

    re.find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}
