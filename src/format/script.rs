use serde::{Deserialize, Serialize};

use crate::timecode::to_clock;
use crate::transcription::TranscriptionResult;

/// One timestamped line of a spoken-word script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Human-readable start time
    pub timestamp: String,
    /// Entry duration in seconds
    pub duration: f64,
    /// Spoken text
    pub text: String,
}

/// Map a transcription to script entries, one per segment.
///
/// Without segments the whole transcript becomes a single entry spanning
/// the reported duration (zero when the service did not report one).
pub fn to_script(result: &TranscriptionResult) -> Vec<ScriptEntry> {
    match result.segments.as_deref() {
        Some(segments) if !segments.is_empty() => segments
            .iter()
            .map(|segment| ScriptEntry {
                timestamp: to_clock(segment.start),
                duration: segment.end - segment.start,
                text: segment.text.trim().to_string(),
            })
            .collect(),
        _ => vec![ScriptEntry {
            timestamp: "00:00:00".to_string(),
            duration: result.duration.unwrap_or(0.0),
            text: result.text.clone(),
        }],
    }
}
