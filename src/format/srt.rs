use serde::{Deserialize, Serialize};
use std::fmt;

use super::split_sentences;
use crate::timecode::to_srt_clock;
use crate::transcription::Segment;

/// One SubRip subtitle block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// Sequential number, 1-based
    pub index: u32,
    /// Start timestamp, `HH:MM:SS,mmm`
    pub start: String,
    /// End timestamp, `HH:MM:SS,mmm`
    pub end: String,
    /// Subtitle text
    pub text: String,
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n",
            self.index, self.start, self.end, self.text
        )
    }
}

/// Render subtitle entries as an SRT document, blocks separated by a
/// blank line.
pub fn render_srt(entries: &[SubtitleEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits timed segments into fixed-word subtitle chunks.
///
/// Chunk time ranges are a linear interpolation over the parent segment:
/// a uniform speaking rate is assumed, since the service does not provide
/// per-word timing. This is a documented approximation, not a bug.
#[derive(Debug, Clone)]
pub struct SubtitleChunker {
    words_per_line: usize,
    fallback_sentence_seconds: f64,
}

impl SubtitleChunker {
    pub fn new(words_per_line: usize, fallback_sentence_seconds: f64) -> Self {
        Self {
            words_per_line: words_per_line.max(1),
            fallback_sentence_seconds,
        }
    }

    /// Chunk timed segments into subtitle entries, in segment order then
    /// chunk order, indices assigned densely from 1.
    pub fn chunk_segments(&self, segments: &[Segment]) -> Vec<SubtitleEntry> {
        let mut entries = Vec::new();

        for segment in segments {
            let words: Vec<&str> = segment.text.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            self.chunk_words(&words, segment.start, segment.end, &mut entries);
        }

        entries
    }

    /// Fallback for untimed input: split the raw text into sentences and
    /// give each one a fixed window, windows laid out back to back.
    pub fn chunk_text(&self, text: &str) -> Vec<SubtitleEntry> {
        let mut entries = Vec::new();
        let mut window_start = 0.0;

        for sentence in split_sentences(text) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            let window_end = window_start + self.fallback_sentence_seconds;
            self.chunk_words(&words, window_start, window_end, &mut entries);
            window_start = window_end;
        }

        // Punctuation-only input matches no sentence; treat the whole
        // string as one so any non-blank text yields well-formed output.
        if entries.is_empty() {
            let words: Vec<&str> = text.split_whitespace().collect();
            if !words.is_empty() {
                self.chunk_words(&words, 0.0, self.fallback_sentence_seconds, &mut entries);
            }
        }

        entries
    }

    fn chunk_words(&self, words: &[&str], start: f64, end: f64, entries: &mut Vec<SubtitleEntry>) {
        let n = words.len();
        let span = end - start;

        for (i, chunk) in words.chunks(self.words_per_line).enumerate() {
            let lo = i * self.words_per_line;
            let hi = (lo + self.words_per_line).min(n);

            let chunk_start = start + (lo as f64 / n as f64) * span;
            let chunk_end = start + (hi as f64 / n as f64) * span;

            entries.push(SubtitleEntry {
                index: entries.len() as u32 + 1,
                start: to_srt_clock(chunk_start),
                end: to_srt_clock(chunk_end),
                text: chunk.join(" "),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: u32, start: f64, end: f64, text: &str) -> Segment {
        Segment {
            id,
            start,
            end,
            text: text.to_string(),
            avg_logprob: None,
            no_speech_prob: None,
        }
    }

    #[test]
    fn test_single_segment_single_block() {
        let chunker = SubtitleChunker::new(10, 10.0);
        let segments = [segment(
            0,
            0.0,
            5.0,
            "hello world foo bar baz qux quux corge grault garply",
        )];

        let entries = chunker.chunk_segments(&segments);
        assert_eq!(entries.len(), 1);

        let srt = render_srt(&entries);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:05,000\nhello world foo bar baz qux quux corge grault garply\n"
        );
    }

    #[test]
    fn test_interpolated_chunk_boundaries() {
        let chunker = SubtitleChunker::new(2, 10.0);
        // 4 words over 8 seconds, 2 words per chunk
        let entries = chunker.chunk_segments(&[segment(0, 0.0, 8.0, "one two three four")]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start, "00:00:00,000");
        assert_eq!(entries[0].end, "00:00:04,000");
        assert_eq!(entries[1].start, "00:00:04,000");
        assert_eq!(entries[1].end, "00:00:08,000");
    }

    #[test]
    fn test_no_words_lost_or_duplicated() {
        let chunker = SubtitleChunker::new(3, 10.0);
        let segments = [
            segment(0, 0.0, 5.0, "alpha beta gamma delta"),
            segment(1, 5.0, 9.0, "epsilon zeta"),
            segment(2, 9.0, 9.5, "eta theta iota kappa lambda mu nu"),
        ];

        let entries = chunker.chunk_segments(&segments);

        let original: Vec<&str> = segments
            .iter()
            .flat_map(|s| s.text.split_whitespace())
            .collect();
        let chunked: Vec<&str> = entries
            .iter()
            .flat_map(|e| e.text.split_whitespace())
            .collect();
        assert_eq!(original, chunked);
    }

    #[test]
    fn test_indices_dense_and_sequential() {
        let chunker = SubtitleChunker::new(1, 10.0);
        let entries = chunker.chunk_segments(&[segment(0, 0.0, 3.0, "a b c")]);

        let indices: Vec<u32> = entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_segment_is_skipped() {
        let chunker = SubtitleChunker::new(10, 10.0);
        let entries = chunker.chunk_segments(&[
            segment(0, 0.0, 2.0, "   "),
            segment(1, 2.0, 4.0, "kept"),
        ]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "kept");
        assert_eq!(entries[0].index, 1);
    }

    #[test]
    fn test_text_fallback_uses_fixed_windows() {
        let chunker = SubtitleChunker::new(10, 10.0);
        let entries = chunker.chunk_text("First sentence here. Second one!");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start, "00:00:00,000");
        assert_eq!(entries[0].end, "00:00:10,000");
        assert_eq!(entries[1].start, "00:00:10,000");
        assert_eq!(entries[1].end, "00:00:20,000");
    }

    #[test]
    fn test_text_fallback_without_terminal_punctuation() {
        let chunker = SubtitleChunker::new(10, 10.0);
        let entries = chunker.chunk_text("no punctuation at all");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "no punctuation at all");
        assert_eq!(entries[0].start, "00:00:00,000");
        assert_eq!(entries[0].end, "00:00:10,000");
    }

    #[test]
    fn test_text_fallback_punctuation_only_input() {
        let chunker = SubtitleChunker::new(10, 10.0);
        let entries = chunker.chunk_text("...");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "...");
        assert_eq!(entries[0].start, "00:00:00,000");
        assert_eq!(entries[0].end, "00:00:10,000");

        assert!(chunker.chunk_text("   ").is_empty());
    }

    #[test]
    fn test_text_fallback_chunks_long_sentences() {
        let chunker = SubtitleChunker::new(2, 10.0);
        let entries = chunker.chunk_text("one two three four.");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].end, "00:00:05,000");
        assert_eq!(entries[1].start, "00:00:05,000");
        assert_eq!(entries[1].end, "00:00:10,000");
    }
}
