use super::split_sentences;

/// Produce a bounded-length extractive summary.
///
/// Leading sentences are appended verbatim while the running length stays
/// within `max_length` characters; the first sentence that would exceed
/// the limit stops the scan. When not even the first sentence fits, the
/// raw text is hard-truncated to exactly `max_length` characters instead.
pub fn summarize(text: &str, max_length: usize) -> String {
    let mut summary = String::new();
    let mut summary_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        let sentence_chars = sentence.chars().count();
        let added = if summary.is_empty() {
            sentence_chars
        } else {
            sentence_chars + 1
        };

        if summary_chars + added > max_length {
            break;
        }

        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(sentence);
        summary_chars += added;
    }

    if summary.is_empty() {
        return text.chars().take(max_length).collect();
    }

    summary
}
