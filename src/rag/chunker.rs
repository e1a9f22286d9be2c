/// Greedy word-wrap chunker.
///
/// Newlines are replaced with spaces before splitting, so chunk boundaries
/// ignore paragraph and sentence structure; this word-wrap behavior is
/// deliberate and kept for compatibility with existing corpora. Lengths
/// are counted in characters (Unicode scalar values), not bytes.
///
/// A single word longer than `max_chars` is emitted whole as its own
/// oversized chunk; words are never split mid-word, so the `max_chars`
/// bound holds for every chunk except those single-word cases.
pub struct TextChunker {
    max_chars: usize,
}

impl TextChunker {
    /// Create a chunker with the given maximum chunk length in characters.
    /// `max_chars` must be at least 1 (enforced by config validation).
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Split `text` into chunks of at most `max_chars` characters.
    ///
    /// Pure and deterministic; empty or whitespace-only input yields an
    /// empty vector.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let normalized = text.replace(['\n', '\r'], " ");

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0usize;

        for word in normalized.split_whitespace() {
            let word_chars = word.chars().count();
            if current.is_empty() {
                current.push_str(word);
                current_chars = word_chars;
            } else if current_chars + 1 + word_chars <= self.max_chars {
                current.push(' ');
                current.push_str(word);
                current_chars += 1 + word_chars;
            } else {
                chunks.push(std::mem::take(&mut current));
                current.push_str(word);
                current_chars = word_chars;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
