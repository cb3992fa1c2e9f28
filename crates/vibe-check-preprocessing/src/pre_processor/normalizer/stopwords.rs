use ahash::HashSet;
use stop_words::{get, LANGUAGE};

/// Fixed set of common English words removed before vectorization.
///
/// Loaded once from the bundled language list and immutable afterwards.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The bundled English stopword list.
    #[must_use]
    pub fn english() -> Self {
        let words = get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self { words }
    }

    /// A set built from an explicit word list.
    #[must_use]
    pub fn from_words(words: &[&str]) -> Self {
        let words = words.iter().map(|w| w.to_lowercase()).collect();
        Self { words }
    }

    /// Exact membership test; callers are expected to have folded case first.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
