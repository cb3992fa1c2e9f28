//! Text normalization.
//!
//! Maps arbitrary user text into the bag-of-lemmas form the vectorizer's
//! vocabulary was fit on. The transform is a fixed sequence: strip URLs and
//! mentions, replace every non-letter with a space, lowercase, split on
//! whitespace, drop stopwords, lemmatize, rejoin. Each step is independently
//! testable and the whole pipeline is total: any input string, including
//! empty and whitespace-only ones, produces a (possibly empty) output.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

mod lemmatizer;
mod stopwords;

pub use lemmatizer::WordnetLemmatizer;
pub use stopwords::StopwordSet;

/// "http"/"www"/"@" followed by any run of non-whitespace characters.
static URL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|@\S+").expect("valid url/mention pattern"));

/// Any character outside a-z / A-Z. Replaced with a space, never removed,
/// so punctuation can't glue two adjacent words together.
static NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z]").expect("valid non-letter pattern"));

static STOPWORDS: LazyLock<StopwordSet> = LazyLock::new(StopwordSet::english);
static LEMMATIZER: LazyLock<WordnetLemmatizer> = LazyLock::new(WordnetLemmatizer::bundled);

/// Normalizes raw text into lowercase, stopword-free, lemmatized tokens.
///
/// The stopword set and lemmatizer are shared, read-only, process-wide
/// resources loaded on first use; construction never re-reads them.
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer {
    stopwords: &'static StopwordSet,
    lemmatizer: &'static WordnetLemmatizer,
}

impl TextNormalizer {
    /// Normalizer backed by the bundled English resources.
    #[must_use]
    pub fn new() -> Self {
        Self::with_resources(&STOPWORDS, &LEMMATIZER)
    }

    /// Normalizer with explicit resources.
    #[must_use]
    pub fn with_resources(
        stopwords: &'static StopwordSet,
        lemmatizer: &'static WordnetLemmatizer,
    ) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    /// Maps raw text to space-joined lowercase lemmas.
    ///
    /// An empty result is valid output, not an error: it means every token
    /// was a stopword or was filtered away. The caller decides whether blank
    /// normalized text is acceptable downstream.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = URL_MENTION.replace_all(raw, "");
        let letters = NON_LETTER.replace_all(&stripped, " ");
        let folded = letters.to_lowercase();

        let lemmas = folded
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect::<Vec<_>>();

        debug!(
            raw_len = raw.len(),
            num_tokens = lemmas.len(),
            "Normalized text"
        );
        lemmas.join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        TextNormalizer::new().normalize(input)
    }

    #[test]
    fn strips_urls_and_mentions() {
        assert_eq!(norm("I LOVE this!!! http://x.co @bob"), "love");
        assert_eq!(norm("www.example.com love"), "love");
        assert_eq!(norm("@someone @else pizza"), "pizza");
    }

    #[test]
    fn empty_input() {
        assert_eq!(norm(""), "");
    }

    #[test]
    fn whitespace_only_input() {
        assert_eq!(norm("   "), "");
        assert_eq!(norm("\t\n\r"), "");
    }

    #[test]
    fn stopwords_only_input() {
        assert_eq!(norm("the a an is"), "");
    }

    #[test]
    fn lemmatizes_plural_nouns() {
        assert_eq!(norm("RUNNING dogs are happy"), "running dog happy");
    }

    #[test]
    fn punctuation_becomes_separator() {
        // Non-letters split words rather than joining them.
        assert_eq!(norm("pizza,movie"), "pizza movie");
        assert_eq!(norm("pizza123movie"), "pizza movie");
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(norm("Café!!!"), "caf");
    }

    #[test]
    fn pure_punctuation() {
        assert_eq!(norm("!!! ??? ... 123 :-)"), "");
    }

    #[test]
    fn output_is_lowercase_letters_and_spaces_only() {
        let inputs = [
            "MiXeD CaSe 42 @user http://t.co/x !!",
            "ünïcödé ærø 你好 🎉",
            "a1b2c3 ... (parens) [brackets]",
        ];
        for input in inputs {
            let out = norm(input);
            assert!(
                out.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
                "unexpected char in {out:?}"
            );
            assert!(!out.contains("  "), "doubled space in {out:?}");
            assert!(!out.starts_with(' ') && !out.ends_with(' '));
        }
    }

    #[test]
    fn output_contains_no_stopword_tokens() {
        let out = norm("I think that this movie is the best and we all love it");
        for token in out.split_whitespace() {
            assert!(!STOPWORDS.contains(token), "stopword {token:?} survived");
        }
    }

    #[test]
    fn renormalizing_reintroduces_no_character_classes() {
        let once = norm("Dogs & cats!!! 100% @war http://x.co");
        let twice = TextNormalizer::new().normalize(&once);
        assert!(twice.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
    }

    #[test]
    fn long_input_does_not_panic() {
        let long = "LOVE pizza!!! @someone ".repeat(20_000);
        let out = norm(&long);
        assert!(out.starts_with("love pizza"));
    }

    #[test]
    fn custom_resources_are_honored() {
        let stopwords = Box::leak(Box::new(StopwordSet::from_words(&["pizza"])));
        let lemmatizer = Box::leak(Box::new(WordnetLemmatizer::with_entries(&[], &[])));
        let normalizer = TextNormalizer::with_resources(stopwords, lemmatizer);
        assert_eq!(normalizer.normalize("pizza movie"), "movie");
    }
}
