use ahash::HashMap;
use dashmap::DashMap;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

/// Count word n-grams in one tokenized document.
///
/// Keys are the n-gram words joined with a single space, so unigram keys are
/// the words themselves.
pub fn count_ngrams(tokens: &[String], ngram_sizes: &[usize]) -> HashMap<String, usize> {
    let mut counts = HashMap::default();

    for &n in ngram_sizes {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

/// Document frequency per n-gram across the whole corpus.
pub fn build_vocabulary(
    tokenized_texts: &[Vec<String>],
    ngram_sizes: &[usize],
) -> DashMap<String, usize, ahash::RandomState> {
    let vocab_df = DashMap::with_hasher(ahash::RandomState::default());

    tokenized_texts.par_iter().progress().for_each(|tokens| {
        let ngrams = count_ngrams(tokens, ngram_sizes);
        for ngram in ngrams.into_keys() {
            vocab_df
                .entry(ngram)
                .and_modify(|df| *df += 1)
                .or_insert(1usize);
        }
    });
    vocab_df
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn unigram_counts() {
        let counts = count_ngrams(&words("love pizza love"), &[1]);
        assert_eq!(counts["love"], 2);
        assert_eq!(counts["pizza"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn bigrams_join_with_spaces() {
        let counts = count_ngrams(&words("running dog happy"), &[2]);
        assert_eq!(counts["running dog"], 1);
        assert_eq!(counts["dog happy"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn window_larger_than_document_is_skipped() {
        let counts = count_ngrams(&words("love"), &[1, 2, 3]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["love"], 1);
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let docs = vec![words("love love pizza"), words("love movie")];
        let vocab_df = build_vocabulary(&docs, &[1]);
        assert_eq!(*vocab_df.get("love").unwrap(), 2);
        assert_eq!(*vocab_df.get("pizza").unwrap(), 1);
        assert_eq!(*vocab_df.get("movie").unwrap(), 1);
    }
}
