use ahash::HashMap;
use sprs::CsMat;
use tracing::debug;

use super::{ngrams, params::VectorizerParams, tokenizer};

/// Word n-gram count vectorizer with a fixed, fitted vocabulary.
///
/// Operates on already-normalized text: tokenization is a plain whitespace
/// split, and the vocabulary maps each space-joined n-gram to a stable
/// feature column.
#[derive(Clone, Debug, bincode::Encode, bincode::Decode, serde::Serialize, serde::Deserialize)]
pub struct CountVectorizer {
    params: VectorizerParams,
    vocab: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn fit<T: AsRef<str> + Sync>(texts: &[T], params: VectorizerParams) -> Self {
        debug!(num_texts = texts.len(), "Fitting CountVectorizer");
        let tokenized_texts = tokenizer::tokenize(texts);
        Self::fit_from_tokenized(&tokenized_texts, params, None)
    }

    /// Fit from pre-tokenized texts.
    ///
    /// `precomputed_ngrams` lets `fit_transform` avoid counting n-grams a
    /// second time.
    fn fit_from_tokenized(
        tokenized_texts: &[Vec<String>],
        params: VectorizerParams,
        precomputed_ngrams: Option<&[HashMap<String, usize>]>,
    ) -> Self {
        debug!("Building vocabulary from tokenized texts");

        let vocab_df = precomputed_ngrams.map_or_else(
            || ngrams::build_vocabulary(tokenized_texts, params.ngram_sizes()),
            |ngram_maps| {
                debug!("Using pre-computed n-grams for vocabulary building");
                let vocab_df = dashmap::DashMap::with_hasher(ahash::RandomState::default());

                for ngram_map in ngram_maps {
                    for ngram in ngram_map.keys() {
                        vocab_df
                            .entry(ngram.clone())
                            .and_modify(|df| *df += 1)
                            .or_insert(1usize);
                    }
                }
                vocab_df
            },
        );

        let vocab_size = vocab_df.len();
        let n_docs = tokenized_texts.len();
        let min_count = params.min_doc_count(n_docs);
        let max_count = params.max_doc_count(n_docs);

        debug!(min_count, max_count, "Applying document-frequency filtering");
        let filtered_vocab = vocab_df
            .into_iter()
            .filter(|(_, df)| {
                let df = *df as f64;
                df >= min_count && df <= max_count
            })
            .map(|(ngram, _)| ngram)
            .collect::<Vec<_>>();
        debug!(
            original_size = vocab_size,
            filtered_size = filtered_vocab.len(),
            "Vocabulary filtered by document frequency"
        );

        let mut sorted_ngrams = filtered_vocab;
        sorted_ngrams.sort();
        let vocab = sorted_ngrams
            .into_iter()
            .enumerate()
            .map(|(idx, ngram)| (ngram, idx))
            .collect::<HashMap<String, usize>>();

        debug!(vocab_size = vocab.len(), "CountVectorizer fitting complete");

        Self { params, vocab }
    }

    pub fn transform<T: AsRef<str> + Sync>(&self, texts: &[T]) -> CsMat<f64> {
        debug!(
            num_texts = texts.len(),
            "Transforming texts using CountVectorizer"
        );
        let tokenized_texts = tokenizer::tokenize(texts);
        self.transform_from_tokenized(&tokenized_texts, texts.len(), None)
    }

    /// Transform from pre-tokenized texts, building the CSR matrix directly.
    fn transform_from_tokenized(
        &self,
        tokenized_texts: &[Vec<String>],
        num_texts: usize,
        precomputed_ngrams: Option<&[HashMap<String, usize>]>,
    ) -> CsMat<f64> {
        let mut indptr = Vec::with_capacity(num_texts + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();

        indptr.push(0);

        let mut push_row = |ngram_counts: &HashMap<String, usize>| {
            let mut row_entries = ngram_counts
                .iter()
                .filter_map(|(ngram, &count)| {
                    self.vocab.get(ngram).map(|&col_idx| (col_idx, count as f64))
                })
                .collect::<Vec<_>>();

            row_entries.sort_by_key(|(col_idx, _)| *col_idx);
            for (col_idx, count) in row_entries {
                indices.push(col_idx);
                data.push(count);
            }
            indptr.push(indices.len());
        };

        if let Some(ngram_maps) = precomputed_ngrams {
            for ngram_counts in ngram_maps {
                push_row(ngram_counts);
            }
        } else {
            for tokens in tokenized_texts {
                let ngram_counts = ngrams::count_ngrams(tokens, self.params.ngram_sizes());
                push_row(&ngram_counts);
            }
        }

        debug!(
            non_zero_entries = data.len(),
            "Text transformation complete"
        );
        CsMat::new((num_texts, self.num_features()), indptr, indices, data)
    }

    /// Fit and transform while counting n-grams only once.
    pub fn fit_transform<T: AsRef<str> + Sync>(
        texts: &[T],
        params: VectorizerParams,
    ) -> (Self, CsMat<f64>) {
        debug!(
            num_texts = texts.len(),
            "fit_transform: tokenizing and counting n-grams once"
        );

        let tokenized_texts = tokenizer::tokenize(texts);
        let ngram_maps: Vec<_> = tokenized_texts
            .iter()
            .map(|tokens| ngrams::count_ngrams(tokens, params.ngram_sizes()))
            .collect();

        let vectorizer = Self::fit_from_tokenized(&tokenized_texts, params, Some(&ngram_maps));
        let transformed =
            vectorizer.transform_from_tokenized(&tokenized_texts, texts.len(), Some(&ngram_maps));

        (vectorizer, transformed)
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    /// Vocabulary as n-gram text to feature column.
    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocab
    }

    #[must_use]
    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }
}
