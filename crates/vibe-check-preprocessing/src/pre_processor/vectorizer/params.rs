use std::ops::RangeInclusive;

#[derive(Clone, Debug, PartialEq, bincode::Encode, bincode::Decode, serde::Serialize, serde::Deserialize)]
pub struct VectorizerParams {
    /// Word n-gram sizes to extract, e.g. `[1]` for unigrams, `[1, 2]` for
    /// unigrams plus bigrams.
    ngram_sizes: Vec<usize>,
    /// Minimum document frequency for a term to enter the vocabulary.
    /// - In (0.0, 1.0): a proportion of documents
    /// - >= 1.0: an absolute document count
    min_df: f64,
    /// Maximum document frequency for a term to stay in the vocabulary.
    /// - In (0.0, 1.0]: a proportion of documents
    /// - > 1.0: an absolute document count
    max_df: f64,
    /// Replace term frequency `tf` with `1 + ln(tf)` before idf weighting.
    sublinear_tf: bool,
}

impl VectorizerParams {
    pub fn new(
        ngram_range: impl Into<RangeInclusive<usize>>,
        min_df: f64,
        max_df: f64,
        sublinear_tf: bool,
    ) -> Self {
        let ngram_sizes = ngram_range.into().collect::<Vec<_>>();
        assert!(
            !ngram_sizes.is_empty() && ngram_sizes[0] > 0,
            "ngram_range must contain at least one positive size"
        );
        assert!(
            min_df > 0.0,
            "min_df must be positive (proportion in (0.0, 1.0) or absolute count >= 1.0)"
        );
        assert!(
            max_df > 0.0,
            "max_df must be positive (proportion in (0.0, 1.0] or absolute count > 1.0)"
        );
        Self {
            ngram_sizes,
            min_df,
            max_df,
            sublinear_tf,
        }
    }

    #[must_use]
    pub fn ngram_sizes(&self) -> &[usize] {
        &self.ngram_sizes
    }

    #[must_use]
    pub fn min_df(&self) -> f64 {
        self.min_df
    }

    #[must_use]
    pub fn max_df(&self) -> f64 {
        self.max_df
    }

    #[must_use]
    pub fn sublinear_tf(&self) -> bool {
        self.sublinear_tf
    }

    /// Minimum document count implied by `min_df` for a corpus of `n_docs`.
    #[must_use]
    pub fn min_doc_count(&self, n_docs: usize) -> f64 {
        if self.min_df < 1.0 {
            self.min_df * n_docs as f64
        } else {
            self.min_df
        }
    }

    /// Maximum document count implied by `max_df` for a corpus of `n_docs`.
    #[must_use]
    pub fn max_doc_count(&self, n_docs: usize) -> f64 {
        if self.max_df <= 1.0 {
            self.max_df * n_docs as f64
        } else {
            self.max_df
        }
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            ngram_sizes: vec![1],
            min_df: 1.0,
            max_df: 1.0,
            sublinear_tf: false,
        }
    }
}

impl From<((usize, usize), f64, f64, bool)> for VectorizerParams {
    fn from(value: ((usize, usize), f64, f64, bool)) -> Self {
        Self::new(value.0 .0..=value.0 .1, value.1, value.2, value.3)
    }
}
