use sprs::CsMat;
use tracing::debug;

use super::{count_vectorizer::CountVectorizer, params::VectorizerParams};

/// TF-IDF vectorizer: term counts weighted by smoothed inverse document
/// frequency, with L2-normalized rows.
///
/// `to_bytes`/`from_bytes` define the serialized artifact a trained
/// deployment ships; consumers treat those bytes as opaque.
#[derive(Clone, Debug, bincode::Encode, bincode::Decode, serde::Serialize, serde::Deserialize)]
pub struct TfidfVectorizer {
    count_vectorizer: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<T: AsRef<str> + Sync>(texts: &[T], params: VectorizerParams) -> Self {
        debug!(num_texts = texts.len(), "Fitting TfidfVectorizer");
        let (count_vectorizer, tf_matrix) = CountVectorizer::fit_transform(texts, params);
        debug!("Calculating IDF values");

        // idf = ln((n_docs + 1) / (df + 1)) + 1
        let n_docs = texts.len() as f64;
        let num_features = count_vectorizer.num_features();

        let mut df = vec![0usize; num_features];
        for row_vec in tf_matrix.outer_iterator() {
            for (col_idx, _val) in row_vec.iter() {
                df[col_idx] += 1;
            }
        }

        let idf = df
            .iter()
            .map(|&doc_freq| ((n_docs + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0)
            .collect();
        debug!("IDF calculation complete");

        Self {
            count_vectorizer,
            idf,
        }
    }

    pub fn transform<T: AsRef<str> + Sync>(&self, texts: &[T]) -> CsMat<f64> {
        debug!(
            num_texts = texts.len(),
            "Transforming texts using TfidfVectorizer"
        );
        let mut tf_matrix = self.count_vectorizer.transform(texts);
        let sublinear = self.count_vectorizer.params().sublinear_tf();

        for mut row_vec in tf_matrix.outer_iterator_mut() {
            for (col_idx, val) in row_vec.iter_mut() {
                if sublinear {
                    *val = 1.0 + val.ln();
                }
                *val *= self.idf[col_idx];
            }
            // L2 normalization
            let norm = row_vec.iter().map(|(_, &v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, val) in row_vec.iter_mut() {
                    *val /= norm;
                }
            }
        }
        tf_matrix
    }

    pub fn fit_transform<T: AsRef<str> + Sync>(
        texts: &[T],
        params: VectorizerParams,
    ) -> (Self, CsMat<f64>) {
        let vectorizer = Self::fit(texts, params);
        let transformed = vectorizer.transform(texts);
        (vectorizer, transformed)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (vectorizer, _) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(vectorizer)
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.count_vectorizer.num_features()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &ahash::HashMap<String, usize> {
        self.count_vectorizer.vocabulary()
    }

    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: [&str; 3] = ["love pizza", "love movie", "terrible movie pizza"];

    #[test]
    fn idf_weights_rare_terms_higher() {
        let vectorizer = TfidfVectorizer::fit(&CORPUS, VectorizerParams::default());
        let vocab = vectorizer.vocabulary();
        let idf = vectorizer.idf();
        // "terrible" appears in one document, "love" in two.
        assert!(idf[vocab["terrible"]] > idf[vocab["love"]]);
    }

    #[test]
    fn rows_are_l2_normalized() {
        let vectorizer = TfidfVectorizer::fit(&CORPUS, VectorizerParams::default());
        let matrix = vectorizer.transform(&CORPUS);
        for row in matrix.outer_iterator() {
            let norm = row.iter().map(|(_, &v)| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "row norm was {norm}");
        }
    }

    #[test]
    fn out_of_vocabulary_rows_stay_zero() {
        let vectorizer = TfidfVectorizer::fit(&CORPUS, VectorizerParams::default());
        let matrix = vectorizer.transform(&["unknown words only"]);
        assert_eq!(matrix.outer_view(0).unwrap().nnz(), 0);
    }

    #[test]
    fn bytes_round_trip_preserves_behavior() {
        let vectorizer = TfidfVectorizer::fit(&CORPUS, VectorizerParams::default());
        let bytes = vectorizer.to_bytes().unwrap();
        let restored = TfidfVectorizer::from_bytes(&bytes).unwrap();

        assert_eq!(restored.num_features(), vectorizer.num_features());
        assert_eq!(restored.vocabulary(), vectorizer.vocabulary());
        assert_eq!(
            restored.transform(&["love terrible pizza"]),
            vectorizer.transform(&["love terrible pizza"])
        );
    }

    #[test]
    fn sublinear_tf_dampens_repeats() {
        let params = VectorizerParams::new(1..=1, 1.0, 1.0, true);
        let corpus = ["love love love love pizza", "movie pizza"];
        let vectorizer = TfidfVectorizer::fit(&corpus, params);
        let vocab = vectorizer.vocabulary().clone();
        let matrix = vectorizer.transform(&corpus);
        let row = matrix.outer_view(0).unwrap();

        // 1 + ln(4) is well under 4x the weight of a single occurrence.
        let love = row.get(vocab["love"]).copied().unwrap();
        let pizza = row.get(vocab["pizza"]).copied().unwrap();
        assert!(love / pizza < 4.0 * vectorizer.idf()[vocab["love"]] / vectorizer.idf()[vocab["pizza"]]);
    }
}
