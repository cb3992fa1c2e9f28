use sprs::CsVecView;
use tracing::debug;

/// Pre-trained multinomial Naive Bayes scorer.
///
/// Holds only the fitted coefficients: per-class log priors and per-class
/// feature log probabilities. Scoring a document is the joint log likelihood
/// `log P(class) + sum_j x_j * log P(feature_j | class)` over the non-zero
/// features, softmaxed into probabilities. Training lives wherever the
/// artifact was produced; this type never fits.
#[derive(Clone, Debug, bincode::Encode, bincode::Decode, serde::Serialize, serde::Deserialize)]
pub struct MultinomialNb {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Assemble a scorer from fitted coefficients.
    ///
    /// `feature_log_prob` holds one row per class, all rows the same length.
    pub fn from_parts(
        classes: Vec<String>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Self {
        assert_eq!(
            classes.len(),
            class_log_prior.len(),
            "one log prior per class"
        );
        assert_eq!(
            classes.len(),
            feature_log_prob.len(),
            "one coefficient row per class"
        );
        let n_features = feature_log_prob.first().map_or(0, Vec::len);
        assert!(
            feature_log_prob.iter().all(|row| row.len() == n_features),
            "coefficient rows must share one feature dimension"
        );
        Self {
            classes,
            class_log_prior,
            feature_log_prob,
        }
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    /// Joint log likelihood of the feature row under each class.
    #[must_use]
    pub fn predict_log_joint(&self, row: CsVecView<'_, f64>) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, coef)| {
                prior
                    + row
                        .iter()
                        .map(|(col_idx, value)| value * coef[col_idx])
                        .sum::<f64>()
            })
            .collect()
    }

    /// Class probabilities via a numerically stable softmax over the joint
    /// log likelihoods.
    #[must_use]
    pub fn predict_proba(&self, row: CsVecView<'_, f64>) -> Vec<f64> {
        let log_joint = self.predict_log_joint(row);
        let max = log_joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = log_joint.iter().map(|&score| (score - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / sum).collect()
    }

    /// Label of the highest-probability class.
    #[must_use]
    pub fn predict(&self, row: CsVecView<'_, f64>) -> &str {
        let log_joint = self.predict_log_joint(row);
        let best = log_joint
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0, |(idx, _)| idx);
        debug!(label = %self.classes[best], "Predicted class");
        &self.classes[best]
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (model, _) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(model)
    }
}
