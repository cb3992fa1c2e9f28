use core::fmt;

use anyhow::{Context, Result};
use tracing::debug;
use vibe_check_preprocessing::pre_processor::{TextNormalizer, TfidfVectorizer};

use crate::model::MultinomialNb;

/// Class probabilities for one input, in the model's class order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Prediction {
    classes: Vec<String>,
    probabilities: Vec<f64>,
}

impl Prediction {
    fn new(classes: Vec<String>, probabilities: Vec<f64>) -> Self {
        debug_assert_eq!(classes.len(), probabilities.len());
        debug_assert!(
            (probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-6,
            "probabilities must sum to 1.0"
        );
        Self {
            classes,
            probabilities,
        }
    }

    /// Label of the highest-probability class.
    #[must_use]
    pub fn label(&self) -> &str {
        let best = self
            .probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0, |(idx, _)| idx);
        &self.classes[best]
    }

    /// Probability of the predicted label.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.probabilities
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Probability of a specific class label, if the model knows it.
    #[must_use]
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.classes
            .iter()
            .position(|class| class == label)
            .map(|idx| self.probabilities[idx])
    }

    /// Label/probability pairs in the model's class order.
    pub fn scores(&self) -> impl Iterator<Item = (&str, f64)> {
        self.classes
            .iter()
            .map(String::as_str)
            .zip(self.probabilities.iter().copied())
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, prob) in self.scores() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "P({label})={prob:.3}")?;
            first = false;
        }
        Ok(())
    }
}

/// Normalize one text and score it with the classifier pair.
pub fn predict(
    normalizer: &TextNormalizer,
    vectorizer: &TfidfVectorizer,
    model: &MultinomialNb,
    text: &str,
) -> Result<Prediction> {
    let normalized = normalizer.normalize(text);
    debug!(
        raw_len = text.len(),
        normalized_len = normalized.len(),
        "Normalized input"
    );

    let features = vectorizer.transform(std::slice::from_ref(&normalized));
    let row = features
        .outer_view(0)
        .context("vectorizer produced no feature row")?;
    let probabilities = model.predict_proba(row);
    Ok(Prediction::new(model.classes().to_vec(), probabilities))
}

/// Batch variant of [`predict`]: one normalization pass, one transform.
pub fn predict_batch<T: AsRef<str> + Sync>(
    normalizer: &TextNormalizer,
    vectorizer: &TfidfVectorizer,
    model: &MultinomialNb,
    texts: &[T],
) -> Result<Vec<Prediction>> {
    let normalized: Vec<String> = texts
        .iter()
        .map(|text| normalizer.normalize(text.as_ref()))
        .collect();
    let features = vectorizer.transform(&normalized);

    let mut predictions = Vec::with_capacity(texts.len());
    for idx in 0..texts.len() {
        let row = features
            .outer_view(idx)
            .with_context(|| format!("vectorizer produced no feature row for input {idx}"))?;
        let probabilities = model.predict_proba(row);
        predictions.push(Prediction::new(model.classes().to_vec(), probabilities));
    }
    Ok(predictions)
}
