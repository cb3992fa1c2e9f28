//! # vibe-check
//!
//! Sentiment classification for social media posts.
//!
//! The heavy lifting happened at training time, elsewhere: this crate loads a
//! pre-trained classifier pair (a fitted TF-IDF vectorizer and a multinomial
//! Naive Bayes model), normalizes incoming text the same way the training
//! corpus was normalized, and reports the predicted class label.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vibe_check::{ArtifactPaths, Classifier};
//!
//! let classifier = Classifier::load(&ArtifactPaths::from_env())?;
//!
//! let prediction = classifier.predict("Best. Concert. EVER. @bestbandever")?;
//! println!("{}: {prediction}", prediction.label());
//!
//! // Or just the label
//! let label = classifier.classify("the wifi is down again...")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Batch Processing
//!
//! ```rust,no_run
//! use vibe_check::{ArtifactPaths, Classifier};
//!
//! let classifier = Classifier::load(&ArtifactPaths::from_env())?;
//! let posts = vec!["loved it", "hated it", "it exists"];
//! let predictions = classifier.predict_batch(&posts)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
mod model;
mod pipeline;

use anyhow::{ensure, Result};

pub use model::{
    ArtifactPaths, MultinomialNb, DEFAULT_MODEL_DIR, MODEL_DIR_ENV, MODEL_FILENAME,
    VECTORIZER_FILENAME,
};
pub use pipeline::Prediction;
pub use vibe_check_preprocessing::pre_processor::{
    StopwordSet, TextNormalizer, TfidfVectorizer, VectorizerParams, WordnetLemmatizer,
};

/// A loaded classifier pair plus the normalizer feeding it.
///
/// Everything inside is read-only after construction, so one instance can be
/// shared freely across callers.
#[derive(Debug)]
pub struct Classifier {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
}

impl Classifier {
    /// Load the classifier pair from its artifact files.
    ///
    /// Meant to run once at process start; failures are fatal configuration
    /// errors, not per-request conditions.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let (vectorizer, model) = model::load_artifacts(paths)?;
        Self::from_parts(vectorizer, model)
    }

    /// Assemble a classifier from already-decoded parts.
    pub fn from_parts(vectorizer: TfidfVectorizer, model: MultinomialNb) -> Result<Self> {
        ensure!(
            vectorizer.num_features() == model.n_features(),
            "vectorizer has {} features but model expects {}",
            vectorizer.num_features(),
            model.n_features()
        );
        Ok(Self {
            normalizer: TextNormalizer::new(),
            vectorizer,
            model,
        })
    }

    /// Class probabilities for one text.
    pub fn predict(&self, text: impl AsRef<str>) -> Result<Prediction> {
        pipeline::predict(
            &self.normalizer,
            &self.vectorizer,
            &self.model,
            text.as_ref(),
        )
    }

    /// Class probabilities for multiple texts.
    pub fn predict_batch<T: AsRef<str> + Sync>(&self, texts: &[T]) -> Result<Vec<Prediction>> {
        pipeline::predict_batch(&self.normalizer, &self.vectorizer, &self.model, texts)
    }

    /// Predicted label for one text.
    pub fn classify(&self, text: impl AsRef<str>) -> Result<String> {
        self.predict(text)
            .map(|prediction| prediction.label().to_string())
    }

    /// Class labels in the model's order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }
}
