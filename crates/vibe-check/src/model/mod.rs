use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use tracing::debug;
use vibe_check_preprocessing::pre_processor::TfidfVectorizer;

mod naive_bayes;
pub use naive_bayes::MultinomialNb;

/// Serialized classifier coefficients.
pub const MODEL_FILENAME: &str = "sentiment-model.bin";
/// Serialized fitted vectorizer.
pub const VECTORIZER_FILENAME: &str = "tfidf-vectorizer.bin";

/// Overrides the default artifact directory.
pub const MODEL_DIR_ENV: &str = "VIBE_CHECK_MODEL_DIR";
pub const DEFAULT_MODEL_DIR: &str = "model_artifacts";

/// Locations of the two artifact files making up a trained classifier pair.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

impl ArtifactPaths {
    /// Standard artifact filenames inside `dir`.
    #[must_use]
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILENAME),
            vectorizer: dir.join(VECTORIZER_FILENAME),
        }
    }

    /// Artifact directory from `VIBE_CHECK_MODEL_DIR`, falling back to
    /// `model_artifacts/`.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = env::var(MODEL_DIR_ENV).unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string());
        Self::from_dir(dir)
    }
}

/// Read and decode the classifier pair.
///
/// Runs once at startup; any failure here is fatal for the process, so the
/// error chain names the offending file. The two artifacts must agree on the
/// feature dimension, so a mismatched pair fails here instead of surfacing
/// as garbage predictions later.
pub(crate) fn load_artifacts(paths: &ArtifactPaths) -> Result<(TfidfVectorizer, MultinomialNb)> {
    let vectorizer_bytes = fs::read(&paths.vectorizer).with_context(|| {
        format!(
            "failed to read vectorizer artifact {}",
            paths.vectorizer.display()
        )
    })?;
    let vectorizer = TfidfVectorizer::from_bytes(&vectorizer_bytes).with_context(|| {
        format!(
            "failed to decode vectorizer artifact {}",
            paths.vectorizer.display()
        )
    })?;

    let model_bytes = fs::read(&paths.model)
        .with_context(|| format!("failed to read model artifact {}", paths.model.display()))?;
    let model = MultinomialNb::from_bytes(&model_bytes)
        .with_context(|| format!("failed to decode model artifact {}", paths.model.display()))?;

    ensure!(
        vectorizer.num_features() == model.n_features(),
        "artifact mismatch: vectorizer has {} features but model expects {}",
        vectorizer.num_features(),
        model.n_features()
    );

    debug!(
        num_features = vectorizer.num_features(),
        num_classes = model.classes().len(),
        "Loaded classifier artifacts"
    );
    Ok((vectorizer, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_from_dir_use_standard_filenames() {
        let paths = ArtifactPaths::from_dir("/tmp/artifacts");
        assert!(paths.model.ends_with(MODEL_FILENAME));
        assert!(paths.vectorizer.ends_with(VECTORIZER_FILENAME));
    }

    #[test]
    fn missing_artifacts_name_the_file() {
        let paths = ArtifactPaths::from_dir("/nonexistent/artifact/dir");
        let err = load_artifacts(&paths).unwrap_err();
        assert!(format!("{err:#}").contains(VECTORIZER_FILENAME));
    }
}
