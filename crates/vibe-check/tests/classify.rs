//! End-to-end artifact round trip: write a classifier pair to disk the way a
//! deployment would ship it, load it back, and classify raw posts.

use vibe_check::{
    ArtifactPaths, Classifier, MultinomialNb, TfidfVectorizer, VectorizerParams,
};

/// A small classifier pair with coefficients aligned to the fitted
/// vocabulary: "positive" leans on love/pizza/sunshine, "negative" on
/// terrible/traffic/morning.
fn classifier_pair() -> (TfidfVectorizer, MultinomialNb) {
    let corpus = [
        "love pizza",
        "love sunshine",
        "terrible traffic",
        "terrible morning",
    ];
    let vectorizer = TfidfVectorizer::fit(&corpus, VectorizerParams::default());

    let negative_words = ["terrible", "traffic", "morning"];
    let positive_words = ["love", "pizza", "sunshine"];
    let n_features = vectorizer.num_features();

    let mut negative = vec![0.02_f64.ln(); n_features];
    let mut positive = vec![0.02_f64.ln(); n_features];
    for (ngram, &idx) in vectorizer.vocabulary() {
        if negative_words.contains(&ngram.as_str()) {
            negative[idx] = 0.3_f64.ln();
        }
        if positive_words.contains(&ngram.as_str()) {
            positive[idx] = 0.3_f64.ln();
        }
    }

    let model = MultinomialNb::from_parts(
        vec!["negative".into(), "positive".into()],
        vec![0.5_f64.ln(), 0.5_f64.ln()],
        vec![negative, positive],
    );
    (vectorizer, model)
}

fn write_artifacts(dir: &std::path::Path) -> ArtifactPaths {
    let (vectorizer, model) = classifier_pair();
    let paths = ArtifactPaths::from_dir(dir);
    std::fs::write(&paths.vectorizer, vectorizer.to_bytes().unwrap()).unwrap();
    std::fs::write(&paths.model, model.to_bytes().unwrap()).unwrap();
    paths
}

#[test]
fn load_and_classify_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path());

    let classifier = Classifier::load(&paths).unwrap();
    assert_eq!(classifier.classes(), ["negative", "positive"]);

    let label = classifier
        .classify("Sunshine and pizza, I love Saturdays! @weekend http://pics.example")
        .unwrap();
    assert_eq!(label, "positive");

    let label = classifier
        .classify("TERRIBLE traffic this morning :(")
        .unwrap();
    assert_eq!(label, "negative");
}

#[test]
fn batch_predictions_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path());
    let classifier = Classifier::load(&paths).unwrap();

    let predictions = classifier
        .predict_batch(&["love this sunshine", "terrible terrible traffic"])
        .unwrap();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].label(), "positive");
    assert_eq!(predictions[1].label(), "negative");
    for prediction in &predictions {
        let total: f64 = prediction.scores().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn missing_artifacts_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::from_dir(dir.path());
    assert!(Classifier::load(&paths).is_err());
}

#[test]
fn mismatched_pair_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path());

    // Overwrite the model with one trained against a different vocabulary.
    let tiny = MultinomialNb::from_parts(
        vec!["negative".into(), "positive".into()],
        vec![0.5_f64.ln(), 0.5_f64.ln()],
        vec![vec![0.5_f64.ln(); 2], vec![0.5_f64.ln(); 2]],
    );
    std::fs::write(&paths.model, tiny.to_bytes().unwrap()).unwrap();

    let err = Classifier::load(&paths).unwrap_err();
    assert!(format!("{err:#}").contains("mismatch"));
}
