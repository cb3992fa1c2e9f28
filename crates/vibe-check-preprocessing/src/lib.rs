//! Pre-processing for vibe-check.
//!
//! This crate turns raw social media text into the sparse term-frequency
//! features the classifier was trained on: normalization (URL/mention
//! stripping, stopword removal, lemmatization) followed by TF-IDF
//! vectorization with a pre-fit vocabulary.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod pre_processor;
