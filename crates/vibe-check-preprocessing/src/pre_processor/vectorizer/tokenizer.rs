use std::borrow::Cow;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

/// Minimum number of texts to consider parallelization
const MIN_TEXTS_FOR_PARALLEL: usize = 100;

/// Minimum total character count to consider parallelization
const MIN_CHARS_FOR_PARALLEL: usize = 10_000;

fn progress_bar_setup(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("valid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

fn tokenize_texts_par<T: AsRef<str> + Sync>(texts: &[T]) -> Vec<Vec<String>> {
    debug!(num_texts = texts.len(), "Using parallel tokenization");
    let pb = progress_bar_setup(texts.len(), "Tokenizing texts in parallel");
    let result = texts
        .par_iter()
        .progress_with(pb.clone())
        .map(|text| split_words(text.as_ref()))
        .collect();
    pb.finish_and_clear();
    result
}

fn tokenize_texts<T: AsRef<str>>(texts: &[T]) -> Vec<Vec<String>> {
    debug!(num_texts = texts.len(), "Using sequential tokenization");
    texts
        .iter()
        .map(|text| split_words(text.as_ref()))
        .collect()
}

/// Determine whether the batch is large enough for parallel processing.
///
/// Parallelization pays off with many texts (>= 100) or a large total
/// character count (>= 10,000); below that the thread spawning overhead
/// dominates the splitting work.
#[inline]
fn should_use_parallel<T: AsRef<str>>(texts: &[T]) -> bool {
    let num_texts = texts.len();

    if num_texts >= MIN_TEXTS_FOR_PARALLEL {
        return true;
    }

    // For fewer texts, estimate the total workload from a sample.
    let total_chars: usize = if num_texts > 20 {
        let sample_chars: usize = texts.iter().take(20).map(|s| s.as_ref().len()).sum();
        (sample_chars * num_texts) / 20
    } else {
        texts.iter().map(|s| s.as_ref().len()).sum()
    };

    total_chars >= MIN_CHARS_FOR_PARALLEL
}

/// Split whitespace-normalized texts into word tokens, one vector per text.
pub fn tokenize<T: AsRef<str> + Sync>(texts: &[T]) -> Vec<Vec<String>> {
    if should_use_parallel(texts) {
        tokenize_texts_par(texts)
    } else {
        tokenize_texts(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        let tokens = tokenize(&["love pizza", "  running  dog ", ""]);
        assert_eq!(tokens[0], vec!["love", "pizza"]);
        assert_eq!(tokens[1], vec!["running", "dog"]);
        assert!(tokens[2].is_empty());
    }

    #[test]
    fn large_batches_tokenize_identically() {
        let texts: Vec<String> = (0..200).map(|i| format!("token number {i}")).collect();
        let tokens = tokenize(&texts);
        assert_eq!(tokens.len(), 200);
        assert_eq!(tokens[7], vec!["token", "number", "7"]);
    }
}
