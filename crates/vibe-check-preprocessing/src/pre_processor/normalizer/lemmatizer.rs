//! Noun lemmatization over a bundled lexical resource.
//!
//! Tokens are reduced with the WordNet noun detachment process: irregular
//! forms come from an exception table, everything else goes through a fixed
//! rule list whose candidates only count when the bundled noun index knows
//! them. No part-of-speech tagging happens, so verbs and adjectives usually
//! pass through unchanged ("running" stays "running"); the vocabulary the
//! downstream vectorizer was fit on has the same behavior baked in, so
//! "improving" this would shift the feature distribution under the model.

use std::borrow::Cow;

use ahash::{HashMap, HashSet};

/// Noun suffix detachment rules, applied in this order.
const NOUN_RULES: [(&str, &str); 9] = [
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

static NOUN_EXCEPTIONS: &str = include_str!("../../../data/lexicon/noun_exc.tsv");
static NOUN_INDEX: &str = include_str!("../../../data/lexicon/noun_index.txt");

/// Surface-form to lemma mapping, stateless per call.
#[derive(Debug, Clone)]
pub struct WordnetLemmatizer {
    exceptions: HashMap<String, String>,
    index: HashSet<String>,
}

impl WordnetLemmatizer {
    /// Lemmatizer over the bundled exception table and noun index.
    ///
    /// A malformed bundled file is unrecoverable and aborts startup.
    #[must_use]
    pub fn bundled() -> Self {
        let exceptions = NOUN_EXCEPTIONS
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let mut parts = line.split_whitespace();
                let surface = parts.next().expect("exception line has a surface form");
                let lemma = parts
                    .next()
                    .unwrap_or_else(|| panic!("exception line {line:?} is missing a lemma"));
                (surface.to_string(), lemma.to_string())
            })
            .collect();

        let index = NOUN_INDEX
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        Self { exceptions, index }
    }

    /// Lemmatizer over explicit entries.
    #[must_use]
    pub fn with_entries(exceptions: &[(&str, &str)], lemmas: &[&str]) -> Self {
        Self {
            exceptions: exceptions
                .iter()
                .map(|(s, l)| (s.to_string(), l.to_string()))
                .collect(),
            index: lemmas.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Reduces a token to its dictionary lemma, or returns it unchanged when
    /// neither the exception table nor the detachment rules resolve it.
    #[must_use]
    pub fn lemmatize<'a>(&'a self, word: &'a str) -> Cow<'a, str> {
        if let Some(lemma) = self.exceptions.get(word) {
            return Cow::Borrowed(lemma.as_str());
        }

        // The original form competes with the first round of candidates;
        // among known forms the shortest wins.
        let mut forms = apply_rules(std::slice::from_ref(&word));
        let best_first = std::iter::once(word)
            .chain(forms.iter().map(String::as_str))
            .filter(|form| self.index.contains(*form))
            .min_by_key(|form| form.len());
        if let Some(best) = best_first {
            return Cow::Owned(best.to_string());
        }

        // Keep detaching until a known form appears or nothing is left.
        while !forms.is_empty() {
            forms = apply_rules(&forms);
            let best = forms
                .iter()
                .filter(|form| self.index.contains(*form))
                .min_by_key(|form| form.len());
            if let Some(best) = best {
                return Cow::Owned(best.clone());
            }
        }

        Cow::Borrowed(word)
    }

    #[must_use]
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    #[must_use]
    pub fn index_len(&self) -> usize {
        self.index.len()
    }
}

fn apply_rules<S: AsRef<str>>(forms: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    for form in forms {
        for (suffix, replacement) in NOUN_RULES {
            if let Some(stem) = form.as_ref().strip_suffix(suffix) {
                out.push(format!("{stem}{replacement}"));
            }
        }
    }
    out
}
