mod normalizer;
mod vectorizer;

pub use normalizer::{StopwordSet, TextNormalizer, WordnetLemmatizer};
pub use vectorizer::{CountVectorizer, TfidfVectorizer, VectorizerParams};
