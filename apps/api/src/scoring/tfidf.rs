//! TF-IDF vectorization fit fresh on a handful of documents.
//!
//! Tokens are alphabetic runs of two or more letters, lowercased. Stop words
//! are dropped before n-grams are formed. Weights use smoothed idf
//! `ln((1 + n) / (1 + df)) + 1` on raw counts, and every row is l2-normalized.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::scoring::stop_words::is_stop_word;

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    #[error("Empty vocabulary; documents contain only stop words or no tokens")]
    EmptyVocabulary,
}

/// Sparse row: vocabulary index to weight.
pub type SparseVector = BTreeMap<usize, f64>;

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    pub ngram_range: (usize, usize),
    pub max_features: usize,
    pub remove_stop_words: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            ngram_range: (1, 3),
            max_features: 5000,
            remove_stop_words: true,
        }
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[a-zA-Z]{2,}\b").expect("static regex"))
}

impl TfidfVectorizer {
    /// Lowercased word tokens after stop-word removal.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        token_pattern()
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !(self.remove_stop_words && is_stop_word(t)))
            .map(str::to_string)
            .collect()
    }

    /// Contiguous n-grams of the tokens for every n in `ngram_range`.
    pub fn ngrams(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            grams.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        grams
    }

    /// Builds the vocabulary from `documents` and returns one normalized row each.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<Vec<SparseVector>, VectorizeError> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf: HashMap<String, usize> = HashMap::new();
                for gram in self.ngrams(doc) {
                    *tf.entry(gram).or_default() += 1;
                }
                tf
            })
            .collect();

        // term -> (corpus frequency, document frequency)
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tf in &counts {
            for (term, count) in tf {
                let entry = stats.entry(term.as_str()).or_default();
                entry.0 += count;
                entry.1 += 1;
            }
        }
        if stats.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        // Most frequent terms win; BTreeMap order breaks ties alphabetically.
        let mut ranked: Vec<(&str, (usize, usize))> = stats.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
        ranked.truncate(self.max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f64;
        let vocabulary: HashMap<&str, (usize, f64)> = ranked
            .iter()
            .enumerate()
            .map(|(index, (term, (_, df)))| {
                let idf = ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0;
                (*term, (index, idf))
            })
            .collect();

        Ok(counts
            .iter()
            .map(|tf| {
                let mut row: SparseVector = tf
                    .iter()
                    .filter_map(|(term, count)| {
                        vocabulary
                            .get(term.as_str())
                            .map(|(index, idf)| (*index, *count as f64 * idf))
                    })
                    .collect();
                let norm = row.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.values_mut().for_each(|w| *w /= norm);
                }
                row
            })
            .collect())
    }
}

/// Cosine similarity of two sparse vectors. 0.0 when either is all zeros.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(index, wa)| b.get(index).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Similarity of two texts under a vectorizer fit on just those two texts.
pub fn text_similarity(
    vectorizer: &TfidfVectorizer,
    left: &str,
    right: &str,
) -> Result<f64, VectorizeError> {
    let rows = vectorizer.fit_transform(&[left, right])?;
    Ok(cosine_similarity(&rows[0], &rows[1]))
}
