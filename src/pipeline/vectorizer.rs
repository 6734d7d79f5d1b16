//! TF-IDF text vectorization.
//!
//! Maps raw task text to a sparse, L2-normalized vector over a vocabulary of
//! unigrams and bigrams learned from the training corpus:
//! 1. Lowercase and split into tokens of two or more word characters
//! 2. Drop English stop words
//! 3. Count unigrams and adjacent-token bigrams
//! 4. Weight counts by smoothed inverse document frequency
//!
//! The vocabulary is rebuilt from scratch on every fit; nothing carries over
//! between retrains.

use crate::error::{Result, TriageError};
use crate::pipeline::stop_words::is_stop_word;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("Valid token regex"));

/// Sparse row: (feature index, weight), sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TfidfVectorizer {
    /// Term → feature index, indices assigned in lexicographic term order
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per feature index
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from a corpus
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| analyze(d.as_ref())).collect();

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(TriageError::Validation(
                "empty vocabulary; documents only contain stop words".to_string(),
            ));
        }

        let mut terms: Vec<&str> = document_frequency.keys().copied().collect();
        terms.sort_unstable();

        let n_documents = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.iter().enumerate() {
            let df = document_frequency[term] as f64;
            idf.push(((1.0 + n_documents) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert((*term).to_string(), index);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Number of features (vocabulary size)
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Vectorize a single document; unknown terms are ignored
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row = SparseVector::with_capacity(counts.len());
        for (index, count) in counts {
            let idf = self.idf.get(index).ok_or_else(|| {
                TriageError::Other(format!(
                    "vocabulary index {} out of range for {} idf weights",
                    index,
                    self.idf.len()
                ))
            })?;
            row.push((index, count * idf));
        }

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in row.iter_mut() {
                *weight /= norm;
            }
        }

        Ok(row)
    }

    /// Vectorize a batch of documents
    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }
}

/// Lowercase, tokenize, drop stop words, and emit unigrams plus bigrams
pub fn analyze(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}
